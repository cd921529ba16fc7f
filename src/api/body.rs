use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use serde_json::{Map, Value};

use crate::utils::AppError;

/// Limit applied to request bodies (100kb).
pub const BODY_LIMIT: usize = 100 * 1024;

/// Request body of the create/update placeholders, as a JSON value.
///
/// - no body, or a content type other than JSON or urlencoded: `{}`
/// - `application/json`: must be an object or an array
/// - `application/x-www-form-urlencoded`: repeated keys become arrays and
///   bracket keys (`a[b]=1`, `tags[]=x`) become nested values
pub struct RequestBody(Value);

impl RequestBody {
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl FromRequest for RequestBody {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let kind = BodyKind::of(req);
        let bytes = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let bytes = bytes.await?;
            Ok(RequestBody(parse(kind, &bytes)?))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn of(req: &HttpRequest) -> Self {
        let essence = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase());

        match essence.as_deref() {
            Some("application/json") => BodyKind::Json,
            Some("application/x-www-form-urlencoded") => BodyKind::Form,
            _ => BodyKind::Other,
        }
    }
}

fn parse(kind: BodyKind, bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match kind {
        BodyKind::Json => parse_json(bytes),
        BodyKind::Form => Ok(parse_form(bytes)),
        BodyKind::Other => Ok(Value::Object(Map::new())),
    }
}

fn parse_json(bytes: &[u8]) -> Result<Value, AppError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::bad_request(format!("Invalid JSON body: {}", e)))?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        _ => Err(AppError::bad_request(
            "Invalid JSON body: expected an object or an array",
        )),
    }
}

fn parse_form(bytes: &[u8]) -> Value {
    let mut root = Value::Object(Map::new());

    for (key, value) in url::form_urlencoded::parse(bytes) {
        if key.is_empty() {
            continue;
        }
        let path = key_path(&key);
        insert(&mut root, &path, Value::String(value.into_owned()));
    }

    root
}

/// Splits `a[b][]` into `["a", "b", ""]`. Keys that are not well-formed
/// bracket paths stay whole.
fn key_path(key: &str) -> Vec<&str> {
    let open = match key.find('[') {
        Some(open) if open > 0 => open,
        _ => return vec![key],
    };

    let mut path = vec![&key[..open]];
    let mut rest = &key[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        match inner.find(']') {
            Some(close) => {
                path.push(&inner[..close]);
                rest = &inner[close + 1..];
            }
            None => return vec![key],
        }
    }

    if rest.is_empty() {
        path
    } else {
        vec![key]
    }
}

fn is_index(segment: &str) -> bool {
    segment.is_empty() || segment.bytes().all(|b| b.is_ascii_digit())
}

fn container_for(segment: &str) -> Value {
    if is_index(segment) {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

/// Adds a second value under an existing leaf: the leaf turns into an array.
fn append(slot: &mut Value, value: Value) {
    match slot {
        Value::Array(items) => items.push(value),
        other => {
            let first = other.take();
            *other = Value::Array(vec![first, value]);
        }
    }
}

fn insert(slot: &mut Value, path: &[&str], value: Value) {
    let Some((segment, rest)) = path.split_first() else {
        return;
    };

    // A named key under an array turns the array into an index-keyed object.
    if let Value::Array(items) = slot {
        if !is_index(segment) {
            let object: Map<String, Value> = items
                .drain(..)
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect();
            *slot = Value::Object(object);
        }
    }

    match slot {
        Value::Array(items) => {
            let existing = segment.parse::<usize>().ok().filter(|i| *i < items.len());
            match (existing, rest.is_empty()) {
                (Some(i), true) => append(&mut items[i], value),
                (Some(i), false) => insert(&mut items[i], rest, value),
                (None, true) => items.push(value),
                (None, false) => {
                    let mut child = container_for(rest[0]);
                    insert(&mut child, rest, value);
                    items.push(child);
                }
            }
        }
        Value::Object(map) => {
            if rest.is_empty() {
                match map.get_mut(*segment) {
                    Some(existing) => append(existing, value),
                    None => {
                        map.insert(segment.to_string(), value);
                    }
                }
                return;
            }

            let child = map
                .entry(segment.to_string())
                .or_insert_with(|| container_for(rest[0]));
            if !child.is_object() && !child.is_array() {
                *child = container_for(rest[0]);
            }
            insert(child, rest, value);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, ResponseError};
    use serde_json::json;

    fn form(body: &str) -> Value {
        parse(BodyKind::Form, body.as_bytes()).unwrap()
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        for kind in [BodyKind::Json, BodyKind::Form, BodyKind::Other] {
            assert_eq!(parse(kind, b"").unwrap(), json!({}));
        }
    }

    #[test]
    fn test_unknown_content_type_is_ignored() {
        assert_eq!(parse(BodyKind::Other, b"plain text").unwrap(), json!({}));
    }

    #[test]
    fn test_json_accepts_objects_and_arrays() {
        assert_eq!(parse(BodyKind::Json, br#"{"a":1}"#).unwrap(), json!({ "a": 1 }));
        assert_eq!(parse(BodyKind::Json, b"[1,2]").unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_json_rejects_top_level_primitives() {
        for body in [r#""str""#, "42", "true", "null"] {
            let err = parse(BodyKind::Json, body.as_bytes()).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{}", body);
        }
    }

    #[test]
    fn test_json_rejects_malformed() {
        let err = parse(BodyKind::Json, b"{ not json").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_form_flat_fields() {
        assert_eq!(
            form("name=Ada&email=ada%40example.com&note=two+words"),
            json!({ "name": "Ada", "email": "ada@example.com", "note": "two words" })
        );
    }

    #[test]
    fn test_form_repeated_keys_become_array() {
        assert_eq!(form("tags=a&tags=b&tags=c"), json!({ "tags": ["a", "b", "c"] }));
    }

    #[test]
    fn test_form_bracket_keys_nest() {
        assert_eq!(
            form("a[b]=1&a[c][d]=2"),
            json!({ "a": { "b": "1", "c": { "d": "2" } } })
        );
        assert_eq!(form("tags[]=x&tags[]=y"), json!({ "tags": ["x", "y"] }));
    }

    #[test]
    fn test_form_indexed_objects_group() {
        assert_eq!(
            form("items[0][name]=pen&items[0][qty]=2&items[1][name]=ink"),
            json!({ "items": [{ "name": "pen", "qty": "2" }, { "name": "ink" }] })
        );
    }

    #[test]
    fn test_form_malformed_brackets_stay_flat() {
        assert_eq!(form("a[b=1&c]d=2"), json!({ "a[b": "1", "c]d": "2" }));
        assert_eq!(form("a[b]x=1"), json!({ "a[b]x": "1" }));
    }

    #[test]
    fn test_form_skips_empty_keys() {
        assert_eq!(form("=orphan&name=Ada"), json!({ "name": "Ada" }));
    }
}
