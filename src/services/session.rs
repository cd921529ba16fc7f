use crate::models::SessionUser;
use crate::utils::AppError;
use actix_web::cookie::{time, Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "session";
pub const STATE_COOKIE: &str = "oauth_state";

const SESSION_TTL_HOURS: i64 = 24;
const STATE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    user: SessionUser,
    iat: usize,
    exp: usize,
}

/// Signed cookie sessions.
///
/// The whole `SessionUser` is stored in an HS256 token keyed by the session
/// secret, so restoring it needs no server-side store.
#[derive(Clone)]
pub struct SessionManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    secure: bool,
}

impl SessionManager {
    pub fn new(secret: &str, secure: bool) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            secure,
        }
    }

    /// Serializes `user` into a fresh session cookie.
    pub fn issue(&self, user: &SessionUser) -> Result<Cookie<'static>, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            user: user.clone(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(SESSION_TTL_HOURS)).timestamp() as usize,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::internal(format!("Failed to sign session: {}", e)))?;

        Ok(self.cookie(SESSION_COOKIE, token, "/", time::Duration::hours(SESSION_TTL_HOURS)))
    }

    /// Restores the user from a session cookie value.
    pub fn user_from_cookie(&self, value: &str) -> Result<SessionUser, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<SessionClaims>(value, &self.decoding, &validation)?;
        Ok(data.claims.user)
    }

    /// Expired session cookie; sending it ends the session.
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.cookie(SESSION_COOKIE, String::new(), "/", time::Duration::ZERO);
        cookie.make_removal();
        cookie
    }

    pub fn state_cookie(&self, state: &str) -> Cookie<'static> {
        self.cookie(
            STATE_COOKIE,
            state.to_string(),
            "/auth",
            time::Duration::minutes(STATE_TTL_MINUTES),
        )
    }

    pub fn state_removal(&self) -> Cookie<'static> {
        let mut cookie = self.cookie(STATE_COOKIE, String::new(), "/auth", time::Duration::ZERO);
        cookie.make_removal();
        cookie
    }

    fn cookie(
        &self,
        name: &'static str,
        value: String,
        path: &'static str,
        max_age: time::Duration,
    ) -> Cookie<'static> {
        Cookie::build(name, value)
            .path(path)
            .http_only(true)
            .secure(self.secure)
            // Lax so the cookie survives the top-level redirect back from the provider.
            .same_site(SameSite::Lax)
            .max_age(max_age)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    fn user() -> SessionUser {
        SessionUser {
            id: "1234567890".into(),
            display_name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            provider: "google".into(),
        }
    }

    #[test]
    fn test_issue_then_restore() {
        let sessions = SessionManager::new("secret", false);
        let cookie = sessions.issue(&user()).unwrap();

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(sessions.user_from_cookie(cookie.value()).unwrap(), user());
    }

    #[test]
    fn test_rejects_foreign_secret() {
        let cookie = SessionManager::new("secret", false).issue(&user()).unwrap();
        let other = SessionManager::new("another-secret", false);

        let err = other.user_from_cookie(cookie.value()).unwrap_err();
        assert_eq!(err.status_code(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_rejects_garbage() {
        let sessions = SessionManager::new("secret", false);
        assert!(sessions.user_from_cookie("not-a-token").is_err());
        assert!(sessions.user_from_cookie("").is_err());
    }

    #[test]
    fn test_rejects_expired_session() {
        let sessions = SessionManager::new("secret", false);
        let past = (Utc::now() - Duration::hours(48)).timestamp() as usize;
        let claims = SessionClaims {
            user: user(),
            iat: past,
            exp: past + 60,
        };
        let token = encode(&Header::default(), &claims, &sessions.encoding).unwrap();

        assert!(sessions.user_from_cookie(&token).is_err());
    }

    #[test]
    fn test_secure_flag_follows_setting() {
        let prod = SessionManager::new("secret", true);
        assert_eq!(prod.issue(&user()).unwrap().secure(), Some(true));
        assert_eq!(prod.state_cookie("abc").secure(), Some(true));

        let dev = SessionManager::new("secret", false);
        assert_eq!(dev.issue(&user()).unwrap().secure(), Some(false));
    }

    #[test]
    fn test_removal_expires_cookie() {
        let sessions = SessionManager::new("secret", false);
        let cookie = sessions.removal();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));

        let state = sessions.state_removal();
        assert_eq!(state.name(), STATE_COOKIE);
        assert_eq!(state.path(), Some("/auth"));
    }
}
