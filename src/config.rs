use std::env;
use std::fmt;

const DEFAULT_SESSION_SECRET: &str = "default_oauth_session_secret";
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/simple_application";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub node_env: String,
    pub session_secret: String,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub google_callback_url: String,
    pub mongo_uri: String,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { var: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { var, message } => {
                write!(f, "Invalid value for {}: {}", var, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, like an unset shell variable.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                var: "PORT".to_string(),
                message: e.to_string(),
            })?,
            None => 8080,
        };

        let google_callback_url = get("GOOGLE_CALLBACK_URL")
            .unwrap_or_else(|| format!("http://localhost:{}/auth/google/callback", port));

        let mongo_uri = get("mongoURI")
            .or_else(|| get("MONGODB_URI"))
            .unwrap_or_else(|| DEFAULT_MONGO_URI.to_string());

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(|| vec!["http://localhost:3000".to_string()]);

        Ok(Self {
            host,
            port,
            node_env: get("NODE_ENV").unwrap_or_else(|| "development".to_string()),
            session_secret: get("SESSION_SECRET")
                .unwrap_or_else(|| DEFAULT_SESSION_SECRET.to_string()),
            google_client_id: get("GOOGLE_CLIENT_ID"),
            google_client_secret: get("GOOGLE_CLIENT_SECRET"),
            google_callback_url,
            mongo_uri,
            allowed_origins,
        })
    }

    pub fn is_production(&self) -> bool {
        self.node_env == "production"
    }

    pub fn uses_default_session_secret(&self) -> bool {
        self.session_secret == DEFAULT_SESSION_SECRET
    }

    /// Client id and secret, only when both are set.
    pub fn google_credentials(&self) -> Option<(&str, &str)> {
        match (&self.google_client_id, &self.google_client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.node_env, "development");
        assert!(!config.is_production());
        assert!(config.uses_default_session_secret());
        assert_eq!(
            config.google_callback_url,
            "http://localhost:8080/auth/google/callback"
        );
        assert_eq!(config.mongo_uri, DEFAULT_MONGO_URI);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert!(config.google_credentials().is_none());
    }

    #[test]
    fn test_reads_values() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("NODE_ENV", "production"),
            ("SESSION_SECRET", "s3cret"),
            ("GOOGLE_CLIENT_ID", "client"),
            ("GOOGLE_CLIENT_SECRET", "secret"),
            ("mongoURI", "mongodb://db:27017/shop"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert!(config.is_production());
        assert!(!config.uses_default_session_secret());
        assert_eq!(config.google_credentials(), Some(("client", "secret")));
        assert_eq!(
            config.google_callback_url,
            "http://localhost:3000/auth/google/callback"
        );
        assert_eq!(config.mongo_uri, "mongodb://db:27017/shop");
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_mongo_uri_fallback() {
        let config = config_from(&[("MONGODB_URI", "mongodb://other:27017/x")]).unwrap();
        assert_eq!(config.mongo_uri, "mongodb://other:27017/x");
    }

    #[test]
    fn test_credentials_need_both_halves() {
        let config = config_from(&[("GOOGLE_CLIENT_ID", "client")]).unwrap();
        assert!(config.google_credentials().is_none());

        let config = config_from(&[("GOOGLE_CLIENT_SECRET", "secret"), ("GOOGLE_CLIENT_ID", "")])
            .unwrap();
        assert!(config.google_credentials().is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "PORT"));
        assert!(err.to_string().starts_with("Invalid value for PORT"));
    }
}
