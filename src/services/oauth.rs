use crate::models::SessionUser;
use crate::utils::AppError;
use async_trait::async_trait;
use serde::Deserialize;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const GOOGLE_SCOPE: &str = "profile email";

/// A third party that vouches for the user's identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Where to send the browser to start the login.
    fn authorization_url(&self, state: &str) -> String;

    /// Exchanges the callback `code` for the user's profile.
    async fn authenticate(&self, code: &str) -> Result<SessionUser, AppError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleProfile {
    id: String,
    email: Option<String>,
    name: Option<String>,
}

impl GoogleProfile {
    fn into_session_user(self) -> Result<SessionUser, AppError> {
        let email = self
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::bad_gateway("Google profile has no email"))?;

        Ok(SessionUser {
            display_name: self.name.unwrap_or_else(|| email.clone()),
            id: self.id,
            email,
            provider: "google".to_string(),
        })
    }
}

pub struct GoogleProvider {
    client_id: String,
    client_secret: String,
    callback_url: String,
    http: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(client_id: &str, client_secret: &str, callback_url: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            callback_url: callback_url.to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn authorization_url(&self, state: &str) -> String {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.callback_url.as_str()),
            ("response_type", "code"),
            ("scope", GOOGLE_SCOPE),
            ("state", state),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", GOOGLE_AUTH_URL, query_string)
    }

    async fn authenticate(&self, code: &str) -> Result<SessionUser, AppError> {
        let token_response = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        if !token_response.status().is_success() {
            let status = token_response.status();
            let body = token_response.text().await.unwrap_or_default();
            log::warn!("❌ Google token exchange returned {}: {}", status, body);
            return Err(AppError::unauthorized("Failed to exchange authorization code"));
        }

        let tokens: TokenResponse = token_response.json().await?;

        let profile: GoogleProfile = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&tokens.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        profile.into_session_user()
    }
}
