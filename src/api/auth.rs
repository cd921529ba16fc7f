use actix_web::{http::header, web, HttpRequest, HttpResponse, HttpResponseBuilder};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::auth::LOGIN_PATH;
use crate::models::SessionUser;
use crate::services::session::{SessionManager, SESSION_COOKIE, STATE_COOKIE};
use crate::services::IdentityProvider;
use crate::utils::AppError;

const PROFILE_PATH: &str = "/profile";

fn redirect(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location.to_string()));
    builder
}

/// GET /auth/google - start the OAuth login
pub async fn google_auth(
    provider: Option<web::Data<dyn IdentityProvider>>,
    sessions: web::Data<SessionManager>,
) -> Result<HttpResponse, AppError> {
    let provider = provider
        .ok_or_else(|| AppError::service_unavailable("Google login is not configured"))?;

    let state = Uuid::new_v4().to_string();
    log::info!("🔐 GET /auth/google - redirecting to {}", provider.name());

    Ok(redirect(&provider.authorization_url(&state))
        .cookie(sessions.state_cookie(&state))
        .finish())
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// GET /auth/google/callback - finish the OAuth login
pub async fn google_callback(
    req: HttpRequest,
    provider: Option<web::Data<dyn IdentityProvider>>,
    sessions: web::Data<SessionManager>,
    query: web::Query<CallbackQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 GET /auth/google/callback - processing login");

    let provider = provider
        .ok_or_else(|| AppError::service_unavailable("Google login is not configured"))?;

    let failure = |reason: &str| {
        log::warn!("❌ OAuth login failed: {}", reason);
        redirect(LOGIN_PATH).cookie(sessions.state_removal()).finish()
    };

    if let Some(error) = &query.error {
        return Ok(failure(&format!("provider returned error '{}'", error)));
    }

    // Neither code nor error: treated as a failed login, not a fresh
    // authorization request.
    let Some(code) = query.code.as_deref() else {
        return Ok(failure("no authorization code"));
    };

    let expected_state = req.cookie(STATE_COOKIE);
    let state_matches = match (query.state.as_deref(), &expected_state) {
        (Some(got), Some(expected)) => !got.is_empty() && got == expected.value(),
        _ => false,
    };
    if !state_matches {
        return Ok(failure("state mismatch"));
    }

    match provider.authenticate(code).await {
        Ok(user) => {
            log::info!("✅ OAuth login successful: {} via {}", user.email, user.provider);
            Ok(redirect(PROFILE_PATH)
                .cookie(sessions.issue(&user)?)
                .cookie(sessions.state_removal())
                .finish())
        }
        Err(e) => Ok(failure(&e.to_string())),
    }
}

/// GET /profile - requires a session (see `RequireSession`)
pub async fn profile(user: web::ReqData<SessionUser>) -> HttpResponse {
    log::info!("👤 GET /profile - {}", user.email);
    HttpResponse::Ok().json(serde_json::json!({ "user": user.into_inner() }))
}

/// GET /logout
///
/// Sessions live only in the signed cookie, so this clears the browser's copy.
/// A token copied elsewhere stays valid until its `exp` (24h after login).
pub async fn logout(req: HttpRequest, sessions: web::Data<SessionManager>) -> HttpResponse {
    match req.cookie(SESSION_COOKIE) {
        Some(_) => log::info!("👋 GET /logout - session ended"),
        None => log::debug!("👋 GET /logout - no session"),
    }
    redirect("/").cookie(sessions.removal()).finish()
}
