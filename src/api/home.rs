use actix_web::{HttpRequest, HttpResponse};

use crate::utils::AppError;

/// Liveness banner.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hello, World! The server is running.")
}

/// Always fails, to show the error envelope.
#[utoipa::path(
    get,
    path = "/api/error-demo",
    tag = "Home",
    responses(
        (status = 404, description = "Always: `Resource not found`")
    )
)]
pub async fn error_demo() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found("Resource not found"))
}

/// Target of every failed or missing login.
pub async fn login_page() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": false,
        "message": "Authentication required",
        "login_url": "/auth/google"
    }))
}

pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    log::debug!("❓ {} {} - no route", req.method(), req.path());
    Err(AppError::not_found("Route not found"))
}
