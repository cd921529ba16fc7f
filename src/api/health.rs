use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::database::MongoDB;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    /// `connected`, `unreachable` or `not_configured`
    pub database: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up; see `database` for the store", body = HealthResponse)
    )
)]
pub async fn health_check(db: Option<web::Data<MongoDB>>) -> impl Responder {
    let database = match db {
        Some(db) => match db.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                log::warn!("⚠️  MongoDB ping failed: {}", e);
                "unreachable"
            }
        },
        None => "not_configured",
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        database: database.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::test_app;
    use actix_web::test;
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_without_database() {
        let app = test::init_service(test_app()).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "starter-api");
        assert_eq!(body["database"], "not_configured");
        assert!(body["timestamp"].as_i64().unwrap() > 0);
    }
}
