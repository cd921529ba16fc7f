pub mod auth;
pub mod body;
pub mod health;
pub mod home;
pub mod products;
pub mod swagger;
pub mod users;

use actix_web::web;

use crate::middleware::RequireSession;

pub use body::RequestBody;

/// Registers every route. The app's default service is left to the caller
/// (`home::not_found`).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(body::BODY_LIMIT))
    .route("/", web::get().to(home::index))
    .route("/health", web::get().to(health::health_check))
    .route("/login", web::get().to(home::login_page))
    .route("/api/error-demo", web::get().to(home::error_demo))
    // Google OAuth
    .route("/auth/google", web::get().to(auth::google_auth))
    .route("/auth/google/callback", web::get().to(auth::google_callback))
    .route("/logout", web::get().to(auth::logout))
    .service(
        web::resource("/profile")
            .wrap(RequireSession)
            .route(web::get().to(auth::profile)),
    )
    // CRUD placeholders
    .service(web::scope("/api/users").configure(users::configure))
    .service(web::scope("/api/products").configure(products::configure));
}
