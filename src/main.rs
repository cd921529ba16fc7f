mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::services::{GoogleProvider, IdentityProvider, SessionManager};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration (also reads .env)
    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting {} ({})...", env!("CARGO_PKG_NAME"), config.node_env);

    if config.uses_default_session_secret() {
        log::warn!("⚠️  SESSION_SECRET not set, using the built-in default");
    }

    // Single MongoDB connection; the server still starts without it
    let db = match database::MongoDB::new(&config.mongo_uri).await {
        Ok(db) => {
            log::info!("✅ MongoDB connected: {}", db.name());
            Some(web::Data::new(db))
        }
        Err(e) => {
            log::error!("❌ MongoDB connection error: {}", e);
            None
        }
    };

    let sessions = web::Data::new(SessionManager::new(
        &config.session_secret,
        config.is_production(),
    ));

    let provider: Option<web::Data<dyn IdentityProvider>> = match config.google_credentials() {
        Some((client_id, client_secret)) => {
            log::info!("🔐 Google OAuth callback: {}", config.google_callback_url);
            let google: Arc<dyn IdentityProvider> = Arc::new(GoogleProvider::new(
                client_id,
                client_secret,
                &config.google_callback_url,
            ));
            Some(web::Data::from(google))
        }
        None => {
            log::warn!("⚠️  GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set, /auth/google is disabled");
            None
        }
    };

    let host = config.host.clone();
    let port = config.port;

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    HttpServer::new(move || {
        let cors = config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        let mut app = App::new().app_data(sessions.clone());
        if let Some(db) = &db {
            app = app.app_data(db.clone());
        }
        if let Some(provider) = &provider {
            app = app.app_data(provider.clone());
        }

        app.wrap(cors)
            .wrap(middleware::SecurityHeaders::new(config.is_production()))
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(api::configure)
            .default_service(web::to(api::home::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
