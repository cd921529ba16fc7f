use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Starter API",
        version = "0.1.0",
        description = "Google OAuth2 login with cookie sessions, plus placeholder CRUD routes for users and products.\n\n**Authentication:** `GET /auth/google` starts the login; `/profile` requires the `session` cookie set by the callback."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Home
        crate::api::home::error_demo,

        // Users
        crate::api::users::get_users,
        crate::api::users::get_user_by_id,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Products
        crate::api::products::get_products,
        crate::api::products::get_product_by_id,
        crate::api::products::create_product,
        crate::api::products::update_product,
        crate::api::products::delete_product,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::Product,
            crate::models::SessionUser,
        )
    ),
    tags(
        (name = "Health", description = "Service and database status."),
        (name = "Home", description = "Banner and error demonstration."),
        (name = "Users", description = "Placeholder user routes; nothing is persisted."),
        (name = "Products", description = "Placeholder product routes; nothing is persisted."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/health",
            "/api/error-demo",
            "/api/users",
            "/api/users/{id}",
            "/api/products",
            "/api/products/{id}",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }
}
