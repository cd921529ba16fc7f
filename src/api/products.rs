use actix_web::{web, HttpResponse};
use serde_json::json;

use super::RequestBody;

/// Router for `/api/products`.
///
/// Same placeholder shape as the users router; nothing touches the
/// `products` collection yet.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_products))
        .route("/", web::get().to(get_products))
        .route("", web::post().to(create_product))
        .route("/", web::post().to(create_product))
        .route("/{id}", web::get().to(get_product_by_id))
        .route("/{id}", web::put().to(update_product))
        .route("/{id}", web::delete().to(delete_product));
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses((status = 200, description = "Placeholder list message"))
)]
pub async fn get_products() -> HttpResponse {
    log::info!("📦 GET /api/products");
    HttpResponse::Ok().json(json!({ "message": "Returning list of products" }))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id, echoed back")),
    responses((status = 200, description = "Placeholder message naming the id"))
)]
pub async fn get_product_by_id(path: web::Path<String>) -> HttpResponse {
    let product_id = path.into_inner();
    log::info!("📦 GET /api/products/{}", product_id);
    HttpResponse::Ok().json(json!({
        "message": format!("Returning product with ID {}", product_id)
    }))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = crate::models::Product,
    responses(
        (status = 200, description = "Body echoed under `product`"),
        (status = 400, description = "Body could not be parsed")
    )
)]
pub async fn create_product(body: RequestBody) -> HttpResponse {
    log::info!("📝 POST /api/products");
    HttpResponse::Ok().json(json!({
        "message": "Product created",
        "product": body.into_inner(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id, echoed back")),
    request_body = crate::models::Product,
    responses(
        (status = 200, description = "Body echoed under `product`"),
        (status = 400, description = "Body could not be parsed")
    )
)]
pub async fn update_product(path: web::Path<String>, body: RequestBody) -> HttpResponse {
    let product_id = path.into_inner();
    log::info!("✏️  PUT /api/products/{}", product_id);
    HttpResponse::Ok().json(json!({
        "message": format!("Product with ID {} updated", product_id),
        "product": body.into_inner(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id, echoed back")),
    responses((status = 200, description = "Placeholder message naming the id"))
)]
pub async fn delete_product(path: web::Path<String>) -> HttpResponse {
    let product_id = path.into_inner();
    log::info!("🗑️ DELETE /api/products/{}", product_id);
    HttpResponse::Ok().json(json!({
        "message": format!("Product with ID {} deleted", product_id)
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::test_app;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_list_and_get() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::get().uri("/api/products/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Returning list of products");

        let req = test::TestRequest::get().uri("/api/products/p-1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Returning product with ID p-1");
    }

    #[actix_web::test]
    async fn test_create_and_update_echo_body() {
        let app = test::init_service(test_app()).await;
        let payload = json!({ "name": "Lamp", "price": 19.5, "description": "Desk lamp" });

        let req = test::TestRequest::post()
            .uri("/api/products")
            .set_json(&payload)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "message": "Product created", "product": payload }));

        let req = test::TestRequest::put()
            .uri("/api/products/p-1")
            .set_json(&payload)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Product with ID p-1 updated");
        assert_eq!(body["product"], payload);
    }

    #[actix_web::test]
    async fn test_create_and_update_without_body() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::post().uri("/api/products").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "message": "Product created", "product": {} }));

        let req = test::TestRequest::put().uri("/api/products/p-1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["product"], json!({}));
    }

    #[actix_web::test]
    async fn test_delete() {
        let app = test::init_service(test_app()).await;
        let req = test::TestRequest::delete().uri("/api/products/p-1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Product with ID p-1 deleted");
    }
}
