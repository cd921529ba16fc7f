use actix_web::{web, HttpResponse};
use serde_json::json;

use super::RequestBody;

/// Router for `/api/users`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_users))
        .route("/", web::get().to(get_users))
        .route("", web::post().to(create_user))
        .route("/", web::post().to(create_user))
        .route("/{id}", web::get().to(get_user_by_id))
        .route("/{id}", web::put().to(update_user))
        .route("/{id}", web::delete().to(delete_user));
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Placeholder list message")
    )
)]
pub async fn get_users() -> HttpResponse {
    log::info!("👥 GET /api/users");
    HttpResponse::Ok().json(json!({ "message": "Returning list of users" }))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id, echoed back")),
    responses(
        (status = 200, description = "Placeholder message naming the id")
    )
)]
pub async fn get_user_by_id(path: web::Path<String>) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("👤 GET /api/users/{}", user_id);
    HttpResponse::Ok().json(json!({ "message": format!("Returning user with ID {}", user_id) }))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body(content = Object, description = "Any JSON object or form; echoed under `user`"),
    responses(
        (status = 200, description = "Body echoed under `user`"),
        (status = 400, description = "Body could not be parsed")
    )
)]
pub async fn create_user(body: RequestBody) -> HttpResponse {
    log::info!("📝 POST /api/users");
    HttpResponse::Ok().json(json!({
        "message": "User created",
        "user": body.into_inner(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id, echoed back")),
    request_body(content = Object, description = "Any JSON object or form; echoed under `updatedUser`"),
    responses(
        (status = 200, description = "Body echoed under `updatedUser`"),
        (status = 400, description = "Body could not be parsed")
    )
)]
pub async fn update_user(path: web::Path<String>, body: RequestBody) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("✏️  PUT /api/users/{}", user_id);
    HttpResponse::Ok().json(json!({
        "message": format!("User with ID {} updated", user_id),
        "updatedUser": body.into_inner(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id, echoed back")),
    responses(
        (status = 200, description = "Placeholder message naming the id")
    )
)]
pub async fn delete_user(path: web::Path<String>) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("🗑️ DELETE /api/users/{}", user_id);
    HttpResponse::Ok().json(json!({ "message": format!("User with ID {} deleted", user_id) }))
}
