pub mod auth;
pub mod service;
pub mod token;
pub mod user;

use axum::{Json, Router, middleware, routing::get};

use crate::adapters::http::{app_state::AppState, middleware::require_session};

pub fn router(app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/user", user::router())
        .nest("/services", service::router())
        .route("/domains", get(service::list_domains))
        .nest("/tokens", token::router())
        .route_layer(middleware::from_fn_with_state(app_state, require_session));

    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth::router())
        .merge(protected)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
