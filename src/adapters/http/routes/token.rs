use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, middleware::CurrentUser},
    app_error::AppResult,
    use_cases::token::TokenView,
};

#[derive(Deserialize)]
struct AddPayload {
    service_id: Uuid,
    in_service_username: String,
    token: String,
}

#[derive(Deserialize)]
struct UpdatePayload {
    enabled: bool,
}

#[derive(Serialize)]
struct TokensResponse {
    items: Vec<TokenView>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tokens).post(add_token))
        .route("/{id}", patch(update_token).delete(delete_token))
}

async fn list_tokens(
    State(app_state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<TokensResponse>> {
    let items = app_state.token_use_cases.list_tokens(current.id).await?;
    Ok(Json(TokensResponse { items }))
}

async fn add_token(
    State(app_state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<AddPayload>,
) -> AppResult<impl IntoResponse> {
    let token = app_state
        .token_use_cases
        .add_token(
            current.id,
            payload.service_id,
            &payload.in_service_username,
            &payload.token,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(token)))
}

async fn update_token(
    State(app_state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePayload>,
) -> AppResult<Json<TokenView>> {
    let token = app_state
        .token_use_cases
        .set_enabled(current.id, id, payload.enabled)
        .await?;
    Ok(Json(token))
}

async fn delete_token(
    State(app_state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    app_state.token_use_cases.remove_token(current.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
