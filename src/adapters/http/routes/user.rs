use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    adapters::http::{app_state::AppState, middleware::CurrentUser},
    app_error::AppResult,
};

use super::auth::{UserResponse, end_session};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/", delete(delete_account))
}

async fn get_me(
    State(app_state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = app_state.auth_use_cases.get_user(current.id).await?;
    Ok(Json(user.into()))
}

async fn delete_account(
    State(app_state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    app_state.auth_use_cases.delete_account(current.id).await?;
    Ok((StatusCode::NO_CONTENT, end_session(jar)))
}
