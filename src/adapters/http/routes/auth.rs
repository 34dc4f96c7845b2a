use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, middleware::SESSION_COOKIE},
    app_error::AppResult,
    domain::entities::user::User,
};

#[derive(Deserialize)]
struct CredentialsPayload {
    username: String,
    password: String,
}

#[derive(Serialize)]
pub(super) struct UserResponse {
    pub id: Uuid,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

async fn register(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<CredentialsPayload>,
) -> AppResult<impl IntoResponse> {
    let user = app_state
        .auth_use_cases
        .register(&payload.username, &payload.password)
        .await?;
    let jar = start_session(jar, &app_state, user.id)?;
    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(user))))
}

async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<CredentialsPayload>,
) -> AppResult<impl IntoResponse> {
    let user = app_state
        .auth_use_cases
        .login(&payload.username, &payload.password)
        .await?;
    let jar = start_session(jar, &app_state, user.id)?;
    Ok((StatusCode::OK, jar, Json(UserResponse::from(user))))
}

async fn logout(jar: CookieJar) -> impl IntoResponse {
    (StatusCode::OK, end_session(jar))
}

fn start_session(jar: CookieJar, app_state: &AppState, user_id: Uuid) -> AppResult<CookieJar> {
    let value = app_state.sessions.issue(user_id)?;
    let cookie = Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .secure(app_state.config.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(app_state.sessions.ttl())
        .build();
    Ok(jar.add(cookie))
}

pub(super) fn end_session(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(0))
        .build();
    jar.add(cookie)
}
