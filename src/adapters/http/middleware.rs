use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::{adapters::http::app_state::AppState, app_error::AppError};

pub const SESSION_COOKIE: &str = "session";

/// The authenticated user, inserted into request extensions by [`require_session`].
#[derive(Clone, Copy, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
}

pub async fn require_session(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(session) = cookies.get(SESSION_COOKIE) else {
        return Err(AppError::InvalidCredentials);
    };

    let claims = app_state.sessions.verify(session.value())?;
    let user_id = claims.user_id()?;

    // A valid signature outlives the account it was issued for.
    match app_state.auth_use_cases.get_user(user_id).await {
        Ok(_) => {}
        Err(AppError::NotFound) => return Err(AppError::InvalidCredentials),
        Err(e) => return Err(e),
    }

    tracing::debug!(%user_id, "Session verified");

    request.extensions_mut().insert(CurrentUser { id: user_id });

    Ok(next.run(request).await)
}
