use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    domain::entities::domain::Domain,
    use_cases::catalog::ServiceSummary,
};

#[derive(Serialize)]
pub(super) struct ListResponse<T> {
    items: Vec<T>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services))
        .route("/by-domain/{domain}", get(find_by_domain))
}

async fn list_services(
    State(app_state): State<AppState>,
) -> AppResult<Json<ListResponse<ServiceSummary>>> {
    let items = app_state.catalog_use_cases.list_services().await?;
    Ok(Json(ListResponse { items }))
}

async fn find_by_domain(
    State(app_state): State<AppState>,
    Path(domain): Path<String>,
) -> AppResult<Json<ServiceSummary>> {
    let service = app_state
        .catalog_use_cases
        .find_service_by_domain(&domain)
        .await?;
    Ok(Json(service))
}

pub(super) async fn list_domains(
    State(app_state): State<AppState>,
) -> AppResult<Json<ListResponse<Domain>>> {
    let items = app_state.catalog_use_cases.list_domains().await?;
    Ok(Json(ListResponse { items }))
}
