use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use drauto_core::catalog::{ServiceQuery, ServiceRecord, SortOrder};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ListServicesParams {
    pub search: Option<String>,
    pub sort: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services))
        .route("/services/{id}", get(get_service))
}

/// GET /services
/// Case-insensitive title search ordered by price; `sort=asc` ascends,
/// anything else descends.
async fn list_services(
    State(state): State<AppState>,
    Query(params): Query<ListServicesParams>,
) -> Result<Json<Vec<ServiceRecord>>, AppError> {
    let query = ServiceQuery {
        search: params.search,
        sort: SortOrder::from_param(params.sort.as_deref()),
    };

    let services = state
        .services
        .search(&query)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(services))
}

/// GET /services/{id}
/// Single record by id. A miss answers with an empty 200 body, never 404.
async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::ValidationError(format!("Invalid service id: {}", id)))?;

    let service = state
        .services
        .get(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(match service {
        Some(record) => Json(record).into_response(),
        None => ().into_response(),
    })
}
