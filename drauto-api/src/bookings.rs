use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use drauto_core::booking::{BookingRecord, BookingScope, DeleteAck, InsertAck, UpdateAck};

use crate::{
    error::AppError, middleware::session_guard, session::SessionClaims, state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListBookingsParams {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Listing requires a session; the mutation paths are open, matching the
/// published interface contract.
pub fn routes(state: AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route("/bookings", get(list_bookings))
        .route_layer(middleware::from_fn_with_state(state, session_guard));

    let open = Router::new()
        .route("/bookings", post(create_booking))
        .route(
            "/bookings/{id}",
            put(update_booking_status).delete(delete_booking),
        );

    guarded.merge(open)
}

/// GET /bookings
/// Authenticated. An `email` filter must match the session identity;
/// without the filter every booking is returned.
async fn list_bookings(
    State(state): State<AppState>,
    Extension(session): Extension<SessionClaims>,
    Query(params): Query<ListBookingsParams>,
) -> Result<Json<Vec<BookingRecord>>, AppError> {
    // 1. Ownership check before any store access
    let scope = BookingScope::resolve(session.email(), params.email.as_deref())
        .map_err(|_| AppError::AuthorizationError("Forbidden!".to_string()))?;

    // 2. Fetch within the resolved scope
    let bookings = state
        .bookings
        .list(&scope)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(bookings))
}

/// POST /bookings
/// Stores the submitted document as-is; the store assigns the id.
async fn create_booking(
    State(state): State<AppState>,
    Json(document): Json<Map<String, Value>>,
) -> Result<Json<InsertAck>, AppError> {
    let ack = state
        .bookings
        .insert(document)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(ack))
}

/// PUT /bookings/{id}
/// Overwrites only the status field. A missing record upserts a
/// status-only document under the same id.
async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateAck>, AppError> {
    let id = parse_booking_id(&id)?;

    let ack = state
        .bookings
        .set_status(id, &req.status)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(ack))
}

/// DELETE /bookings/{id}
/// Zero-or-one semantics; deleting a missing record still succeeds.
async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, AppError> {
    let id = parse_booking_id(&id)?;

    let ack = state
        .bookings
        .delete(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(ack))
}

fn parse_booking_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::ValidationError(format!("Invalid booking id: {}", raw)))
}
