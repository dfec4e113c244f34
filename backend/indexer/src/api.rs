//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::errors::Result;
use crate::events::{normalize_sale_id, EventRecord};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SaleEventsResponse {
    pub sale_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct ParticipantEventsResponse {
    pub address: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn respond<T: Serialize>(result: Result<T>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events`
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Response {
    respond(
        db::get_all_events(&state.pool)
            .await
            .map(|events| AllEventsResponse {
                count: events.len(),
                events,
            }),
    )
}

/// `GET /sales/:id/events`
///
/// `id` is the 32-byte sale id in hex, with or without a `0x` prefix.
pub async fn get_sale_events(
    State(state): State<Arc<ApiState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(sale_id) = normalize_sale_id(&raw_id) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("invalid sale id: {raw_id}"),
        );
    };

    respond(
        db::get_events_for_sale(&state.pool, &sale_id)
            .await
            .map(|events| SaleEventsResponse {
                sale_id,
                count: events.len(),
                events,
            }),
    )
}

/// `GET /participants/:address/events`
///
/// Contributions, claims and refunds of one participant across every sale.
pub async fn get_participant_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Response {
    let result = db::get_events_for_actor(&state.pool, &address).await;
    respond(result.map(|events| ParticipantEventsResponse {
        count: events.len(),
        address,
        events,
    }))
}
