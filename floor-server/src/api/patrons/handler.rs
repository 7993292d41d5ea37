//! Patron API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shared::models::{
    DineInAvailability, PatronCreate, PatronId, PatronView, PendingCounts, QueueCounts, ServiceKind,
};

use crate::core::ServerState;
use crate::utils::{ApiResult, AppError, ErrorCode, ok, ok_with_message};

/// POST /api/patrons - 顾客入场
///
/// Dine-in refusals come back as 409 so the front desk can offer takeout.
pub async fn admit(
    State(state): State<ServerState>,
    Json(payload): Json<PatronCreate>,
) -> ApiResult<PatronView> {
    let seating = state.seating();
    let id = seating.admit_patron(payload.service_kind, payload.party_size.unwrap_or(1))?;
    let patron = seating
        .get_patron(id)
        .ok_or_else(|| AppError::new(ErrorCode::PatronNotFound).with_detail("patron_id", id))?;

    let message = match patron.waiter_name.as_deref() {
        Some(name) => format!("Patron {} admitted, served by {}", id, name),
        None => format!("Patron {} admitted, waiting for service", id),
    };
    Ok(ok_with_message(patron, message))
}

/// GET /api/patrons - 所有排队顾客 (堂食在前)
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<PatronView>> {
    Ok(ok(state.seating().list_queued(|_| true)))
}

/// GET /api/patrons/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<PatronId>,
) -> ApiResult<PatronView> {
    let patron = state
        .seating()
        .get_patron(id)
        .ok_or_else(|| AppError::new(ErrorCode::PatronNotFound).with_detail("patron_id", id))?;
    Ok(ok(patron))
}

/// GET /api/patrons/without-orders
pub async fn without_orders(State(state): State<ServerState>) -> ApiResult<Vec<PatronView>> {
    Ok(ok(state.seating().list_queued(|p| p.order_id.is_none())))
}

/// GET /api/patrons/with-orders/dine-in
pub async fn dine_in_with_orders(State(state): State<ServerState>) -> ApiResult<Vec<PatronView>> {
    Ok(ok(state
        .seating()
        .list_queued(|p| p.service_kind == ServiceKind::DineIn && p.order_id.is_some())))
}

/// GET /api/patrons/queue-counts
pub async fn queue_counts(State(state): State<ServerState>) -> ApiResult<QueueCounts> {
    Ok(ok(state.seating().queue_counts()))
}

/// GET /api/patrons/pending-counts
pub async fn pending_counts(State(state): State<ServerState>) -> ApiResult<PendingCounts> {
    Ok(ok(state.seating().pending_counts()))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub party_size: Option<u32>,
}

/// GET /api/patrons/dine-in-availability?party_size=N
pub async fn dine_in_availability(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<DineInAvailability> {
    Ok(ok(state
        .seating()
        .dine_in_availability(query.party_size.unwrap_or(1))))
}
