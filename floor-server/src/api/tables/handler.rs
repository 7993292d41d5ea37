//! Dining Table API Handlers

use axum::extract::{Path, State};
use shared::models::{TableStatus, TableView};
use std::collections::BTreeMap;

use crate::core::ServerState;
use crate::seating::SeatingError;
use crate::utils::{ApiResult, ok};

/// GET /api/tables - 所有桌台 (布局顺序)
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<TableView>> {
    Ok(ok(state.seating().table_snapshot()))
}

/// GET /api/tables/status - 占用统计
pub async fn status(State(state): State<ServerState>) -> ApiResult<TableStatus> {
    Ok(ok(state.seating().table_status()))
}

/// GET /api/tables/available - 各容量空闲桌台数
pub async fn available(State(state): State<ServerState>) -> ApiResult<BTreeMap<u32, usize>> {
    Ok(ok(state.seating().available_table_counts()))
}

/// GET /api/tables/{number}
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(number): Path<u32>,
) -> ApiResult<TableView> {
    let table = state
        .seating()
        .table_snapshot()
        .into_iter()
        .find(|t| t.number == number)
        .ok_or(SeatingError::TableNotFound(number))?;
    Ok(ok(table))
}
