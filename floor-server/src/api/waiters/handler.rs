use axum::extract::{Path, State};
use shared::models::WaiterView;

use crate::core::ServerState;
use crate::utils::{ApiResult, AppError, ErrorCode, ok};

/// GET /api/waiters - 服务员列表 (轮转顺序)
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<WaiterView>> {
    Ok(ok(state.seating().waiter_snapshot()))
}

/// GET /api/waiters/{staff_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(staff_id): Path<String>,
) -> ApiResult<WaiterView> {
    let waiter = state
        .seating()
        .waiter_snapshot()
        .into_iter()
        .find(|w| w.staff_id == staff_id)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::WaiterNotFound, format!("Waiter {} not found", staff_id))
                .with_detail("staff_id", staff_id.clone())
        })?;
    Ok(ok(waiter))
}
