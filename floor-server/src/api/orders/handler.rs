//! Order API Handlers

use axum::Json;
use axum::extract::{Path, State};
use shared::models::{OrderAmountAdd, OrderCreate, OrderId, OrderSettled, OrderView};

use crate::core::ServerState;
use crate::utils::{ApiResult, ok, ok_with_message};

/// POST /api/orders - 下单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> ApiResult<OrderView> {
    let order = state.orders().create(payload.patron_id, payload.total)?;
    Ok(ok(order))
}

/// GET /api/orders/unpaid - 未结账订单
pub async fn unpaid(State(state): State<ServerState>) -> ApiResult<Vec<OrderView>> {
    Ok(ok(state.orders().unpaid()))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<OrderId>,
) -> ApiResult<OrderView> {
    Ok(ok(state.orders().get(id)?))
}

/// POST /api/orders/{id}/amounts - 加单
pub async fn add_amount(
    State(state): State<ServerState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<OrderAmountAdd>,
) -> ApiResult<OrderView> {
    Ok(ok(state.orders().add_amount(id, payload.amount)?))
}

/// POST /api/orders/{id}/pay - 结账并释放服务员和桌台
pub async fn pay(
    State(state): State<ServerState>,
    Path(id): Path<OrderId>,
) -> ApiResult<OrderSettled> {
    let settled = state.orders().mark_paid(id)?;
    let message = match &settled.release {
        Some(release) if !release.backfilled.is_empty() => format!(
            "Order {} paid, {} waiting patron(s) seated",
            id,
            release.backfilled.len()
        ),
        _ => format!("Order {} paid", id),
    };
    Ok(ok_with_message(settled, message))
}
