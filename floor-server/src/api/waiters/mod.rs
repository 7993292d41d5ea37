//! Waiter API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/waiters", get(handler::list))
        .route("/api/waiters/{staff_id}", get(handler::get_by_id))
}
