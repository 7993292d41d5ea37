//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/unpaid", get(handler::unpaid))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/amounts", post(handler::add_amount))
        .route("/{id}/pay", post(handler::pay))
}
