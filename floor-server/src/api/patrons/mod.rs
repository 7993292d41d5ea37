//! Patron API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/patrons", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::admit))
        .route("/without-orders", get(handler::without_orders))
        .route("/with-orders/dine-in", get(handler::dine_in_with_orders))
        .route("/queue-counts", get(handler::queue_counts))
        .route("/pending-counts", get(handler::pending_counts))
        .route("/dine-in-availability", get(handler::dine_in_availability))
        .route("/{id}", get(handler::get_by_id))
}
