//! Order book
//!
//! Keeps the running total and paid flag of each order and drives the
//! seating release when an order is settled.
//!
//! ```text
//! create ──► attach_order (seating)
//! add_amount
//! mark_paid ──► paid = true ──► on_order_paid (seating) ──► audit log
//! ```

mod book;
mod error;

pub use book::OrderBook;
pub use error::{OrderError, OrderResult};
