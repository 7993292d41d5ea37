//! Data models
//!
//! Shared between floor-server and the front-end (via API).
//! Patron and order ids are `i64`; table numbers, capacities and party sizes are `u32`.

pub mod dining_table;
pub mod order;
pub mod patron;
pub mod waiter;

// Re-exports
pub use dining_table::*;
pub use order::*;
pub use patron::*;
pub use waiter::*;
