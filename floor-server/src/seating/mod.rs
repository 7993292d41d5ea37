//! Seating engine
//!
//! - [`WaiterRegistry`]: round-robin waiter ring with a dine-in cap
//! - [`TableRegistry`]: best-fit table pools per capacity class
//! - [`PatronQueue`]: one FIFO per service kind
//! - [`SeatingCoordinator`]: admission, allocation sweeps, release on payment
//!
//! Only the coordinator is shared between tasks; the registries and queues
//! live inside its lock and are never handed out.

mod coordinator;
mod error;
mod queue;
mod tables;
mod waiters;

pub use coordinator::SeatingCoordinator;
pub use error::{AdmissionError, SeatingError, SeatingResult};
pub use queue::{Patron, PatronQueue, Snapshot};
pub use tables::{TABLE_CAPACITIES, Table, TableDefinition, TableRegistry};
pub use waiters::{COMMISSION_RATE, MAX_DINE_IN_LOAD, Waiter, WaiterProfile, WaiterRegistry};
