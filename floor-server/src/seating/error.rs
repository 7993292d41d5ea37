use shared::models::PatronId;
use thiserror::Error;

/// Admission refusal for a dine-in party
///
/// Expected outcome, not a fault: the caller offers takeout or retries later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("No available waiters for dine-in")]
    NoWaiters,

    #[error("No available tables for group of {party_size}")]
    NoTables {
        party_size: u32,
        /// Biggest table on the floor, free or not
        largest_table: Option<u32>,
    },
}

/// Seating errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatingError {
    #[error("Patron not found: {0}")]
    PatronNotFound(PatronId),

    #[error("Table not found: {0}")]
    TableNotFound(u32),

    #[error("Table is already occupied: {0}")]
    TableOccupied(u32),

    #[error("Patron {0} is still waiting for a waiter or table")]
    NotSeated(PatronId),

    #[error("Patron {0} already has an order")]
    OrderAlreadyAttached(PatronId),
}

pub type SeatingResult<T> = Result<T, SeatingError>;
