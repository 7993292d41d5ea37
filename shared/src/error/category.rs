//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Admission errors
/// - 4xxx: Order errors
/// - 6xxx: Patron errors
/// - 7xxx: Table errors
/// - 8xxx: Waiter errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Admission errors (1xxx)
    Admission,
    /// Order errors (2xxx - 5xxx)
    Order,
    /// Patron errors (6xxx)
    Patron,
    /// Table errors (7xxx)
    Table,
    /// Waiter errors (8xxx)
    Waiter,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Admission,
            2000..6000 => Self::Order,
            6000..7000 => Self::Patron,
            7000..8000 => Self::Table,
            8000..9000 => Self::Waiter,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Admission => "admission",
            Self::Order => "order",
            Self::Patron => "patron",
            Self::Table => "table",
            Self::Waiter => "waiter",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
