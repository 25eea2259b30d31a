//! Runner error types.

use phone_billing_core::{BillingError, IdError, PhoneNumber};

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Errors raised while loading data or driving a billing run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Reading a dataset or rates file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A dataset or rates file is not valid JSON for its schema.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A contract rejected an operation.
    #[error("billing error: {0}")]
    Billing(#[from] BillingError),

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// Two lines in the dataset share a phone number.
    #[error("duplicate phone line: {number}")]
    DuplicateLine {
        /// The repeated number.
        number: PhoneNumber,
    },

    /// No line with this number exists in the run.
    #[error("unknown phone line: {number}")]
    UnknownLine {
        /// The missing number.
        number: PhoneNumber,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}
