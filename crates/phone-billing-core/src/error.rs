//! Error types for phone-billing.

use crate::ids::ContractId;

/// Result type for phone-billing operations.
pub type Result<T> = std::result::Result<T, BillingError>;

/// Errors that can occur in contract and bill operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BillingError {
    /// The contract has not been advanced into any month yet.
    #[error("contract {contract_id} has no bill: advance it to a month first")]
    NotActivated {
        /// The contract that was used before activation.
        contract_id: ContractId,
    },

    /// The contract was already cancelled.
    #[error("contract {contract_id} is closed")]
    ContractClosed {
        /// The cancelled contract.
        contract_id: ContractId,
    },

    /// Month outside 1..=12.
    #[error("invalid billing period: month={month}, year={year}")]
    InvalidPeriod {
        /// The rejected month.
        month: u32,
        /// The year it was paired with.
        year: i32,
    },
}
