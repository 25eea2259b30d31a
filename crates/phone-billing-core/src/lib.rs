//! Core types for phone-billing.
//!
//! This crate provides the contract and bill state machine of a phone-line billing system:
//!
//! - **Bills**: `Bill`, `RatePlan`
//! - **Contracts**: `Contract`, `ContractKind`, `ContractStatus`, `CallCharge`
//! - **Calls**: `Call`, `Coordinates`
//! - **Periods**: `BillingPeriod`
//! - **Rates**: `PlanRates` and the standard plan constants
//! - **Identifiers**: `ContractId`, `CustomerId`, `PhoneNumber`
//!
//! # Monthly cycle
//!
//! For every month, oldest first, the driver hands each contract a fresh [`Bill`] through
//! [`Contract::new_month`], bills that month's calls with [`Contract::bill_call`], and
//! finally settles the line with [`Contract::cancel_contract`].
//!
//! Amounts are dollars held as [`rust_decimal::Decimal`], so fractional per-minute rates
//! stay exact.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bill;
pub mod call;
pub mod contract;
pub mod error;
pub mod ids;
pub mod period;
pub mod rates;

pub use bill::{Bill, RatePlan};
pub use call::{Call, Coordinates};
pub use contract::{CallCharge, Contract, ContractKind, ContractStatus};
pub use error::{BillingError, Result};
pub use ids::{ContractId, CustomerId, IdError, PhoneNumber};
pub use period::BillingPeriod;
pub use rates::{
    PlanRates, MTM_MINS_COST, MTM_MONTHLY_FEE, PREPAID_MINS_COST, PREPAID_TOP_UP_AMOUNT,
    PREPAID_TOP_UP_THRESHOLD, TERM_DEPOSIT, TERM_MINS, TERM_MINS_COST, TERM_MONTHLY_FEE,
};
