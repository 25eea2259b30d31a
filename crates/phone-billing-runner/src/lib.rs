//! Dataset loading and monthly billing driver for phone-billing.
//!
//! This crate plays the driver role around `phone-billing-core`: it reads a JSON
//! dataset of customers, lines and calls, replays the calls month by month through each
//! line's contract, and records a statement per month.
//!
//! # Example
//!
//! ```no_run
//! use phone_billing_runner::{BillingRun, Dataset, RunnerConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunnerConfig::from_env()?;
//! let dataset = Dataset::load(&config.dataset_path)?;
//!
//! let mut run = BillingRun::new(&dataset, &config.rates)?;
//! run.process(dataset.calls())?;
//!
//! for statement in run.statements() {
//!     println!("{}: {} lines", statement.period, statement.lines.len());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod run;

pub use config::{load_rates_file, RunnerConfig};
pub use dataset::{CallRecord, ContractSpec, CustomerRecord, Dataset, EventRecord, LineRecord};
pub use error::{Result, RunnerError};
pub use run::{BillingRun, LineStatement, MonthlyStatement, Settlement};
