//! Runner configuration.

use std::path::{Path, PathBuf};

use phone_billing_core::{PhoneNumber, PlanRates};

use crate::error::{Result, RunnerError};

/// Well-known locations probed for a rates override when none is configured.
const RATES_PATHS: [&str; 3] = ["rates.json", "config/rates.json", ".secrets/rates.json"];

/// Runner configuration loaded from environment variables and an optional rates file.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the JSON dataset (default: "dataset.json").
    pub dataset_path: PathBuf,

    /// Rates every contract is priced against.
    pub rates: PlanRates,

    /// Lines to cancel once all periods are billed.
    pub cancel_numbers: Vec<PhoneNumber>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("dataset.json"),
            rates: PlanRates::default(),
            cancel_numbers: Vec::new(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `BILLING_RATES_FILE` names an unreadable or invalid file,
    /// if a rates file found at a well-known location cannot be read or parsed,
    /// or if `BILLING_CANCEL` holds a malformed phone number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Reads `BILLING_DATASET`, `BILLING_RATES_FILE` and `BILLING_CANCEL`.
    ///
    /// # Errors
    ///
    /// See [`RunnerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let dataset_path = lookup("BILLING_DATASET")
            .map_or_else(|| PathBuf::from("dataset.json"), PathBuf::from);

        let rates = match lookup("BILLING_RATES_FILE") {
            Some(path) => {
                let rates = load_rates_file(Path::new(&path))?;
                tracing::info!(path = %path, "Loaded rates from file");
                rates
            }
            None => probe_rates(Path::new("."))?,
        };

        let cancel_numbers = lookup("BILLING_CANCEL")
            .map(|raw| parse_numbers(&raw))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            dataset_path,
            rates,
            cancel_numbers,
        })
    }
}

/// Use the first rates file found among [`RATES_PATHS`] under `base`, or the standard rates.
///
/// Only absent files are skipped; a file that exists must load.
fn probe_rates(base: &Path) -> Result<PlanRates> {
    for candidate in &RATES_PATHS {
        let path = base.join(candidate);
        if !path.exists() {
            continue;
        }
        let rates = load_rates_file(&path)?;
        tracing::info!(path = %path.display(), "Loaded rates from file");
        return Ok(rates);
    }

    tracing::debug!("Rates file not found, using standard rates");
    Ok(PlanRates::default())
}

/// Load a rates override from a JSON file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or not a valid rates table.
pub fn load_rates_file(path: &Path) -> Result<PlanRates> {
    if !path.exists() {
        return Err(RunnerError::Configuration(format!(
            "rates file not found: {}",
            path.display()
        )));
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn parse_numbers(raw: &str) -> Result<Vec<PhoneNumber>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(RunnerError::from))
        .collect()
}
