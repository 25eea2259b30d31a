//! Common test utilities for runner integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use phone_billing_core::{BillingPeriod, PhoneNumber};
use phone_billing_runner::Dataset;
use serde_json::{json, Value};
use tempfile::TempDir;

pub const TERM_LINE: &str = "867-5309";
pub const PREPAID_LINE: &str = "555-0100";
pub const MTM_LINE: &str = "555-0199";
pub const STRANGER: &str = "999-0000";

/// Dataset written to a temporary directory.
pub struct TestDataset {
    /// Temporary directory holding the dataset (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// Path of the dataset file.
    pub path: std::path::PathBuf,
}

impl TestDataset {
    /// Write `events` with the standard three-line directory to disk.
    pub fn with_events(events: Vec<Value>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("dataset.json");
        let document = json!({ "customers": customers(), "events": events });
        std::fs::write(&path, document.to_string()).expect("Failed to write dataset");

        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    pub fn load(&self) -> Dataset {
        Dataset::load(&self.path).expect("Failed to load dataset")
    }
}

/// Customer 1 owns a term line and a prepaid line, customer 2 a month-to-month line.
pub fn customers() -> Value {
    json!([
        { "id": 1, "lines": [
            { "number": TERM_LINE, "contract": { "type": "term", "start": "2018-01-01", "end": "2018-02-25" } },
            { "number": PREPAID_LINE, "contract": { "type": "prepaid", "start": "2018-01-01", "balance": 40 } }
        ] },
        { "id": 2, "lines": [
            { "number": MTM_LINE, "contract": { "type": "mtm", "start": "2018-01-01" } }
        ] }
    ])
}

pub fn call(src: &str, time: &str, duration: u32) -> Value {
    json!({
        "type": "call",
        "src_number": src,
        "dst_number": MTM_LINE,
        "time": time,
        "duration": duration,
        "src_loc": [-79.42, 43.64],
        "dst_loc": [-79.52, 43.75]
    })
}

pub fn sms(src: &str, time: &str) -> Value {
    json!({
        "type": "sms",
        "src_number": src,
        "dst_number": MTM_LINE,
        "time": time,
        "src_loc": [-79.42, 43.64],
        "dst_loc": [-79.52, 43.75]
    })
}

pub fn number(raw: &str) -> PhoneNumber {
    raw.parse().expect("valid phone number")
}

pub fn period(month: u32, year: i32) -> BillingPeriod {
    BillingPeriod::new(month, year).expect("valid period")
}
