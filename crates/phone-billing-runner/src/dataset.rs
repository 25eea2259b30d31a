//! JSON dataset of customers, phone lines and call records.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use phone_billing_core::{Call, Contract, Coordinates, CustomerId, PhoneNumber, PlanRates};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// Timestamp format of call records.
const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A loaded dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    /// Customers and the lines they own.
    pub customers: Vec<CustomerRecord>,

    /// Call and message records, in any order.
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

/// A customer of the directory.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRecord {
    /// Customer number.
    pub id: CustomerId,

    /// Phone lines owned by the customer.
    #[serde(default)]
    pub lines: Vec<LineRecord>,
}

/// A phone line and the contract it is billed under.
#[derive(Debug, Clone, Deserialize)]
pub struct LineRecord {
    /// Line number.
    pub number: PhoneNumber,

    /// Contract terms.
    pub contract: ContractSpec,
}

/// Contract terms as written in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ContractSpec {
    /// Month-to-month plan.
    Mtm {
        /// First day of the contract.
        start: NaiveDate,
    },

    /// Fixed-term plan.
    Term {
        /// First day of the contract.
        start: NaiveDate,
        /// Contractual end of the term.
        end: NaiveDate,
    },

    /// Prepaid plan.
    Prepaid {
        /// First day of the contract.
        start: NaiveDate,
        /// Initial credit in dollars.
        balance: Decimal,
    },
}

impl ContractSpec {
    /// Open the contract these terms describe, priced against `rates`.
    #[must_use]
    pub fn open(&self, rates: &PlanRates) -> Contract {
        let contract = match *self {
            Self::Mtm { start } => Contract::month_to_month(start),
            Self::Term { start, end } => Contract::term(start, end),
            Self::Prepaid { start, balance } => Contract::prepaid(start, balance),
        };
        contract.with_rates(rates.clone())
    }
}

/// One event of the dataset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum EventRecord {
    /// A phone call.
    Call(CallRecord),

    /// Any other event type (e.g. SMS); not billed.
    #[serde(other)]
    Other,
}

/// A phone call as written in the dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct CallRecord {
    /// The calling line.
    pub src_number: PhoneNumber,

    /// The called line.
    pub dst_number: PhoneNumber,

    /// When the call started.
    #[serde(deserialize_with = "deserialize_event_time")]
    pub time: NaiveDateTime,

    /// Call length in seconds.
    pub duration: u32,

    /// Caller location.
    pub src_loc: Coordinates,

    /// Callee location.
    pub dst_loc: Coordinates,
}

impl From<CallRecord> for Call {
    fn from(record: CallRecord) -> Self {
        Self::new(
            record.src_number,
            record.dst_number,
            record.time,
            record.duration,
            record.src_loc,
            record.dst_loc,
        )
    }
}

impl Dataset {
    /// Load a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the dataset schema.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading dataset");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the dataset schema.
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        tracing::debug!(
            customers = dataset.customers.len(),
            events = dataset.events.len(),
            "Dataset parsed"
        );
        Ok(dataset)
    }

    /// The call records of the dataset; other events are dropped.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        let calls: Vec<Call> = self
            .events
            .iter()
            .filter_map(|event| match event {
                EventRecord::Call(record) => Some(Call::from(record.clone())),
                EventRecord::Other => None,
            })
            .collect();

        let skipped = self.events.len() - calls.len();
        if skipped > 0 {
            tracing::debug!(skipped, "Ignoring non-call events");
        }
        calls
    }
}

fn deserialize_event_time<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, EVENT_TIME_FORMAT).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"{
        "customers": [
            { "id": 1, "lines": [
                { "number": "867-5309", "contract": { "type": "term", "start": "2018-01-01", "end": "2019-06-25" } },
                { "number": "555-0100", "contract": { "type": "prepaid", "start": "2018-01-01", "balance": 40 } }
            ] },
            { "id": 2, "lines": [
                { "number": "555-0199", "contract": { "type": "mtm", "start": "2018-01-01" } }
            ] }
        ],
        "events": [
            { "type": "call", "src_number": "867-5309", "dst_number": "555-0100",
              "time": "2018-01-01 14:29:05", "duration": 117,
              "src_loc": [-79.42, 43.64], "dst_loc": [-79.52, 43.75] },
            { "type": "sms", "src_number": "867-5309", "dst_number": "555-0100",
              "time": "2018-01-02 10:00:00",
              "src_loc": [-79.42, 43.64], "dst_loc": [-79.52, 43.75] }
        ]
    }"#;

    #[test]
    fn parses_customers_and_contracts() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();

        assert_eq!(dataset.customers.len(), 2);
        assert_eq!(dataset.customers[0].id, CustomerId::new(1));
        assert_eq!(
            dataset.customers[0].lines[1].contract,
            ContractSpec::Prepaid {
                start: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                balance: dec!(40),
            }
        );
    }

    #[test]
    fn keeps_only_calls() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        let calls = dataset.calls();

        assert_eq!(dataset.events.len(), 2);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].duration, 117);
        assert_eq!(calls[0].src_number.as_str(), "867-5309");
        assert_eq!(calls[0].time.to_string(), "2018-01-01 14:29:05");
    }

    #[test]
    fn rejects_bad_phone_number() {
        let json = r#"{ "customers": [ { "id": 1, "lines": [
            { "number": "8675309", "contract": { "type": "mtm", "start": "2018-01-01" } }
        ] } ] }"#;

        assert!(Dataset::from_json(json).is_err());
    }

    #[test]
    fn rejects_bad_event_time() {
        let json = r#"{ "customers": [], "events": [
            { "type": "call", "src_number": "867-5309", "dst_number": "555-0100",
              "time": "01/01/2018", "duration": 5,
              "src_loc": [0, 0], "dst_loc": [0, 0] }
        ] }"#;

        assert!(Dataset::from_json(json).is_err());
    }

    #[test]
    fn open_applies_rates() {
        let rates = PlanRates {
            mtm_monthly_fee: dec!(45),
            ..PlanRates::default()
        };
        let terms = ContractSpec::Mtm {
            start: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
        };

        let contract = terms.open(&rates);

        assert_eq!(contract.rates().mtm_monthly_fee, dec!(45));
        assert_eq!(contract.start_date(), NaiveDate::from_ymd_opt(2018, 1, 1));
    }
}
