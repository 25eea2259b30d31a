//! Identifier types for phone-billing.
//!
//! This module provides strongly-typed identifiers for contracts, customers and phone lines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A contract identifier (UUID format).
///
/// Contract IDs are generated when a contract is opened and only used to
/// correlate log records; they carry no billing meaning.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractId(uuid::Uuid);

impl ContractId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl fmt::Debug for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractId({})", self.0)
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer number from the account directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(u32);

impl CustomerId {
    /// Wrap a raw customer number.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A phone line number in `XXX-XXXX` form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Return the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PhoneNumber {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == 8
            && s.char_indices().all(|(i, c)| {
                if i == 3 {
                    c == '-'
                } else {
                    c.is_ascii_digit()
                }
            });

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(IdError::InvalidPhoneNumber(s.to_string()))
        }
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PhoneNumber> for String {
    fn from(number: PhoneNumber) -> Self {
        number.0
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a `XXX-XXXX` phone number.
    #[error("invalid phone number: {0}")]
    InvalidPhoneNumber(String),
}
