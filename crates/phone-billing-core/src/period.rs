//! Billing period types.

use std::fmt;

use chrono::Datelike;
use serde::Serialize;

use crate::error::{BillingError, Result};

/// A calendar month of billing.
///
/// Periods order chronologically: by year, then by month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BillingPeriod {
    /// Calendar year.
    year: i32,
    /// Month number, 1-12.
    month: u32,
}

impl BillingPeriod {
    /// Create a period for `month` of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::InvalidPeriod`] if `month` is not in 1..=12.
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(BillingError::InvalidPeriod { month, year })
        }
    }

    /// The period containing `date`.
    #[must_use]
    pub fn of<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month number, 1-12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns true if this period is strictly later than the month containing `date`.
    #[must_use]
    pub fn is_after<D: Datelike>(&self, date: &D) -> bool {
        *self > Self::of(date)
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn rejects_invalid_months() {
        assert_eq!(
            BillingPeriod::new(13, 2019),
            Err(BillingError::InvalidPeriod {
                month: 13,
                year: 2019
            })
        );
        assert!(BillingPeriod::new(0, 2019).is_err());
        assert!(BillingPeriod::new(12, 2019).is_ok());
    }

    #[test]
    fn orders_by_year_then_month() {
        let dec_2018 = BillingPeriod::new(12, 2018).unwrap();
        let jan_2019 = BillingPeriod::new(1, 2019).unwrap();
        let feb_2019 = BillingPeriod::new(2, 2019).unwrap();

        assert!(dec_2018 < jan_2019);
        assert!(jan_2019 < feb_2019);
    }

    #[test]
    fn is_after_compares_whole_months() {
        let end = NaiveDate::from_ymd_opt(2019, 6, 25).unwrap();

        assert!(!BillingPeriod::new(5, 2019).unwrap().is_after(&end));
        assert!(!BillingPeriod::new(6, 2019).unwrap().is_after(&end));
        assert!(BillingPeriod::new(7, 2019).unwrap().is_after(&end));
        assert!(BillingPeriod::new(1, 2020).unwrap().is_after(&end));
        assert!(!BillingPeriod::new(12, 2018).unwrap().is_after(&end));
    }

    #[test]
    fn display_and_of() {
        let date = NaiveDate::from_ymd_opt(2018, 3, 9).unwrap();
        let period = BillingPeriod::of(&date);
        assert_eq!(period, BillingPeriod::new(3, 2018).unwrap());
        assert_eq!(period.to_string(), "2018-03");
    }
}
