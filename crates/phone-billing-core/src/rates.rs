//! Rate configuration for phone-billing.
//!
//! This module defines the fees, per-minute rates and allowances of every plan.
//! All amounts are in dollars.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Month-to-month plan fee charged every month ($50.00).
pub const MTM_MONTHLY_FEE: Decimal = Decimal::from_parts(5000, 0, 0, false, 2);

/// Month-to-month plan cost per minute ($0.05).
pub const MTM_MINS_COST: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Term plan fee charged every month ($20.00).
pub const TERM_MONTHLY_FEE: Decimal = Decimal::from_parts(2000, 0, 0, false, 2);

/// Term plan deposit charged in the first month ($300.00).
pub const TERM_DEPOSIT: Decimal = Decimal::from_parts(30000, 0, 0, false, 2);

/// Free minutes included in every month of a term plan.
pub const TERM_MINS: u32 = 100;

/// Term plan cost per minute once the free minutes are used up ($0.10).
pub const TERM_MINS_COST: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Prepaid plan cost per minute ($0.025).
pub const PREPAID_MINS_COST: Decimal = Decimal::from_parts(25, 0, 0, false, 3);

/// Prepaid credit below which a month starts with an automatic top-up ($10.00).
pub const PREPAID_TOP_UP_THRESHOLD: Decimal = Decimal::from_parts(1000, 0, 0, false, 2);

/// Amount added by an automatic prepaid top-up ($25.00).
pub const PREPAID_TOP_UP_AMOUNT: Decimal = Decimal::from_parts(2500, 0, 0, false, 2);

/// Rates and allowances for all contract plans.
///
/// `Default` yields the standard schedule; deployments may load an override
/// from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanRates {
    /// Month-to-month monthly fee.
    pub mtm_monthly_fee: Decimal,

    /// Month-to-month cost per minute.
    pub mtm_minute_rate: Decimal,

    /// Term monthly fee.
    pub term_monthly_fee: Decimal,

    /// Term deposit, charged once and refunded only after the term ends.
    pub term_deposit: Decimal,

    /// Term free minutes per month.
    pub term_free_minutes: u32,

    /// Term cost per minute beyond the free minutes.
    pub term_minute_rate: Decimal,

    /// Prepaid cost per minute.
    pub prepaid_minute_rate: Decimal,

    /// Prepaid credit below which a top-up is applied.
    pub prepaid_top_up_threshold: Decimal,

    /// Prepaid top-up amount.
    pub prepaid_top_up_amount: Decimal,
}

impl Default for PlanRates {
    fn default() -> Self {
        Self {
            mtm_monthly_fee: MTM_MONTHLY_FEE,
            mtm_minute_rate: MTM_MINS_COST,
            term_monthly_fee: TERM_MONTHLY_FEE,
            term_deposit: TERM_DEPOSIT,
            term_free_minutes: TERM_MINS,
            term_minute_rate: TERM_MINS_COST,
            prepaid_minute_rate: PREPAID_MINS_COST,
            prepaid_top_up_threshold: PREPAID_TOP_UP_THRESHOLD,
            prepaid_top_up_amount: PREPAID_TOP_UP_AMOUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn constants_match_dollar_amounts() {
        assert_eq!(MTM_MONTHLY_FEE, dec!(50));
        assert_eq!(MTM_MINS_COST, dec!(0.05));
        assert_eq!(TERM_MONTHLY_FEE, dec!(20));
        assert_eq!(TERM_DEPOSIT, dec!(300));
        assert_eq!(TERM_MINS_COST, dec!(0.1));
        assert_eq!(PREPAID_MINS_COST, dec!(0.025));
        assert_eq!(PREPAID_TOP_UP_THRESHOLD, dec!(10));
        assert_eq!(PREPAID_TOP_UP_AMOUNT, dec!(25));
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let rates: PlanRates =
            serde_json::from_str(r#"{ "term_deposit": "150", "term_free_minutes": 60 }"#).unwrap();

        assert_eq!(rates.term_deposit, dec!(150));
        assert_eq!(rates.term_free_minutes, 60);
        assert_eq!(rates.mtm_monthly_fee, MTM_MONTHLY_FEE);
        assert_eq!(rates.prepaid_minute_rate, PREPAID_MINS_COST);
    }
}
