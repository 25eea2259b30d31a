//! Monthly bill for a single phone line.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Plan that priced a bill. Display-only; never drives billing logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePlan {
    /// Month-to-month plan.
    Mtm,
    /// Fixed-term plan.
    Term,
    /// Prepaid plan.
    Prepaid,
}

impl RatePlan {
    /// Get the plan label as shown on invoices.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mtm => "MTM",
            Self::Term => "TERM",
            Self::Prepaid => "PREPAID",
        }
    }
}

impl fmt::Display for RatePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice accumulator for one month of one contract.
///
/// Total cost is `fixed_cost + billed_minutes * rate_per_minute`; free minutes
/// are tracked but never priced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    rate_plan: Option<RatePlan>,
    rate_per_minute: Decimal,
    fixed_cost: Decimal,
    billed_minutes: u32,
    free_minutes: u32,
}

impl Bill {
    /// Create an empty bill with no plan, no rate and no charges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the plan label and the per-minute rate for this month.
    pub fn set_rates(&mut self, plan: RatePlan, rate_per_minute: Decimal) {
        self.rate_plan = Some(plan);
        self.rate_per_minute = rate_per_minute;
    }

    /// Add to the fixed part of the bill. Negative amounts are refunds or credit.
    pub fn add_fixed_cost(&mut self, amount: Decimal) {
        self.fixed_cost += amount;
    }

    /// Add minutes charged at the per-minute rate. The counter saturates at `u32::MAX`.
    pub fn add_billed_minutes(&mut self, minutes: u32) {
        self.billed_minutes = self.billed_minutes.saturating_add(minutes);
    }

    /// Add minutes taken from the free allowance. The counter saturates at `u32::MAX`.
    pub fn add_free_minutes(&mut self, minutes: u32) {
        self.free_minutes = self.free_minutes.saturating_add(minutes);
    }

    /// Total amount of the bill.
    #[must_use]
    pub fn get_cost(&self) -> Decimal {
        self.fixed_cost + Decimal::from(self.billed_minutes) * self.rate_per_minute
    }

    /// Plan that priced this bill, if rates were set.
    #[must_use]
    pub const fn rate_plan(&self) -> Option<RatePlan> {
        self.rate_plan
    }

    /// Cost per billed minute.
    #[must_use]
    pub const fn rate_per_minute(&self) -> Decimal {
        self.rate_per_minute
    }

    /// Fixed part of the bill.
    #[must_use]
    pub const fn fixed_cost(&self) -> Decimal {
        self.fixed_cost
    }

    /// Minutes charged at the per-minute rate.
    #[must_use]
    pub const fn billed_minutes(&self) -> u32 {
        self.billed_minutes
    }

    /// Minutes taken from the free allowance.
    #[must_use]
    pub const fn free_minutes(&self) -> u32 {
        self.free_minutes
    }
}
