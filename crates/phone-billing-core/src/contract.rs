//! Contract types for phone-billing.
//!
//! A contract owns the bill of the month it was last advanced into and decides,
//! per plan, how a month opens, how a call is charged and what closing the line
//! costs. The driver must advance contracts in chronological order and bill each
//! call between its month's [`Contract::new_month`] and the next one; that ordering
//! is not checked here.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::bill::{Bill, RatePlan};
use crate::call::Call;
use crate::error::{BillingError, Result};
use crate::ids::ContractId;
use crate::period::BillingPeriod;
use crate::rates::PlanRates;

/// Lifecycle of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractStatus {
    /// Created, never advanced into a month.
    Pending,

    /// Holds a bill for its current month.
    Active,

    /// Cancelled; no further operations are accepted.
    Cancelled,
}

/// Plan-specific state of a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractKind {
    /// No commitment, no allowance, flat monthly fee.
    MonthToMonth,

    /// Fixed term with a deposit and a monthly free-minute allowance.
    Term {
        /// Contractual end of the term.
        end: NaiveDate,
        /// Every period the contract was advanced into, oldest first.
        billed_periods: Vec<BillingPeriod>,
    },

    /// Prepaid credit carried from month to month.
    Prepaid {
        /// Running balance; negative while the customer is in credit.
        balance: Decimal,
    },
}

/// How the minutes of one call were charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallCharge {
    /// Minutes taken from the free allowance.
    pub free_minutes: u32,

    /// Minutes charged at the per-minute rate.
    pub billed_minutes: u32,
}

impl CallCharge {
    /// Total minutes of the call.
    #[must_use]
    pub const fn total_minutes(&self) -> u32 {
        self.free_minutes + self.billed_minutes
    }
}

/// A phone-line contract.
#[derive(Debug, Clone)]
pub struct Contract {
    id: ContractId,
    start: Option<NaiveDate>,
    bill: Option<Bill>,
    status: ContractStatus,
    kind: ContractKind,
    rates: PlanRates,
}

impl Contract {
    fn open(start: NaiveDate, kind: ContractKind) -> Self {
        Self {
            id: ContractId::generate(),
            start: Some(start),
            bill: None,
            status: ContractStatus::Pending,
            kind,
            rates: PlanRates::default(),
        }
    }

    /// Open a month-to-month contract.
    #[must_use]
    pub fn month_to_month(start: NaiveDate) -> Self {
        Self::open(start, ContractKind::MonthToMonth)
    }

    /// Open a term contract running from `start` to `end`.
    #[must_use]
    pub fn term(start: NaiveDate, end: NaiveDate) -> Self {
        Self::open(
            start,
            ContractKind::Term {
                end,
                billed_periods: Vec::new(),
            },
        )
    }

    /// Open a prepaid contract with an initial credit of `top_up` dollars.
    #[must_use]
    pub fn prepaid(start: NaiveDate, top_up: Decimal) -> Self {
        Self::open(start, ContractKind::Prepaid { balance: -top_up })
    }

    /// Price this contract against `rates` instead of the standard schedule.
    #[must_use]
    pub fn with_rates(mut self, rates: PlanRates) -> Self {
        self.rates = rates;
        self
    }

    /// Contract identifier, used to correlate log records.
    #[must_use]
    pub const fn id(&self) -> ContractId {
        self.id
    }

    /// Start date; cleared when a month-to-month or term contract is cancelled.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Bill of the month the contract was last advanced into.
    #[must_use]
    pub const fn bill(&self) -> Option<&Bill> {
        self.bill.as_ref()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> ContractStatus {
        self.status
    }

    /// Plan-specific state.
    #[must_use]
    pub const fn kind(&self) -> &ContractKind {
        &self.kind
    }

    /// Rates this contract prices against.
    #[must_use]
    pub const fn rates(&self) -> &PlanRates {
        &self.rates
    }

    /// The plan of this contract.
    #[must_use]
    pub fn plan(&self) -> RatePlan {
        match self.kind {
            ContractKind::MonthToMonth => RatePlan::Mtm,
            ContractKind::Term { .. } => RatePlan::Term,
            ContractKind::Prepaid { .. } => RatePlan::Prepaid,
        }
    }

    /// Prepaid balance, `None` for other plans.
    #[must_use]
    pub fn balance(&self) -> Option<Decimal> {
        match self.kind {
            ContractKind::Prepaid { balance } => Some(balance),
            _ => None,
        }
    }

    /// Term end date, `None` for other plans.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        match self.kind {
            ContractKind::Term { end, .. } => Some(end),
            _ => None,
        }
    }

    /// Periods a term contract was advanced into; empty for other plans.
    #[must_use]
    pub fn billed_periods(&self) -> &[BillingPeriod] {
        match &self.kind {
            ContractKind::Term { billed_periods, .. } => billed_periods,
            _ => &[],
        }
    }

    /// Advance the contract into `period`, taking ownership of its fresh `bill`.
    ///
    /// Sets the plan rate and fixed charges on the bill:
    /// - month-to-month: the monthly fee;
    /// - term: the monthly fee, plus the deposit when `period` has the same month
    ///   number as the start date (the year is not compared);
    /// - prepaid: the carried balance, after reconciling it with the previous bill
    ///   and topping it up when the credit has dropped below the threshold.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::ContractClosed`] if the contract was cancelled.
    pub fn new_month(&mut self, period: BillingPeriod, mut bill: Bill) -> Result<()> {
        self.ensure_open()?;

        let rates = &self.rates;
        match &mut self.kind {
            ContractKind::MonthToMonth => {
                bill.set_rates(RatePlan::Mtm, rates.mtm_minute_rate);
                bill.add_fixed_cost(rates.mtm_monthly_fee);
            }
            ContractKind::Term { billed_periods, .. } => {
                bill.set_rates(RatePlan::Term, rates.term_minute_rate);
                if self.start.is_some_and(|start| start.month() == period.month()) {
                    bill.add_fixed_cost(rates.term_monthly_fee + rates.term_deposit);
                } else {
                    bill.add_fixed_cost(rates.term_monthly_fee);
                }
                billed_periods.push(period);
            }
            ContractKind::Prepaid { balance } => {
                if let Some(previous) = &self.bill {
                    *balance = previous.get_cost();
                }
                if *balance > -rates.prepaid_top_up_threshold {
                    *balance -= rates.prepaid_top_up_amount;
                    debug!(
                        contract_id = %self.id,
                        %period,
                        balance = %balance,
                        "Prepaid credit topped up"
                    );
                }
                bill.set_rates(RatePlan::Prepaid, rates.prepaid_minute_rate);
                bill.add_fixed_cost(*balance);
            }
        }

        debug!(
            contract_id = %self.id,
            %period,
            fixed_cost = %bill.fixed_cost(),
            "Contract advanced to new month"
        );

        self.bill = Some(bill);
        self.status = ContractStatus::Active;
        Ok(())
    }

    /// Charge `call` to the current bill.
    ///
    /// Minutes are rounded up per call. Term contracts draw on their monthly free
    /// minutes first and bill only what does not fit; other plans bill every minute.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::NotActivated`] before the first month and
    /// [`BillingError::ContractClosed`] after cancellation.
    pub fn bill_call(&mut self, call: &Call) -> Result<CallCharge> {
        self.ensure_open()?;
        let contract_id = self.id;
        let bill = self
            .bill
            .as_mut()
            .ok_or(BillingError::NotActivated { contract_id })?;

        let minutes = call.billable_minutes();
        let charge = match self.kind {
            ContractKind::Term { .. } => {
                let allowance = self.rates.term_free_minutes;
                let free = minutes.min(allowance.saturating_sub(bill.free_minutes()));
                CallCharge {
                    free_minutes: free,
                    billed_minutes: minutes - free,
                }
            }
            ContractKind::MonthToMonth | ContractKind::Prepaid { .. } => CallCharge {
                free_minutes: 0,
                billed_minutes: minutes,
            },
        };

        bill.add_free_minutes(charge.free_minutes);
        bill.add_billed_minutes(charge.billed_minutes);

        debug!(
            %contract_id,
            src = %call.src_number,
            free_minutes = charge.free_minutes,
            billed_minutes = charge.billed_minutes,
            "Call billed"
        );
        Ok(charge)
    }

    /// Close the line and return what settles it.
    ///
    /// - month-to-month: the current bill.
    /// - term: the current bill, with the deposit refunded only when the last
    ///   billed period is strictly after the end date's month.
    /// - prepaid: the reconciled balance when the customer owes money, otherwise
    ///   zero; the start date is kept.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::NotActivated`] before the first month and
    /// [`BillingError::ContractClosed`] if already cancelled.
    pub fn cancel_contract(&mut self) -> Result<Decimal> {
        self.ensure_open()?;
        let contract_id = self.id;
        let bill = self
            .bill
            .as_mut()
            .ok_or(BillingError::NotActivated { contract_id })?;

        let amount = match &mut self.kind {
            ContractKind::MonthToMonth => {
                self.start = None;
                bill.get_cost()
            }
            ContractKind::Term {
                end,
                billed_periods,
            } => {
                let end = *end;
                let last = billed_periods
                    .last()
                    .ok_or(BillingError::NotActivated { contract_id })?;
                if last.is_after(&end) {
                    bill.add_fixed_cost(-self.rates.term_deposit);
                    info!(%contract_id, period = %last, %end, "Term deposit refunded");
                }
                self.start = None;
                bill.get_cost()
            }
            ContractKind::Prepaid { balance } => {
                *balance = bill.get_cost();
                (*balance).max(Decimal::ZERO)
            }
        };

        self.status = ContractStatus::Cancelled;
        info!(%contract_id, plan = %self.plan(), %amount, "Contract cancelled");
        Ok(amount)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.status == ContractStatus::Cancelled {
            return Err(BillingError::ContractClosed {
                contract_id: self.id,
            });
        }
        Ok(())
    }
}
