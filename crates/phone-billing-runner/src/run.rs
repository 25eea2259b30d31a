//! Month-by-month billing driver.
//!
//! A [`BillingRun`] owns one contract per phone line and replays call records in
//! chronological order: each period opens a fresh bill on every open line, then the
//! period's calls are charged to their calling line.

use std::collections::BTreeMap;

use phone_billing_core::{
    Bill, BillingPeriod, Call, CallCharge, Contract, ContractStatus, CustomerId, PhoneNumber,
    PlanRates, RatePlan,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::error::{Result, RunnerError};

/// One line's bill at the end of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineStatement {
    /// Owner of the line.
    pub customer: CustomerId,
    /// Line number.
    pub number: PhoneNumber,
    /// Plan the line is billed under.
    pub plan: RatePlan,
    /// Total of the bill.
    pub cost: Decimal,
    /// Fixed part of the bill.
    pub fixed_cost: Decimal,
    /// Minutes charged at the plan rate.
    pub billed_minutes: u32,
    /// Minutes taken from the free allowance.
    pub free_minutes: u32,
}

/// Snapshot of every open line at the end of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyStatement {
    /// The billed period.
    pub period: BillingPeriod,
    /// One entry per open line, ordered by number.
    pub lines: Vec<LineStatement>,
}

/// Final amount of a cancelled line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    /// Owner of the line.
    pub customer: CustomerId,
    /// Line number.
    pub number: PhoneNumber,
    /// Plan the line was billed under.
    pub plan: RatePlan,
    /// Amount owed; negative when money goes back to the customer.
    pub amount: Decimal,
}

#[derive(Debug)]
struct Line {
    customer: CustomerId,
    contract: Contract,
}

/// Drives every line of a dataset through its billing periods.
#[derive(Debug)]
pub struct BillingRun {
    lines: BTreeMap<PhoneNumber, Line>,
    statements: Vec<MonthlyStatement>,
}

impl BillingRun {
    /// Open a contract for every line of `dataset`, priced against `rates`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::DuplicateLine`] if two lines share a number.
    pub fn new(dataset: &Dataset, rates: &PlanRates) -> Result<Self> {
        let mut lines = BTreeMap::new();
        for customer in &dataset.customers {
            for line in &customer.lines {
                let contract = line.contract.open(rates);
                debug!(
                    customer = %customer.id,
                    number = %line.number,
                    contract_id = %contract.id(),
                    plan = %contract.plan(),
                    "Line opened"
                );
                let previous = lines.insert(
                    line.number.clone(),
                    Line {
                        customer: customer.id,
                        contract,
                    },
                );
                if previous.is_some() {
                    return Err(RunnerError::DuplicateLine {
                        number: line.number.clone(),
                    });
                }
            }
        }

        Ok(Self {
            lines,
            statements: Vec::new(),
        })
    }

    /// Bill `calls`, grouped by period, oldest period first.
    ///
    /// Periods without calls are not billed. A statement is recorded after each
    /// period.
    ///
    /// # Errors
    ///
    /// Returns an error if a contract rejects an operation.
    pub fn process(&mut self, calls: impl IntoIterator<Item = Call>) -> Result<()> {
        let mut by_period: BTreeMap<BillingPeriod, Vec<Call>> = BTreeMap::new();
        for call in calls {
            by_period.entry(call.period()).or_default().push(call);
        }

        for (period, mut calls) in by_period {
            calls.sort_by_key(|call| call.time);
            self.advance(period)?;
            for call in &calls {
                self.bill(call)?;
            }
            let statement = self.statement_for(period);
            info!(
                %period,
                calls = calls.len(),
                lines = statement.lines.len(),
                "Period billed"
            );
            self.statements.push(statement);
        }
        Ok(())
    }

    /// Open a fresh bill for `period` on every line that is not cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if a contract rejects the new month.
    pub fn advance(&mut self, period: BillingPeriod) -> Result<()> {
        for line in self.lines.values_mut() {
            if line.contract.status() != ContractStatus::Cancelled {
                line.contract.new_month(period, Bill::new())?;
            }
        }
        Ok(())
    }

    /// Charge `call` to its calling line.
    ///
    /// Returns `None` when the caller is not a known open line; such calls are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the line has not been advanced into a month yet.
    pub fn bill(&mut self, call: &Call) -> Result<Option<CallCharge>> {
        let Some(line) = self.lines.get_mut(&call.src_number) else {
            warn!(src = %call.src_number, time = %call.time, "Call from unknown line skipped");
            return Ok(None);
        };
        if line.contract.status() == ContractStatus::Cancelled {
            warn!(src = %call.src_number, time = %call.time, "Call from cancelled line skipped");
            return Ok(None);
        }
        Ok(Some(line.contract.bill_call(call)?))
    }

    /// Cancel the line `number` and return its settlement.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::UnknownLine`] for numbers outside the run, and a billing
    /// error if the contract cannot be cancelled.
    pub fn cancel_line(&mut self, number: &PhoneNumber) -> Result<Settlement> {
        let line = self
            .lines
            .get_mut(number)
            .ok_or_else(|| RunnerError::UnknownLine {
                number: number.clone(),
            })?;

        let amount = line.contract.cancel_contract()?;
        Ok(Settlement {
            customer: line.customer,
            number: number.clone(),
            plan: line.contract.plan(),
            amount,
        })
    }

    /// Statements recorded so far, oldest first.
    #[must_use]
    pub fn statements(&self) -> &[MonthlyStatement] {
        &self.statements
    }

    /// The statement of `period`, if it was billed.
    #[must_use]
    pub fn statement(&self, period: BillingPeriod) -> Option<&MonthlyStatement> {
        self.statements.iter().find(|s| s.period == period)
    }

    /// Sum of `customer`'s line costs in the statement of `period`.
    #[must_use]
    pub fn total_for(&self, customer: CustomerId, period: BillingPeriod) -> Decimal {
        self.statement(period)
            .map(|s| {
                s.lines
                    .iter()
                    .filter(|line| line.customer == customer)
                    .map(|line| line.cost)
                    .sum()
            })
            .unwrap_or_default()
    }

    /// The contract of line `number`.
    #[must_use]
    pub fn contract(&self, number: &PhoneNumber) -> Option<&Contract> {
        self.lines.get(number).map(|line| &line.contract)
    }

    fn statement_for(&self, period: BillingPeriod) -> MonthlyStatement {
        let lines = self
            .lines
            .iter()
            .filter(|(_, line)| line.contract.status() == ContractStatus::Active)
            .filter_map(|(number, line)| {
                let bill = line.contract.bill()?;
                Some(LineStatement {
                    customer: line.customer,
                    number: number.clone(),
                    plan: line.contract.plan(),
                    cost: bill.get_cost(),
                    fixed_cost: bill.fixed_cost(),
                    billed_minutes: bill.billed_minutes(),
                    free_minutes: bill.free_minutes(),
                })
            })
            .collect();

        MonthlyStatement { period, lines }
    }
}
