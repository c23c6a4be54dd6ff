//! Mutable per-scenario state advanced during a projection

use serde::Serialize;

use crate::scenario::{LoanTerms, Scenario};
use super::investment::grow_investment;

/// Outstanding loan balance, advanced one month at a time
///
/// One instance per scenario; never shared. The balance only moves down
/// and is exactly zero from the final scheduled payment onwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationState {
    pub remaining_balance: f64,
    pub months_elapsed: u32,
}

impl AmortizationState {
    /// State at loan origination
    pub fn new(terms: &LoanTerms) -> Self {
        Self {
            remaining_balance: terms.principal(),
            months_elapsed: 0,
        }
    }

    pub fn is_paid_off(&self, terms: &LoanTerms) -> bool {
        self.months_elapsed >= terms.total_months() || self.remaining_balance <= 0.0
    }

    /// Apply one scheduled payment, returning `(interest, principal)`
    ///
    /// The final scheduled payment retires whatever balance remains, so
    /// accumulated float error never leaves a residual or overshoots.
    pub fn step_month(&mut self, terms: &LoanTerms, monthly_payment: f64) -> (f64, f64) {
        if self.is_paid_off(terms) {
            self.remaining_balance = 0.0;
            self.months_elapsed += 1;
            return (0.0, 0.0);
        }

        let interest = self.remaining_balance * terms.monthly_rate();
        let mut principal = monthly_payment - interest;

        let final_payment = self.months_elapsed + 1 >= terms.total_months();
        if final_payment || principal > self.remaining_balance {
            principal = self.remaining_balance;
        }

        self.remaining_balance = (self.remaining_balance - principal).max(0.0);
        self.months_elapsed += 1;

        (interest, principal)
    }
}

/// Investment account with cost basis tracking
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvestmentAccount {
    pub balance: f64,

    /// Starting capital plus net contributions
    pub cost_basis: f64,
}

impl InvestmentAccount {
    pub fn new(initial: f64) -> Self {
        Self {
            balance: initial,
            cost_basis: initial,
        }
    }

    /// Twelve end-of-month contributions at a level monthly return
    pub fn grow_year(&mut self, monthly_contribution: f64, monthly_return: f64) {
        self.balance = grow_investment(self.balance, monthly_contribution, monthly_return, 12);
        self.cost_basis += monthly_contribution * 12.0;
    }

    pub fn unrealized_gain(&self) -> f64 {
        self.balance - self.cost_basis
    }
}

/// Everything a scenario carries from one projection year to the next
#[derive(Debug, Clone)]
pub struct ScenarioState {
    /// Projection year just completed (0 before the first year)
    pub year: u32,

    /// Loan position, `None` for renters
    pub amortization: Option<AmortizationState>,

    /// Scheduled P&I payment, fixed at origination
    pub monthly_payment: f64,

    /// Full market value of the home (before ownership share)
    pub home_value: f64,

    pub account: InvestmentAccount,

    /// Whether a negative contribution has already been reported
    pub shortfall_reported: bool,
}

impl ScenarioState {
    /// Initialize state from a scenario at projection start
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let ownership = scenario.ownership();
        Self {
            year: 0,
            amortization: ownership.map(|o| AmortizationState::new(&o.loan)),
            monthly_payment: ownership.map(|o| o.loan.monthly_payment()).unwrap_or(0.0),
            home_value: ownership.map(|o| o.purchase_price).unwrap_or(0.0),
            account: InvestmentAccount::new(scenario.initial_investment()),
            shortfall_reported: false,
        }
    }

    pub fn mortgage_balance(&self) -> f64 {
        self.amortization.map(|a| a.remaining_balance).unwrap_or(0.0)
    }
}
