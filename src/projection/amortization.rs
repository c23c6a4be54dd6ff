//! Year-at-a-time mortgage amortization

use serde::Serialize;

use super::state::AmortizationState;
use crate::scenario::LoanTerms;

/// Interest and principal paid over one loan year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationYear {
    pub interest_paid: f64,
    pub principal_paid: f64,
    pub state: AmortizationState,
}

impl AmortizationYear {
    /// Total P&I actually paid this year (zero once the loan is retired)
    pub fn payments(&self) -> f64 {
        self.interest_paid + self.principal_paid
    }
}

/// Advance a loan by exactly twelve monthly payments
///
/// Each month: `interest = balance × r`, `principal = payment − interest`,
/// `balance −= principal`. No rounding is applied.
pub fn amortize_year(
    state: &AmortizationState,
    terms: &LoanTerms,
    monthly_payment: f64,
) -> AmortizationYear {
    let mut next = *state;
    let mut interest_paid = 0.0;
    let mut principal_paid = 0.0;

    for _ in 0..12 {
        let (interest, principal) = next.step_month(terms, monthly_payment);
        interest_paid += interest;
        principal_paid += principal;
    }

    AmortizationYear {
        interest_paid,
        principal_paid,
        state: next,
    }
}

/// Full yearly schedule from origination to payoff
pub fn amortization_schedule(terms: &LoanTerms) -> Vec<AmortizationYear> {
    let payment = terms.monthly_payment();
    let mut state = AmortizationState::new(terms);

    (0..terms.term_years())
        .map(|_| {
            let year = amortize_year(&state, terms, payment);
            state = year.state;
            year
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::{prop_assert, proptest};

    #[test]
    fn test_first_year_three_percent_down() {
        let terms = LoanTerms::thirty_year(1_843_000.0, 0.06).unwrap();
        let state = AmortizationState::new(&terms);

        let year = amortize_year(&state, &terms, terms.monthly_payment());

        assert_abs_diff_eq!(year.principal_paid, 22_632.26, epsilon = 0.01);
        assert_abs_diff_eq!(year.interest_paid, 109_964.34, epsilon = 0.01);
        assert_abs_diff_eq!(year.state.remaining_balance, 1_820_367.74, epsilon = 0.01);
        assert_eq!(year.state.months_elapsed, 12);
        assert_abs_diff_eq!(year.payments(), terms.monthly_payment() * 12.0, epsilon = 1e-6);
    }

    #[test]
    fn test_matches_closed_form_balance() {
        let terms = LoanTerms::thirty_year(1_520_000.0, 0.0615).unwrap();
        let schedule = amortization_schedule(&terms);

        for (i, year) in schedule.iter().enumerate().take(29) {
            let months = (i as u32 + 1) * 12;
            assert_abs_diff_eq!(
                year.state.remaining_balance,
                terms.remaining_balance_after(months),
                epsilon = 1e-4
            );
        }
        assert_eq!(schedule.last().unwrap().state.remaining_balance, 0.0);
    }

    #[test]
    fn test_zero_rate_loan() {
        let terms = LoanTerms::new(120_000.0, 0.0, 10).unwrap();
        let schedule = amortization_schedule(&terms);

        assert_eq!(schedule.len(), 10);
        for year in &schedule {
            assert_eq!(year.interest_paid, 0.0);
            assert_abs_diff_eq!(year.principal_paid, 12_000.0, epsilon = 1e-6);
        }
        assert_eq!(schedule[9].state.remaining_balance, 0.0);
    }

    #[test]
    fn test_no_payments_after_payoff() {
        let terms = LoanTerms::new(50_000.0, 0.05, 1).unwrap();
        let state = AmortizationState::new(&terms);
        let first = amortize_year(&state, &terms, terms.monthly_payment());
        let second = amortize_year(&first.state, &terms, terms.monthly_payment());

        assert_eq!(first.state.remaining_balance, 0.0);
        assert_eq!(second.payments(), 0.0);
        assert_eq!(second.state.remaining_balance, 0.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_principal_sums_to_loan(
            principal in 10_000.0f64..3_000_000.0,
            rate in 0.0f64..0.15,
            term in 1u32..=40,
        ) {
            let terms = LoanTerms::new(principal, rate, term).unwrap();
            let schedule = amortization_schedule(&terms);
            let repaid: f64 = schedule.iter().map(|y| y.principal_paid).sum();

            prop_assert!((repaid - principal).abs() <= principal * 1e-9);
            prop_assert!(schedule.last().unwrap().state.remaining_balance == 0.0);
        }

        #[test]
        fn prop_balance_never_increases(
            principal in 10_000.0f64..3_000_000.0,
            rate in 0.0f64..0.15,
            term in 1u32..=40,
        ) {
            let terms = LoanTerms::new(principal, rate, term).unwrap();
            let payment = terms.monthly_payment();
            let mut state = AmortizationState::new(&terms);
            let mut previous = state.remaining_balance;

            for _ in 0..terms.total_months() + 12 {
                state.step_month(&terms, payment);
                prop_assert!(state.remaining_balance <= previous);
                prop_assert!(state.remaining_balance >= 0.0);
                previous = state.remaining_balance;
            }
        }
    }
}
