//! PMI charging rule and year-by-year removal timeline

use serde::Serialize;

use super::amortization::amortize_year;
use super::state::AmortizationState;
use crate::assumptions::Assumptions;
use crate::scenario::Ownership;

/// Whether PMI is charged for a year given the year-end position
///
/// Equity is the owned share of market value less the loan balance, measured
/// against the owned share of the ORIGINAL purchase price. Nothing is charged
/// once the loan is retired.
pub fn pmi_charged(ownership: &Ownership, home_value: f64, mortgage_balance: f64) -> bool {
    let pmi = match &ownership.pmi {
        Some(pmi) => pmi,
        None => return false,
    };
    if mortgage_balance <= 0.0 {
        return false;
    }

    let equity = home_value * ownership.ownership_share - mortgage_balance;
    pmi.applies(equity, ownership.purchase_price * ownership.ownership_share)
}

/// One year of the PMI timeline
#[derive(Debug, Clone, Serialize)]
pub struct PmiYear {
    pub year: u32,
    pub home_value: f64,
    pub mortgage_balance: f64,
    pub equity: f64,

    /// Equity over the owned share of the original purchase price
    pub equity_fraction: f64,

    pub pmi_charged: bool,
    pub pmi_paid: f64,
    pub cumulative_pmi: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PmiTimeline {
    pub rows: Vec<PmiYear>,

    /// First year in which PMI is no longer charged
    pub removal_year: Option<u32>,

    pub total_pmi: f64,
}

/// Trace equity and PMI for an ownership over `years`
pub fn pmi_timeline(ownership: &Ownership, assumptions: &Assumptions, years: u32) -> PmiTimeline {
    let terms = &ownership.loan;
    let payment = terms.monthly_payment();
    let growth = 1.0 + assumptions.market.home_appreciation;
    let owned_price = ownership.purchase_price * ownership.ownership_share;
    let premium = ownership.pmi.map(|p| p.annual_premium).unwrap_or(0.0);

    let mut state = AmortizationState::new(terms);
    let mut rows = Vec::with_capacity(years as usize);
    let mut removal_year = None;
    let mut cumulative_pmi = 0.0;

    for year in 1..=years {
        state = amortize_year(&state, terms, payment).state;
        let home_value = ownership.purchase_price * growth.powi(year as i32);
        let mortgage_balance = state.remaining_balance;
        let equity = home_value * ownership.ownership_share - mortgage_balance;

        let charged = pmi_charged(ownership, home_value, mortgage_balance);
        let pmi_paid = if charged { premium } else { 0.0 };
        cumulative_pmi += pmi_paid;

        if !charged && removal_year.is_none() && ownership.pmi.is_some() {
            removal_year = Some(year);
        }

        rows.push(PmiYear {
            year,
            home_value,
            mortgage_balance,
            equity,
            equity_fraction: equity / owned_price,
            pmi_charged: charged,
            pmi_paid,
            cumulative_pmi,
        });
    }

    PmiTimeline {
        rows,
        removal_year,
        total_pmi: cumulative_pmi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{LoanTerms, Pmi};
    use approx::assert_relative_eq;

    fn three_percent_down() -> Ownership {
        Ownership::financed(1_900_000.0, 0.03, 0.06, 30)
            .unwrap()
            .with_pmi(Pmi::percent_of_price(1_900_000.0, 0.01))
    }

    #[test]
    fn test_removed_at_twenty_percent_of_purchase_price() {
        // Equity/price: 7.2%, 11.5%, 16.1%, then 20.8% in year 4
        let timeline = pmi_timeline(&three_percent_down(), &Assumptions::bay_area_defaults(), 10);

        assert_eq!(timeline.removal_year, Some(4));
        assert!(timeline.rows[2].pmi_charged);
        assert!(!timeline.rows[3].pmi_charged);
        assert_relative_eq!(timeline.total_pmi, 57_000.0);
        assert_relative_eq!(timeline.rows[0].equity_fraction, 0.0719, epsilon = 1e-4);
    }

    #[test]
    fn test_no_appreciation_delays_removal() {
        let flat = Assumptions::bay_area_defaults().with_home_appreciation(0.0);
        let timeline = pmi_timeline(&three_percent_down(), &flat, 10);

        assert_eq!(timeline.removal_year, None);
        assert!(timeline.rows.iter().all(|r| r.pmi_charged));
    }

    #[test]
    fn test_life_of_loan_pmi_stops_at_payoff() {
        let loan = LoanTerms::new(100_000.0, 0.05, 2).unwrap();
        let own = Ownership::new(120_000.0, 20_000.0, loan).with_pmi(Pmi::for_life_of_loan(50.0));
        let timeline = pmi_timeline(&own, &Assumptions::bay_area_defaults(), 4);

        assert!(timeline.rows[0].pmi_charged);
        assert!(!timeline.rows[1].pmi_charged);
        assert_eq!(timeline.removal_year, Some(2));
        assert_relative_eq!(timeline.total_pmi, 600.0);
    }

    #[test]
    fn test_no_pmi_never_charged() {
        let own = Ownership::financed(1_900_000.0, 0.20, 0.06, 30).unwrap();
        assert!(!pmi_charged(&own, 1_900_000.0, 1_520_000.0));
        assert_eq!(pmi_timeline(&own, &Assumptions::default(), 3).removal_year, None);
    }
}
