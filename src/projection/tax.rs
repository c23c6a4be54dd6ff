//! Itemized deduction versus standard deduction
//!
//! The household always takes the better of the two, so the benefit of
//! owning is only the excess of itemized deductions over the standard
//! deduction, taxed at the marginal rate.

use serde::Serialize;

use crate::assumptions::TaxParameters;

/// Itemization detail for one tax year
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TaxBreakdown {
    pub deductible_interest: f64,
    pub deductible_salt: f64,
    pub itemized_total: f64,
    pub excess_over_standard: f64,
    pub tax_benefit: f64,
}

/// Mortgage interest deductible under the acquisition debt ceiling
///
/// Loans above the ceiling deduct interest pro rata
/// (`interest × ceiling / loan`); there is no cutoff at a balance threshold.
pub fn deductible_interest(interest_paid: f64, loan_amount: f64, debt_ceiling: f64) -> f64 {
    if loan_amount <= debt_ceiling {
        interest_paid
    } else {
        interest_paid * (debt_ceiling / loan_amount)
    }
}

/// Annual tax saving from itemizing; never negative
pub fn compute_tax_benefit(
    interest_paid: f64,
    property_tax_paid: f64,
    loan_amount: f64,
    debt_ceiling: f64,
    salt_ceiling: f64,
    standard_deduction: f64,
    marginal_rate: f64,
) -> f64 {
    itemize_with(
        interest_paid,
        property_tax_paid,
        loan_amount,
        debt_ceiling,
        salt_ceiling,
        standard_deduction,
        marginal_rate,
    )
    .tax_benefit
}

/// Full itemization using the shared tax parameters
pub fn itemize(
    interest_paid: f64,
    property_tax_paid: f64,
    loan_amount: f64,
    params: &TaxParameters,
) -> TaxBreakdown {
    itemize_with(
        interest_paid,
        property_tax_paid,
        loan_amount,
        params.mortgage_debt_cap,
        params.salt_cap,
        params.standard_deduction,
        params.marginal_rate,
    )
}

fn itemize_with(
    interest_paid: f64,
    property_tax_paid: f64,
    loan_amount: f64,
    debt_ceiling: f64,
    salt_ceiling: f64,
    standard_deduction: f64,
    marginal_rate: f64,
) -> TaxBreakdown {
    let deductible_interest = deductible_interest(interest_paid, loan_amount, debt_ceiling);
    let deductible_salt = property_tax_paid.min(salt_ceiling);
    let itemized_total = deductible_interest + deductible_salt;
    let excess_over_standard = (itemized_total - standard_deduction).max(0.0);

    TaxBreakdown {
        deductible_interest,
        deductible_salt,
        itemized_total,
        excess_over_standard,
        tax_benefit: excess_over_standard * marginal_rate,
    }
}
