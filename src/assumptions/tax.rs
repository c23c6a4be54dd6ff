//! Income tax parameters for the itemized-deduction comparison

use serde::{Deserialize, Serialize};

/// Loan amount used when pro-rating deductible mortgage interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeductibleDebtBasis {
    /// Original loan principal for every year of the horizon
    OriginalPrincipal,
    /// Balance outstanding at the start of each year
    OutstandingBalance,
}

impl Default for DeductibleDebtBasis {
    fn default() -> Self {
        DeductibleDebtBasis::OriginalPrincipal
    }
}

/// Tax constants shared by every scenario in a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxParameters {
    /// Combined marginal income tax rate (federal + state)
    pub marginal_rate: f64,

    /// Standard deduction the household otherwise takes
    pub standard_deduction: f64,

    /// Cap on deductible state and local taxes
    pub salt_cap: f64,

    /// Acquisition debt ceiling for the mortgage interest deduction
    pub mortgage_debt_cap: f64,

    /// Which loan amount the debt ceiling is compared against
    pub debt_basis: DeductibleDebtBasis,

    /// Long-term capital gains rate applied on liquidation, if modelled
    pub capital_gains_rate: Option<f64>,
}

impl TaxParameters {
    /// Married filing jointly, ~$400K W-2 income in California
    pub fn california_high_earner() -> Self {
        Self {
            marginal_rate: 0.413,
            standard_deduction: 31_500.0,
            salt_cap: 10_000.0,
            mortgage_debt_cap: 750_000.0,
            debt_basis: DeductibleDebtBasis::OriginalPrincipal,
            capital_gains_rate: Some(0.15 + 0.093), // federal LTCG + CA
        }
    }

    /// Federal bracket only, 2024 standard deduction
    pub fn federal_only() -> Self {
        Self {
            marginal_rate: 0.32,
            standard_deduction: 29_200.0,
            salt_cap: 10_000.0,
            mortgage_debt_cap: 750_000.0,
            debt_basis: DeductibleDebtBasis::OriginalPrincipal,
            capital_gains_rate: Some(0.15),
        }
    }
}

impl Default for TaxParameters {
    fn default() -> Self {
        Self::california_high_earner()
    }
}
