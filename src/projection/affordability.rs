//! Household income needed to carry a year's housing cost

use serde::{Deserialize, Serialize};

use super::cashflows::AnnualCostProfile;
use crate::error::ValidationError;

/// Share of take-home pay a household can put toward housing
pub const DEFAULT_HOUSING_SHARE: f64 = 0.40;

/// Federal 32% bracket + California 9.3% + FICA 7.65%
pub const DEFAULT_COMBINED_TAX_RATE: f64 = 0.32 + 0.093 + 0.0765;

/// Income that keeps a cost profile within the housing share
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredIncome {
    pub monthly_take_home: f64,
    pub annual_take_home: f64,
    pub annual_pre_tax: f64,
}

impl RequiredIncome {
    /// Pre-tax income split evenly across `earners`
    pub fn per_earner(&self, earners: u32) -> f64 {
        self.annual_pre_tax / earners.max(1) as f64
    }
}

/// Income needed so the profile's after-tax monthly cost is `housing_share`
/// of take-home pay, grossed up at a flat `combined_tax_rate`
pub fn required_income(
    profile: &AnnualCostProfile,
    housing_share: f64,
    combined_tax_rate: f64,
) -> Result<RequiredIncome, ValidationError> {
    if !(housing_share > 0.0 && housing_share <= 1.0) {
        return Err(ValidationError::HousingShareOutOfRange(housing_share));
    }
    if !(0.0..1.0).contains(&combined_tax_rate) {
        return Err(ValidationError::IncomeTaxRateOutOfRange(combined_tax_rate));
    }

    let monthly_take_home = profile.monthly_net_cost() / housing_share;
    let annual_take_home = monthly_take_home * 12.0;

    Ok(RequiredIncome {
        monthly_take_home,
        annual_take_home,
        annual_pre_tax: annual_take_home / (1.0 - combined_tax_rate),
    })
}
