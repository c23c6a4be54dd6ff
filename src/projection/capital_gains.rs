//! Savings targets, cost basis, and capital gains on liquidation
//!
//! Two distinct solves live here and are kept apart on purpose:
//! - [`required_monthly_contribution`]: contribution needed to reach a target
//! - [`future_value_of_contributions`]: ending value produced by a contribution

use serde::Serialize;

use super::investment::grow_investment;

/// Future value factor of level end-of-month contributions
fn annuity_factor(months: u32, monthly_rate: f64) -> f64 {
    if monthly_rate == 0.0 {
        return months as f64;
    }
    ((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate
}

/// Level monthly contribution that grows to `target` after `months`
pub fn required_monthly_contribution(target: f64, months: u32, annual_return: f64) -> f64 {
    if months == 0 {
        return target;
    }
    target / annuity_factor(months, annual_return / 12.0)
}

/// Value after `months` of level end-of-month contributions from zero
pub fn future_value_of_contributions(monthly_contribution: f64, months: u32, annual_return: f64) -> f64 {
    monthly_contribution * annuity_factor(months, annual_return / 12.0)
}

/// Proceeds of selling an account outright
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Liquidation {
    pub gross_value: f64,
    pub cost_basis: f64,
    pub capital_gain: f64,
    pub tax: f64,
    pub net_proceeds: f64,
}

/// Sell everything; only positive gains are taxed
pub fn liquidate(balance: f64, cost_basis: f64, capital_gains_rate: f64) -> Liquidation {
    let capital_gain = balance - cost_basis;
    let tax = capital_gain.max(0.0) * capital_gains_rate;
    Liquidation {
        gross_value: balance,
        cost_basis,
        capital_gain,
        tax,
        net_proceeds: balance - tax,
    }
}

/// Pre-tax savings target that nets `needed_after_tax` once sold
///
/// The balance is assumed to be built from level monthly contributions, so
/// the cost basis is a fixed fraction of the target and the solve is closed
/// form.
pub fn gross_target_for_after_tax(
    needed_after_tax: f64,
    months: u32,
    annual_return: f64,
    capital_gains_rate: f64,
) -> f64 {
    if months == 0 {
        return needed_after_tax;
    }
    let basis_fraction = months as f64 / annuity_factor(months, annual_return / 12.0);
    if basis_fraction >= 1.0 {
        return needed_after_tax;
    }
    needed_after_tax / (1.0 - capital_gains_rate * (1.0 - basis_fraction))
}

/// Save monthly up to a target, let it grow, then sell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FundingOutcome {
    pub monthly_contribution: f64,
    pub value_at_target: f64,
    pub value_at_sale: f64,
    pub liquidation: Liquidation,
}

/// Fund a purchase by dollar-cost averaging into `target` over
/// `saving_months`, holding for `holding_months`, then selling
///
/// The holding period compounds monthly at `annual_return / 12`, the same as
/// the saving period, rather than once per whole year held. A 12-month hold
/// therefore grows by `(1 + r/12)^12`, slightly more than `1 + r`.
pub fn fund_by_saving(
    target: f64,
    saving_months: u32,
    holding_months: u32,
    annual_return: f64,
    capital_gains_rate: f64,
) -> FundingOutcome {
    let monthly_contribution = required_monthly_contribution(target, saving_months, annual_return);
    let cost_basis = monthly_contribution * saving_months.max(1) as f64;
    let value_at_sale = grow_investment(target, 0.0, annual_return / 12.0, holding_months);

    FundingOutcome {
        monthly_contribution,
        value_at_target: target,
        value_at_sale,
        liquidation: liquidate(value_at_sale, cost_basis, capital_gains_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_contribution_and_future_value_are_inverse() {
        let monthly = required_monthly_contribution(410_000.0, 48, 0.07);
        let value = future_value_of_contributions(monthly, 48, 0.07);
        assert_relative_eq!(value, 410_000.0, max_relative = 1e-12);

        // Same result as stepping the account month by month
        assert_relative_eq!(
            grow_investment(0.0, monthly, 0.07 / 12.0, 48),
            value,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_zero_return_is_straight_division() {
        assert_eq!(required_monthly_contribution(60_000.0, 60, 0.0), 1_000.0);
        assert_eq!(future_value_of_contributions(1_000.0, 60, 0.0), 60_000.0);
    }

    #[test]
    fn test_liquidation_taxes_gain_only() {
        let sale = liquidate(500_000.0, 400_000.0, 0.243);
        assert_relative_eq!(sale.tax, 24_300.0);
        assert_relative_eq!(sale.net_proceeds, 475_700.0);

        let loss = liquidate(300_000.0, 400_000.0, 0.243);
        assert_eq!(loss.tax, 0.0);
        assert_eq!(loss.net_proceeds, 300_000.0);
    }

    #[test]
    fn test_gross_target_nets_requirement() {
        let target = gross_target_for_after_tax(56_600.0, 60, 0.07, 0.243);
        let monthly = required_monthly_contribution(target, 60, 0.07);
        let sale = liquidate(target, monthly * 60.0, 0.243);

        assert!(target > 56_600.0);
        assert_abs_diff_eq!(sale.net_proceeds, 56_600.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fund_by_saving_four_plus_one() {
        let outcome = fund_by_saving(410_000.0, 48, 12, 0.07, 0.243);

        assert!(outcome.liquidation.cost_basis < 410_000.0);
        assert!(outcome.value_at_sale > 410_000.0);
        assert!(outcome.liquidation.net_proceeds < outcome.value_at_sale);
        assert_relative_eq!(
            outcome.liquidation.net_proceeds,
            outcome.value_at_sale - outcome.liquidation.tax
        );
    }

    #[test]
    fn test_holding_period_compounds_monthly() {
        let outcome = fund_by_saving(410_000.0, 48, 12, 0.07, 0.243);
        let monthly = 410_000.0 * (1.0 + 0.07 / 12.0_f64).powi(12);

        assert_relative_eq!(outcome.value_at_sale, monthly, max_relative = 1e-12);
        assert!(outcome.value_at_sale > 410_000.0 * 1.07);
    }
}
