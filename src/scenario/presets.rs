//! Ready-made scenario sets for a $1.9M San Francisco home

use super::{LoanTerms, Ownership, Pmi, Scenario};
use crate::assumptions::{Assumptions, MaintenanceBudget, TaxParameters};
use crate::error::ValidationError;

pub const PROPERTY_PRICE: f64 = 1_900_000.0;
pub const MONTHLY_RENT: f64 = 5_800.0;
pub const STARTING_CAPITAL: f64 = 410_000.0;
pub const MORTGAGE_RATE: f64 = 0.06;
pub const PROPERTY_TAX_RATE: f64 = 0.012;
pub const HOME_INSURANCE_ANNUAL: f64 = 3_000.0;
pub const CLOSING_COSTS: f64 = 30_000.0;
pub const PMI_RATE: f64 = 0.01;

/// Conventional purchase at the given down payment, PMI below 20% down
pub fn conventional_buyer(
    name: &str,
    down_payment_pct: f64,
    starting_capital: f64,
) -> Result<Scenario, ValidationError> {
    let mut ownership = Ownership::financed(PROPERTY_PRICE, down_payment_pct, MORTGAGE_RATE, 30)?
        .with_closing_costs(CLOSING_COSTS)
        .with_property_tax_rate(PROPERTY_TAX_RATE)
        .with_insurance(HOME_INSURANCE_ANNUAL);

    if down_payment_pct < 0.20 {
        ownership = ownership.with_pmi(Pmi::percent_of_price(PROPERTY_PRICE, PMI_RATE));
    }

    Scenario::buyer(name, starting_capital, ownership)
}

/// Renting vs 3% down vs 20% down, everyone starting with $410K
pub fn rent_vs_buy() -> Result<Vec<Scenario>, ValidationError> {
    Ok(vec![
        Scenario::renter("Renting", STARTING_CAPITAL, MONTHLY_RENT)?,
        conventional_buyer("3% Down", 0.03, STARTING_CAPITAL)?,
        conventional_buyer("20% Down", 0.20, STARTING_CAPITAL)?,
    ])
}

/// Every down payment level from 3% to 20%, plus renting
pub fn down_payment_ladder() -> Result<Vec<Scenario>, ValidationError> {
    let mut scenarios = vec![Scenario::renter("Renting", STARTING_CAPITAL, MONTHLY_RENT)?];
    for pct in [3, 5, 10, 15, 20] {
        scenarios.push(conventional_buyer(
            &format!("{}% Down", pct),
            pct as f64 / 100.0,
            STARTING_CAPITAL,
        )?);
    }
    Ok(scenarios)
}

/// Ground lease (buyer owns the 40% structure share, FHA financing) vs a
/// traditional 20% down purchase
pub fn ground_lease_vs_traditional() -> Result<Vec<Scenario>, ValidationError> {
    let maintenance = MaintenanceBudget::bay_area_single_family().annual_total();
    let property_tax = 1_868.0 * 12.0;
    let insurance = 125.0 * 12.0;

    // 3.5% down on the structure; 1.75% upfront FHA premium rolled into the loan
    let structure_value = PROPERTY_PRICE * 0.40;
    let structure_down = structure_value * 0.035;
    let ground_lease_loan = LoanTerms::thirty_year(746_234.0, 0.0625)?;
    let ground_lease = Ownership::new(PROPERTY_PRICE, structure_down, ground_lease_loan)
        .with_closing_costs(30_000.0)
        .with_property_tax(property_tax)
        .with_insurance(insurance)
        .with_maintenance(maintenance)
        .with_pmi(Pmi::for_life_of_loan(336.0))
        .with_land_lease(6_650.0)
        .with_ownership_share(0.40);

    let traditional = Ownership::financed(PROPERTY_PRICE, 0.20, 0.0615, 30)?
        .with_closing_costs(CLOSING_COSTS)
        .with_property_tax(property_tax)
        .with_insurance(insurance)
        .with_maintenance(maintenance);

    Ok(vec![
        Scenario::buyer("Ground Lease", 379_000.0 + ground_lease.upfront_costs(), ground_lease)?,
        Scenario::buyer("Traditional 20%", 9_000.0 + traditional.upfront_costs(), traditional)?,
    ])
}

/// Assumptions matching the ground lease comparison (federal bracket only)
pub fn ground_lease_assumptions() -> Assumptions {
    Assumptions {
        tax: TaxParameters::federal_only(),
        ..Assumptions::bay_area_defaults()
    }
}
