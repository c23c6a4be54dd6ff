//! Core projection engine for yearly rent-versus-buy comparisons

use crate::assumptions::{Assumptions, DeductibleDebtBasis};
use crate::error::{ProjectionError, ValidationError};
use crate::scenario::{Scenario, Tenure};
use super::amortization::amortize_year;
use super::baseline::BaselineStrategy;
use super::capital_gains::liquidate;
use super::cashflows::{AnnualCostProfile, ProjectionResult, ScenarioProjection, YearRow};
use super::pmi::pmi_charged;
use super::state::ScenarioState;
use super::tax::itemize;

/// Longest horizon accepted by [`ProjectionEngine::run_horizon`]
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of years to project
    pub years: u32,

    /// Which monthly cost every scenario's savings are measured against
    pub baseline: BaselineStrategy,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            years: 30,
            baseline: BaselineStrategy::MostExpensive,
        }
    }
}

/// Main projection engine
///
/// Holds immutable assumptions; each run builds fresh per-scenario state, so
/// one engine can serve any number of runs.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run over the configured horizon
    pub fn run(&self, scenarios: &[Scenario]) -> Result<ProjectionResult, ProjectionError> {
        self.run_horizon(scenarios, self.config.years)
    }

    /// Project every scenario year by year over `years`
    ///
    /// Each year costs are escalated, loans amortized, homes appreciated,
    /// PMI and the tax benefit decided. The baseline is then resolved across
    /// all scenarios and each account grows by its own difference to it.
    pub fn run_horizon(
        &self,
        scenarios: &[Scenario],
        years: u32,
    ) -> Result<ProjectionResult, ProjectionError> {
        if years == 0 || years > MAX_HORIZON_YEARS {
            return Err(ValidationError::HorizonOutOfRange {
                years,
                max: MAX_HORIZON_YEARS,
            }
            .into());
        }
        if scenarios.is_empty() {
            return Err(ProjectionError::NoScenarios);
        }
        for scenario in scenarios {
            scenario.validate()?;
        }
        self.config.baseline.validate(scenarios)?;

        log::info!(
            "Projecting {} scenarios over {} years (baseline: {})",
            scenarios.len(),
            years,
            self.config.baseline
        );

        let monthly_return = self.assumptions.market.monthly_investment_return();
        let mut states: Vec<ScenarioState> = scenarios.iter().map(ScenarioState::from_scenario).collect();
        let mut projections: Vec<ScenarioProjection> = scenarios
            .iter()
            .map(|s| ScenarioProjection {
                name: s.name.clone(),
                is_owner: s.is_owner(),
                upfront_costs: s.upfront_costs(),
                initial_investment: s.initial_investment(),
                rows: Vec::with_capacity(years as usize),
            })
            .collect();
        let mut baseline_monthly = Vec::with_capacity(years as usize);

        for year in 1..=years {
            // Costs first: the baseline depends on every scenario's year
            let costs: Vec<(AnnualCostProfile, bool)> = scenarios
                .iter()
                .zip(states.iter_mut())
                .map(|(scenario, state)| self.cost_year(scenario, state, year))
                .collect();

            let monthly_costs: Vec<(&str, f64)> = scenarios
                .iter()
                .zip(&costs)
                .map(|(s, (profile, _))| (s.name.as_str(), profile.monthly_net_cost()))
                .collect();
            let baseline = self.config.baseline.resolve(&monthly_costs)?;
            baseline_monthly.push(baseline);

            for (((scenario, state), (profile, pmi_active)), projection) in scenarios
                .iter()
                .zip(states.iter_mut())
                .zip(costs)
                .zip(projections.iter_mut())
            {
                let contribution = baseline - profile.monthly_net_cost();
                if contribution < 0.0 && !state.shortfall_reported {
                    log::warn!(
                        "{}: year {} costs {:.2}/mo above the baseline, drawing down investments",
                        scenario.name,
                        year,
                        -contribution
                    );
                    state.shortfall_reported = true;
                }

                state.account.grow_year(contribution, monthly_return);
                state.year = year;

                let row = self.record_year(scenario, state, profile, contribution, pmi_active);
                log::debug!(
                    "{} year {}: net cost {:.2}/mo, contribution {:.2}/mo, net worth {:.2}",
                    scenario.name,
                    year,
                    row.costs.monthly_net_cost(),
                    contribution,
                    row.net_worth
                );
                projection.rows.push(row);
            }
        }

        Ok(ProjectionResult {
            years,
            baseline: self.config.baseline.clone(),
            baseline_monthly,
            scenarios: projections,
        })
    }

    /// Advance a scenario's housing position one year and price it
    ///
    /// Returns the cost profile and whether PMI was charged.
    fn cost_year(
        &self,
        scenario: &Scenario,
        state: &mut ScenarioState,
        year: u32,
    ) -> (AnnualCostProfile, bool) {
        let escalation = &self.assumptions.escalation;
        let billed = escalation.schedule_year(year);

        let ownership = match &scenario.tenure {
            Tenure::Rent { monthly_rent } => {
                let rent = escalation.rent.amount(monthly_rent * 12.0, billed);
                return (AnnualCostProfile::renting(year, rent), false);
            }
            Tenure::Own(ownership) => ownership,
        };

        let opening_balance = state.mortgage_balance();
        let (interest_paid, principal_paid) = match state.amortization {
            Some(amortization) => {
                let loan_year = amortize_year(&amortization, &ownership.loan, state.monthly_payment);
                state.amortization = Some(loan_year.state);
                (loan_year.interest_paid, loan_year.principal_paid)
            }
            None => (0.0, 0.0),
        };

        state.home_value = ownership.purchase_price
            * (1.0 + self.assumptions.market.home_appreciation).powi(year as i32);

        let pmi_active = pmi_charged(ownership, state.home_value, state.mortgage_balance());
        let pmi = if pmi_active {
            ownership.pmi.map(|p| p.annual_premium).unwrap_or(0.0)
        } else {
            0.0
        };

        let property_tax = escalation.property_tax.amount(ownership.property_tax_annual, billed);
        let insurance = escalation.insurance.amount(ownership.insurance_annual, billed);
        let maintenance = escalation.maintenance.amount(ownership.maintenance_annual, billed);
        let land_lease = escalation.land_lease.amount(ownership.land_lease_annual, billed);

        let tax = &self.assumptions.tax;
        let loan_amount = match tax.debt_basis {
            DeductibleDebtBasis::OriginalPrincipal => ownership.loan.principal(),
            DeductibleDebtBasis::OutstandingBalance => opening_balance,
        };
        let breakdown = itemize(interest_paid, property_tax, loan_amount, tax);

        let principal_and_interest = interest_paid + principal_paid;
        let gross_annual_cost =
            principal_and_interest + property_tax + insurance + pmi + land_lease + maintenance;

        let profile = AnnualCostProfile {
            year,
            principal_and_interest,
            interest_paid,
            principal_paid,
            property_tax,
            insurance,
            pmi,
            land_lease,
            maintenance,
            rent: 0.0,
            gross_annual_cost,
            deductible_mortgage_interest: breakdown.deductible_interest,
            deductible_salt: breakdown.deductible_salt,
            itemized_total: breakdown.itemized_total,
            tax_benefit: breakdown.tax_benefit,
            net_annual_cost: gross_annual_cost - breakdown.tax_benefit,
        };

        (profile, pmi_active)
    }

    /// Build the year-end row after the account has grown
    fn record_year(
        &self,
        scenario: &Scenario,
        state: &ScenarioState,
        costs: AnnualCostProfile,
        monthly_contribution: f64,
        pmi_active: bool,
    ) -> YearRow {
        let mortgage_balance = state.mortgage_balance();
        let home_equity = match scenario.ownership() {
            Some(ownership) => (state.home_value * ownership.ownership_share - mortgage_balance).max(0.0),
            None => 0.0,
        };
        let investment_balance = state.account.balance;

        YearRow {
            year: state.year,
            costs,
            monthly_contribution,
            investment_balance,
            cost_basis: state.account.cost_basis,
            after_tax_investments: self
                .assumptions
                .tax
                .capital_gains_rate
                .map(|rate| liquidate(investment_balance, state.account.cost_basis, rate).net_proceeds),
            home_value: state.home_value,
            mortgage_balance,
            home_equity,
            net_worth: investment_balance + home_equity,
            pmi_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::EscalationTiming;
    use crate::scenario::presets;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::{prop_assert_eq, proptest};

    fn engine(baseline: BaselineStrategy) -> ProjectionEngine {
        ProjectionEngine::new(
            Assumptions::bay_area_defaults(),
            ProjectionConfig { years: 30, baseline },
        )
    }

    #[test]
    fn test_rejects_bad_horizon() {
        let scenarios = presets::rent_vs_buy().unwrap();
        let engine = engine(BaselineStrategy::MostExpensive);

        for years in [0, MAX_HORIZON_YEARS + 1] {
            assert_eq!(
                engine.run_horizon(&scenarios, years).unwrap_err(),
                ProjectionError::Validation(ValidationError::HorizonOutOfRange {
                    years,
                    max: MAX_HORIZON_YEARS
                })
            );
        }
    }

    #[test]
    fn test_rejects_empty_and_unknown_baseline() {
        assert_eq!(
            engine(BaselineStrategy::MostExpensive).run(&[]).unwrap_err(),
            ProjectionError::NoScenarios
        );

        let scenarios = presets::rent_vs_buy().unwrap();
        assert_eq!(
            engine(BaselineStrategy::Scenario("Condo".into())).run(&scenarios).unwrap_err(),
            ProjectionError::UnknownBaseline("Condo".into())
        );
    }

    #[test]
    fn test_first_year_costs() {
        let scenarios = presets::rent_vs_buy().unwrap();
        let result = engine(BaselineStrategy::MostExpensive).run_horizon(&scenarios, 2).unwrap();

        let renter = &result.scenario("Renting").unwrap().rows;
        assert_eq!(renter[0].costs.rent, 69_600.0);
        assert_relative_eq!(renter[1].costs.rent, 69_600.0 * 1.03);
        assert_eq!(renter[0].costs.tax_benefit, 0.0);

        let low_down = &result.scenario("3% Down").unwrap().rows[0];
        assert_abs_diff_eq!(low_down.costs.interest_paid, 109_964.34, epsilon = 0.01);
        assert_abs_diff_eq!(low_down.mortgage_balance, 1_820_367.74, epsilon = 0.01);
        assert_eq!(low_down.costs.property_tax, 22_800.0);
        assert_eq!(low_down.costs.insurance, 3_000.0);
        assert_eq!(low_down.costs.pmi, 19_000.0);
        assert!(low_down.pmi_active);
        assert_eq!(low_down.costs.deductible_salt, 10_000.0);
        assert_relative_eq!(
            low_down.costs.net_annual_cost,
            low_down.costs.gross_annual_cost - low_down.costs.tax_benefit
        );

        // 3% down is the most expensive and sets the baseline
        assert_eq!(low_down.monthly_contribution, 0.0);
        assert_relative_eq!(result.baseline_monthly[0], low_down.costs.monthly_net_cost());
    }

    #[test]
    fn test_escalated_first_year_timing() {
        let scenarios = presets::rent_vs_buy().unwrap();
        let mut assumptions = Assumptions::bay_area_defaults();
        assumptions.escalation.timing = EscalationTiming::EscalatedInYearOne;
        let result = ProjectionEngine::new(assumptions, ProjectionConfig::default())
            .run_horizon(&scenarios, 2)
            .unwrap();

        let renter = &result.scenario("Renting").unwrap().rows;
        assert_relative_eq!(renter[0].costs.rent, 69_600.0 * 1.03);
        assert_relative_eq!(renter[1].costs.rent, 69_600.0 * 1.03 * 1.03);

        let low_down = &result.scenario("3% Down").unwrap().rows[0];
        assert_relative_eq!(low_down.costs.property_tax, 22_800.0 * 1.02);
        assert_relative_eq!(low_down.costs.insurance, 3_000.0 * 1.03);
    }

    #[test]
    fn test_named_baseline_contributes_nothing() {
        let scenarios = presets::rent_vs_buy().unwrap();
        let result = engine(BaselineStrategy::Scenario("20% Down".into())).run(&scenarios).unwrap();

        let twenty = result.scenario("20% Down").unwrap();
        assert!(twenty.rows.iter().all(|r| r.monthly_contribution == 0.0));
        // Started with nothing left over and never contributed
        assert_eq!(twenty.rows[0].investment_balance, 0.0);
    }

    #[test]
    fn test_net_worth_formula() {
        let scenarios = presets::ground_lease_vs_traditional().unwrap();
        let engine = ProjectionEngine::new(presets::ground_lease_assumptions(), ProjectionConfig::default());
        let result = engine.run(&scenarios).unwrap();

        for projection in &result.scenarios {
            let share = scenarios
                .iter()
                .find(|s| s.name == projection.name)
                .and_then(|s| s.ownership())
                .map(|o| o.ownership_share)
                .unwrap();
            for row in &projection.rows {
                let equity = (row.home_value * share - row.mortgage_balance).max(0.0);
                assert_relative_eq!(row.home_equity, equity);
                assert_relative_eq!(row.net_worth, row.investment_balance + equity);
            }
        }

        let ground_lease = &result.scenario("Ground Lease").unwrap().rows;
        assert_eq!(ground_lease[0].costs.land_lease, 6_650.0 * 12.0);
        assert_eq!(ground_lease[4].costs.land_lease, 6_650.0 * 12.0);
        assert_relative_eq!(ground_lease[5].costs.land_lease, 6_650.0 * 12.0 * 1.03);
        // FHA-style PMI for the whole loan
        assert!(ground_lease[28].pmi_active);
    }

    #[test]
    fn test_renter_net_worth_is_investments() {
        let scenarios = presets::rent_vs_buy().unwrap();
        let result = engine(BaselineStrategy::MostExpensive).run(&scenarios).unwrap();

        for row in &result.scenario("Renting").unwrap().rows {
            assert_eq!(row.home_equity, 0.0);
            assert_eq!(row.net_worth, row.investment_balance);
            assert!(row.after_tax_investments.unwrap() <= row.investment_balance);
        }
    }

    #[test]
    fn test_pmi_removed_when_equity_reaches_threshold() {
        let scenarios = presets::rent_vs_buy().unwrap();
        let result = engine(BaselineStrategy::MostExpensive).run_horizon(&scenarios, 6).unwrap();

        let rows = &result.scenario("3% Down").unwrap().rows;
        assert!(rows[2].pmi_active);
        assert!(!rows[3].pmi_active);
        assert_eq!(rows[3].costs.pmi, 0.0);
        assert_relative_eq!(result.scenario("3% Down").unwrap().total_pmi(), 57_000.0);
    }

    #[test]
    fn test_after_payoff_in_fifty_year_horizon() {
        let scenarios = presets::rent_vs_buy().unwrap();
        let result = engine(BaselineStrategy::MostExpensive).run_horizon(&scenarios, 50).unwrap();

        let rows = &result.scenario("20% Down").unwrap().rows;
        assert_eq!(rows.len(), 50);
        assert_eq!(rows[29].mortgage_balance, 0.0);
        for row in &rows[30..] {
            assert_eq!(row.costs.principal_and_interest, 0.0);
            assert_eq!(row.costs.deductible_mortgage_interest, 0.0);
            assert_eq!(row.mortgage_balance, 0.0);
            assert_eq!(row.home_equity, row.home_value);
        }
    }

    #[test]
    fn test_negative_contributions_allowed() {
        let scenarios = presets::rent_vs_buy().unwrap();
        let result = engine(BaselineStrategy::FixedMonthly(0.0)).run_horizon(&scenarios, 3).unwrap();

        let renter = &result.scenario("Renting").unwrap().rows;
        assert_eq!(renter[0].monthly_contribution, -5_800.0);
        assert_relative_eq!(renter[0].cost_basis, 410_000.0 - 69_600.0);
    }

    #[test]
    fn test_outstanding_balance_basis_deducts_more_over_time() {
        let scenarios = presets::rent_vs_buy().unwrap();
        let mut assumptions = Assumptions::bay_area_defaults();
        assumptions.tax.debt_basis = DeductibleDebtBasis::OutstandingBalance;
        let outstanding = ProjectionEngine::new(assumptions, ProjectionConfig::default())
            .run(&scenarios)
            .unwrap();
        let original = engine(BaselineStrategy::MostExpensive).run(&scenarios).unwrap();

        let year_one = |r: &ProjectionResult| r.scenario("3% Down").unwrap().rows[0].costs.deductible_mortgage_interest;
        assert_relative_eq!(year_one(&outstanding), year_one(&original));

        let year_ten = |r: &ProjectionResult| r.scenario("3% Down").unwrap().rows[9].costs.deductible_mortgage_interest;
        assert!(year_ten(&outstanding) > year_ten(&original));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(16))]

        #[test]
        fn prop_deterministic(
            investment_return in 0.0f64..0.12,
            appreciation in -0.02f64..0.08,
        ) {
            let scenarios = presets::rent_vs_buy().unwrap();
            let assumptions = Assumptions::bay_area_defaults()
                .with_investment_return(investment_return)
                .with_home_appreciation(appreciation);
            let engine = ProjectionEngine::new(assumptions, ProjectionConfig::default());

            let first = engine.run(&scenarios).unwrap();
            let second = engine.run(&scenarios).unwrap();
            for (a, b) in first.scenarios.iter().zip(&second.scenarios) {
                let left: Vec<f64> = a.rows.iter().map(|r| r.net_worth).collect();
                let right: Vec<f64> = b.rows.iter().map(|r| r.net_worth).collect();
                prop_assert_eq!(left, right);
            }
        }
    }
}
