//! Yearly cost and net worth output structures for projections

use serde::{Deserialize, Serialize};

use super::baseline::BaselineStrategy;
use crate::error::ProjectionError;

/// One year of housing costs for one scenario
///
/// All amounts are annual. `net_annual_cost` is the after-tax figure used
/// for the baseline comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualCostProfile {
    pub year: u32,

    // Loan
    pub principal_and_interest: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,

    // Carrying costs
    pub property_tax: f64,
    pub insurance: f64,
    pub pmi: f64,
    pub land_lease: f64,
    pub maintenance: f64,
    pub rent: f64,

    pub gross_annual_cost: f64,

    // Itemization
    pub deductible_mortgage_interest: f64,
    pub deductible_salt: f64,
    pub itemized_total: f64,
    pub tax_benefit: f64,

    pub net_annual_cost: f64,
}

impl AnnualCostProfile {
    /// Renting: rent is the whole cost, nothing to itemize
    pub fn renting(year: u32, rent: f64) -> Self {
        Self {
            year,
            rent,
            gross_annual_cost: rent,
            net_annual_cost: rent,
            ..Default::default()
        }
    }

    /// After-tax cost per month, the unit the baseline is set in
    pub fn monthly_net_cost(&self) -> f64 {
        self.net_annual_cost / 12.0
    }
}

/// End-of-year position for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRow {
    pub year: u32,
    pub costs: AnnualCostProfile,

    /// Baseline minus own monthly cost; negative when spending above baseline
    pub monthly_contribution: f64,

    pub investment_balance: f64,
    pub cost_basis: f64,

    /// Investments net of capital gains tax if sold at year end
    pub after_tax_investments: Option<f64>,

    pub home_value: f64,
    pub mortgage_balance: f64,
    pub home_equity: f64,
    pub net_worth: f64,
    pub pmi_active: bool,
}

/// Full horizon for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub name: String,
    pub is_owner: bool,
    pub upfront_costs: f64,
    pub initial_investment: f64,
    pub rows: Vec<YearRow>,
}

impl ScenarioProjection {
    pub fn final_row(&self) -> Option<&YearRow> {
        self.rows.last()
    }

    pub fn final_net_worth(&self) -> f64 {
        self.final_row().map(|r| r.net_worth).unwrap_or(self.initial_investment)
    }

    pub fn total_gross_cost(&self) -> f64 {
        self.rows.iter().map(|r| r.costs.gross_annual_cost).sum()
    }

    pub fn total_tax_benefit(&self) -> f64 {
        self.rows.iter().map(|r| r.costs.tax_benefit).sum()
    }

    pub fn total_pmi(&self) -> f64 {
        self.rows.iter().map(|r| r.costs.pmi).sum()
    }
}

/// Complete multi-scenario projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Horizon in years
    pub years: u32,

    pub baseline: BaselineStrategy,

    /// Resolved baseline monthly cost, one entry per projection year
    pub baseline_monthly: Vec<f64>,

    /// Scenarios in input order
    pub scenarios: Vec<ScenarioProjection>,
}

impl ProjectionResult {
    pub fn scenario(&self, name: &str) -> Option<&ScenarioProjection> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn final_net_worth(&self, name: &str) -> Result<f64, ProjectionError> {
        self.scenario(name)
            .map(ScenarioProjection::final_net_worth)
            .ok_or_else(|| ProjectionError::UnknownScenario(name.to_string()))
    }

    /// Scenario with the highest final net worth (first on ties)
    pub fn winner(&self) -> Option<&ScenarioProjection> {
        self.scenarios.iter().fold(None, |best: Option<&ScenarioProjection>, s| match best {
            Some(b) if b.final_net_worth() >= s.final_net_worth() => Some(b),
            _ => Some(s),
        })
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let best = self.winner().map(|s| s.final_net_worth()).unwrap_or(0.0);

        let scenarios = self
            .scenarios
            .iter()
            .map(|s| {
                let last = s.final_row();
                let final_net_worth = s.final_net_worth();
                ScenarioSummary {
                    name: s.name.clone(),
                    final_net_worth,
                    final_investment_balance: last.map(|r| r.investment_balance).unwrap_or(0.0),
                    final_home_equity: last.map(|r| r.home_equity).unwrap_or(0.0),
                    after_tax_net_worth: last
                        .and_then(|r| r.after_tax_investments.map(|inv| inv + r.home_equity)),
                    total_gross_cost: s.total_gross_cost(),
                    total_tax_benefit: s.total_tax_benefit(),
                    total_pmi: s.total_pmi(),
                    shortfall_to_best: best - final_net_worth,
                }
            })
            .collect();

        ProjectionSummary {
            years: self.years,
            baseline: self.baseline.to_string(),
            winner: self.winner().map(|s| s.name.clone()),
            scenarios,
        }
    }

    /// Flatten into one record per scenario-year for CSV export
    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.scenarios
            .iter()
            .flat_map(|s| {
                s.rows.iter().enumerate().map(move |(i, r)| ExportRow {
                    scenario: s.name.clone(),
                    year: r.year,
                    baseline_monthly: self.baseline_monthly.get(i).copied().unwrap_or(0.0),
                    monthly_net_cost: r.costs.monthly_net_cost(),
                    monthly_contribution: r.monthly_contribution,
                    gross_annual_cost: r.costs.gross_annual_cost,
                    interest_paid: r.costs.interest_paid,
                    principal_paid: r.costs.principal_paid,
                    pmi: r.costs.pmi,
                    tax_benefit: r.costs.tax_benefit,
                    net_annual_cost: r.costs.net_annual_cost,
                    investment_balance: r.investment_balance,
                    home_value: r.home_value,
                    mortgage_balance: r.mortgage_balance,
                    home_equity: r.home_equity,
                    net_worth: r.net_worth,
                })
            })
            .collect()
    }
}

/// Flat CSV record
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub scenario: String,
    pub year: u32,
    pub baseline_monthly: f64,
    pub monthly_net_cost: f64,
    pub monthly_contribution: f64,
    pub gross_annual_cost: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,
    pub pmi: f64,
    pub tax_benefit: f64,
    pub net_annual_cost: f64,
    pub investment_balance: f64,
    pub home_value: f64,
    pub mortgage_balance: f64,
    pub home_equity: f64,
    pub net_worth: f64,
}

/// Final-year summary for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: u32,
    pub baseline: String,
    pub winner: Option<String>,
    pub scenarios: Vec<ScenarioSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub final_net_worth: f64,
    pub final_investment_balance: f64,
    pub final_home_equity: f64,

    /// Net worth with investments liquidated after capital gains tax
    pub after_tax_net_worth: Option<f64>,

    pub total_gross_cost: f64,
    pub total_tax_benefit: f64,
    pub total_pmi: f64,

    /// Gap to the best final net worth in the run
    pub shortfall_to_best: f64,
}
