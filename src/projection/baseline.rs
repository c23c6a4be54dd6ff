//! Baseline housing budget against which each scenario's savings are measured
//!
//! Every scenario invests `baseline − own after-tax monthly cost` each month.
//! Which cost counts as the baseline changes 30-year outcomes materially, so
//! it is always an explicit choice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProjectionError;
use crate::scenario::Scenario;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BaselineStrategy {
    /// Highest after-tax monthly cost among this year's scenarios
    MostExpensive,
    /// Lowest after-tax monthly cost among this year's scenarios
    LeastExpensive,
    /// A named scenario's after-tax monthly cost; that scenario invests nothing extra
    Scenario(String),
    /// A fixed monthly housing budget
    FixedMonthly(f64),
}

impl BaselineStrategy {
    /// Check a named baseline refers to one of the scenarios
    pub fn validate(&self, scenarios: &[Scenario]) -> Result<(), ProjectionError> {
        if let BaselineStrategy::Scenario(name) = self {
            if !scenarios.iter().any(|s| &s.name == name) {
                return Err(ProjectionError::UnknownBaseline(name.clone()));
            }
        }
        Ok(())
    }

    /// Baseline monthly cost given `(name, after-tax monthly cost)` pairs
    pub fn resolve(&self, monthly_costs: &[(&str, f64)]) -> Result<f64, ProjectionError> {
        if monthly_costs.is_empty() {
            return Err(ProjectionError::NoScenarios);
        }

        match self {
            BaselineStrategy::MostExpensive => Ok(monthly_costs
                .iter()
                .map(|(_, cost)| *cost)
                .fold(f64::NEG_INFINITY, f64::max)),
            BaselineStrategy::LeastExpensive => Ok(monthly_costs
                .iter()
                .map(|(_, cost)| *cost)
                .fold(f64::INFINITY, f64::min)),
            BaselineStrategy::Scenario(name) => monthly_costs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, cost)| *cost)
                .ok_or_else(|| ProjectionError::UnknownBaseline(name.clone())),
            BaselineStrategy::FixedMonthly(amount) => Ok(*amount),
        }
    }
}

impl Default for BaselineStrategy {
    fn default() -> Self {
        BaselineStrategy::MostExpensive
    }
}

impl fmt::Display for BaselineStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaselineStrategy::MostExpensive => write!(f, "most-expensive"),
            BaselineStrategy::LeastExpensive => write!(f, "least-expensive"),
            BaselineStrategy::Scenario(name) => write!(f, "scenario:{}", name),
            BaselineStrategy::FixedMonthly(amount) => write!(f, "fixed:{}", amount),
        }
    }
}

/// Parses `most-expensive`, `least-expensive`, `scenario:<name>`, `fixed:<amount>`
impl FromStr for BaselineStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "most-expensive" => return Ok(BaselineStrategy::MostExpensive),
            "least-expensive" => return Ok(BaselineStrategy::LeastExpensive),
            _ => {}
        }

        if let Some(name) = s.strip_prefix("scenario:") {
            if name.is_empty() {
                return Err("scenario baseline needs a name".to_string());
            }
            return Ok(BaselineStrategy::Scenario(name.to_string()));
        }

        if let Some(amount) = s.strip_prefix("fixed:") {
            return amount
                .parse()
                .map(BaselineStrategy::FixedMonthly)
                .map_err(|_| format!("invalid monthly amount '{}'", amount));
        }

        Err(format!("unknown baseline strategy '{}'", s))
    }
}
