//! Scenario runner for repeated and swept projections
//!
//! Pre-loads assumptions once, then allows running many comparisons with
//! different configurations or market rates without re-reading CSV files.

use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::assumptions::Assumptions;
use crate::error::{LoadError, ProjectionError};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionSummary};
use crate::scenario::Scenario;

/// Market rate varied by a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SweepParameter {
    HomeAppreciation,
    InvestmentReturn,
}

impl SweepParameter {
    fn apply(&self, assumptions: &Assumptions, value: f64) -> Assumptions {
        match self {
            SweepParameter::HomeAppreciation => assumptions.with_home_appreciation(value),
            SweepParameter::InvestmentReturn => assumptions.with_investment_return(value),
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepParameter::HomeAppreciation => write!(f, "home appreciation"),
            SweepParameter::InvestmentReturn => write!(f, "investment return"),
        }
    }
}

/// Final-year outcome for one swept value
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub parameter: SweepParameter,
    pub value: f64,
    pub summary: ProjectionSummary,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
/// let scenarios = presets::rent_vs_buy()?;
///
/// let points = runner.sweep(
///     &scenarios,
///     ProjectionConfig::default(),
///     SweepParameter::HomeAppreciation,
///     &[0.01, 0.03, 0.05],
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Pre-loaded base assumptions
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with default in-memory assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::bay_area_defaults(),
        }
    }

    /// Create runner by loading assumptions from the default CSV
    pub fn from_csv() -> Result<Self, LoadError> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create runner from a specific assumptions file
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Run one comparison with the given config
    pub fn run(
        &self,
        scenarios: &[Scenario],
        config: ProjectionConfig,
    ) -> Result<ProjectionResult, ProjectionError> {
        let engine = ProjectionEngine::new(self.base_assumptions.clone(), config);
        engine.run(scenarios)
    }

    /// Run the same scenarios under several configs (baselines, horizons)
    pub fn run_batch(
        &self,
        scenarios: &[Scenario],
        configs: &[ProjectionConfig],
    ) -> Result<Vec<ProjectionResult>, ProjectionError> {
        configs
            .iter()
            .map(|config| self.run(scenarios, config.clone()))
            .collect()
    }

    /// Rerun the comparison for each value of a market rate, in parallel
    ///
    /// Points come back in the order of `values`.
    pub fn sweep(
        &self,
        scenarios: &[Scenario],
        config: ProjectionConfig,
        parameter: SweepParameter,
        values: &[f64],
    ) -> Result<Vec<SweepPoint>, ProjectionError> {
        log::info!("Sweeping {} over {} values", parameter, values.len());

        values
            .par_iter()
            .map(|&value| {
                let engine = ProjectionEngine::new(
                    parameter.apply(&self.base_assumptions, value),
                    config.clone(),
                );
                let result = engine.run(scenarios)?;
                Ok(SweepPoint {
                    parameter,
                    value,
                    summary: result.summary(),
                })
            })
            .collect()
    }

    /// Get reference to base assumptions for inspection
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
