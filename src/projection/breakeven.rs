//! Break-even rates between two scenarios
//!
//! Finds the investment return (or home appreciation) at which two
//! scenarios end the horizon with the same net worth.

use crate::error::ProjectionError;
use crate::scenario::Scenario;
use super::engine::ProjectionEngine;

/// Bracket and stopping rule for a bisection search
#[derive(Debug, Clone, Copy)]
pub struct BreakevenSearch {
    /// Lower bound of the annual rate interval
    pub low: f64,
    /// Upper bound of the annual rate interval
    pub high: f64,
    /// Stop once the bracket is narrower than this
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for BreakevenSearch {
    fn default() -> Self {
        Self {
            low: -0.05,
            high: 0.20,
            tolerance: 1e-6,
            max_iterations: 200,
        }
    }
}

impl BreakevenSearch {
    pub fn between(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            ..Default::default()
        }
    }
}

/// Root of `f` on the search interval by bisection
///
/// Returns `None` when `f` has the same sign at both ends.
pub fn bisect<F>(mut f: F, search: &BreakevenSearch) -> Result<Option<f64>, ProjectionError>
where
    F: FnMut(f64) -> Result<f64, ProjectionError>,
{
    let mut low = search.low;
    let mut high = search.high;
    let mut f_low = f(low)?;
    let f_high = f(high)?;

    if f_low == 0.0 {
        return Ok(Some(low));
    }
    if f_high == 0.0 {
        return Ok(Some(high));
    }
    // Check that we have a root in this interval
    if f_low * f_high > 0.0 {
        return Ok(None);
    }

    for _ in 0..search.max_iterations {
        let mid = (low + high) / 2.0;
        let f_mid = f(mid)?;

        if f_mid == 0.0 || (high - low) / 2.0 < search.tolerance {
            return Ok(Some(mid));
        }

        if f_mid * f_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            f_low = f_mid;
        }
    }

    Ok(Some((low + high) / 2.0))
}

/// Final net worth of `a` minus that of `b`
fn net_worth_gap(
    engine: &ProjectionEngine,
    scenarios: &[Scenario],
    a: &str,
    b: &str,
    years: u32,
) -> Result<f64, ProjectionError> {
    let result = engine.run_horizon(scenarios, years)?;
    Ok(result.final_net_worth(a)? - result.final_net_worth(b)?)
}

fn require_scenario(scenarios: &[Scenario], name: &str) -> Result<(), ProjectionError> {
    if scenarios.iter().any(|s| s.name == name) {
        Ok(())
    } else {
        Err(ProjectionError::UnknownScenario(name.to_string()))
    }
}

/// Investment return at which `a` and `b` finish with equal net worth
pub fn breakeven_investment_return(
    engine: &ProjectionEngine,
    scenarios: &[Scenario],
    a: &str,
    b: &str,
    years: u32,
    search: &BreakevenSearch,
) -> Result<Option<f64>, ProjectionError> {
    require_scenario(scenarios, a)?;
    require_scenario(scenarios, b)?;

    let rate = bisect(
        |rate| {
            let trial = ProjectionEngine::new(
                engine.assumptions().with_investment_return(rate),
                engine.config().clone(),
            );
            net_worth_gap(&trial, scenarios, a, b, years)
        },
        search,
    )?;

    match rate {
        Some(r) => log::info!("{} vs {}: break-even investment return {:.4}%", a, b, r * 100.0),
        None => log::info!("{} vs {}: no break-even investment return in range", a, b),
    }
    Ok(rate)
}

/// Home appreciation at which `a` and `b` finish with equal net worth
pub fn breakeven_appreciation(
    engine: &ProjectionEngine,
    scenarios: &[Scenario],
    a: &str,
    b: &str,
    years: u32,
    search: &BreakevenSearch,
) -> Result<Option<f64>, ProjectionError> {
    require_scenario(scenarios, a)?;
    require_scenario(scenarios, b)?;

    let rate = bisect(
        |rate| {
            let trial = ProjectionEngine::new(
                engine.assumptions().with_home_appreciation(rate),
                engine.config().clone(),
            );
            net_worth_gap(&trial, scenarios, a, b, years)
        },
        search,
    )?;

    match rate {
        Some(r) => log::info!("{} vs {}: break-even appreciation {:.4}%", a, b, r * 100.0),
        None => log::info!("{} vs {}: no break-even appreciation in range", a, b),
    }
    Ok(rate)
}
