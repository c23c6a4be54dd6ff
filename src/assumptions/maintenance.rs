//! Annual maintenance budget built from upkeep plus amortized replacements

use serde::{Deserialize, Serialize};

/// A major component replaced on a fixed cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replacement {
    pub name: String,
    pub cost: f64,
    pub lifespan_years: u32,
}

impl Replacement {
    pub fn new(name: impl Into<String>, cost: f64, lifespan_years: u32) -> Self {
        Self {
            name: name.into(),
            cost,
            lifespan_years,
        }
    }

    /// Straight-line annual reserve for the replacement
    pub fn annual_cost(&self) -> f64 {
        if self.lifespan_years == 0 {
            self.cost
        } else {
            self.cost / self.lifespan_years as f64
        }
    }
}

/// Maintenance estimate: routine upkeep plus replacement reserves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceBudget {
    /// HVAC servicing, minor repairs, landscaping
    pub baseline_annual: f64,
    pub replacements: Vec<Replacement>,
}

impl MaintenanceBudget {
    /// Typical single-family home around $1.9M in San Francisco
    pub fn bay_area_single_family() -> Self {
        Self {
            baseline_annual: 2_500.0,
            replacements: vec![
                Replacement::new("roof", 30_000.0, 30),
                Replacement::new("flooring", 30_000.0, 10),
                Replacement::new("interior paint", 8_000.0, 5),
            ],
        }
    }

    pub fn annual_total(&self) -> f64 {
        self.baseline_annual
            + self.replacements.iter().map(Replacement::annual_cost).sum::<f64>()
    }

    pub fn monthly_total(&self) -> f64 {
        self.annual_total() / 12.0
    }
}
