//! Projection assumptions: market rates, tax parameters, and cost escalation

mod escalation;
mod maintenance;
mod tax;
pub mod loader;

pub use escalation::{EscalationRates, EscalationSchedule, EscalationTiming};
pub use maintenance::{MaintenanceBudget, Replacement};
pub use tax::{DeductibleDebtBasis, TaxParameters};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LoadError;

/// Market return assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    /// Nominal annual return on the investment account
    pub investment_return: f64,

    /// Nominal annual home price appreciation
    pub home_appreciation: f64,
}

impl MarketAssumptions {
    pub fn monthly_investment_return(&self) -> f64 {
        self.investment_return / 12.0
    }
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self {
            investment_return: 0.07,
            home_appreciation: 0.03,
        }
    }
}

/// Container for all projection assumptions
///
/// Immutable for the duration of a projection; every scenario in a run
/// sees the same values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    pub market: MarketAssumptions,
    pub tax: TaxParameters,
    pub escalation: EscalationRates,
}

impl Assumptions {
    /// San Francisco Bay Area household, California high-earner tax profile
    pub fn bay_area_defaults() -> Self {
        Self {
            market: MarketAssumptions::default(),
            tax: TaxParameters::california_high_earner(),
            escalation: EscalationRates::default(),
        }
    }

    /// Load overrides from the default location (data/assumptions.csv)
    pub fn from_csv() -> Result<Self, LoadError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load overrides from a `Parameter,Value` CSV on top of the defaults
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        let mut assumptions = Self::bay_area_defaults();
        for (name, value) in loader::load_parameters(path)? {
            loader::apply_parameter(&mut assumptions, &name, &value)?;
        }
        log::info!("Loaded assumptions from {}", path.display());
        Ok(assumptions)
    }

    /// Copy with a different investment return
    pub fn with_investment_return(&self, rate: f64) -> Self {
        let mut next = self.clone();
        next.market.investment_return = rate;
        next
    }

    /// Copy with a different home appreciation rate
    pub fn with_home_appreciation(&self, rate: f64) -> Self {
        let mut next = self.clone();
        next.market.home_appreciation = rate;
        next
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::bay_area_defaults()
    }
}
