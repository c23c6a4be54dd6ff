//! Scenario definitions and loading

mod data;
mod loan;
pub mod loader;
pub mod presets;

pub use data::{Ownership, Pmi, Scenario, Tenure};
pub use loan::{LoanTerms, MAX_TERM_YEARS};
pub use loader::{load_scenarios, load_scenarios_from_reader};
