//! Rent vs Buy - deterministic multi-year projection of housing decisions
//!
//! This library provides:
//! - Mortgage amortization with PMI and ground-lease ownership
//! - Itemized tax benefit under interest and SALT caps
//! - Investment growth of the money not spent on housing
//! - Net worth comparison across scenarios against an explicit baseline
//! - Break-even solvers and parallel sensitivity sweeps

pub mod assumptions;
pub mod error;
pub mod projection;
pub mod runner;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::Assumptions;
pub use error::{LoadError, ProjectionError, ValidationError};
pub use projection::{BaselineStrategy, ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use runner::{ScenarioRunner, SweepParameter, SweepPoint};
pub use scenario::{LoanTerms, Ownership, Pmi, Scenario, Tenure};
