//! Error types for scenario validation, projection, and loading

use thiserror::Error;

/// Precondition violations on scenario inputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("loan principal must be positive, got {0}")]
    NonPositivePrincipal(f64),

    #[error("annual mortgage rate must be in [0, 1), got {0}")]
    RateOutOfRange(f64),

    #[error("loan term must be at least one year")]
    ZeroTerm,

    #[error("loan term must be at most {max} years, got {years}")]
    TermTooLong { years: u32, max: u32 },

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("purchase price must be positive, got {0}")]
    NonPositivePrice(f64),

    #[error("ownership share must be in (0, 1], got {0}")]
    OwnershipShareOutOfRange(f64),

    #[error("upfront costs {upfront:.2} exceed starting capital {capital:.2}")]
    UpfrontExceedsCapital { upfront: f64, capital: f64 },

    #[error("down payment {down_payment:.2} is not below purchase price {price:.2}")]
    DownPaymentTooLarge { down_payment: f64, price: f64 },

    #[error("horizon must be between 1 and {max} years, got {years}")]
    HorizonOutOfRange { years: u32, max: u32 },

    #[error("housing share of income must be in (0, 1], got {0}")]
    HousingShareOutOfRange(f64),

    #[error("combined income tax rate must be in [0, 1), got {0}")]
    IncomeTaxRateOutOfRange(f64),
}

/// Failures raised while running a projection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no scenarios to project")]
    NoScenarios,

    #[error("baseline scenario '{0}' is not part of this projection")]
    UnknownBaseline(String),

    #[error("scenario '{0}' not found in projection result")]
    UnknownScenario(String),
}

/// Failures raised while reading assumptions or scenarios from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("unknown assumption parameter '{0}'")]
    UnknownParameter(String),

    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: String, value: String },

    #[error("scenario '{name}': {source}")]
    InvalidScenario {
        name: String,
        #[source]
        source: ValidationError,
    },
}
