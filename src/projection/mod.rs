//! Projection engine for multi-scenario rent versus buy comparisons

mod affordability;
mod amortization;
mod baseline;
mod breakeven;
mod capital_gains;
mod cashflows;
mod engine;
mod investment;
mod pmi;
mod state;
mod tax;

pub use affordability::{
    required_income, RequiredIncome, DEFAULT_COMBINED_TAX_RATE, DEFAULT_HOUSING_SHARE,
};
pub use amortization::{amortization_schedule, amortize_year, AmortizationYear};
pub use baseline::BaselineStrategy;
pub use breakeven::{bisect, breakeven_appreciation, breakeven_investment_return, BreakevenSearch};
pub use capital_gains::{
    fund_by_saving, future_value_of_contributions, gross_target_for_after_tax, liquidate,
    required_monthly_contribution, FundingOutcome, Liquidation,
};
pub use cashflows::{
    AnnualCostProfile, ExportRow, ProjectionResult, ProjectionSummary, ScenarioProjection,
    ScenarioSummary, YearRow,
};
pub use engine::{ProjectionConfig, ProjectionEngine, MAX_HORIZON_YEARS};
pub use investment::grow_investment;
pub use pmi::{pmi_charged, pmi_timeline, PmiTimeline, PmiYear};
pub use state::{AmortizationState, InvestmentAccount, ScenarioState};
pub use tax::{compute_tax_benefit, deductible_interest, itemize, TaxBreakdown};
