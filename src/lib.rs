//! Property Returns - projection and valuation engine for leveraged property investments
//!
//! This library provides:
//! - Year-by-year projections of value, loan balance, rent, expenses and tax
//! - Terminal sale proceeds with capital gains tax
//! - Return metrics: IRR pre/post tax, cash-on-cash multiple, net profit
//! - Sensitivity sweeps over interest rate and capital growth

pub mod assumptions;
pub mod error;
pub mod params;
pub mod projection;
pub mod sensitivity;

// Re-export commonly used types
pub use assumptions::Assumptions;
pub use error::{Error, ParameterError, Result};
pub use params::{ScenarioParameters, ALLOWED_MARGINAL_TAX_RATES};
pub use projection::{CashFlowStream, ProjectionEngine, ScenarioResult, YearRecord};
pub use sensitivity::{SensitivityMatrix, SensitivityRunner};

/// Project one scenario under the standard assumptions
pub fn project(params: &ScenarioParameters) -> Result<ScenarioResult> {
    Ok(ProjectionEngine::default().project(params)?)
}

/// Post-tax IRR matrix over `interest_rates` x `growth_rates` under the standard assumptions
pub fn sweep(
    base: &ScenarioParameters,
    interest_rates: &[f64],
    growth_rates: &[f64],
) -> Result<SensitivityMatrix> {
    Ok(SensitivityRunner::new().sweep(base, interest_rates, growth_rates)?)
}
