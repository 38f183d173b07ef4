//! Projection engine: annual ledger, sale proceeds, and return metrics

mod engine;
pub mod irr;
mod ledger;
mod loan;
mod metrics;
mod result;
mod sale;
mod state;

pub use engine::ProjectionEngine;
pub use irr::{calculate_irr, npv};
pub use ledger::{CashFlowStream, CashFlows, YearRecord};
pub use loan::{annual_repayment, level_payment, LoanPhase, Repayment};
pub use metrics::{cash_on_cash_multiple, ReturnMetrics};
pub use result::ScenarioResult;
pub use sale::{AcquisitionSummary, SaleSummary};
pub use state::ProjectionState;
