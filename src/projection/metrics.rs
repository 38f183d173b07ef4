//! Return metrics derived from the cash-flow streams

use serde::{Deserialize, Serialize};

use super::ledger::CashFlows;

/// Summary return measures for one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    /// `None` when the solver finds no rate
    pub irr_pre_tax: Option<f64>,
    pub irr_post_tax: Option<f64>,
    /// Cash recovered over cash invested, 0 when nothing was invested
    pub cash_on_cash: f64,
    /// Undiscounted sum of the post-tax stream, initial outlay included
    pub net_profit: f64,
}

impl ReturnMetrics {
    /// # Arguments
    /// * `streams` - pre/post-tax streams for the scenario
    /// * `cash_in` - post-tax flows for years 1.. plus post-tax sale proceeds
    /// * `cash_out` - initial equity plus all principal repaid
    pub fn calculate(streams: &CashFlows, cash_in: f64, cash_out: f64) -> Self {
        Self {
            irr_pre_tax: streams.pre_tax.irr(),
            irr_post_tax: streams.post_tax.irr(),
            cash_on_cash: cash_on_cash_multiple(cash_in, cash_out),
            net_profit: streams.post_tax.total(),
        }
    }
}

/// Total cash recovered per dollar invested, ignoring timing
pub fn cash_on_cash_multiple(cash_in: f64, cash_out: f64) -> f64 {
    if cash_out > 0.0 {
        cash_in / cash_out
    } else {
        0.0
    }
}
