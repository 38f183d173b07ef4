//! Complete output of one projection run

use serde::{Deserialize, Serialize};

use super::ledger::{CashFlows, YearRecord};
use super::metrics::ReturnMetrics;
use super::sale::{AcquisitionSummary, SaleSummary};

/// Everything a single `project` call produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    #[serde(flatten)]
    pub metrics: ReturnMetrics,

    pub acquisition: AcquisitionSummary,

    pub sale: SaleSummary,

    /// Principal repaid over the holding period
    pub total_principal_paid: f64,

    pub cash_flows: CashFlows,

    /// Years 0..=holding period in chronological order
    pub years: Vec<YearRecord>,
}

impl ScenarioResult {
    pub fn irr_pre_tax(&self) -> Option<f64> {
        self.metrics.irr_pre_tax
    }

    pub fn irr_post_tax(&self) -> Option<f64> {
        self.metrics.irr_post_tax
    }

    pub fn cash_on_cash(&self) -> f64 {
        self.metrics.cash_on_cash
    }

    pub fn net_profit(&self) -> f64 {
        self.metrics.net_profit
    }

    /// Record for a projection year, 0 being settlement
    pub fn year(&self, year: u32) -> Option<&YearRecord> {
        self.years.get(year as usize)
    }

    pub fn final_year(&self) -> Option<&YearRecord> {
        self.years.last()
    }

    /// Average weekly post-tax cash flow in the first year of ownership
    pub fn weekly_cash_flow_year_one(&self) -> f64 {
        self.year(1)
            .map(|record| record.post_tax_cash_flow / 52.0)
            .unwrap_or(0.0)
    }
}
