//! Transaction costs on purchase and sale

use serde::{Deserialize, Serialize};

/// One-off costs paid at acquisition on top of the purchase price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionCosts {
    /// Stamp duty as a flat fraction of the purchase price
    pub stamp_duty_rate: f64,

    /// Fixed conveyancing and settlement costs ($)
    pub closing_costs: f64,
}

impl Default for AcquisitionCosts {
    fn default() -> Self {
        Self {
            stamp_duty_rate: 0.04,
            closing_costs: 2_000.0,
        }
    }
}

impl AcquisitionCosts {
    pub fn stamp_duty(&self, purchase_price: f64) -> f64 {
        purchase_price * self.stamp_duty_rate
    }

    /// Purchase price plus stamp duty plus closing costs
    pub fn total_upfront_cost(&self, purchase_price: f64) -> f64 {
        purchase_price + self.stamp_duty(purchase_price) + self.closing_costs
    }
}

/// Costs deducted from the gross sale price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleCosts {
    /// Agent and marketing costs as a fraction of the sale price
    pub selling_cost_rate: f64,
}

impl Default for SaleCosts {
    fn default() -> Self {
        Self {
            selling_cost_rate: 0.025,
        }
    }
}

impl SaleCosts {
    pub fn selling_costs(&self, sale_price: f64) -> f64 {
        sale_price * self.selling_cost_rate
    }
}
