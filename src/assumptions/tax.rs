//! Income tax deductions and capital gains treatment

use serde::{Deserialize, Serialize};

/// Flat depreciation allowance claimed for a fixed number of years
///
/// Placeholder schedule, not derived from the asset's cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepreciationSchedule {
    /// Deduction claimed each eligible year ($)
    pub annual_allowance: f64,

    /// Last year (1-indexed, inclusive) the allowance is claimed
    pub years: u32,
}

impl Default for DepreciationSchedule {
    fn default() -> Self {
        Self {
            annual_allowance: 6_000.0,
            years: 10,
        }
    }
}

impl DepreciationSchedule {
    /// Allowance for a projection year (1-indexed)
    pub fn allowance(&self, year: u32) -> f64 {
        if year >= 1 && year <= self.years {
            self.annual_allowance
        } else {
            0.0
        }
    }
}

/// Capital gains discount for assets held long enough
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapitalGainsRules {
    /// Fraction of the gross gain excluded from tax once the discount applies
    pub discount: f64,

    /// Discount applies when the holding period strictly exceeds this many years
    pub discount_after_years: u32,
}

impl Default for CapitalGainsRules {
    fn default() -> Self {
        Self {
            discount: 0.5,
            discount_after_years: 1,
        }
    }
}

impl CapitalGainsRules {
    pub fn discount_applies(&self, holding_period_years: u32) -> bool {
        holding_period_years > self.discount_after_years
    }

    /// Portion of the gross gain subject to tax
    ///
    /// A loss flows through unchanged in sign, so the tax on it is a rebate.
    pub fn taxable_gain(&self, gross_gain: f64, holding_period_years: u32) -> f64 {
        if self.discount_applies(holding_period_years) {
            gross_gain * (1.0 - self.discount)
        } else {
            gross_gain
        }
    }
}
