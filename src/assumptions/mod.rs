//! Model assumptions: transaction costs, depreciation, and capital gains treatment

mod costs;
mod tax;

pub use costs::{AcquisitionCosts, SaleCosts};
pub use tax::{CapitalGainsRules, DepreciationSchedule};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::params::check_rate;

/// Container for the fixed model constants a projection runs against
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub acquisition: AcquisitionCosts,
    pub sale: SaleCosts,
    pub depreciation: DepreciationSchedule,
    pub capital_gains: CapitalGainsRules,
}

impl Assumptions {
    /// Flat 4% stamp duty, $2,000 closing costs, 2.5% selling costs,
    /// $6,000 depreciation for ten years, 50% CGT discount after one year
    pub fn standard() -> Self {
        Self::default()
    }

    /// Load assumptions from a JSON file; omitted fields keep their standard values
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let assumptions: Assumptions = serde_json::from_reader(BufReader::new(file))?;
        assumptions.validate()?;
        log::debug!("Loaded assumptions from {}", path.display());
        Ok(assumptions)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("acquisition.stamp_duty_rate", self.acquisition.stamp_duty_rate),
            ("sale.selling_cost_rate", self.sale.selling_cost_rate),
            ("capital_gains.discount", self.capital_gains.discount),
        ] {
            check_rate(field, value).map_err(|e| Error::InvalidAssumption(e.to_string()))?;
        }

        for (field, value) in [
            ("acquisition.closing_costs", self.acquisition.closing_costs),
            ("depreciation.annual_allowance", self.depreciation.annual_allowance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidAssumption(format!(
                    "{} must be a finite, non-negative amount (got {})",
                    field, value
                )));
            }
        }

        Ok(())
    }
}
