//! Sensitivity sweep over interest rate and capital growth
//!
//! Every cell is an independent projection of the base scenario with the two
//! rates overridden, so cells can be evaluated in any order or in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::ParameterError;
use crate::params::{check_rate, ScenarioParameters};
use crate::projection::{ProjectionEngine, ScenarioResult};

/// Interest rates down the rows of the default matrix
pub const DEFAULT_INTEREST_RATES: [f64; 5] = [0.04, 0.05, 0.06, 0.07, 0.08];

/// Capital growth rates across the columns of the default matrix
pub const DEFAULT_GROWTH_RATES: [f64; 5] = [0.03, 0.04, 0.05, 0.06, 0.07];

/// Post-tax IRR for each (interest rate, growth rate) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityMatrix {
    pub interest_rates: Vec<f64>,
    pub growth_rates: Vec<f64>,
    /// `cells[row][col]`, `None` where the IRR is undefined
    pub cells: Vec<Vec<Option<f64>>>,
}

impl SensitivityMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn rows(&self) -> usize {
        self.interest_rates.len()
    }

    pub fn cols(&self) -> usize {
        self.growth_rates.len()
    }

    /// Row labels in the form "Int: 6%"
    pub fn row_labels(&self) -> Vec<String> {
        self.interest_rates
            .iter()
            .map(|rate| format!("Int: {}", percent_label(*rate)))
            .collect()
    }

    /// Column labels in the form "Growth: 5%"
    pub fn column_labels(&self) -> Vec<String> {
        self.growth_rates
            .iter()
            .map(|rate| format!("Growth: {}", percent_label(*rate)))
            .collect()
    }

    /// Highest defined IRR and its (row, col)
    pub fn best(&self) -> Option<(usize, usize, f64)> {
        self.defined_cells().max_by(|a, b| a.2.total_cmp(&b.2))
    }

    /// Lowest defined IRR and its (row, col)
    pub fn worst(&self) -> Option<(usize, usize, f64)> {
        self.defined_cells().min_by(|a, b| a.2.total_cmp(&b.2))
    }

    fn defined_cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, irr)| irr.map(|irr| (row, col, irr)))
        })
    }
}

fn percent_label(rate: f64) -> String {
    let pct = rate * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{:.0}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Batch runner holding the assumptions shared by every cell
///
/// # Example
/// ```ignore
/// let runner = SensitivityRunner::new();
/// let matrix = runner.sweep_default(&ScenarioParameters::default())?;
/// println!("{:?}", matrix.get(2, 2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SensitivityRunner {
    engine: ProjectionEngine,
}

impl SensitivityRunner {
    /// Create runner with the standard assumptions
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            engine: ProjectionEngine::new(assumptions),
        }
    }

    pub fn assumptions(&self) -> &Assumptions {
        self.engine.assumptions()
    }

    /// Run the single scenario the sweep is centred on
    pub fn run(&self, params: &ScenarioParameters) -> Result<ScenarioResult, ParameterError> {
        self.engine.project(params)
    }

    /// Post-tax IRR of one cell
    pub fn evaluate_cell(
        &self,
        base: &ScenarioParameters,
        interest_rate: f64,
        growth_rate: f64,
    ) -> Result<Option<f64>, ParameterError> {
        let params = base.with_rates(interest_rate, growth_rate);
        Ok(self.engine.project(&params)?.irr_post_tax())
    }

    /// Sweep over the default 5x5 grid
    pub fn sweep_default(
        &self,
        base: &ScenarioParameters,
    ) -> Result<SensitivityMatrix, ParameterError> {
        self.sweep(base, &DEFAULT_INTEREST_RATES, &DEFAULT_GROWTH_RATES)
    }

    /// Evaluate every cell in parallel
    pub fn sweep(
        &self,
        base: &ScenarioParameters,
        interest_rates: &[f64],
        growth_rates: &[f64],
    ) -> Result<SensitivityMatrix, ParameterError> {
        let cells = self.grid(base, interest_rates, growth_rates)?;
        log::info!("Sweeping {} cells in parallel", cells.len());

        let irrs = cells
            .par_iter()
            .map(|&(rate, growth)| self.evaluate_cell(base, rate, growth))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(assemble(interest_rates, growth_rates, irrs))
    }

    /// Evaluate every cell in order on the calling thread
    pub fn sweep_sequential(
        &self,
        base: &ScenarioParameters,
        interest_rates: &[f64],
        growth_rates: &[f64],
    ) -> Result<SensitivityMatrix, ParameterError> {
        let cells = self.grid(base, interest_rates, growth_rates)?;
        log::info!("Sweeping {} cells sequentially", cells.len());

        let irrs = cells
            .iter()
            .map(|&(rate, growth)| self.evaluate_cell(base, rate, growth))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(assemble(interest_rates, growth_rates, irrs))
    }

    /// Validate the inputs and list the cells in row-major order
    fn grid(
        &self,
        base: &ScenarioParameters,
        interest_rates: &[f64],
        growth_rates: &[f64],
    ) -> Result<Vec<(f64, f64)>, ParameterError> {
        base.validate()?;
        if interest_rates.is_empty() {
            return Err(ParameterError::EmptyAxis { axis: "interest_rates" });
        }
        if growth_rates.is_empty() {
            return Err(ParameterError::EmptyAxis { axis: "growth_rates" });
        }
        for &rate in interest_rates {
            check_rate("interest_rate", rate)?;
        }
        for &rate in growth_rates {
            check_rate("capital_growth_rate", rate)?;
        }

        Ok(interest_rates
            .iter()
            .flat_map(|&rate| growth_rates.iter().map(move |&growth| (rate, growth)))
            .collect())
    }
}

fn assemble(
    interest_rates: &[f64],
    growth_rates: &[f64],
    irrs: Vec<Option<f64>>,
) -> SensitivityMatrix {
    let cells = irrs
        .chunks(growth_rates.len())
        .map(|row| row.to_vec())
        .collect();

    SensitivityMatrix {
        interest_rates: interest_rates.to_vec(),
        growth_rates: growth_rates.to_vec(),
        cells,
    }
}
