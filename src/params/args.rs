//! Command-line flags for the scenario inputs, shared by the binaries

use std::path::PathBuf;

use clap::Args;

use super::ScenarioParameters;
use crate::error::Result;

/// Scenario inputs as command-line flags
///
/// Rates are entered as percentages (6.0 = 6%) and converted to fractions.
/// Defaults match [`ScenarioParameters::default`].
#[derive(Debug, Clone, Args)]
pub struct ScenarioArgs {
    /// Load the scenario from a JSON file instead of the flags below
    #[arg(long, value_name = "FILE")]
    pub scenario: Option<PathBuf>,

    /// Purchase price ($)
    #[arg(long, default_value_t = 750_000.0)]
    pub purchase_price: f64,

    /// Loan amount ($)
    #[arg(long, default_value_t = 600_000.0)]
    pub loan_amount: f64,

    /// Interest rate (%)
    #[arg(long, default_value_t = 6.0)]
    pub interest_rate: f64,

    /// Loan term (years)
    #[arg(long, default_value_t = 30)]
    pub loan_term: u32,

    /// Interest-only period (years)
    #[arg(long, default_value_t = 0)]
    pub interest_only: u32,

    /// Weekly rent ($)
    #[arg(long, default_value_t = 600.0)]
    pub weekly_rent: f64,

    /// Vacancy rate (%)
    #[arg(long, default_value_t = 3.0)]
    pub vacancy: f64,

    /// Annual operating expenses ($)
    #[arg(long, default_value_t = 6_000.0)]
    pub opex: f64,

    /// Annual land tax ($), omit when land tax does not apply
    #[arg(long, value_name = "AMOUNT")]
    pub land_tax: Option<f64>,

    /// Marginal tax rate (%), one of 0, 19, 32.5, 37, 45, 47
    #[arg(long, default_value_t = 37.0)]
    pub tax_rate: f64,

    /// Capital growth rate (%)
    #[arg(long, default_value_t = 5.0)]
    pub growth: f64,

    /// CPI / expense growth (%)
    #[arg(long, default_value_t = 2.5)]
    pub cpi: f64,

    /// Planned holding period (years)
    #[arg(long, default_value_t = 10)]
    pub holding_period: u32,
}

impl ScenarioArgs {
    /// Resolve the flags (or the scenario file) into validated parameters
    pub fn to_parameters(&self) -> Result<ScenarioParameters> {
        if let Some(path) = &self.scenario {
            return ScenarioParameters::from_json_path(path);
        }

        let params = ScenarioParameters {
            purchase_price: self.purchase_price,
            loan_amount: self.loan_amount,
            interest_rate: self.interest_rate / 100.0,
            loan_term_years: self.loan_term,
            interest_only_years: self.interest_only,
            weekly_rent: self.weekly_rent,
            vacancy_rate: self.vacancy / 100.0,
            annual_opex: self.opex,
            land_tax: self.land_tax.unwrap_or(0.0),
            marginal_tax_rate: self.tax_rate / 100.0,
            capital_growth_rate: self.growth / 100.0,
            cpi_rate: self.cpi / 100.0,
            holding_period_years: self.holding_period,
        };
        params.validate()?;
        Ok(params)
    }
}
