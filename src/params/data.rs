//! Scenario input record and its domain checks

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

/// Marginal income tax brackets a scenario may be run at
pub const ALLOWED_MARGINAL_TAX_RATES: [f64; 6] = [0.0, 0.19, 0.325, 0.37, 0.45, 0.47];

/// Longest loan term or holding period the engine projects
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Suggested annual land tax when the land-tax toggle is switched on
pub const DEFAULT_LAND_TAX: f64 = 1500.0;

const TAX_RATE_TOLERANCE: f64 = 1e-9;

/// Immutable set of inputs for one projection run
///
/// All rates are fractions (0.06 = 6%). Monetary amounts are nominal dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParameters {
    /// Purchase price of the property
    pub purchase_price: f64,

    /// Loan principal drawn at settlement
    pub loan_amount: f64,

    /// Annual loan interest rate
    pub interest_rate: f64,

    /// Loan term in years
    pub loan_term_years: u32,

    /// Initial years of interest-only repayments (must not exceed the term)
    pub interest_only_years: u32,

    /// Gross weekly rent
    pub weekly_rent: f64,

    /// Fraction of the year the property is expected to sit empty
    pub vacancy_rate: f64,

    /// Annual operating expenses (rates, water, management, maintenance)
    pub annual_opex: f64,

    /// Annual land tax, 0 when land tax does not apply
    pub land_tax: f64,

    /// Investor's marginal tax rate, one of [`ALLOWED_MARGINAL_TAX_RATES`]
    pub marginal_tax_rate: f64,

    /// Annual capital growth of the property value
    pub capital_growth_rate: f64,

    /// Annual CPI growth applied to rent and expenses
    pub cpi_rate: f64,

    /// Planned holding period in years (at least 1)
    pub holding_period_years: u32,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            purchase_price: 750_000.0,
            loan_amount: 600_000.0,
            interest_rate: 0.06,
            loan_term_years: 30,
            interest_only_years: 0,
            weekly_rent: 600.0,
            vacancy_rate: 0.03,
            annual_opex: 6_000.0,
            land_tax: 0.0,
            marginal_tax_rate: 0.37,
            capital_growth_rate: 0.05,
            cpi_rate: 0.025,
            holding_period_years: 10,
        }
    }
}

impl ScenarioParameters {
    /// Copy of these parameters with land tax switched on at `amount`
    pub fn with_land_tax(mut self, amount: f64) -> Self {
        self.land_tax = amount;
        self
    }

    /// Copy of these parameters with the two sensitivity inputs overridden
    pub fn with_rates(mut self, interest_rate: f64, capital_growth_rate: f64) -> Self {
        self.interest_rate = interest_rate;
        self.capital_growth_rate = capital_growth_rate;
        self
    }

    /// Base annual rent net of vacancy, before any CPI inflation
    pub fn effective_annual_rent(&self) -> f64 {
        self.weekly_rent * 52.0 * (1.0 - self.vacancy_rate)
    }

    /// Base annual outgoings, land tax included
    pub fn annual_outgoings(&self) -> f64 {
        self.annual_opex + self.land_tax
    }

    /// Check every field against the domain the engine is defined over
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (field, value) in [
            ("purchase_price", self.purchase_price),
            ("loan_amount", self.loan_amount),
            ("weekly_rent", self.weekly_rent),
            ("annual_opex", self.annual_opex),
            ("land_tax", self.land_tax),
        ] {
            check_amount(field, value)?;
        }

        for (field, value) in [
            ("interest_rate", self.interest_rate),
            ("vacancy_rate", self.vacancy_rate),
            ("marginal_tax_rate", self.marginal_tax_rate),
            ("capital_growth_rate", self.capital_growth_rate),
            ("cpi_rate", self.cpi_rate),
        ] {
            check_rate(field, value)?;
        }

        for (field, years) in [
            ("loan_term_years", self.loan_term_years),
            ("holding_period_years", self.holding_period_years),
        ] {
            if years > MAX_PROJECTION_YEARS {
                return Err(ParameterError::PeriodTooLong {
                    field,
                    years,
                    max: MAX_PROJECTION_YEARS,
                });
            }
        }

        if self.interest_only_years > self.loan_term_years {
            return Err(ParameterError::InterestOnlyExceedsTerm {
                interest_only: self.interest_only_years,
                term: self.loan_term_years,
            });
        }

        if self.holding_period_years < 1 {
            return Err(ParameterError::HoldingPeriodTooShort {
                years: self.holding_period_years,
            });
        }

        if !is_allowed_tax_rate(self.marginal_tax_rate) {
            return Err(ParameterError::UnsupportedTaxRate {
                value: self.marginal_tax_rate,
            });
        }

        Ok(())
    }
}

/// Whether `rate` matches one of the supported marginal tax brackets
pub fn is_allowed_tax_rate(rate: f64) -> bool {
    ALLOWED_MARGINAL_TAX_RATES
        .iter()
        .any(|allowed| (allowed - rate).abs() < TAX_RATE_TOLERANCE)
}

pub(crate) fn check_rate(field: &'static str, value: f64) -> Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { field });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ParameterError::RateOutOfRange { field, value });
    }
    Ok(())
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ParameterError::NegativeAmount { field, value });
    }
    Ok(())
}
