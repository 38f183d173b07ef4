//! Running state carried from one projection year to the next

use crate::params::ScenarioParameters;

/// Closing position of a projection year, the opening position of the next
///
/// Only the handful of scalars later years depend on are carried; everything
/// else is recomputed per year and frozen into a `YearRecord`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    /// Last completed year (0 = settlement)
    pub year: u32,

    /// Property value at the end of `year`
    pub property_value: f64,

    /// Outstanding loan balance at the end of `year`
    pub loan_balance: f64,

    /// Vacancy-adjusted annual rent applied in `year`
    pub rent: f64,

    /// Annual operating expenses (land tax included) applied in `year`
    pub opex: f64,

    /// Principal repaid from settlement through `year`
    pub principal_paid: f64,
}

impl ProjectionState {
    /// Position at settlement
    pub fn at_settlement(params: &ScenarioParameters) -> Self {
        Self {
            year: 0,
            property_value: params.purchase_price,
            loan_balance: params.loan_amount,
            rent: params.effective_annual_rent(),
            opex: params.annual_outgoings(),
            principal_paid: 0.0,
        }
    }

    /// Rent and opex for the coming year
    ///
    /// Year 1 runs at base figures; CPI is first applied in year 2.
    pub fn inflated_income(&self, cpi_rate: f64) -> (f64, f64) {
        if self.year == 0 {
            (self.rent, self.opex)
        } else {
            (self.rent * (1.0 + cpi_rate), self.opex * (1.0 + cpi_rate))
        }
    }
}
