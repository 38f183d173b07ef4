//! Core projection engine for annual property cash flows

use crate::assumptions::Assumptions;
use crate::error::ParameterError;
use crate::params::ScenarioParameters;

use super::ledger::{CashFlowStream, CashFlows, YearRecord};
use super::loan::{annual_repayment, LoanPhase};
use super::metrics::ReturnMetrics;
use super::result::ScenarioResult;
use super::sale::{AcquisitionSummary, SaleSummary};
use super::state::ProjectionState;

/// Main projection engine
///
/// Holds only the model assumptions; each `project` call starts from a fresh
/// settlement state, so one engine can serve any number of scenarios.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
}

impl ProjectionEngine {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Run a projection over the holding period and derive the return metrics
    pub fn project(&self, params: &ScenarioParameters) -> Result<ScenarioResult, ParameterError> {
        params.validate()?;

        let holding_period = params.holding_period_years;
        let acquisition = AcquisitionSummary::calculate(params, &self.assumptions);
        let settlement = YearRecord::acquisition(params.purchase_price, params.loan_amount);

        let mut years = Vec::with_capacity(holding_period as usize + 1);
        years.push(settlement);

        let closing = (1..=holding_period).fold(
            ProjectionState::at_settlement(params),
            |state, year| {
                let (record, next) = self.project_year(params, &state, year);
                log::trace!("{:?}", record);
                years.push(record);
                next
            },
        );

        let final_year = years.last().copied().unwrap_or(settlement);
        let sale = SaleSummary::calculate(&final_year, &acquisition, params, &self.assumptions);

        // Years 1..holding_period-1 go in as-is; the final year's own flow is
        // carried by the terminal element alongside the sale proceeds
        let interior = &years[1..years.len() - 1];
        let cash_flows = CashFlows {
            pre_tax: CashFlowStream::assemble(
                acquisition.initial_equity,
                interior.iter().map(|r| r.pre_tax_cash_flow),
                final_year.pre_tax_cash_flow + sale.net_proceeds_pre_tax,
            ),
            post_tax: CashFlowStream::assemble(
                acquisition.initial_equity,
                interior.iter().map(|r| r.post_tax_cash_flow),
                final_year.post_tax_cash_flow + sale.net_proceeds_post_tax,
            ),
        };

        let cash_in: f64 = years[1..].iter().map(|r| r.post_tax_cash_flow).sum::<f64>()
            + sale.net_proceeds_post_tax;
        let cash_out = acquisition.initial_equity + closing.principal_paid;
        let metrics = ReturnMetrics::calculate(&cash_flows, cash_in, cash_out);

        log::debug!(
            "Projected {} years: IRR pre-tax {:?}, post-tax {:?}, multiple {:.3}, net profit {:.2}",
            holding_period,
            metrics.irr_pre_tax,
            metrics.irr_post_tax,
            metrics.cash_on_cash,
            metrics.net_profit,
        );

        Ok(ScenarioResult {
            metrics,
            acquisition,
            sale,
            total_principal_paid: closing.principal_paid,
            cash_flows,
            years,
        })
    }

    /// Compute one year from the prior year's closing state
    fn project_year(
        &self,
        params: &ScenarioParameters,
        state: &ProjectionState,
        year: u32,
    ) -> (YearRecord, ProjectionState) {
        let (rent, opex) = state.inflated_income(params.cpi_rate);
        let noi = rent - opex;

        let phase = LoanPhase::for_year(year, params.interest_only_years, params.loan_term_years);
        let repayment = annual_repayment(phase, state.loan_balance, params.interest_rate);
        let loan_balance = (state.loan_balance - repayment.principal).max(0.0);

        // Negative taxable income yields a negative tax payable (a rebate)
        let depreciation = self.assumptions.depreciation.allowance(year);
        let taxable_income = noi - repayment.interest - depreciation;
        let tax_payable = taxable_income * params.marginal_tax_rate;

        let pre_tax_cash_flow = noi - repayment.interest - repayment.principal;
        let post_tax_cash_flow = pre_tax_cash_flow - tax_payable;

        let property_value = state.property_value * (1.0 + params.capital_growth_rate);

        let record = YearRecord {
            year,
            property_value,
            loan_balance,
            rent,
            opex,
            noi,
            interest_paid: repayment.interest,
            principal_paid: repayment.principal,
            tax_payable,
            pre_tax_cash_flow,
            post_tax_cash_flow,
        };

        let next = ProjectionState {
            year,
            property_value,
            loan_balance,
            rent,
            opex,
            principal_paid: state.principal_paid + repayment.principal,
        };

        (record, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn project(params: &ScenarioParameters) -> ScenarioResult {
        ProjectionEngine::default().project(params).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let result = project(&ScenarioParameters::default());

        let settlement = result.year(0).unwrap();
        assert_eq!(settlement.property_value, 750_000.0);
        assert_eq!(settlement.loan_balance, 600_000.0);
        assert_eq!(settlement.post_tax_cash_flow, 0.0);

        let first = result.year(1).unwrap();
        assert_eq!(first.interest_paid, 36_000.0);
        assert_relative_eq!(first.rent, 30_264.0, max_relative = 1e-12);
        assert_relative_eq!(first.noi, 24_264.0, max_relative = 1e-12);
        assert_relative_eq!(first.principal_paid, 7_589.346894028, max_relative = 1e-9);
        assert_relative_eq!(first.tax_payable, -6_562.32, max_relative = 1e-9);
        assert_relative_eq!(first.post_tax_cash_flow, -12_763.026894028, max_relative = 1e-9);
        assert_relative_eq!(first.property_value, 787_500.0, max_relative = 1e-12);

        assert_relative_eq!(result.acquisition.initial_equity, 182_000.0);
        assert_relative_eq!(
            result.sale.net_proceeds_post_tax,
            615_473.9197590513,
            max_relative = 1e-9
        );
        assert_abs_diff_eq!(result.irr_post_tax().unwrap(), 0.0905894695, epsilon = 1e-8);
        assert_abs_diff_eq!(result.irr_pre_tax().unwrap(), 0.0907456115, epsilon = 1e-8);
        assert_relative_eq!(result.cash_on_cash(), 1.7632900031965928, max_relative = 1e-9);
        assert_relative_eq!(result.net_profit(), 315_307.0718042499, max_relative = 1e-9);
    }

    #[test]
    fn test_fully_interest_only_loan_never_reduces() {
        let params = ScenarioParameters {
            loan_term_years: 10,
            interest_only_years: 10,
            ..Default::default()
        };
        let result = project(&params);

        for record in &result.years[1..] {
            assert_eq!(record.principal_paid, 0.0);
            assert_eq!(record.interest_paid, 36_000.0);
        }
        assert_eq!(result.final_year().unwrap().loan_balance, params.loan_amount);
        assert_eq!(result.total_principal_paid, 0.0);
    }

    #[test]
    fn test_zero_rate_amortizes_straight_line() {
        let params = ScenarioParameters {
            interest_rate: 0.0,
            ..Default::default()
        };
        let result = project(&params);

        for record in &result.years[1..] {
            assert_eq!(record.interest_paid, 0.0);
            assert_relative_eq!(record.principal_paid, 20_000.0, max_relative = 1e-12);
        }
        assert_relative_eq!(result.total_principal_paid, 200_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_loan_balance_non_increasing_through_payoff() {
        // Interest-only, then amortizing, then held past the end of the term
        let params = ScenarioParameters {
            loan_term_years: 10,
            interest_only_years: 3,
            holding_period_years: 15,
            ..Default::default()
        };
        let result = project(&params);

        for pair in result.years.windows(2) {
            assert!(pair[1].loan_balance <= pair[0].loan_balance);
            assert!(pair[1].loan_balance >= 0.0);
        }

        assert_abs_diff_eq!(result.year(10).unwrap().loan_balance, 0.0, epsilon = 1e-6);
        for record in &result.years[11..] {
            assert_eq!(record.interest_paid, 0.0);
            assert_eq!(record.principal_paid, 0.0);
        }
    }

    #[test]
    fn test_streams_differ_only_by_tax() {
        let params = ScenarioParameters::default();
        let result = project(&params);
        let pre = result.cash_flows.pre_tax.as_slice();
        let post = result.cash_flows.post_tax.as_slice();
        let h = params.holding_period_years as usize;

        assert_eq!(pre.len(), h + 1);
        assert_eq!(post.len(), h + 1);
        assert_eq!(pre[0], -result.acquisition.initial_equity);
        assert_eq!(pre[0], post[0]);

        for year in 1..h {
            assert_abs_diff_eq!(
                pre[year] - post[year],
                result.years[year].tax_payable,
                epsilon = 1e-6
            );
        }
        assert_abs_diff_eq!(
            pre[h] - post[h],
            result.years[h].tax_payable + result.sale.capital_gains_tax,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_each_year_counted_once_in_stream() {
        let result = project(&ScenarioParameters::default());

        let year_flows: f64 = result.years[1..].iter().map(|r| r.post_tax_cash_flow).sum();
        let expected =
            -result.acquisition.initial_equity + year_flows + result.sale.net_proceeds_post_tax;
        assert_abs_diff_eq!(result.cash_flows.post_tax.total(), expected, epsilon = 1e-6);
        assert_abs_diff_eq!(result.net_profit(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_single_year_hold_pays_full_cgt() {
        let params = ScenarioParameters {
            holding_period_years: 1,
            ..Default::default()
        };
        let result = project(&params);

        assert_eq!(result.sale.taxable_gain, result.sale.gross_gain);
        assert_eq!(result.cash_flows.post_tax.len(), 2);
        // Loss on a one-year hold: stamp duty outweighs one year of growth
        assert!(result.sale.capital_gains_tax < 0.0);
        assert_relative_eq!(result.sale.capital_gains_tax, -5_249.375, max_relative = 1e-9);
        assert_abs_diff_eq!(result.irr_post_tax().unwrap(), -0.0775373901, epsilon = 1e-8);

        let two_years = project(&ScenarioParameters {
            holding_period_years: 2,
            ..Default::default()
        });
        assert_relative_eq!(two_years.sale.taxable_gain, two_years.sale.gross_gain * 0.5);
    }

    #[test]
    fn test_cash_on_cash_zero_when_nothing_invested() {
        // Loan exceeds the upfront cost and no principal is ever repaid
        let params = ScenarioParameters {
            purchase_price: 100_000.0,
            loan_amount: 200_000.0,
            loan_term_years: 10,
            interest_only_years: 10,
            ..Default::default()
        };
        let result = project(&params);

        assert!(result.acquisition.initial_equity + result.total_principal_paid <= 0.0);
        assert_eq!(result.cash_on_cash(), 0.0);

        let funded = project(&ScenarioParameters::default());
        assert!(funded.cash_on_cash() > 0.0);
    }

    #[test]
    fn test_land_tax_reduces_noi() {
        let without = project(&ScenarioParameters::default());
        let with = project(&ScenarioParameters::default().with_land_tax(1_500.0));

        let (a, b) = (without.year(1).unwrap(), with.year(1).unwrap());
        assert_relative_eq!(a.noi - b.noi, 1_500.0, max_relative = 1e-9);
        // Land tax inflates with CPI alongside opex
        let (a, b) = (without.year(3).unwrap(), with.year(3).unwrap());
        assert_relative_eq!(b.opex - a.opex, 1_500.0 * 1.025 * 1.025, max_relative = 1e-9);
    }

    #[test]
    fn test_depreciation_stops_after_ten_years() {
        let params = ScenarioParameters {
            holding_period_years: 12,
            ..Default::default()
        };
        let result = project(&params);

        for year in [10, 11] {
            let record = result.year(year).unwrap();
            let depreciation = if year <= 10 { 6_000.0 } else { 0.0 };
            let expected =
                (record.noi - record.interest_paid - depreciation) * params.marginal_tax_rate;
            assert_relative_eq!(record.tax_payable, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let engine = ProjectionEngine::default();
        let params = ScenarioParameters::default();

        let first = engine.project(&params).unwrap();
        let second = engine.project(&params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_parameters_rejected_before_projection() {
        let params = ScenarioParameters {
            interest_only_years: 31,
            ..Default::default()
        };
        assert!(matches!(
            ProjectionEngine::default().project(&params),
            Err(ParameterError::InterestOnlyExceedsTerm { .. })
        ));
    }

    #[test]
    fn test_oversized_periods_rejected_before_projection() {
        let engine = ProjectionEngine::default();

        let long_term = ScenarioParameters {
            loan_term_years: 3_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            engine.project(&long_term),
            Err(ParameterError::PeriodTooLong { field: "loan_term_years", .. })
        ));

        let long_hold = ScenarioParameters {
            holding_period_years: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            engine.project(&long_hold),
            Err(ParameterError::PeriodTooLong { field: "holding_period_years", .. })
        ));
    }

    #[test]
    fn test_longest_allowed_term_amortizes() {
        let params = ScenarioParameters {
            loan_term_years: crate::params::MAX_PROJECTION_YEARS,
            holding_period_years: crate::params::MAX_PROJECTION_YEARS,
            ..Default::default()
        };
        let result = project(&params);

        assert_eq!(result.years.len(), params.holding_period_years as usize + 1);
        for pair in result.years.windows(2) {
            assert!(pair[1].loan_balance <= pair[0].loan_balance);
            assert!(pair[1].principal_paid >= 0.0);
        }
        assert_abs_diff_eq!(result.final_year().unwrap().loan_balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_custom_assumptions_flow_through() {
        let mut assumptions = Assumptions::standard();
        assumptions.acquisition.stamp_duty_rate = 0.0;
        assumptions.acquisition.closing_costs = 0.0;

        let result = ProjectionEngine::new(assumptions)
            .project(&ScenarioParameters::default())
            .unwrap();
        assert_relative_eq!(result.acquisition.initial_equity, 150_000.0);
        assert!(result.irr_post_tax().unwrap() > 0.0905894695);
    }

    #[test]
    fn test_weekly_cash_flow_and_equity() {
        let result = project(&ScenarioParameters::default());
        let first = result.year(1).unwrap();

        assert_relative_eq!(result.weekly_cash_flow_year_one(), first.post_tax_cash_flow / 52.0);
        assert_relative_eq!(first.equity(), 787_500.0 - first.loan_balance);
    }
}
