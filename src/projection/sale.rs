//! Acquisition outlay and terminal sale proceeds

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::params::ScenarioParameters;

use super::ledger::YearRecord;

/// Upfront cost of buying the property and the equity the investor puts in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionSummary {
    pub purchase_price: f64,
    pub stamp_duty: f64,
    pub closing_costs: f64,
    pub total_upfront_cost: f64,
    /// Upfront cost less the loan; negative when the loan covers more than the cost
    pub initial_equity: f64,
}

impl AcquisitionSummary {
    pub fn calculate(params: &ScenarioParameters, assumptions: &Assumptions) -> Self {
        let costs = &assumptions.acquisition;
        let stamp_duty = costs.stamp_duty(params.purchase_price);
        let total_upfront_cost = costs.total_upfront_cost(params.purchase_price);

        Self {
            purchase_price: params.purchase_price,
            stamp_duty,
            closing_costs: costs.closing_costs,
            total_upfront_cost,
            initial_equity: total_upfront_cost - params.loan_amount,
        }
    }

    /// Unindexed cost base for capital gains
    pub fn cost_base(&self) -> f64 {
        self.purchase_price + self.stamp_duty + self.closing_costs
    }
}

/// Sale at the end of the holding period, with capital gains tax
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleSummary {
    pub sale_price: f64,
    pub selling_costs: f64,
    /// Loan balance repaid out of the proceeds
    pub loan_balance: f64,
    pub cost_base: f64,
    pub gross_gain: f64,
    pub taxable_gain: f64,
    /// Negative when the sale crystallises a loss
    pub capital_gains_tax: f64,
    pub net_proceeds_pre_tax: f64,
    pub net_proceeds_post_tax: f64,
}

impl SaleSummary {
    /// Sell at the final year's closing value
    pub fn calculate(
        final_year: &YearRecord,
        acquisition: &AcquisitionSummary,
        params: &ScenarioParameters,
        assumptions: &Assumptions,
    ) -> Self {
        let sale_price = final_year.property_value;
        let selling_costs = assumptions.sale.selling_costs(sale_price);
        let loan_balance = final_year.loan_balance;
        let cost_base = acquisition.cost_base();

        let gross_gain = sale_price - selling_costs - cost_base;
        let taxable_gain = assumptions
            .capital_gains
            .taxable_gain(gross_gain, params.holding_period_years);
        let capital_gains_tax = taxable_gain * params.marginal_tax_rate;

        let net_proceeds_pre_tax = sale_price - selling_costs - loan_balance;

        Self {
            sale_price,
            selling_costs,
            loan_balance,
            cost_base,
            gross_gain,
            taxable_gain,
            capital_gains_tax,
            net_proceeds_pre_tax,
            net_proceeds_post_tax: net_proceeds_pre_tax - capital_gains_tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_equity() {
        let params = ScenarioParameters::default();
        let acquisition = AcquisitionSummary::calculate(&params, &Assumptions::standard());

        assert_relative_eq!(acquisition.stamp_duty, 30_000.0);
        assert_relative_eq!(acquisition.total_upfront_cost, 782_000.0);
        assert_relative_eq!(acquisition.initial_equity, 182_000.0);
        assert_relative_eq!(acquisition.cost_base(), acquisition.total_upfront_cost);
    }

    #[test]
    fn test_sale_with_discounted_gain() {
        let params = ScenarioParameters::default();
        let assumptions = Assumptions::standard();
        let acquisition = AcquisitionSummary::calculate(&params, &assumptions);
        let final_year = YearRecord {
            year: 10,
            property_value: 1_000_000.0,
            loan_balance: 500_000.0,
            ..YearRecord::acquisition(0.0, 0.0)
        };

        let sale = SaleSummary::calculate(&final_year, &acquisition, &params, &assumptions);

        assert_relative_eq!(sale.selling_costs, 25_000.0);
        assert_relative_eq!(sale.gross_gain, 1_000_000.0 - 25_000.0 - 782_000.0);
        assert_relative_eq!(sale.taxable_gain, sale.gross_gain * 0.5);
        assert_relative_eq!(sale.capital_gains_tax, sale.taxable_gain * 0.37);
        assert_relative_eq!(sale.net_proceeds_pre_tax, 475_000.0);
        assert_relative_eq!(
            sale.net_proceeds_post_tax,
            475_000.0 - sale.capital_gains_tax
        );
    }
}
