//! Year-by-year ledger and the cash-flow streams fed to the IRR solve

use serde::{Deserialize, Serialize};

use super::irr::calculate_irr;

/// One year of projection output
///
/// Year 0 is the acquisition record: value and loan at settlement, all flows zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: u32,
    /// Property value at year end
    pub property_value: f64,
    /// Loan balance at year end
    pub loan_balance: f64,
    /// Vacancy-adjusted annual rent
    pub rent: f64,
    /// Operating expenses, land tax included
    pub opex: f64,
    pub noi: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,
    /// Income tax on the property; negative when the loss produces a rebate
    pub tax_payable: f64,
    pub pre_tax_cash_flow: f64,
    pub post_tax_cash_flow: f64,
}

impl YearRecord {
    /// Acquisition record for year 0
    pub fn acquisition(purchase_price: f64, loan_amount: f64) -> Self {
        Self {
            year: 0,
            property_value: purchase_price,
            loan_balance: loan_amount,
            rent: 0.0,
            opex: 0.0,
            noi: 0.0,
            interest_paid: 0.0,
            principal_paid: 0.0,
            tax_payable: 0.0,
            pre_tax_cash_flow: 0.0,
            post_tax_cash_flow: 0.0,
        }
    }

    /// Owner's equity: value less the outstanding loan
    pub fn equity(&self) -> f64 {
        self.property_value - self.loan_balance
    }
}

/// Signed annual cash amounts, index 0 being the initial equity outlay
///
/// Built as settlement, then interior years, then one terminal element that
/// folds the final year's flow together with the sale proceeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashFlowStream(Vec<f64>);

impl CashFlowStream {
    pub fn assemble<I>(initial_outlay: f64, interior: I, terminal: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut flows = vec![-initial_outlay];
        flows.extend(interior);
        flows.push(terminal);
        Self(flows)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Undiscounted sum of every entry, outlay included
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Annual IRR, `None` when no rate zeroes the NPV
    pub fn irr(&self) -> Option<f64> {
        calculate_irr(&self.0)
    }
}

/// Pre-tax and post-tax streams sharing the same initial outlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlows {
    pub pre_tax: CashFlowStream,
    pub post_tax: CashFlowStream,
}
