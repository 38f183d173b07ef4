//! Loan servicing: interest-only, amortizing, and closed phases

/// Repayment phase of the loan in a given projection year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanPhase {
    /// Interest only, no principal reduction
    InterestOnly,
    /// Principal and interest, amortizing over the years left in the term
    Amortizing { remaining_term: u32 },
    /// Term has elapsed, no further repayments
    Closed,
}

impl LoanPhase {
    /// Phase for a projection year (1-indexed)
    pub fn for_year(year: u32, interest_only_years: u32, loan_term_years: u32) -> Self {
        if year <= interest_only_years {
            return LoanPhase::InterestOnly;
        }
        // Remaining term counts the current year
        let elapsed = year.saturating_sub(1);
        if loan_term_years > elapsed {
            LoanPhase::Amortizing {
                remaining_term: loan_term_years - elapsed,
            }
        } else {
            LoanPhase::Closed
        }
    }
}

/// Interest and principal paid over one year
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Repayment {
    pub interest: f64,
    pub principal: f64,
}

impl Repayment {
    pub fn total(&self) -> f64 {
        self.interest + self.principal
    }
}

/// Level payment that fully amortizes `principal` over `periods` at `rate`
///
/// Degenerates to `principal / periods` when the rate is zero.
pub fn level_payment(rate: f64, periods: u32, principal: f64) -> f64 {
    if periods == 0 {
        return 0.0;
    }
    if rate == 0.0 {
        return principal / periods as f64;
    }
    principal * rate / (1.0 - (1.0 + rate).powf(-(periods as f64)))
}

/// Repayment due in one year given the opening balance
pub fn annual_repayment(phase: LoanPhase, balance: f64, rate: f64) -> Repayment {
    match phase {
        LoanPhase::InterestOnly => Repayment {
            interest: balance * rate,
            principal: 0.0,
        },
        LoanPhase::Amortizing { remaining_term } => {
            let payment = level_payment(rate, remaining_term, balance);
            let interest = balance * rate;
            Repayment {
                interest,
                principal: payment - interest,
            }
        }
        LoanPhase::Closed => Repayment::default(),
    }
}
