//! Internal Rate of Return (IRR) calculation
//!
//! Annual cash flows, period 0 undiscounted. Newton-Raphson first, bisection
//! over a fixed bracket when Newton stalls.

const LOWER_RATE: f64 = -0.99;
const UPPER_RATE: f64 = 10.0;
const INITIAL_GUESS: f64 = 0.10;
const RATE_TOLERANCE: f64 = 1e-10;
const NEWTON_MAX_ITERATIONS: u32 = 100;
const BISECTION_MAX_ITERATIONS: u32 = 1000;

/// Calculate the annual IRR of a cash-flow stream
///
/// # Returns
/// * `Option<f64>` - IRR as a decimal (0.05 for 5%), or `None` when the stream
///   never changes sign or no root is found within the iteration budget
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    if cashflows.len() < 2 || cashflows.iter().any(|cf| !cf.is_finite()) {
        return None;
    }

    // At least one sign change is required for a root to exist
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        log::debug!("IRR undefined: cash flows never change sign");
        return None;
    }

    let scale: f64 = cashflows.iter().map(|cf| cf.abs()).sum();
    let npv_tolerance = scale * 1e-9;

    let mut rate = INITIAL_GUESS;

    for _ in 0..NEWTON_MAX_ITERATIONS {
        let (value, derivative) = npv_and_derivative(cashflows, rate);

        if !value.is_finite() || !derivative.is_finite() || derivative.abs() < 1e-20 {
            // Derivative unusable, try bisection instead
            return irr_bisection(cashflows);
        }

        let new_rate = (rate - value / derivative).clamp(LOWER_RATE, UPPER_RATE);

        if (new_rate - rate).abs() < RATE_TOLERANCE {
            // A step pinned against the bracket edge is not a root
            if npv(cashflows, new_rate).abs() <= npv_tolerance {
                return Some(new_rate);
            }
            break;
        }

        rate = new_rate;
    }

    // Newton-Raphson didn't converge, try bisection
    irr_bisection(cashflows)
}

/// Net present value at an annual `rate`, first flow undiscounted
pub fn npv(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powf(t as f64))
        .sum()
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut derivative = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        value += cf / (1.0 + rate).powf(t as f64);
        if t > 0 {
            derivative -= (t as f64) * cf / (1.0 + rate).powf(t as f64 + 1.0);
        }
    }

    (value, derivative)
}

/// Fallback IRR calculation using bisection
fn irr_bisection(cashflows: &[f64]) -> Option<f64> {
    let mut low = LOWER_RATE;
    let mut high = UPPER_RATE;
    let mut npv_low = npv(cashflows, low);
    let npv_high = npv(cashflows, high);

    // Need a root inside the bracket
    if !npv_low.is_finite() || !npv_high.is_finite() || npv_low * npv_high > 0.0 {
        log::debug!("IRR undefined: no sign change of NPV within [{}, {}]", low, high);
        return None;
    }

    for _ in 0..BISECTION_MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(cashflows, mid);

        if npv_mid == 0.0 || (high - low) / 2.0 < RATE_TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    log::debug!("IRR undefined: bisection exhausted its iteration budget");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_simple_irr() {
        // Invest $1000, receive $1100 a year later
        let irr = calculate_irr(&[-1000.0, 1100.0]).unwrap();
        assert_abs_diff_eq!(irr, 0.10, epsilon = 1e-9);
    }

    #[test]
    fn test_level_annuity_irr() {
        // Three payments of half the outlay: annuity factor 2 at ~23.38%
        let irr = calculate_irr(&[-1000.0, 500.0, 500.0, 500.0]).unwrap();
        assert_abs_diff_eq!(irr, 0.2337519, epsilon = 1e-6);
        assert_abs_diff_eq!(npv(&[-1000.0, 500.0, 500.0, 500.0], irr), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_negative_irr() {
        let irr = calculate_irr(&[-1000.0, 900.0]).unwrap();
        assert_abs_diff_eq!(irr, -0.10, epsilon = 1e-9);
    }

    #[test]
    fn test_same_sign_streams_have_no_irr() {
        assert_eq!(calculate_irr(&[100.0, 200.0, 300.0]), None);
        assert_eq!(calculate_irr(&[-100.0, -200.0, -300.0]), None);
        assert_eq!(calculate_irr(&[0.0, 0.0, 0.0]), None);
        assert_eq!(calculate_irr(&[-100.0, 0.0, 0.0]), None);
    }

    #[test]
    fn test_degenerate_inputs_have_no_irr() {
        assert_eq!(calculate_irr(&[]), None);
        assert_eq!(calculate_irr(&[-100.0]), None);
        assert_eq!(calculate_irr(&[-100.0, f64::NAN]), None);
    }

    #[test]
    fn test_root_beyond_bracket_has_no_irr() {
        // Needs a rate above 1000% to break even
        assert_eq!(calculate_irr(&[-1.0, 100.0]), None);
    }

    #[test]
    fn test_long_stream_discounts_every_period() {
        // Near-perpetuity paying 10% of the outlay
        let mut flows = vec![100.0; 501];
        flows[0] = -1000.0;
        let irr = calculate_irr(&flows).unwrap();
        assert_abs_diff_eq!(irr, 0.10, epsilon = 1e-9);
        assert!(npv(&flows, 0.05) > 0.0);
        assert!(npv(&flows, 0.20) < 0.0);
    }

    #[test]
    fn test_npv_at_zero_is_sum() {
        assert_abs_diff_eq!(npv(&[-100.0, 50.0, 60.0], 0.0), 10.0, epsilon = 1e-12);
    }
}
