//! Money calculation utilities using rust_decimal for precision
//!
//! Ticket amounts live as `f64` on the wire and in the store; every
//! calculation goes through `Decimal` and is rounded half-up to 2 decimal
//! places at each arithmetic boundary, so stored values match what a
//! cashier would compute by hand (85.50 + 6.84 + 12.83 = 105.17).

use rust_decimal::prelude::*;

/// Rounding to 2 decimal places, half-up
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a raw amount to 2 decimal places, half-up
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Tax on a subtotal: `round2(subtotal * rate)`
pub fn calculate_tax(subtotal: f64, rate: f64) -> f64 {
    to_f64(to_decimal(subtotal) * to_decimal(rate))
}

/// Ticket total: `round2(subtotal + tax + tip)`
pub fn calculate_total(subtotal: f64, tax: f64, tip: f64) -> f64 {
    to_f64(to_decimal(subtotal) + to_decimal(tax) + to_decimal(tip))
}

/// Validate a full set of payment amounts.
///
/// False when any operand is negative or when `total` drifts from the
/// recomputed sum by 0.01 or more.
pub fn validate_payment_amounts(subtotal: f64, tax: f64, tip: f64, total: f64) -> bool {
    if subtotal < 0.0 || tax < 0.0 || tip < 0.0 || total < 0.0 {
        return false;
    }
    let expected = to_decimal(calculate_total(subtotal, tax, tip));
    let diff = (expected - to_decimal(total)).abs();
    diff < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_calculate_tax_anchor() {
        assert_eq!(calculate_tax(100.00, 0.08), 8.00);
        assert_eq!(calculate_tax(85.50, 0.08), 6.84);
    }

    #[test]
    fn test_calculate_total_anchor() {
        assert_eq!(calculate_total(85.50, 6.84, 12.83), 105.17);
        assert_eq!(calculate_total(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_total_consistent_with_direct_sum() {
        for (s, t, p) in [(10.0, 0.8, 1.5), (99.99, 8.25, 0.0), (0.01, 0.01, 0.01)] {
            assert_eq!(calculate_total(s, t, p), round2(s + t + p));
        }
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(calculate_tax(10.0, 0.0825), 0.83); // 0.825 rounds up
    }

    #[test]
    fn test_validate_accepts_exact_and_within_tolerance() {
        assert!(validate_payment_amounts(85.50, 6.84, 12.83, 105.17));
        assert!(validate_payment_amounts(85.50, 6.84, 12.83, 105.175));
        assert!(validate_payment_amounts(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_validate_rejects_drift() {
        assert!(!validate_payment_amounts(85.50, 6.84, 12.83, 105.18));
        assert!(!validate_payment_amounts(100.0, 8.0, 0.0, 109.0));
    }

    #[test]
    fn test_validate_rejects_any_negative() {
        assert!(!validate_payment_amounts(-1.0, 0.08, 0.0, -0.92));
        assert!(!validate_payment_amounts(10.0, -0.5, 0.0, 9.5));
        assert!(!validate_payment_amounts(10.0, 0.5, -1.0, 9.5));
        assert!(!validate_payment_amounts(10.0, 0.5, 1.0, -11.5));
    }

    #[test]
    fn test_nan_inputs_fail_validation() {
        // NaN converts to 0 through Decimal, so the recomputed total
        // cannot match a finite stored total
        assert!(!validate_payment_amounts(f64::NAN, 6.84, 12.83, 105.17));
    }
}
