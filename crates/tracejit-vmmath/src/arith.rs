//! Integer helpers that have no direct machine instruction.

/// Integer remainder with the sign of the divisor (floored division).
///
/// `modi(-7, 3) == 2` and `modi(7, -3) == -2`. The caller must have proven
/// `b != 0` before emitting the call.
#[inline]
pub fn modi(a: i32, b: i32) -> i32 {
    debug_assert!(b != 0, "modi: divisor must be checked before calling");
    let ua = a.unsigned_abs();
    let ub = b.unsigned_abs();
    let mut y = ua % ub;
    if y != 0 && (a ^ b) < 0 {
        y = y.wrapping_sub(ub);
    }
    if ((y as i32) ^ b) < 0 {
        y = y.wrapping_neg();
    }
    y as i32
}

/// `x` raised to an unsigned, non-zero power by binary exponentiation.
///
/// The multiplication order is fixed: results are compared bit-for-bit
/// against the interpreter, so do not replace this with `f64::powi`.
fn powui(mut x: f64, mut k: u32) -> f64 {
    debug_assert!(k != 0);
    while k & 1 == 0 {
        x *= x;
        k >>= 1;
    }
    let mut y = x;
    k >>= 1;
    if k != 0 {
        loop {
            x *= x;
            if k == 1 {
                break;
            }
            if k & 1 != 0 {
                y *= x;
            }
            k >>= 1;
        }
        y *= x;
    }
    y
}

/// `x` raised to a signed integer power.
///
/// `powi(x, 0)` is `1.0` for every `x`, NaN included, and `powi(x, 1)`
/// returns `x` untouched.
pub fn powi(x: f64, k: i32) -> f64 {
    if k > 1 {
        powui(x, k as u32)
    } else if k == 1 {
        x
    } else if k == 0 {
        1.0
    } else {
        1.0 / powui(x, (k as u32).wrapping_neg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modi_sign_follows_divisor() {
        assert_eq!(modi(7, 3), 1);
        assert_eq!(modi(-7, 3), 2);
        assert_eq!(modi(7, -3), -2);
        assert_eq!(modi(-7, -3), -1);
    }

    #[test]
    fn test_modi_exact_multiples() {
        assert_eq!(modi(9, 3), 0);
        assert_eq!(modi(-9, 3), 0);
        assert_eq!(modi(9, -3), 0);
        assert_eq!(modi(0, -5), 0);
    }

    #[test]
    fn test_modi_extremes() {
        assert_eq!(modi(i32::MIN, -1), 0);
        assert_eq!(modi(i32::MIN, 1), 0);
        assert_eq!(modi(i32::MIN, i32::MIN), 0);
        assert_eq!(modi(i32::MAX, i32::MIN), -1);
        assert_eq!(modi(i32::MIN, i32::MAX), i32::MAX - 1);
        assert_eq!(modi(-1, i32::MIN), -1);
        assert_eq!(modi(1, i32::MIN), i32::MIN + 1);
        assert_eq!(modi(i32::MIN, 3), 1);
    }

    #[test]
    fn test_modi_matches_rem_euclid_for_positive_divisors() {
        for a in -50..=50 {
            for b in 1..=9 {
                assert_eq!(modi(a, b), a.rem_euclid(b), "modi({}, {})", a, b);
            }
        }
    }

    #[test]
    fn test_powui_multiplication_order() {
        let x = 1.1f64;
        // 13 = 0b1101: y = x, then y *= x^4, then y *= x^8.
        let x2 = x * x;
        let x4 = x2 * x2;
        let x8 = x4 * x4;
        let expected = (x * x4) * x8;
        assert_eq!(powui(x, 13).to_bits(), expected.to_bits());

        // 12 = 0b1100: two squarings stripped first, then y = x^4, y *= x^8.
        assert_eq!(powui(x, 12).to_bits(), (x4 * x8).to_bits());
    }

    #[test]
    fn test_powi_small_exponents() {
        assert_eq!(powi(2.0, 10), 1024.0);
        assert_eq!(powi(2.0, -1), 0.5);
        assert_eq!(powi(-3.0, 3), -27.0);
        assert_eq!(powi(-3.0, 2), 9.0);
        assert_eq!(powi(10.0, -2), 1.0 / 100.0);
    }

    #[test]
    fn test_powi_zero_exponent_is_one() {
        assert_eq!(powi(0.0, 0), 1.0);
        assert_eq!(powi(f64::NAN, 0), 1.0);
        assert_eq!(powi(f64::INFINITY, 0), 1.0);
        assert_eq!(powi(-0.0, 0), 1.0);
    }

    #[test]
    fn test_powi_identity_is_bit_exact() {
        let odd_nan = f64::from_bits(0x7ff8_0000_dead_beef);
        for x in [0.1, -0.0, 1e308, f64::MIN_POSITIVE / 3.0, odd_nan] {
            assert_eq!(powi(x, 1).to_bits(), x.to_bits());
        }
    }

    #[test]
    fn test_powi_min_exponent() {
        assert_eq!(powi(2.0, i32::MIN), 0.0);
        assert_eq!(powi(1.0, i32::MIN), 1.0);
        assert_eq!(powi(0.5, i32::MIN), f64::INFINITY);
    }

    #[test]
    fn test_powi_special_values() {
        assert!(powi(f64::NAN, 2).is_nan());
        assert_eq!(powi(0.0, -1), f64::INFINITY);
        assert_eq!(powi(-0.0, -1), f64::NEG_INFINITY);
        assert_eq!(powi(f64::INFINITY, -3), 0.0);
    }
}
