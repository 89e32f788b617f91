//! Evaluation of `FPMATH` operations for the constant folder and for
//! generated code that falls back to a helper call.

use tracejit_ir::FpmOp;

use crate::platform;

/// Computes `op(x)`.
///
/// # Panics
/// On [`FpmOp::Other`]. Such a request can only come from a code generator
/// bug and no numeric result would be correct.
pub fn foldfpm(x: f64, op: FpmOp) -> f64 {
    match op {
        FpmOp::Floor => platform::floor(x),
        FpmOp::Ceil => platform::ceil(x),
        FpmOp::Trunc => platform::trunc(x),
        FpmOp::Sqrt => x.sqrt(),
        FpmOp::Exp => x.exp(),
        FpmOp::Exp2 => platform::exp2(x),
        FpmOp::Log => x.ln(),
        FpmOp::Log2 => platform::log2(x),
        FpmOp::Log10 => x.log10(),
        FpmOp::Sin => x.sin(),
        FpmOp::Cos => x.cos(),
        FpmOp::Tan => x.tan(),
        FpmOp::Other => invalid_fpm(op.tag()),
    }
}

/// Computes `op(x)` for an undecoded opcode tag, as passed through the C ABI.
///
/// # Panics
/// If `tag` is not a foldable [`FpmOp`].
pub fn foldfpm_raw(x: f64, tag: u32) -> f64 {
    match FpmOp::try_from(tag) {
        Ok(op) => foldfpm(x, op),
        Err(_) => invalid_fpm(tag),
    }
}

#[cold]
#[inline(never)]
fn invalid_fpm(tag: u32) -> ! {
    log::error!("foldfpm: unsupported extended math opcode tag {}", tag);
    panic!("foldfpm: unsupported extended math opcode tag {}", tag);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_op_matches_std() {
        let x = 0.7f64;
        let expected = [
            (FpmOp::Floor, x.floor()),
            (FpmOp::Ceil, x.ceil()),
            (FpmOp::Trunc, x.trunc()),
            (FpmOp::Sqrt, x.sqrt()),
            (FpmOp::Exp, x.exp()),
            (FpmOp::Log, x.ln()),
            (FpmOp::Log10, x.log10()),
            (FpmOp::Sin, x.sin()),
            (FpmOp::Cos, x.cos()),
            (FpmOp::Tan, x.tan()),
        ];
        for (op, value) in expected {
            assert_eq!(foldfpm(x, op).to_bits(), value.to_bits(), "{}", op);
        }
    }

    #[test]
    fn test_platform_ops_route_through_shims() {
        for x in [0.5, 3.0, 8.0, 100.0] {
            assert_eq!(foldfpm(x, FpmOp::Log2).to_bits(), platform::log2(x).to_bits());
            assert_eq!(foldfpm(x, FpmOp::Exp2).to_bits(), platform::exp2(x).to_bits());
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(foldfpm(4.0, FpmOp::Sqrt), 2.0);
        assert_eq!(foldfpm(-2.5, FpmOp::Floor), -3.0);
        assert_eq!(foldfpm(-2.5, FpmOp::Ceil), -2.0);
        assert_eq!(foldfpm(-2.5, FpmOp::Trunc), -2.0);
        assert_eq!(foldfpm(1000.0, FpmOp::Log10), 3.0);
        assert_eq!(foldfpm(0.0, FpmOp::Sin), 0.0);
        assert_eq!(foldfpm(0.0, FpmOp::Cos), 1.0);
        assert!((foldfpm(8.0, FpmOp::Log2) - 3.0).abs() < 1e-12);
        assert!((foldfpm(3.0, FpmOp::Exp2) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_propagates() {
        for op in FpmOp::ALL.into_iter().filter(|op| *op != FpmOp::Other) {
            assert!(foldfpm(f64::NAN, op).is_nan(), "{} dropped NaN", op);
        }
    }

    #[test]
    fn test_raw_tags_decode() {
        assert_eq!(foldfpm_raw(9.0, FpmOp::Sqrt.tag()), 3.0);
        assert_eq!(foldfpm_raw(1.5, FpmOp::Floor.tag()), 1.0);
    }

    #[test]
    #[should_panic(expected = "unsupported extended math opcode tag 12")]
    fn test_other_is_fatal() {
        foldfpm(1.0, FpmOp::Other);
    }

    #[test]
    #[should_panic(expected = "unsupported extended math opcode tag 99")]
    fn test_unknown_raw_tag_is_fatal() {
        foldfpm_raw(1.0, 99);
    }
}
