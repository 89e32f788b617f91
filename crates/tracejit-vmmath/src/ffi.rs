//! C-ABI entry points called from generated machine code.
//!
//! Signatures are part of the code generator's contract: fixed argument
//! types, no hidden state. A panic that reaches one of these frames aborts
//! the process.

use crate::{arith, fpm, platform};

/// FFI: floored integer remainder. `b` must be non-zero.
#[no_mangle]
pub extern "C" fn tracejit_vm_modi(a: i32, b: i32) -> i32 {
    arith::modi(a, b)
}

/// FFI: `x` to the integer power `k`.
#[no_mangle]
pub extern "C" fn tracejit_vm_powi(x: f64, k: i32) -> f64 {
    arith::powi(x, k)
}

/// FFI: extended math operation selected by raw `FpmOp` tag.
/// Aborts on an unsupported tag.
#[no_mangle]
pub extern "C" fn tracejit_vm_foldfpm(x: f64, fpm: u32) -> f64 {
    fpm::foldfpm_raw(x, fpm)
}

#[no_mangle]
pub extern "C" fn tracejit_vm_floor(x: f64) -> f64 {
    platform::floor(x)
}

#[no_mangle]
pub extern "C" fn tracejit_vm_ceil(x: f64) -> f64 {
    platform::ceil(x)
}

#[no_mangle]
pub extern "C" fn tracejit_vm_trunc(x: f64) -> f64 {
    platform::trunc(x)
}

#[no_mangle]
pub extern "C" fn tracejit_vm_log2(x: f64) -> f64 {
    platform::log2(x)
}

#[no_mangle]
pub extern "C" fn tracejit_vm_exp2(x: f64) -> f64 {
    platform::exp2(x)
}
