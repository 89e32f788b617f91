//! Address and signature table of the exported helpers, for backends that
//! link generated code against them.

use std::fmt;

use crate::ffi;
use crate::platform::{self, UnaryFn};

/// Shape of a helper's C signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelperSig {
    /// `(i32, i32) -> i32`
    IntIntToInt,
    /// `(f64, i32) -> f64`
    FloatIntToFloat,
    /// `(f64, u32) -> f64`, the second argument being an opcode tag.
    FloatTagToFloat,
    /// `(f64) -> f64`
    FloatToFloat,
}

#[derive(Clone, Copy)]
pub struct HelperSymbol {
    pub name: &'static str,
    pub addr: *const u8,
    pub sig: HelperSig,
}

// The addresses point at immutable code.
unsafe impl Send for HelperSymbol {}
unsafe impl Sync for HelperSymbol {}

impl fmt::Debug for HelperSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperSymbol")
            .field("name", &self.name)
            .field("addr", &self.addr)
            .field("sig", &self.sig)
            .finish()
    }
}

fn unary(name: &'static str, func: UnaryFn) -> HelperSymbol {
    HelperSymbol { name, addr: func as *const u8, sig: HelperSig::FloatToFloat }
}

/// Every helper exported for the current target.
pub fn helper_symbols() -> Vec<HelperSymbol> {
    let mut symbols = vec![
        HelperSymbol {
            name: "tracejit_vm_modi",
            addr: ffi::tracejit_vm_modi as *const u8,
            sig: HelperSig::IntIntToInt,
        },
        HelperSymbol {
            name: "tracejit_vm_powi",
            addr: ffi::tracejit_vm_powi as *const u8,
            sig: HelperSig::FloatIntToFloat,
        },
        HelperSymbol {
            name: "tracejit_vm_foldfpm",
            addr: ffi::tracejit_vm_foldfpm as *const u8,
            sig: HelperSig::FloatTagToFloat,
        },
        unary("tracejit_vm_floor", ffi::tracejit_vm_floor),
        unary("tracejit_vm_ceil", ffi::tracejit_vm_ceil),
        unary("tracejit_vm_trunc", ffi::tracejit_vm_trunc),
        unary("tracejit_vm_log2", ffi::tracejit_vm_log2),
        unary("tracejit_vm_exp2", ffi::tracejit_vm_exp2),
    ];
    symbols.extend(
        platform::hyperbolic_wrappers()
            .iter()
            .map(|&(name, func)| unary(name, func)),
    );
    symbols
}

pub fn find_helper(name: &str) -> Option<HelperSymbol> {
    helper_symbols().into_iter().find(|sym| sym.name == name)
}
