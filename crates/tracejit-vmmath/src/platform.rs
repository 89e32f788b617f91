//! Build-time selection of math primitives that differ between targets.
//!
//! Callers always see the same signatures. Which body runs is decided by
//! [`HOST_CAPS`], a constant, so the untaken branch is removed at compile time.
//! The hyperbolic linkage wrappers are the only items that must not exist at
//! all on other targets, and they are gated in this module alone.

/// What the target's math library provides, fixed when the crate is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCaps {
    /// The C library `log2` is usable.
    pub native_log2: bool,
    /// The C library `exp2` is usable.
    pub native_exp2: bool,
    /// Generated code calls `sinh`/`cosh`/`tanh` through local wrappers.
    pub hyperbolic_wrappers: bool,
}

pub const HOST_CAPS: PlatformCaps = PlatformCaps {
    native_log2: !cfg!(any(target_os = "android", feature = "fallback-log2")),
    native_exp2: !cfg!(feature = "fallback-exp2"),
    hyperbolic_wrappers: cfg!(any(target_arch = "x86", target_arch = "x86_64")),
};

/// Logs the capability selection once, for backends that set up linkage.
pub fn log_capabilities() {
    log::debug!(
        "vmmath platform: native_log2={}, native_exp2={}, hyperbolic_wrappers={}",
        HOST_CAPS.native_log2,
        HOST_CAPS.native_exp2,
        HOST_CAPS.hyperbolic_wrappers
    );
}

/// Identity-based replacements for a missing `log2`/`exp2`.
///
/// Always compiled so both paths can be tested on any host.
pub mod fallback {
    /// 1 / ln(2)
    pub const INV_LN2: f64 = 1.4426950408889634074;
    /// ln(2)
    pub const LN2: f64 = 0.6931471805599453;

    #[inline]
    pub fn log2(a: f64) -> f64 {
        a.ln() * INV_LN2
    }

    #[inline]
    pub fn exp2(a: f64) -> f64 {
        (a * LN2).exp()
    }
}

#[inline]
pub fn log2(x: f64) -> f64 {
    if HOST_CAPS.native_log2 {
        x.log2()
    } else {
        fallback::log2(x)
    }
}

#[inline]
pub fn exp2(x: f64) -> f64 {
    if HOST_CAPS.native_exp2 {
        x.exp2()
    } else {
        fallback::exp2(x)
    }
}

#[inline]
pub fn floor(x: f64) -> f64 {
    x.floor()
}

#[inline]
pub fn ceil(x: f64) -> f64 {
    x.ceil()
}

#[inline]
pub fn trunc(x: f64) -> f64 {
    x.trunc()
}

/// C-ABI signature shared by the unary helpers.
pub type UnaryFn = extern "C" fn(f64) -> f64;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
static HYPERBOLIC_WRAPPERS: [(&str, UnaryFn); 3] = [
    ("tracejit_vm_sinh", linkage::tracejit_vm_sinh as UnaryFn),
    ("tracejit_vm_cosh", linkage::tracejit_vm_cosh as UnaryFn),
    ("tracejit_vm_tanh", linkage::tracejit_vm_tanh as UnaryFn),
];

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
static HYPERBOLIC_WRAPPERS: [(&str, UnaryFn); 0] = [];

/// Name and address of each hyperbolic linkage wrapper compiled for this
/// target. Empty where generated code can reference libm directly.
pub fn hyperbolic_wrappers() -> &'static [(&'static str, UnaryFn)] {
    &HYPERBOLIC_WRAPPERS
}

/// Some object formats on x86 fail to resolve direct references from
/// generated code to the libm hyperbolic functions.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod linkage {
    #[no_mangle]
    pub extern "C" fn tracejit_vm_sinh(x: f64) -> f64 {
        x.sinh()
    }

    #[no_mangle]
    pub extern "C" fn tracejit_vm_cosh(x: f64) -> f64 {
        x.cosh()
    }

    #[no_mangle]
    pub extern "C" fn tracejit_vm_tanh(x: f64) -> f64 {
        x.tanh()
    }
}
