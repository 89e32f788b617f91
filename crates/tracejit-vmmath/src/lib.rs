//! Math helpers for generated trace code and the constant folder.
//!
//! Everything here is a pure function over primitive values. The C-ABI entry
//! points in [`ffi`] are what machine code calls; [`symbols`] lists them with
//! their signatures so a backend can link against them.

pub mod arith;
pub mod ffi;
pub mod fpm;
pub mod platform;
pub mod symbols;

pub use arith::{modi, powi};
pub use fpm::{foldfpm, foldfpm_raw};
pub use platform::{PlatformCaps, HOST_CAPS};
pub use symbols::{find_helper, helper_symbols, HelperSig, HelperSymbol};

pub use tracejit_ir::FpmOp;
