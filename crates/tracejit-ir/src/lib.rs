//! Opcode vocabulary shared between the trace compiler and its runtime helpers.
//!
//! The compiler owns the IR; helper crates only consume the tags defined here.

pub mod error;
pub mod fpm;

pub use error::IrError;
pub use fpm::FpmOp;
