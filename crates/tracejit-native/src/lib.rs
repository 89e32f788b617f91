pub mod error;
pub mod jit;
pub mod linkage;

pub use error::NativeError;
pub use jit::HelperJit;
pub use linkage::{declare_helper, helper_signature, register_helpers};
