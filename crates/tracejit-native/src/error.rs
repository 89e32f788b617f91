use cranelift_codegen::settings::SetError;
use thiserror::Error;

use tracejit_ir::FpmOp;
use tracejit_vmmath::HelperSig;

/// Errors that can occur while linking or calling helpers from JIT code.
#[derive(Error, Debug)]
pub enum NativeError {
    #[error("Failed during Cranelift code generation: {0}")]
    CraneliftGen(#[from] cranelift_codegen::CodegenError),

    #[error("Failed during module processing: {0}")]
    CraneliftModule(#[from] cranelift_module::ModuleError),

    #[error("Failed to configure Cranelift settings: {0}")]
    SettingsError(#[from] SetError),

    #[error("ISA setup failed: {0}")]
    IsaSetupError(String),

    #[error("No helper named '{0}' is exported for this target")]
    UnknownHelper(String),

    #[error("Extended math opcode '{0}' has no helper evaluation")]
    UnsupportedFpm(FpmOp),

    #[error("Helper '{name}' has signature {actual:?}, expected {expected:?}")]
    SignatureMismatch {
        name: String,
        expected: HelperSig,
        actual: HelperSig,
    },
}
