use miette::Diagnostic;
use thiserror::Error;
use tracejit_native::NativeError;

/// CLI-specific error type that provides rich diagnostics
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("JIT evaluation failed")]
    #[diagnostic(code(tracejit::cli::jit_error))]
    Jit {
        #[source]
        source: NativeError,
    },

    #[error("Division by zero in modi")]
    #[diagnostic(
        code(tracejit::cli::zero_divisor),
        help("Generated code checks the divisor before calling modi; pass a non-zero B")
    )]
    ZeroDivisor,

    #[error("Extended math opcode '{0}' cannot be folded")]
    #[diagnostic(code(tracejit::cli::unsupported_fpm))]
    UnsupportedFpm(tracejit_ir::FpmOp),
}

impl From<NativeError> for CliError {
    fn from(source: NativeError) -> Self {
        CliError::Jit { source }
    }
}
