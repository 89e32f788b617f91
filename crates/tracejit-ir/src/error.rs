use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while decoding IR opcode tags.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum IrError {
    #[error("Invalid extended math opcode tag {0}")]
    #[diagnostic(code(tracejit::ir::invalid_fpm_tag))]
    InvalidFpmTag(u32),

    #[error("Unknown extended math opcode '{0}'")]
    #[diagnostic(
        code(tracejit::ir::unknown_fpm_name),
        help("Expected one of: floor, ceil, trunc, sqrt, exp, exp2, log, log2, log10, sin, cos, tan")
    )]
    UnknownFpmName(String),
}
