use std::fmt;
use std::str::FromStr;

use crate::error::IrError;

/// Extended floating-point math operations carried by `FPMATH` instructions.
///
/// The discriminants are the raw tags stored in the instruction operand and
/// passed through the helper ABI, so the order must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum FpmOp {
    /// Round towards negative infinity.
    Floor = 0,
    /// Round towards positive infinity.
    Ceil,
    /// Round towards zero.
    Trunc,
    Sqrt,
    Exp,
    Exp2,
    /// Natural logarithm.
    Log,
    Log2,
    Log10,
    Sin,
    Cos,
    Tan,
    /// Marks operations lowered through a generic call instead of a
    /// dedicated instruction. Never valid as a folding request.
    Other,
}

impl FpmOp {
    /// Every opcode, in tag order.
    pub const ALL: [FpmOp; 13] = [
        FpmOp::Floor,
        FpmOp::Ceil,
        FpmOp::Trunc,
        FpmOp::Sqrt,
        FpmOp::Exp,
        FpmOp::Exp2,
        FpmOp::Log,
        FpmOp::Log2,
        FpmOp::Log10,
        FpmOp::Sin,
        FpmOp::Cos,
        FpmOp::Tan,
        FpmOp::Other,
    ];

    /// Lower-case mnemonic used in IR dumps.
    pub fn name(self) -> &'static str {
        match self {
            FpmOp::Floor => "floor",
            FpmOp::Ceil => "ceil",
            FpmOp::Trunc => "trunc",
            FpmOp::Sqrt => "sqrt",
            FpmOp::Exp => "exp",
            FpmOp::Exp2 => "exp2",
            FpmOp::Log => "log",
            FpmOp::Log2 => "log2",
            FpmOp::Log10 => "log10",
            FpmOp::Sin => "sin",
            FpmOp::Cos => "cos",
            FpmOp::Tan => "tan",
            FpmOp::Other => "other",
        }
    }

    /// Raw tag as encoded in the instruction operand.
    #[inline]
    pub fn tag(self) -> u32 {
        self as u32
    }

    /// Floor, ceil and trunc. Backends often have dedicated rounding
    /// instructions for these.
    pub fn is_rounding(self) -> bool {
        matches!(self, FpmOp::Floor | FpmOp::Ceil | FpmOp::Trunc)
    }
}

impl fmt::Display for FpmOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for FpmOp {
    type Error = IrError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        FpmOp::ALL
            .get(tag as usize)
            .copied()
            .ok_or(IrError::InvalidFpmTag(tag as u32))
    }
}

impl TryFrom<u32> for FpmOp {
    type Error = IrError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        u8::try_from(tag)
            .map_err(|_| IrError::InvalidFpmTag(tag))
            .and_then(FpmOp::try_from)
    }
}

impl FromStr for FpmOp {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        FpmOp::ALL
            .iter()
            .copied()
            .find(|op| op.name() == lowered)
            .ok_or_else(|| IrError::UnknownFpmName(s.to_string()))
    }
}
