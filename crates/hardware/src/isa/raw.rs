//! Raw instruction records.
//!
//! A raw record is what the instruction memory holds before decoding. Two forms exist:
//! 1. **Assembly:** A mnemonic string with structured operands, as produced by an
//!    external assembler front end. Register names are still strings here; the decoder
//!    resolves them.
//! 2. **Machine:** A 32-bit A32 instruction word, as found in a binary program image.

use std::fmt;

use crate::isa::instruction::ShiftKind;

/// Shift amount as written in an assembly operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawShiftBy {
    /// `#n`. Negative values are rejected by the decoder.
    Immediate(i64),
    /// A register name whose low byte supplies the amount.
    Register(String),
}

/// Offset inside a memory operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawOffset {
    /// `[base]`.
    None,
    /// `[base, #imm]`.
    Immediate(i64),
    /// `[base, rm]` or `[base, -rm]`.
    Register {
        /// Register name.
        name: String,
        /// `true` for the subtracted form.
        subtract: bool,
    },
}

/// One assembly operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawOperand {
    /// A register name such as `r3`, `SP` or `pc`.
    Register(String),
    /// An immediate such as `#0x80` or `#-4`.
    Immediate(i64),
    /// A memory reference `[base{, offset}]`.
    Memory {
        /// Base register name.
        base: String,
        /// Offset part.
        offset: RawOffset,
    },
    /// A shift specifier trailing a register operand, e.g. `lsl #2`.
    Shift {
        /// Shift kind.
        kind: ShiftKind,
        /// Amount.
        amount: RawShiftBy,
    },
    /// A resolved branch target address (a label after assembly).
    Address(u32),
}

impl RawOperand {
    /// Shorthand for a register operand.
    pub fn reg(name: &str) -> Self {
        Self::Register(name.to_owned())
    }

    /// Shorthand for an immediate operand.
    pub const fn imm(value: i64) -> Self {
        Self::Immediate(value)
    }

    /// Shorthand for `[base]`.
    pub fn mem(base: &str) -> Self {
        Self::Memory {
            base: base.to_owned(),
            offset: RawOffset::None,
        }
    }

    /// Shorthand for `[base, #offset]`.
    pub fn mem_imm(base: &str, offset: i64) -> Self {
        Self::Memory {
            base: base.to_owned(),
            offset: RawOffset::Immediate(offset),
        }
    }

    /// Shorthand for a shift by an immediate amount.
    pub const fn shift(kind: ShiftKind, amount: i64) -> Self {
        Self::Shift {
            kind,
            amount: RawShiftBy::Immediate(amount),
        }
    }

    /// Short description of the operand kind, for error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Register(_) => "register",
            Self::Immediate(_) => "immediate",
            Self::Memory { .. } => "memory reference",
            Self::Shift { .. } => "shift",
            Self::Address(_) => "address",
        }
    }
}

/// A raw instruction record as stored in instruction memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawInstruction {
    /// Mnemonic plus structured operands.
    Assembly {
        /// Mnemonic including any `S` and condition suffix, e.g. `SUBNE`.
        mnemonic: String,
        /// Operands in source order.
        operands: Vec<RawOperand>,
    },
    /// A 32-bit A32 machine word.
    Machine(u32),
}

impl RawInstruction {
    /// Builds an assembly-form record.
    pub fn asm(mnemonic: &str, operands: Vec<RawOperand>) -> Self {
        Self::Assembly {
            mnemonic: mnemonic.to_owned(),
            operands,
        }
    }
}

impl From<u32> for RawInstruction {
    fn from(word: u32) -> Self {
        Self::Machine(word)
    }
}

impl fmt::Display for RawInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assembly { mnemonic, operands } => {
                write!(f, "{mnemonic}")?;
                for (i, op) in operands.iter().enumerate() {
                    f.write_str(if i == 0 { " " } else { ", " })?;
                    match op {
                        RawOperand::Register(name) => f.write_str(name)?,
                        RawOperand::Immediate(v) => write!(f, "#{v}")?,
                        RawOperand::Memory { base, offset } => match offset {
                            RawOffset::None => write!(f, "[{base}]")?,
                            RawOffset::Immediate(v) => write!(f, "[{base}, #{v}]")?,
                            RawOffset::Register { name, subtract } => {
                                let sign = if *subtract { "-" } else { "" };
                                write!(f, "[{base}, {sign}{name}]")?;
                            }
                        },
                        RawOperand::Shift { kind, amount } => match amount {
                            RawShiftBy::Immediate(v) => write!(f, "{} #{v}", kind.name())?,
                            RawShiftBy::Register(name) => write!(f, "{} {name}", kind.name())?,
                        },
                        RawOperand::Address(addr) => write!(f, "{addr:#x}")?,
                    }
                }
                Ok(())
            }
            Self::Machine(word) => write!(f, ".word {word:#010x}"),
        }
    }
}
