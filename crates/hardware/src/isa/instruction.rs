//! Decoded instruction model and A32 field extraction.
//!
//! Provides:
//! 1. **Field Extraction:** The [`InstructionBits`] trait that pulls A32 fields out of a
//!    32-bit machine word.
//! 2. **Decoded Form:** The immutable [`Instruction`] record produced by the decoder: a
//!    closed [`Operation`] enum with typed operands, the [`Condition`] and the `S` bit.

use crate::isa::abi::Reg;
use crate::isa::condition::Condition;

/// Bit mask for a 4-bit register or condition field.
pub const NIBBLE_MASK: u32 = 0xF;
/// Bit mask for the data-processing opcode field (bits 24-21).
pub const OPCODE_MASK: u32 = 0xF;
/// Bit mask for the 5-bit immediate shift amount (bits 11-7).
pub const SHIFT_IMM_MASK: u32 = 0x1F;
/// Bit mask for the 2-bit shift type (bits 6-5).
pub const SHIFT_TYPE_MASK: u32 = 0x3;
/// Bit mask for the 12-bit immediate field of data-processing and transfer words.
pub const IMM12_MASK: u32 = 0xFFF;
/// Bit mask for the 24-bit branch offset field.
pub const IMM24_MASK: u32 = 0x00FF_FFFF;

/// Trait for extracting A32 instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the condition field (bits 31-28).
    fn cond(&self) -> u32;

    /// Extracts the data-processing opcode (bits 24-21).
    fn opcode(&self) -> u32;

    /// Extracts the `S` (set flags) bit, or the `L` (load) bit of a transfer (bit 20).
    fn bit20(&self) -> bool;

    /// Extracts the first operand register field (bits 19-16).
    fn rn(&self) -> Reg;

    /// Extracts the destination register field (bits 15-12).
    fn rd(&self) -> Reg;

    /// Extracts the shift-amount register field (bits 11-8).
    fn rs(&self) -> Reg;

    /// Extracts the second operand register field (bits 3-0).
    fn rm(&self) -> Reg;

    /// Extracts the 5-bit immediate shift amount (bits 11-7).
    fn shift_imm(&self) -> u32;

    /// Extracts the 2-bit shift type (bits 6-5).
    fn shift_type(&self) -> u32;

    /// Tests a single bit.
    fn bit(&self, n: u32) -> bool;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn cond(&self) -> u32 {
        (self >> 28) & NIBBLE_MASK
    }

    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> 21) & OPCODE_MASK
    }

    #[inline(always)]
    fn bit20(&self) -> bool {
        self.bit(20)
    }

    #[inline(always)]
    fn rn(&self) -> Reg {
        Reg::from_field(self >> 16)
    }

    #[inline(always)]
    fn rd(&self) -> Reg {
        Reg::from_field(self >> 12)
    }

    #[inline(always)]
    fn rs(&self) -> Reg {
        Reg::from_field(self >> 8)
    }

    #[inline(always)]
    fn rm(&self) -> Reg {
        Reg::from_field(*self)
    }

    #[inline(always)]
    fn shift_imm(&self) -> u32 {
        (self >> 7) & SHIFT_IMM_MASK
    }

    #[inline(always)]
    fn shift_type(&self) -> u32 {
        (self >> 5) & SHIFT_TYPE_MASK
    }

    #[inline(always)]
    fn bit(&self, n: u32) -> bool {
        (self >> n) & 1 == 1
    }
}

/// Barrel-shifter operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShiftKind {
    /// Logical shift left.
    Lsl,
    /// Logical shift right (zero fill).
    Lsr,
    /// Arithmetic shift right (sign fill).
    Asr,
    /// Rotate right.
    Ror,
}

impl ShiftKind {
    /// Maps the 2-bit A32 shift-type field.
    pub const fn from_field(field: u32) -> Self {
        match field & SHIFT_TYPE_MASK {
            0 => Self::Lsl,
            1 => Self::Lsr,
            2 => Self::Asr,
            _ => Self::Ror,
        }
    }

    /// Parses a shift mnemonic case-insensitively.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "LSL" => Some(Self::Lsl),
            "LSR" => Some(Self::Lsr),
            "ASR" => Some(Self::Asr),
            "ROR" => Some(Self::Ror),
            _ => None,
        }
    }

    /// Lower-case mnemonic.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lsl => "lsl",
            Self::Lsr => "lsr",
            Self::Asr => "asr",
            Self::Ror => "ror",
        }
    }
}

/// Source of a shift amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShiftAmount {
    /// A constant amount. May be 32 or more, in which case the shift policy applies.
    Immediate(u32),
    /// The low byte of a register.
    Register(Reg),
}

/// A shift applied to a register operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shift {
    /// Which shift.
    pub kind: ShiftKind,
    /// By how much.
    pub amount: ShiftAmount,
}

/// Flexible second operand of a data-processing instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A 32-bit constant.
    Immediate(u32),
    /// A register used as is.
    Register(Reg),
    /// A register passed through the barrel shifter.
    Shifted {
        /// The register being shifted.
        rm: Reg,
        /// The shift to apply.
        shift: Shift,
    },
}

/// Offset part of a load/store address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Offset {
    /// A signed byte offset.
    Immediate(i32),
    /// A register added to (or subtracted from) the base.
    Register {
        /// Offset register.
        rm: Reg,
        /// `true` for `[rn, -rm]`.
        subtract: bool,
    },
}

/// Load/store address: base register plus offset, pre-indexed without write-back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    /// Base register; `pc` reads the fetch-time program counter.
    pub base: Reg,
    /// Offset added to the base.
    pub offset: Offset,
}

/// Branch destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchTarget {
    /// An absolute byte address (resolved label).
    Absolute(u32),
    /// A byte offset relative to the branch's own address.
    Relative(i32),
}

impl BranchTarget {
    /// Resolves the destination for a branch fetched at `fetch_pc`.
    pub const fn resolve(self, fetch_pc: u32) -> u32 {
        match self {
            Self::Absolute(addr) => addr,
            Self::Relative(off) => fetch_pc.wrapping_add_signed(off),
        }
    }
}

/// Operands shared by the three-operand data-processing forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DataOp {
    /// Destination register.
    pub rd: Reg,
    /// First operand register.
    pub rn: Reg,
    /// Flexible second operand.
    pub op2: Operand,
}

/// Operands of the standalone shift forms (`LSL rd, rm, #n`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShiftOp {
    /// Destination register.
    pub rd: Reg,
    /// Register being shifted.
    pub rm: Reg,
    /// Shift amount.
    pub amount: ShiftAmount,
}

/// Closed set of supported operations with their typed operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `rd := op2`.
    Mov {
        /// Destination register.
        rd: Reg,
        /// Source operand.
        op2: Operand,
    },
    /// `rt := Memory[addr]`.
    Ldr {
        /// Destination register.
        rt: Reg,
        /// Word address.
        addr: Address,
    },
    /// `Memory[addr] := rt`.
    Str {
        /// Source register.
        rt: Reg,
        /// Word address.
        addr: Address,
    },
    /// `rd := rn + op2`.
    Add(DataOp),
    /// `rd := rn - op2`.
    Sub(DataOp),
    /// `rd := rn * rm` (low 32 bits).
    Mul {
        /// Destination register.
        rd: Reg,
        /// Multiplicand.
        rn: Reg,
        /// Multiplier.
        rm: Reg,
    },
    /// `rd := rn * rm + ra` (low 32 bits).
    Mla {
        /// Destination register.
        rd: Reg,
        /// Multiplicand.
        rn: Reg,
        /// Multiplier.
        rm: Reg,
        /// Accumulator.
        ra: Reg,
    },
    /// Flags from `rn - op2`; the result is discarded.
    Cmp {
        /// First operand.
        rn: Reg,
        /// Value compared against.
        op2: Operand,
    },
    /// `rd := rn & op2`.
    And(DataOp),
    /// `rd := rn | op2`.
    Orr(DataOp),
    /// `rd := rn ^ op2`.
    Eor(DataOp),
    /// `rd := rm << n`.
    Lsl(ShiftOp),
    /// `rd := rm >> n` (logical).
    Lsr(ShiftOp),
    /// `rd := rm >> n` (arithmetic).
    Asr(ShiftOp),
    /// `rd := rm` rotated right by `n`.
    Ror(ShiftOp),
    /// `pc := target`.
    B(BranchTarget),
    /// `lr := pc + 4; pc := target`.
    Bl(BranchTarget),
}

impl Operation {
    /// Lower-case base mnemonic, without condition or `S` suffix.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Mov { .. } => "mov",
            Self::Ldr { .. } => "ldr",
            Self::Str { .. } => "str",
            Self::Add(_) => "add",
            Self::Sub(_) => "sub",
            Self::Mul { .. } => "mul",
            Self::Mla { .. } => "mla",
            Self::Cmp { .. } => "cmp",
            Self::And(_) => "and",
            Self::Orr(_) => "orr",
            Self::Eor(_) => "eor",
            Self::Lsl(_) => "lsl",
            Self::Lsr(_) => "lsr",
            Self::Asr(_) => "asr",
            Self::Ror(_) => "ror",
            Self::B(_) => "b",
            Self::Bl(_) => "bl",
        }
    }
}

/// A fully decoded, immutable instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// What to do.
    pub op: Operation,
    /// When to do it.
    pub condition: Condition,
    /// Whether the instruction writes the condition flags (`S` suffix).
    ///
    /// Always `true` for `CMP`.
    pub set_flags: bool,
}

impl Instruction {
    /// Builds an unconditional, non-flag-setting instruction.
    pub const fn always(op: Operation) -> Self {
        Self {
            op,
            condition: Condition::Al,
            set_flags: matches!(op, Operation::Cmp { .. }),
        }
    }

    /// Returns a copy predicated on `condition`.
    pub const fn when(self, condition: Condition) -> Self {
        Self { condition, ..self }
    }

    /// Returns a copy with the `S` bit set.
    pub const fn with_flags(self) -> Self {
        Self {
            set_flags: true,
            ..self
        }
    }
}
