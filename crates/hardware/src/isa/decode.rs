//! Instruction Decoder.
//!
//! This module turns a [`RawInstruction`] into an immutable [`Instruction`]. It performs:
//! 1. **Mnemonic Parsing:** Splits `BASE[S][COND]` (e.g. `SUBNE`, `ADDSEQ`, `BLS`) into the
//!    operation, the flag-setting bit and the condition.
//! 2. **Operand Validation:** Checks operand count and kind against the operation and
//!    resolves register names.
//! 3. **Machine Words:** Hands 32-bit A32 words to [`encoding::decode_word`].
//!
//! Decoding is pure: the same record always yields the same instruction or error.

use crate::common::error::{Result, SimError};
use crate::isa::abi::Reg;
use crate::isa::condition::Condition;
use crate::isa::encoding;
use crate::isa::instruction::{
    Address, BranchTarget, DataOp, Instruction, Offset, Operand, Operation, Shift, ShiftAmount,
    ShiftKind, ShiftOp,
};
use crate::isa::raw::{RawInstruction, RawOffset, RawOperand, RawShiftBy};

/// Base mnemonic of a supported operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Base {
    Mov,
    Ldr,
    Str,
    Add,
    Sub,
    Mul,
    Mla,
    Cmp,
    And,
    Orr,
    Eor,
    Lsl,
    Lsr,
    Asr,
    Ror,
    B,
    Bl,
}

/// Base mnemonics, longest first so `BL` is tried before `B`.
const BASES: [(&str, Base); 17] = [
    ("MOV", Base::Mov),
    ("LDR", Base::Ldr),
    ("STR", Base::Str),
    ("ADD", Base::Add),
    ("SUB", Base::Sub),
    ("MUL", Base::Mul),
    ("MLA", Base::Mla),
    ("CMP", Base::Cmp),
    ("AND", Base::And),
    ("ORR", Base::Orr),
    ("EOR", Base::Eor),
    ("LSL", Base::Lsl),
    ("LSR", Base::Lsr),
    ("ASR", Base::Asr),
    ("ROR", Base::Ror),
    ("BL", Base::Bl),
    ("B", Base::B),
];

impl Base {
    /// Whether the `S` suffix is accepted.
    const fn allows_s(self) -> bool {
        !matches!(self, Self::Cmp | Self::Ldr | Self::Str | Self::B | Self::Bl)
    }
}

/// Decodes a raw instruction record.
///
/// # Arguments
///
/// * `raw` - The record fetched from instruction memory.
///
/// # Errors
///
/// * [`SimError::UnsupportedOpcode`] for a mnemonic or encoding outside the supported set.
/// * [`SimError::MalformedOperands`] when the operands do not fit the operation.
/// * [`SimError::UnknownRegister`] for an undeclared register name.
pub fn decode(raw: &RawInstruction) -> Result<Instruction> {
    match raw {
        RawInstruction::Assembly { mnemonic, operands } => decode_assembly(mnemonic, operands),
        RawInstruction::Machine(word) => encoding::decode_word(*word),
    }
}

/// Splits a mnemonic into base, `S` bit and condition.
///
/// Every base that prefixes the mnemonic is tried, longest first, and the first whose
/// remainder is a valid `[S][COND]` suffix wins. This reads `BLS` as `B` + `LS` and
/// `BLEQ` as `BL` + `EQ`.
fn split_mnemonic(mnemonic: &str) -> Result<(Base, bool, Condition)> {
    let upper = mnemonic.trim().to_ascii_uppercase();
    BASES
        .iter()
        .filter_map(|(name, base)| upper.strip_prefix(name).map(|rest| (*base, rest)))
        .find_map(|(base, rest)| {
            let (set_flags, cond) = match rest.strip_prefix('S') {
                Some(cond) if base.allows_s() => (true, cond),
                _ => (false, rest),
            };
            let condition = if cond.is_empty() {
                Some(Condition::Al)
            } else {
                Condition::from_suffix(cond)
            };
            condition.map(|c| (base, set_flags, c))
        })
        .ok_or_else(|| SimError::UnsupportedOpcode(mnemonic.to_owned()))
}

/// Decodes the assembly form.
fn decode_assembly(mnemonic: &str, operands: &[RawOperand]) -> Result<Instruction> {
    let (base, set_flags, condition) = split_mnemonic(mnemonic)?;
    let ops = Operands { mnemonic, list: operands };

    let op = match base {
        Base::Mov => {
            let rd = ops.destination(0)?;
            Operation::Mov {
                rd,
                op2: ops.flexible(1)?,
            }
        }
        Base::Add | Base::Sub | Base::And | Base::Orr | Base::Eor => {
            let data = DataOp {
                rd: ops.destination(0)?,
                rn: ops.register(1)?,
                op2: ops.flexible(2)?,
            };
            match base {
                Base::Add => Operation::Add(data),
                Base::Sub => Operation::Sub(data),
                Base::And => Operation::And(data),
                Base::Orr => Operation::Orr(data),
                _ => Operation::Eor(data),
            }
        }
        Base::Cmp => Operation::Cmp {
            rn: ops.register(0)?,
            op2: ops.flexible(1)?,
        },
        Base::Mul => {
            ops.expect_len(3)?;
            Operation::Mul {
                rd: ops.destination(0)?,
                rn: ops.register(1)?,
                rm: ops.register(2)?,
            }
        }
        Base::Mla => {
            ops.expect_len(4)?;
            Operation::Mla {
                rd: ops.destination(0)?,
                rn: ops.register(1)?,
                rm: ops.register(2)?,
                ra: ops.register(3)?,
            }
        }
        Base::Ldr => {
            ops.expect_len(2)?;
            Operation::Ldr {
                rt: ops.destination(0)?,
                addr: ops.address(1)?,
            }
        }
        Base::Str => {
            ops.expect_len(2)?;
            Operation::Str {
                rt: ops.register(0)?,
                addr: ops.address(1)?,
            }
        }
        Base::Lsl | Base::Lsr | Base::Asr | Base::Ror => {
            ops.expect_len(3)?;
            let shift = ShiftOp {
                rd: ops.destination(0)?,
                rm: ops.register(1)?,
                amount: ops.shift_amount(2)?,
            };
            let kind = match base {
                Base::Lsl => ShiftKind::Lsl,
                Base::Lsr => ShiftKind::Lsr,
                Base::Asr => ShiftKind::Asr,
                _ => ShiftKind::Ror,
            };
            shift_operation(kind, shift)
        }
        Base::B | Base::Bl => {
            ops.expect_len(1)?;
            let target = ops.branch_target(0)?;
            if base == Base::B {
                Operation::B(target)
            } else {
                Operation::Bl(target)
            }
        }
    };

    Ok(Instruction {
        op,
        condition,
        set_flags: set_flags || base == Base::Cmp,
    })
}

/// Operand list cursor carrying the mnemonic for error reporting.
#[derive(Debug)]
struct Operands<'a> {
    mnemonic: &'a str,
    list: &'a [RawOperand],
}

impl Operands<'_> {
    fn malformed(&self, reason: impl Into<String>) -> SimError {
        SimError::malformed(self.mnemonic, reason)
    }

    fn expect_len(&self, n: usize) -> Result<()> {
        if self.list.len() == n {
            Ok(())
        } else {
            Err(self.malformed(format!(
                "expected {n} operands, found {}",
                self.list.len()
            )))
        }
    }

    fn get(&self, idx: usize) -> Result<&RawOperand> {
        self.list
            .get(idx)
            .ok_or_else(|| self.malformed(format!("missing operand {}", idx + 1)))
    }

    fn register(&self, idx: usize) -> Result<Reg> {
        match self.get(idx)? {
            RawOperand::Register(name) => name.parse(),
            other => Err(self.malformed(format!(
                "operand {} must be a register, found {}",
                idx + 1,
                other.kind()
            ))),
        }
    }

    /// A register that receives a result; `pc` is rejected so only branches redirect flow.
    fn destination(&self, idx: usize) -> Result<Reg> {
        let reg = self.register(idx)?;
        if reg.is_pc() {
            return Err(self.malformed("pc cannot be a destination"));
        }
        Ok(reg)
    }

    /// Flexible second operand: the rest of the list from `idx` on.
    fn flexible(&self, idx: usize) -> Result<Operand> {
        match self.list.get(idx..).unwrap_or_default() {
            [RawOperand::Immediate(v)] => Ok(Operand::Immediate(self.immediate(*v)?)),
            [RawOperand::Register(name)] => Ok(Operand::Register(name.parse()?)),
            [RawOperand::Register(name), RawOperand::Shift { kind, amount }] => {
                Ok(Operand::Shifted {
                    rm: name.parse()?,
                    shift: Shift {
                        kind: *kind,
                        amount: self.shift_by(amount)?,
                    },
                })
            }
            [] => Err(self.malformed("missing second operand")),
            [RawOperand::Immediate(_), RawOperand::Shift { .. }, ..] => {
                Err(self.malformed("shift may only follow a register operand"))
            }
            [RawOperand::Register(_), RawOperand::Shift { .. }, ..] => {
                Err(self.malformed("unexpected operand after shift"))
            }
            [RawOperand::Immediate(_) | RawOperand::Register(_), next, ..] => Err(self.malformed(
                format!("unexpected {} after second operand", next.kind()),
            )),
            [other, ..] => Err(self.malformed(format!(
                "second operand must be a register or immediate, found {}",
                other.kind()
            ))),
        }
    }

    /// A 32-bit immediate given either signed or unsigned.
    fn immediate(&self, value: i64) -> Result<u32> {
        if (i64::from(i32::MIN)..=i64::from(u32::MAX)).contains(&value) {
            Ok(value as u32)
        } else {
            Err(self.malformed(format!("immediate {value} does not fit in 32 bits")))
        }
    }

    fn shift_by(&self, by: &RawShiftBy) -> Result<ShiftAmount> {
        match by {
            RawShiftBy::Immediate(v) if *v < 0 => {
                Err(self.malformed(format!("negative shift amount {v}")))
            }
            RawShiftBy::Immediate(v) => u32::try_from(*v)
                .map(ShiftAmount::Immediate)
                .map_err(|_| self.malformed(format!("shift amount {v} does not fit in 32 bits"))),
            RawShiftBy::Register(name) => Ok(ShiftAmount::Register(name.parse()?)),
        }
    }

    /// Amount operand of the standalone shift forms.
    fn shift_amount(&self, idx: usize) -> Result<ShiftAmount> {
        match self.get(idx)? {
            RawOperand::Immediate(v) => self.shift_by(&RawShiftBy::Immediate(*v)),
            RawOperand::Register(name) => Ok(ShiftAmount::Register(name.parse()?)),
            other => Err(self.malformed(format!(
                "shift amount must be an immediate or register, found {}",
                other.kind()
            ))),
        }
    }

    fn address(&self, idx: usize) -> Result<Address> {
        let RawOperand::Memory { base, offset } = self.get(idx)? else {
            return Err(self.malformed(format!("operand {} must be a memory reference", idx + 1)));
        };
        let offset = match offset {
            RawOffset::None => Offset::Immediate(0),
            RawOffset::Immediate(v) => Offset::Immediate(i32::try_from(*v).map_err(|_| {
                self.malformed(format!("offset {v} does not fit in 32 bits"))
            })?),
            RawOffset::Register { name, subtract } => Offset::Register {
                rm: name.parse()?,
                subtract: *subtract,
            },
        };
        Ok(Address {
            base: base.parse()?,
            offset,
        })
    }

    /// An [`RawOperand::Address`] is absolute; an immediate is an offset from the branch.
    fn branch_target(&self, idx: usize) -> Result<BranchTarget> {
        match self.get(idx)? {
            RawOperand::Address(addr) => Ok(BranchTarget::Absolute(*addr)),
            RawOperand::Immediate(v) => i32::try_from(*v)
                .map(BranchTarget::Relative)
                .map_err(|_| self.malformed(format!("branch offset {v} does not fit in 32 bits"))),
            other => Err(self.malformed(format!(
                "branch target must be an address, found {}",
                other.kind()
            ))),
        }
    }
}

/// Builds the standalone shift operation (`LSL`, `LSR`, `ASR`, `ROR`) for `kind`.
pub const fn shift_operation(kind: ShiftKind, shift: ShiftOp) -> Operation {
    match kind {
        ShiftKind::Lsl => Operation::Lsl(shift),
        ShiftKind::Lsr => Operation::Lsr(shift),
        ShiftKind::Asr => Operation::Asr(shift),
        ShiftKind::Ror => Operation::Ror(shift),
    }
}
