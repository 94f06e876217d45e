//! Instruction Disassembler.
//!
//! Renders decoded instructions in lower-case UAL syntax for debug tracing, logging and
//! test diagnostics.
//!
//! # Usage
//!
//! ```
//! use armsim_core::isa::disasm::disassemble_word;
//! assert_eq!(disassemble_word(0x10400005), "subne r0, r0, r5");
//! ```

use std::fmt;

use crate::isa::encoding::decode_word;
use crate::isa::instruction::{
    Address, BranchTarget, DataOp, Instruction, Offset, Operand, Operation, Shift, ShiftAmount,
    ShiftOp,
};

/// Disassembles a decoded instruction into a human-readable string.
///
/// Relative branch targets are rendered as `.+N`/`.-N` since the instruction alone does
/// not know its address.
pub fn disassemble(inst: &Instruction) -> String {
    inst.to_string()
}

/// Disassembles a 32-bit A32 word, or returns `"unknown"` if it cannot be decoded.
pub fn disassemble_word(word: u32) -> String {
    decode_word(word).map_or_else(|_| "unknown".to_owned(), |inst| disassemble(&inst))
}

fn fmt_shift(f: &mut fmt::Formatter<'_>, shift: Shift) -> fmt::Result {
    write!(f, ", {} ", shift.kind.name())?;
    fmt_amount(f, shift.amount)
}

fn fmt_amount(f: &mut fmt::Formatter<'_>, amount: ShiftAmount) -> fmt::Result {
    match amount {
        ShiftAmount::Immediate(n) => write!(f, "#{n}"),
        ShiftAmount::Register(rs) => write!(f, "{rs}"),
    }
}

fn fmt_operand(f: &mut fmt::Formatter<'_>, op2: Operand) -> fmt::Result {
    match op2 {
        Operand::Immediate(v) if v < 10 => write!(f, "#{v}"),
        Operand::Immediate(v) => write!(f, "#{v:#x}"),
        Operand::Register(rm) => write!(f, "{rm}"),
        Operand::Shifted { rm, shift } => {
            write!(f, "{rm}")?;
            fmt_shift(f, shift)
        }
    }
}

fn fmt_address(f: &mut fmt::Formatter<'_>, addr: Address) -> fmt::Result {
    match addr.offset {
        Offset::Immediate(0) => write!(f, "[{}]", addr.base),
        Offset::Immediate(off) => write!(f, "[{}, #{off}]", addr.base),
        Offset::Register { rm, subtract } => {
            let sign = if subtract { "-" } else { "" };
            write!(f, "[{}, {sign}{rm}]", addr.base)
        }
    }
}

fn fmt_data(f: &mut fmt::Formatter<'_>, data: DataOp) -> fmt::Result {
    write!(f, "{}, {}, ", data.rd, data.rn)?;
    fmt_operand(f, data.op2)
}

fn fmt_shift_op(f: &mut fmt::Formatter<'_>, shift: ShiftOp) -> fmt::Result {
    write!(f, "{}, {}, ", shift.rd, shift.rm)?;
    fmt_amount(f, shift.amount)
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `S` is implicit on CMP.
        let s = if self.set_flags && !matches!(self.op, Operation::Cmp { .. }) {
            "s"
        } else {
            ""
        };
        write!(f, "{}{s}{} ", self.op.mnemonic(), self.condition.suffix())?;

        match self.op {
            Operation::Mov { rd, op2 } => {
                write!(f, "{rd}, ")?;
                fmt_operand(f, op2)
            }
            Operation::Ldr { rt, addr } | Operation::Str { rt, addr } => {
                write!(f, "{rt}, ")?;
                fmt_address(f, addr)
            }
            Operation::Add(data)
            | Operation::Sub(data)
            | Operation::And(data)
            | Operation::Orr(data)
            | Operation::Eor(data) => fmt_data(f, data),
            Operation::Mul { rd, rn, rm } => write!(f, "{rd}, {rn}, {rm}"),
            Operation::Mla { rd, rn, rm, ra } => write!(f, "{rd}, {rn}, {rm}, {ra}"),
            Operation::Cmp { rn, op2 } => {
                write!(f, "{rn}, ")?;
                fmt_operand(f, op2)
            }
            Operation::Lsl(shift)
            | Operation::Lsr(shift)
            | Operation::Asr(shift)
            | Operation::Ror(shift) => fmt_shift_op(f, shift),
            Operation::B(target) | Operation::Bl(target) => match target {
                BranchTarget::Absolute(addr) => write!(f, "{addr:#x}"),
                BranchTarget::Relative(off) if off < 0 => write!(f, ".-{}", off.unsigned_abs()),
                BranchTarget::Relative(off) => write!(f, ".+{off}"),
            },
        }
    }
}
