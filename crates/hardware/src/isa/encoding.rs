//! A32 machine-word decoder.
//!
//! Decodes the subset of the 32-bit A32 encoding space that maps onto the supported
//! operations. It recognizes the following classes:
//! 1. **Data Processing:** `AND`, `EOR`, `SUB`, `ADD`, `CMP`, `ORR`, `MOV` with a rotated
//!    8-bit immediate or a register shifted by an immediate or register amount.
//!    `MOV rd, rm, <shift>` decodes to the standalone `LSL`/`LSR`/`ASR`/`ROR` form.
//! 2. **Multiply:** `MUL` and `MLA`.
//! 3. **Single Data Transfer:** Word `LDR`/`STR`, pre-indexed without write-back, with an
//!    immediate or unshifted register offset.
//! 4. **Branch:** `B` and `BL` with a 24-bit word offset.
//!
//! Every other encoding is [`SimError::UnsupportedOpcode`].

use crate::common::constants::BRANCH_PIPELINE_OFFSET;
use crate::common::error::{Result, SimError};
use crate::isa::abi::Reg;
use crate::isa::condition::Condition;
use crate::isa::decode::shift_operation;
use crate::isa::instruction::{
    Address, BranchTarget, DataOp, IMM12_MASK, IMM24_MASK, Instruction, InstructionBits, Offset,
    Operand, Operation, Shift, ShiftAmount, ShiftKind, ShiftOp,
};

/// Bits 27-25 value selecting a branch.
const CLASS_BRANCH: u32 = 0b101;
/// Bits 27-26 value selecting a single data transfer.
const CLASS_TRANSFER: u32 = 0b01;
/// Bits 27-26 value selecting data processing and multiply.
const CLASS_DATA: u32 = 0b00;

/// Bits 7-4 pattern of the multiply class.
const MUL_SIGNATURE: u32 = 0b1001;
/// Bit mask for bits 27-22, all clear for `MUL`/`MLA`.
const MUL_CLASS_MASK: u32 = 0x0FC0_0000;

/// Bit 25: immediate second operand (data processing) or register offset (transfer).
const I_BIT: u32 = 25;
/// Bit 24: branch with link, or pre-indexing for a transfer.
const L_OR_P_BIT: u32 = 24;
/// Bit 23: add the transfer offset.
const U_BIT: u32 = 23;
/// Bit 22: byte transfer.
const B_BIT: u32 = 22;
/// Bit 21: write-back, or accumulate for a multiply.
const W_OR_A_BIT: u32 = 21;
/// Bit 7: distinguishes halfword transfers from register-shifted operands.
const BIT7: u32 = 7;
/// Bit 4: register-specified shift amount.
const REG_SHIFT_BIT: u32 = 4;

/// Data-processing opcodes (bits 24-21).
mod dp {
    pub const AND: u32 = 0b0000;
    pub const EOR: u32 = 0b0001;
    pub const SUB: u32 = 0b0010;
    pub const ADD: u32 = 0b0100;
    pub const CMP: u32 = 0b1010;
    pub const ORR: u32 = 0b1100;
    pub const MOV: u32 = 0b1101;
}

/// Renders an encoding for error messages.
fn unsupported(word: u32) -> SimError {
    SimError::UnsupportedOpcode(format!("{word:#010x}"))
}

/// Decodes a 32-bit A32 instruction word.
///
/// # Arguments
///
/// * `word` - The instruction word as a host integer (already byte-order corrected).
///
/// # Errors
///
/// * [`SimError::UnsupportedOpcode`] for the reserved condition and every encoding outside
///   the supported classes.
/// * [`SimError::MalformedOperands`] when a data-processing or load instruction names `pc`
///   as its destination.
pub fn decode_word(word: u32) -> Result<Instruction> {
    let condition = Condition::from_field(word.cond()).ok_or_else(|| unsupported(word))?;

    let (op, set_flags) = if (word >> 25) & 0b111 == CLASS_BRANCH {
        (decode_branch(word), false)
    } else if (word >> 26) & 0b11 == CLASS_TRANSFER {
        (decode_transfer(word)?, false)
    } else if (word >> 26) & 0b11 == CLASS_DATA {
        if word & MUL_CLASS_MASK == 0 && (word >> 4) & 0xF == MUL_SIGNATURE {
            (decode_multiply(word)?, word.bit20())
        } else {
            decode_data_processing(word)?
        }
    } else {
        return Err(unsupported(word));
    };

    Ok(Instruction {
        op,
        condition,
        set_flags,
    })
}

/// `B`/`BL`: the target is the branch address plus eight plus the shifted offset.
fn decode_branch(word: u32) -> Operation {
    // Shift the 24-bit field to the top, then arithmetic-shift back two less to multiply by 4.
    let offset = (((word & IMM24_MASK) << 8) as i32) >> 6;
    let target = BranchTarget::Relative(offset.wrapping_add(BRANCH_PIPELINE_OFFSET));
    if word.bit(L_OR_P_BIT) {
        Operation::Bl(target)
    } else {
        Operation::B(target)
    }
}

/// Word `LDR`/`STR` with pre-indexed addressing and no write-back.
fn decode_transfer(word: u32) -> Result<Operation> {
    let register_offset = word.bit(I_BIT);
    if !word.bit(L_OR_P_BIT) || word.bit(W_OR_A_BIT) || word.bit(B_BIT) {
        return Err(unsupported(word));
    }
    // Bit 4 set with a register offset is the media/undefined space; scaled offsets are
    // not supported either.
    if register_offset && (word.bit(REG_SHIFT_BIT) || word.shift_imm() != 0 || word.shift_type() != 0)
    {
        return Err(unsupported(word));
    }

    let add = word.bit(U_BIT);
    let offset = if register_offset {
        Offset::Register {
            rm: word.rm(),
            subtract: !add,
        }
    } else {
        let magnitude = (word & IMM12_MASK) as i32;
        Offset::Immediate(if add { magnitude } else { -magnitude })
    };
    let addr = Address {
        base: word.rn(),
        offset,
    };

    if word.bit20() {
        let rt = destination("ldr", word.rd())?;
        Ok(Operation::Ldr { rt, addr })
    } else {
        Ok(Operation::Str { rt: word.rd(), addr })
    }
}

/// `MUL rd, rm, rs` and `MLA rd, rm, rs, rn`: destination in bits 19-16, operands in
/// bits 3-0 and 11-8, and for `MLA` the accumulator in bits 15-12.
fn decode_multiply(word: u32) -> Result<Operation> {
    if word.bit(W_OR_A_BIT) {
        return Ok(Operation::Mla {
            rd: destination("mla", word.rn())?,
            rn: word.rm(),
            rm: word.rs(),
            ra: word.rd(),
        });
    }
    Ok(Operation::Mul {
        rd: destination("mul", word.rn())?,
        rn: word.rm(),
        rm: word.rs(),
    })
}

/// Data-processing class; returns the operation and its `S` bit.
fn decode_data_processing(word: u32) -> Result<(Operation, bool)> {
    let set_flags = word.bit20();
    let op2 = decode_operand2(word)?;

    let op = match word.opcode() {
        // CMP without S is the status-register transfer space.
        dp::CMP if set_flags => Operation::Cmp { rn: word.rn(), op2 },
        dp::MOV => {
            let rd = destination("mov", word.rd())?;
            match op2 {
                Operand::Shifted { rm, shift } => shift_operation(
                    shift.kind,
                    ShiftOp {
                        rd,
                        rm,
                        amount: shift.amount,
                    },
                ),
                _ => Operation::Mov { rd, op2 },
            }
        }
        opcode @ (dp::AND | dp::EOR | dp::SUB | dp::ADD | dp::ORR) => {
            let mnemonic = match opcode {
                dp::AND => "and",
                dp::EOR => "eor",
                dp::SUB => "sub",
                dp::ADD => "add",
                _ => "orr",
            };
            let data = DataOp {
                rd: destination(mnemonic, word.rd())?,
                rn: word.rn(),
                op2,
            };
            match opcode {
                dp::AND => Operation::And(data),
                dp::EOR => Operation::Eor(data),
                dp::SUB => Operation::Sub(data),
                dp::ADD => Operation::Add(data),
                _ => Operation::Orr(data),
            }
        }
        _ => return Err(unsupported(word)),
    };
    Ok((op, set_flags))
}

/// Decodes the flexible second operand of a data-processing word.
fn decode_operand2(word: u32) -> Result<Operand> {
    if word.bit(I_BIT) {
        let imm8 = word & 0xFF;
        let rotate = ((word >> 8) & 0xF) * 2;
        return Ok(Operand::Immediate(imm8.rotate_right(rotate)));
    }

    let rm = word.rm();
    let kind = ShiftKind::from_field(word.shift_type());

    if word.bit(REG_SHIFT_BIT) {
        // Bit 7 set here is the multiply/halfword-transfer space.
        if word.bit(BIT7) {
            return Err(unsupported(word));
        }
        return Ok(Operand::Shifted {
            rm,
            shift: Shift {
                kind,
                amount: ShiftAmount::Register(word.rs()),
            },
        });
    }

    let amount = match (kind, word.shift_imm()) {
        (ShiftKind::Lsl, 0) => return Ok(Operand::Register(rm)),
        // An encoded zero means 32 for the right shifts.
        (ShiftKind::Lsr | ShiftKind::Asr, 0) => 32,
        // ROR #0 encodes RRX.
        (ShiftKind::Ror, 0) => return Err(unsupported(word)),
        (_, n) => n,
    };
    Ok(Operand::Shifted {
        rm,
        shift: Shift {
            kind,
            amount: ShiftAmount::Immediate(amount),
        },
    })
}

/// Rejects `pc` as the destination of anything but a branch.
fn destination(mnemonic: &str, rd: Reg) -> Result<Reg> {
    if rd.is_pc() {
        Err(SimError::malformed(mnemonic, "pc cannot be a destination"))
    } else {
        Ok(rd)
    }
}
