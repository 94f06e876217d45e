//! # Machine-Word Decoding Tests

use crate::common::builder::{InstructionBuilder as B, opcodes, shift};
use armsim_core::SimError;
use armsim_core::isa::abi::Reg;
use armsim_core::isa::condition::Condition;
use armsim_core::isa::encoding::decode_word;
use armsim_core::isa::instruction::{
    Address, BranchTarget, DataOp, Instruction, InstructionBits, Offset, Operand, Operation, Shift,
    ShiftAmount, ShiftKind, ShiftOp,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const fn x(i: u32) -> Reg {
    Reg::from_field(i)
}

const fn shift_op(rd: u32, rm: u32, n: u32) -> ShiftOp {
    ShiftOp {
        rd: x(rd),
        rm: x(rm),
        amount: ShiftAmount::Immediate(n),
    }
}

const fn reg_data(rd: u32, rn: u32, rm: u32) -> DataOp {
    DataOp {
        rd: x(rd),
        rn: x(rn),
        op2: Operand::Register(x(rm)),
    }
}

#[test]
fn test_field_extraction() {
    let word: u32 = 0x1234_5678;
    assert_eq!(word.cond(), 0x1);
    assert_eq!(word.opcode(), 0x1);
    assert!(word.bit20());
    assert_eq!(word.rn(), x(4));
    assert_eq!(word.rd(), x(5));
    assert_eq!(word.rs(), x(6));
    assert_eq!(word.rm(), x(8));
    assert_eq!(word.shift_type(), 0b11);
    assert_eq!(word.shift_imm(), 0b01100);
}

#[rstest]
#[case(0xE3A00080, Operation::Mov { rd: x(0), op2: Operand::Immediate(0x80) }, Condition::Al)]
#[case(0xE59F1000, Operation::Ldr { rt: x(1), addr: Address { base: Reg::PC, offset: Offset::Immediate(0) } }, Condition::Al)]
#[case(0xE5812000, Operation::Str { rt: x(2), addr: Address { base: x(1), offset: Offset::Immediate(0) } }, Condition::Al)]
#[case(0xE0813002, Operation::Add(reg_data(3, 1, 2)), Condition::Al)]
#[case(0xE0424003, Operation::Sub(reg_data(4, 2, 3)), Condition::Al)]
#[case(0xE0050194, Operation::Mul { rd: x(5), rn: x(4), rm: x(1) }, Condition::Al)]
#[case(0xE1500005, Operation::Cmp { rn: x(0), op2: Operand::Register(x(5)) }, Condition::Al)]
#[case(0xE0006005, Operation::And(reg_data(6, 0, 5)), Condition::Al)]
#[case(0xE1807005, Operation::Orr(reg_data(7, 0, 5)), Condition::Al)]
#[case(0x10400005, Operation::Sub(reg_data(0, 0, 5)), Condition::Ne)]
#[case(0x00876008, Operation::Add(reg_data(6, 7, 8)), Condition::Eq)]
#[case(0xE1A01100, Operation::Lsl(shift_op(1, 0, 2)), Condition::Al)]
#[case(0xE1A02120, Operation::Lsr(shift_op(2, 0, 2)), Condition::Al)]
#[case(0xE1A042C1, Operation::Asr(shift_op(4, 1, 5)), Condition::Al)]
#[case(0xE1A00160, Operation::Ror(shift_op(0, 0, 2)), Condition::Al)]
fn test_listing_words(#[case] word: u32, #[case] op: Operation, #[case] cond: Condition) {
    let inst = decode_word(word).unwrap();
    assert_eq!(inst.op, op);
    assert_eq!(inst.condition, cond);
    assert_eq!(inst.set_flags, matches!(op, Operation::Cmp { .. }));
}

#[test]
fn test_rotated_immediate() {
    // 0xFF rotated right by 8 is 0xFF000000.
    let word = B::data(opcodes::MOV).rd(2).imm(0xFF, 4).build();
    assert_eq!(
        decode_word(word).unwrap().op,
        Operation::Mov {
            rd: x(2),
            op2: Operand::Immediate(0xFF00_0000),
        }
    );
}

#[test]
fn test_set_flags_bit() {
    let word = B::data(opcodes::ADD).set_flags().rd(1).rn(2).rm(3).build();
    assert!(decode_word(word).unwrap().set_flags);

    let word = B::multiply().set_flags().rn(1).rm(2).rs(3).build();
    assert!(decode_word(word).unwrap().set_flags);
}

#[test]
fn test_multiply_accumulate() {
    // mla r0, r1, r2, r3
    assert_eq!(
        decode_word(0xE0203291).unwrap(),
        Instruction::always(Operation::Mla {
            rd: x(0),
            rn: x(1),
            rm: x(2),
            ra: x(3),
        })
    );

    let word = B::multiply_accumulate()
        .cond(0x1)
        .set_flags()
        .rn(4)
        .rd(5)
        .rs(6)
        .rm(7)
        .build();
    let inst = decode_word(word).unwrap();
    assert_eq!(inst.condition, Condition::Ne);
    assert!(inst.set_flags);
    assert_eq!(
        inst.op,
        Operation::Mla {
            rd: x(4),
            rn: x(7),
            rm: x(6),
            ra: x(5),
        }
    );
}

#[test]
fn test_eor_with_register_shift() {
    let word = B::data(opcodes::EOR)
        .rd(1)
        .rn(2)
        .rm(3)
        .shift_reg(shift::ROR, 4)
        .build();
    assert_eq!(
        decode_word(word).unwrap().op,
        Operation::Eor(DataOp {
            rd: x(1),
            rn: x(2),
            op2: Operand::Shifted {
                rm: x(3),
                shift: Shift {
                    kind: ShiftKind::Ror,
                    amount: ShiftAmount::Register(x(4)),
                },
            },
        })
    );
}

#[test]
fn test_mov_register_shift_is_shift_operation() {
    let word = B::data(opcodes::MOV)
        .rd(0)
        .rm(1)
        .shift_reg(shift::LSR, 2)
        .build();
    assert_eq!(
        decode_word(word).unwrap().op,
        Operation::Lsr(ShiftOp {
            rd: x(0),
            rm: x(1),
            amount: ShiftAmount::Register(x(2)),
        })
    );
}

#[rstest]
#[case(shift::LSR, Operation::Lsr(shift_op(3, 4, 32)))]
#[case(shift::ASR, Operation::Asr(shift_op(3, 4, 32)))]
fn test_zero_right_shift_encodes_32(#[case] kind: u32, #[case] expected: Operation) {
    let word = B::data(opcodes::MOV).rd(3).rm(4).shift_imm(kind, 0).build();
    assert_eq!(decode_word(word).unwrap().op, expected);
}

#[test]
fn test_zero_left_shift_is_plain_register() {
    let word = B::data(opcodes::MOV).rd(3).rm(4).build();
    assert_eq!(
        decode_word(word).unwrap().op,
        Operation::Mov {
            rd: x(3),
            op2: Operand::Register(x(4)),
        }
    );
}

#[test]
fn test_transfer_offsets() {
    let word = B::transfer(true).rd(0).rn(1).offset(0x10).down().build();
    assert_eq!(
        decode_word(word).unwrap().op,
        Operation::Ldr {
            rt: x(0),
            addr: Address {
                base: x(1),
                offset: Offset::Immediate(-0x10),
            },
        }
    );

    let word = B::transfer(false).rd(0).rn(1).offset_reg(2).build();
    assert_eq!(
        decode_word(word).unwrap().op,
        Operation::Str {
            rt: x(0),
            addr: Address {
                base: x(1),
                offset: Offset::Register {
                    rm: x(2),
                    subtract: false,
                },
            },
        }
    );
}

#[rstest]
#[case(0xEAFF_FFFE, Operation::B(BranchTarget::Relative(0)))]
#[case(0xEA00_0000, Operation::B(BranchTarget::Relative(8)))]
#[case(0xEBFF_FFFC, Operation::Bl(BranchTarget::Relative(-8)))]
#[case(0xEA7F_FFFF, Operation::B(BranchTarget::Relative(0x01FF_FFFC + 8)))]
#[case(0xEA80_0000, Operation::B(BranchTarget::Relative(-0x0200_0000 + 8)))]
fn test_branch_offsets(#[case] word: u32, #[case] op: Operation) {
    assert_eq!(decode_word(word).unwrap(), Instruction::always(op));
}

#[test]
fn test_branch_condition() {
    let word = B::branch(false, -8).cond(0xB).build();
    assert_eq!(decode_word(word).unwrap().condition, Condition::Lt);
}

#[rstest]
#[case::reserved_condition(0xF3A0_0080)]
#[case::teq(B::data(0b1001).set_flags().build())]
#[case::cmp_without_s(B::data(opcodes::CMP).rn(0).rm(5).build())]
#[case::rsb(B::data(0b0011).build())]
#[case::mvn(B::data(0b1111).build())]
#[case::rrx(B::data(opcodes::MOV).rd(0).rm(1).shift_imm(shift::ROR, 0).build())]
#[case::ldrb(B::transfer(true).bit(22).build())]
#[case::post_indexed(B::transfer(true).build() & !(1 << 24))]
#[case::write_back(B::transfer(true).bit(21).build())]
#[case::scaled_register_offset(B::transfer(true).offset_reg(2).shift_imm(shift::LSL, 2).build())]
#[case::halfword(0xE1D000B0)]
#[case::coprocessor(0xEE000000)]
#[case::block_transfer(0xE8BD8000)]
fn test_unsupported_encodings(#[case] word: u32) {
    assert_eq!(
        decode_word(word),
        Err(SimError::UnsupportedOpcode(format!("{word:#010x}")))
    );
}

#[rstest]
#[case(B::data(opcodes::ADD).rd(15).rn(1).rm(2).build())]
#[case(B::data(opcodes::MOV).rd(15).rm(14).build())]
#[case(B::transfer(true).rd(15).rn(0).build())]
#[case(B::multiply().rn(15).rm(1).rs(2).build())]
#[case(B::multiply_accumulate().rn(15).rm(1).rs(2).rd(3).build())]
fn test_pc_destination_is_malformed(#[case] word: u32) {
    assert!(matches!(
        decode_word(word),
        Err(SimError::MalformedOperands { .. })
    ));
}
