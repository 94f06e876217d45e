//! # Program Tests
//!
//! Complete programs run through the fetch-execute loop: the fifteen-instruction
//! reference listing in machine form, and short assembly-form scenarios exercising
//! PC-relative loads, predication and the shifter.

use crate::common::harness::{HALT, TestContext, asm, halt, imm, mem, r};
use armsim_core::core::arch::flags::Flags;
use armsim_core::stats::SimStats;
use pretty_assertions::assert_eq;

/// The reference listing: mov, ldr [pc], str, add, sub, mul, cmp, and, orr, subne,
/// addeq, lsl, lsr, asr, ror.
const LISTING: [u32; 15] = [
    0xE3A00080, 0xE59F1000, 0xE5812000, 0xE0813002, 0xE0424003, 0xE0050194, 0xE1500005,
    0xE0006005, 0xE1807005, 0x10400005, 0x00876008, 0xE1A01100, 0xE1A02120, 0xE1A042C1,
    0xE1A00160,
];

fn listing_with_halt() -> Vec<u32> {
    let mut words = LISTING.to_vec();
    words.push(HALT);
    words
}

#[test]
fn test_listing_from_zeroed_state() {
    let mut ctx = TestContext::new().load_words(&listing_with_halt());
    ctx.run_to_halt();

    assert_eq!(
        ctx.regs()[..9],
        [0x20, 0x200, 0x20, 0, 0x10, 0, 0, 0x80, 0]
    );
    assert_eq!(ctx.sim.pc(), 0x3C);
    // cmp 0x80, 0: no borrow, result positive and non-zero.
    assert_eq!(ctx.flags(), Flags::new(false, false, true, false));
    assert_eq!(
        ctx.sim.stats(),
        &SimStats {
            cycles: 16,
            instructions_executed: 15,
            instructions_skipped: 1,
            inst_alu: 12,
            inst_load: 1,
            inst_store: 1,
            branches_taken: 1,
            flag_updates: 1,
        }
    );
}

#[test]
fn test_listing_with_literal_pointer() {
    // The word at the ldr's own address is the literal.
    let mut ctx = TestContext::new()
        .with_data(4, &[0x100])
        .with_data(0x100, &[0xFFFF_FFFF])
        .load_words(&listing_with_halt());
    ctx.run_to_halt();

    assert_eq!(
        ctx.regs()[..9],
        [0x4020, 0x40200, 0x4020, 0x100, 0x2010, 0xFFFF_0000, 0, 0xFFFF_0080, 0]
    );
    // str r2, [r1] overwrote the pointee with r2 = 0.
    assert_eq!(ctx.mem(0x100), 0);
    assert_eq!(ctx.flags(), Flags::default());
    assert_eq!(ctx.sim.stats().instructions_skipped, 1);
}

#[test]
fn test_listing_without_halt_faults_after_last_instruction() {
    let mut ctx = TestContext::new().load_words(&LISTING);
    assert_eq!(
        ctx.run(100),
        armsim_core::RunOutcome::Faulted(armsim_core::SimError::NoInstruction { pc: 0x3C })
    );
    assert_eq!(ctx.sim.stats().cycles, 15);
}

#[test]
fn test_pc_relative_load_scenario() {
    let mut ctx = TestContext::new()
        .with_data(4, &[0x80])
        .with_data(0x80, &[5])
        .load_asm(vec![
            asm("MOV", [r("r0"), imm(0x80)]),
            asm("LDR", [r("r1"), mem("pc")]),
            asm("LDR", [r("r2"), mem("r1")]),
            halt(),
        ]);
    ctx.run_to_halt();

    assert_eq!(ctx.get_reg(0), 0x80);
    assert_eq!(ctx.get_reg(1), 0x80);
    assert_eq!(ctx.get_reg(2), 5);
}

#[test]
fn test_pc_relative_load_reads_fetch_address() {
    let mut ctx = TestContext::new()
        .with_data(0x8, &[0xAAAA, 0xBBBB, 0xCCCC, 0xDDDD])
        .load_asm(vec![
            asm("MOV", [r("r0"), imm(0)]),
            asm("MOV", [r("r0"), imm(0)]),
            asm("LDR", [r("r1"), mem("pc")]),
            halt(),
        ]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(1), 0xAAAA);
}

#[test]
fn test_pc_literal_load_does_not_read_pc_plus_four() {
    // A literal placed at ldr + 4 (0x08) is not what `ldr r1, [pc]` reads.
    let mut ctx = TestContext::new()
        .with_data(8, &[1234])
        .load_words(&[LISTING[0], LISTING[1], HALT]);
    ctx.run_to_halt();
    assert_eq!(ctx.get_reg(1), 0);
}

#[test]
fn test_predication_scenario() {
    let mut ctx = TestContext::new()
        .with_reg(0, 10)
        .with_reg(5, 10)
        .with_reg(6, 0x55)
        .load_asm(vec![
            asm("CMP", [r("r0"), r("r5")]),
            asm("SUBNE", [r("r0"), r("r0"), r("r5")]),
            asm("ADDEQ", [r("r6"), r("r7"), r("r8")]),
            halt(),
        ]);
    ctx.run_to_halt();

    assert!(ctx.flags().z);
    assert_eq!(ctx.get_reg(0), 10);
    assert_eq!(ctx.get_reg(6), 0);
    assert_eq!(ctx.sim.stats().instructions_skipped, 1);
}

#[test]
fn test_shift_scenario() {
    let mut ctx = TestContext::new().with_reg(0, 8).load_asm(vec![
        asm("LSL", [r("r1"), r("r0"), imm(2)]),
        asm("LSR", [r("r2"), r("r0"), imm(2)]),
        asm("ASR", [r("r4"), r("r1"), imm(5)]),
        asm("ROR", [r("r0"), r("r0"), imm(2)]),
        halt(),
    ]);
    ctx.run_to_halt();

    assert_eq!(ctx.get_reg(1), 32);
    assert_eq!(ctx.get_reg(2), 2);
    assert_eq!(ctx.get_reg(4), 1);
    assert_eq!(ctx.get_reg(0), 8u32.rotate_right(2));
}

#[test]
fn test_multiply_accumulate_word() {
    let mut ctx = TestContext::new()
        .with_reg(1, 3)
        .with_reg(2, 4)
        .with_reg(3, 5)
        .load_words(&[0xE0203291, HALT]);
    ctx.run_to_halt();

    assert_eq!(ctx.get_reg(0), 17);
    assert_eq!(ctx.sim.stats().inst_alu, 1);
    assert_eq!(ctx.sim.stats().cycles, 2);
}

#[test]
fn test_multiply_accumulate_dot_product() {
    // r0 = 2*5 + 3*6 + 4*7, with the pairs in r1/r4, r2/r5, r3/r6.
    let mut ctx = TestContext::new().load_asm(vec![
        asm("MOV", [r("r1"), imm(2)]),
        asm("MOV", [r("r2"), imm(3)]),
        asm("MOV", [r("r3"), imm(4)]),
        asm("MOV", [r("r4"), imm(5)]),
        asm("MOV", [r("r5"), imm(6)]),
        asm("MOV", [r("r6"), imm(7)]),
        asm("MUL", [r("r0"), r("r1"), r("r4")]),
        asm("MLA", [r("r0"), r("r2"), r("r5"), r("r0")]),
        asm("MLAS", [r("r0"), r("r3"), r("r6"), r("r0")]),
        halt(),
    ]);
    ctx.run_to_halt();

    assert_eq!(ctx.get_reg(0), 56);
    assert_eq!(ctx.flags(), Flags::default());
    assert_eq!(ctx.sim.stats().flag_updates, 1);
}

#[test]
fn test_countdown_loop() {
    // r0 = 5; loop: r1 += r0; subs r0, r0, #1; bne loop
    let mut ctx = TestContext::new().load_asm(vec![
        asm("MOV", [r("r0"), imm(5)]),
        asm("ADD", [r("r1"), r("r1"), r("r0")]),
        asm("SUBS", [r("r0"), r("r0"), imm(1)]),
        asm("BNE", [imm(-8)]),
        halt(),
    ]);
    ctx.run_to_halt();

    assert_eq!(ctx.get_reg(1), 15);
    assert_eq!(ctx.get_reg(0), 0);
    assert!(ctx.flags().z);
    assert_eq!(ctx.sim.stats().branches_taken, 5);
}
