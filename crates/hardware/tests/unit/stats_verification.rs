//! # Statistics Verification Tests
//!
//! Checks the counters the core maintains and the report rendering.

use crate::common::harness::{HALT, TestContext, asm, halt, imm, mem, r};
use armsim_core::core::arch::flags::Flags;
use armsim_core::stats::SimStats;
use pretty_assertions::assert_eq;

#[test]
fn test_stats_default_zeroed() {
    let stats = SimStats::default();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.instructions_executed, 0);
    assert!(stats.execution_ratio().abs() < f64::EPSILON);
}

#[test]
fn test_instruction_mix() {
    let mut ctx = TestContext::new()
        .with_flags(Flags::new(false, true, false, false))
        .load_asm(vec![
            asm("MOV", [r("r1"), imm(0x40)]),
            asm("STR", [r("r1"), mem("r1")]),
            asm("LDR", [r("r2"), mem("r1")]),
            asm("CMP", [r("r1"), r("r2")]),
            asm("ADDNE", [r("r3"), r("r3"), imm(1)]),
            asm("MOVS", [r("r4"), imm(0)]),
            halt(),
        ]);
    ctx.run_to_halt();

    let stats = ctx.sim.stats();
    assert_eq!(
        stats,
        &SimStats {
            cycles: 7,
            instructions_executed: 6,
            instructions_skipped: 1,
            inst_alu: 3,
            inst_load: 1,
            inst_store: 1,
            branches_taken: 1,
            flag_updates: 2,
        }
    );
}

#[test]
fn test_execution_ratio() {
    let mut ctx = TestContext::new().load_words(&[0x03A00001, HALT]);
    ctx.run_to_halt();
    let ratio = ctx.sim.stats().execution_ratio();
    assert!((ratio - 0.5).abs() < f64::EPSILON, "{ratio}");
}

#[test]
fn test_report_lists_counters() {
    let stats = SimStats {
        cycles: 16,
        instructions_executed: 15,
        instructions_skipped: 1,
        ..SimStats::default()
    };
    let report = stats.to_string();
    assert!(report.contains("sim_cycles               16"), "{report}");
    assert!(report.contains("sim_skipped              1"), "{report}");
    assert!(report.contains("sim_exec_ratio           0.9375"), "{report}");
}

#[test]
fn test_stats_serialize() {
    let stats = SimStats {
        cycles: 3,
        ..SimStats::default()
    };
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["cycles"], 3);
    assert_eq!(json["branches_taken"], 0);
}
