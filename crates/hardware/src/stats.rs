//! Simulation statistics collection and reporting.
//!
//! This module tracks execution counters for the simulator. It provides:
//! 1. **Cycles:** Total cycles consumed, executed and condition-skipped instructions.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch).
//! 3. **Control and flags:** Branches taken and flag updates.

use std::fmt;

use serde::Serialize;

/// Simulation statistics structure.
///
/// Every cycle consumes exactly one instruction slot, so
/// `cycles == instructions_executed + instructions_skipped` holds after any run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Instructions whose condition passed.
    pub instructions_executed: u64,
    /// Instructions whose condition failed (no-ops).
    pub instructions_skipped: u64,

    /// Executed data-processing, multiply and shift instructions.
    pub inst_alu: u64,
    /// Executed loads.
    pub inst_load: u64,
    /// Executed stores.
    pub inst_store: u64,
    /// Executed branches (all of which are taken).
    pub branches_taken: u64,

    /// Instructions that rewrote the flags.
    pub flag_updates: u64,
}

impl SimStats {
    /// Ratio of executed to total cycles, or `0.0` before the first cycle.
    pub fn execution_ratio(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_executed as f64 / self.cycles as f64
        }
    }
}

impl fmt::Display for SimStats {
    /// Renders a fixed-width summary table.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "ARM CORE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_executed)?;
        writeln!(f, "sim_skipped              {}", self.instructions_skipped)?;
        writeln!(f, "sim_exec_ratio           {:.4}", self.execution_ratio())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INSTRUCTION MIX")?;
        writeln!(f, "  alu                    {}", self.inst_alu)?;
        writeln!(f, "  load                   {}", self.inst_load)?;
        writeln!(f, "  store                  {}", self.inst_store)?;
        writeln!(f, "  branch                 {}", self.branches_taken)?;
        writeln!(f, "  flag_updates           {}", self.flag_updates)?;
        write!(f, "==========================================================")
    }
}
