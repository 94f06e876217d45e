use armsim_core::config::Config;
use armsim_core::core::arch::flags::Flags;
use armsim_core::isa::instruction::ShiftKind;
use armsim_core::{RawInstruction, RawOperand, RunOutcome, SimState, Simulator};
use tracing_subscriber::EnvFilter;

/// `b .`: branch to itself, which halts the loop.
pub const HALT: u32 = 0xEAFF_FFFE;

/// Data memory size for tests that do not choose one.
pub const TEST_MEMORY_SIZE: usize = 4096;

/// Cycle budget for [`TestContext::run_to_halt`].
const HALT_BUDGET: u64 = 10_000;

/// Installs a subscriber that writes through the test harness. Set `RUST_LOG=trace`
/// together with `trace_instructions` to see every executed instruction.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_memory(TEST_MEMORY_SIZE)
    }

    pub fn with_memory(size: usize) -> Self {
        init_tracing();
        Self {
            sim: Simulator::new(size, 0),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        init_tracing();
        Self {
            sim: Simulator::from_config(config),
        }
    }

    /// Load machine words at the entry address.
    pub fn load_words(mut self, words: &[u32]) -> Self {
        self.sim.load_words(words);
        self
    }

    /// Load assembly-form records at the entry address.
    pub fn load_asm(mut self, program: Vec<RawInstruction>) -> Self {
        self.sim.load_program(program);
        self
    }

    pub fn with_reg(mut self, idx: usize, val: u32) -> Self {
        self.set_reg(idx, val);
        self
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.sim.set_flags(flags);
        self
    }

    pub fn with_data(mut self, addr: u32, words: &[u32]) -> Self {
        self.sim.preload_memory(addr, words).unwrap();
        self
    }

    pub fn set_reg(&mut self, idx: usize, val: u32) {
        self.sim.set_register(idx, val).unwrap();
    }

    pub fn get_reg(&self, idx: usize) -> u32 {
        self.sim.inspect_register(idx).unwrap()
    }

    pub fn flags(&self) -> Flags {
        self.sim.inspect_flags()
    }

    pub fn mem(&self, addr: u32) -> u32 {
        self.sim.inspect_memory(addr).unwrap()
    }

    pub fn step(&mut self) -> SimState {
        self.sim.step().clone()
    }

    pub fn run(&mut self, max_cycles: u64) -> RunOutcome {
        self.sim.run(max_cycles)
    }

    /// Runs until the program halts, failing the test on a fault or a runaway loop.
    pub fn run_to_halt(&mut self) {
        let outcome = self.sim.run(HALT_BUDGET);
        assert_eq!(outcome, RunOutcome::Halted, "program did not halt");
    }

    /// Snapshot of r0-r15.
    pub fn regs(&self) -> Vec<u32> {
        (0..16).map(|i| self.get_reg(i)).collect()
    }
}

/// Assembly record with a mnemonic and operand list.
pub fn asm<const N: usize>(mnemonic: &str, operands: [RawOperand; N]) -> RawInstruction {
    RawInstruction::asm(mnemonic, operands.into())
}

/// Assembly `b .` (relative offset zero).
pub fn halt() -> RawInstruction {
    asm("B", [RawOperand::imm(0)])
}

pub fn r(name: &str) -> RawOperand {
    RawOperand::reg(name)
}

pub const fn imm(value: i64) -> RawOperand {
    RawOperand::imm(value)
}

pub fn mem(base: &str) -> RawOperand {
    RawOperand::mem(base)
}

pub fn mem_imm(base: &str, offset: i64) -> RawOperand {
    RawOperand::mem_imm(base, offset)
}

pub const fn sh(kind: ShiftKind, amount: i64) -> RawOperand {
    RawOperand::shift(kind, amount)
}
