//! Simulator: owns the CPU, the instruction region and the run state.
//!
//! The fetch-execute loop performs, once per cycle:
//! 1. **Fetch:** Reads the raw record at the program counter.
//! 2. **Decode:** Turns it into an [`Instruction`](crate::isa::Instruction).
//! 3. **Execute:** Evaluates and commits the instruction's effect.
//! 4. **Advance:** Sets the program counter to the branch target if a branch was taken,
//!    otherwise to the next instruction.
//!
//! A taken branch to its own address (`_stop: b _stop`) halts the loop at the end of that
//! cycle. Any fetch, decode or execute error faults it before anything is changed, so the
//! program counter still addresses the faulting instruction.

use std::path::Path;

use tracing::{debug, warn};

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::{Result, SimError};
use crate::config::{ByteOrder, Config, GeneralConfig, MemoryConfig};
use crate::core::Cpu;
use crate::core::arch::flags::Flags;
use crate::isa::abi::Reg;
use crate::isa::decode::decode;
use crate::isa::raw::RawInstruction;
use crate::sim::loader::{self, LoadError};
use crate::soc::ProgramMemory;
use crate::stats::SimStats;

/// Run state of the fetch-execute loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimState {
    /// Ready to execute the next cycle.
    Running,
    /// A self-branch was reached. Terminal.
    Halted,
    /// An error stopped the run. Terminal.
    Faulted(SimError),
}

impl SimState {
    /// Returns `true` for `Halted` and `Faulted`.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Result of a bounded [`Simulator::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The program reached a self-branch.
    Halted,
    /// The program faulted with the given error.
    Faulted(SimError),
    /// The cycle budget ran out first; the simulator is still running and can resume.
    CycleBudgetExceeded,
}

/// Top-level simulator: CPU architectural state plus the loaded program.
#[derive(Clone, Debug)]
pub struct Simulator {
    cpu: Cpu,
    program: ProgramMemory,
    state: SimState,
    entry: u32,
    max_cycles: u64,
    image_byte_order: ByteOrder,
}

impl Simulator {
    /// Creates a simulator with `memory_size` bytes of zeroed data memory and the program
    /// counter at `entry`.
    pub fn new(memory_size: usize, entry: u32) -> Self {
        Self::from_config(&Config {
            general: GeneralConfig {
                entry_address: entry,
                ..Default::default()
            },
            memory: MemoryConfig {
                size_bytes: memory_size,
                ..Default::default()
            },
        })
    }

    /// Creates a simulator from a configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            cpu: Cpu::from_config(config),
            program: ProgramMemory::new(config.general.entry_address, Vec::new()),
            state: SimState::Running,
            entry: config.general.entry_address,
            max_cycles: config.general.max_cycles,
            image_byte_order: config.memory.image_byte_order,
        }
    }

    /// Places `records` in instruction memory starting at the entry address, resets the
    /// program counter to the entry address and the state to `Running`.
    pub fn load_program(&mut self, records: impl IntoIterator<Item = RawInstruction>) {
        self.program = ProgramMemory::new(self.entry, records.into_iter().collect());
        self.cpu.regs.set_pc(self.entry);
        self.state = SimState::Running;
        debug!(
            entry = %format_args!("{:#010x}", self.entry),
            records = self.program.len(),
            "program loaded"
        );
    }

    /// Loads 32-bit A32 machine words as the program.
    pub fn load_words(&mut self, words: &[u32]) {
        self.load_program(loader::program_from_words(words));
    }

    /// Reads a program image file in the configured byte order and loads it.
    ///
    /// # Returns
    ///
    /// The number of instruction words loaded.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the file cannot be read or ends with a partial word.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> std::result::Result<usize, LoadError> {
        let words = loader::load_image(path, self.image_byte_order)?;
        self.load_words(&words);
        Ok(words.len())
    }

    /// Runs at most `max_cycles` cycles.
    ///
    /// Terminal states return their outcome immediately without executing anything.
    pub fn run(&mut self, max_cycles: u64) -> RunOutcome {
        for _ in 0..max_cycles {
            if self.state.is_terminal() {
                break;
            }
            let _ = self.step();
        }
        match &self.state {
            SimState::Running => RunOutcome::CycleBudgetExceeded,
            SimState::Halted => RunOutcome::Halted,
            SimState::Faulted(err) => RunOutcome::Faulted(err.clone()),
        }
    }

    /// Runs with the configured default cycle budget.
    pub fn run_to_completion(&mut self) -> RunOutcome {
        self.run(self.max_cycles)
    }

    /// Executes a single cycle unless the simulator is already in a terminal state.
    ///
    /// # Returns
    ///
    /// The state after the cycle.
    pub fn step(&mut self) -> &SimState {
        if !self.state.is_terminal() {
            match self.cycle() {
                Ok(true) => {
                    debug!(
                        pc = %format_args!("{:#010x}", self.cpu.regs.pc()),
                        cycles = self.cpu.stats.cycles,
                        "halted on self-branch"
                    );
                    self.state = SimState::Halted;
                }
                Ok(false) => {}
                Err(err) => {
                    warn!(
                        pc = %format_args!("{:#010x}", self.cpu.regs.pc()),
                        error = %err,
                        "simulation faulted"
                    );
                    self.state = SimState::Faulted(err);
                }
            }
        }
        &self.state
    }

    /// One fetch-decode-execute cycle. Returns `true` when the loop should halt.
    fn cycle(&mut self) -> Result<bool> {
        let pc = self.cpu.regs.pc();
        let inst = decode(self.program.fetch(pc)?)?;
        let effect = self.cpu.execute(&inst, pc)?;
        self.cpu.stats.cycles += 1;

        match effect.branch_target {
            Some(target) => {
                self.cpu.regs.set_pc(target);
                Ok(target == pc)
            }
            None => {
                self.cpu.regs.set_pc(pc.wrapping_add(INSTRUCTION_SIZE));
                Ok(false)
            }
        }
    }

    /// Reads a register by index (15 is the program counter).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownRegister`] for an index outside `0..16`.
    pub fn inspect_register(&self, idx: usize) -> Result<u32> {
        self.cpu.regs.read(idx)
    }

    /// Reads a register by name (`r0`-`r15`, `sp`, `lr`, `pc`; case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownRegister`] for an undeclared name.
    pub fn inspect_register_named(&self, name: &str) -> Result<u32> {
        let reg: Reg = name.parse()?;
        self.cpu.regs.read(reg.index())
    }

    /// Returns the current flags.
    pub const fn inspect_flags(&self) -> Flags {
        self.cpu.regs.read_flags()
    }

    /// Reads a word of data memory.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnalignedAccess`] or [`SimError::OutOfBounds`].
    pub fn inspect_memory(&self, addr: u32) -> Result<u32> {
        self.cpu.memory.load_word(addr)
    }

    /// Writes a register before (or between) runs.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownRegister`] for an index outside `0..16`.
    pub fn set_register(&mut self, idx: usize, value: u32) -> Result<()> {
        self.cpu.regs.write(idx, value)
    }

    /// Replaces the flags before (or between) runs.
    pub const fn set_flags(&mut self, flags: Flags) {
        self.cpu.regs.set_flags(flags);
    }

    /// Writes consecutive words of data memory starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnalignedAccess`] or [`SimError::OutOfBounds`]; memory is
    /// unchanged on error.
    pub fn preload_memory(&mut self, addr: u32, words: &[u32]) -> Result<()> {
        self.cpu.memory.write_words(addr, words)
    }

    /// Returns the current program counter.
    pub fn pc(&self) -> u32 {
        self.cpu.regs.pc()
    }

    /// Returns the run state.
    pub const fn state(&self) -> &SimState {
        &self.state
    }

    /// Returns the execution statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Returns the CPU state.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Returns the loaded program.
    pub const fn program(&self) -> &ProgramMemory {
        &self.program
    }
}
