//! Instruction Execution.
//!
//! This module implements the execution unit. It performs the following:
//! 1. **Predication:** Evaluates the condition against the current flags before anything
//!    else; a failing condition yields an empty, non-executed [`Effect`].
//! 2. **Evaluation:** Computes register writes, the memory write, new flags and the branch
//!    target without touching state, so a faulting instruction leaves everything as it was.
//! 3. **Commit:** Applies an [`Effect`] to registers, memory and flags, and updates the
//!    statistics.
//!
//! Reads of `pc` as an operand (including `[pc]` addressing) yield the fetch-time program
//! counter, i.e. the address of the instruction being executed.

use tracing::trace;

use super::Cpu;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::Result;
use crate::core::arch::flags::Flags;
use crate::core::units::alu::arithmetic::{compare, multiply_accumulate};
use crate::core::units::alu::shifts::{self, ShiftResult};
use crate::core::units::alu::{Alu, AluOp, AluResult};
use crate::isa::abi::Reg;
use crate::isa::instruction::{
    Address, DataOp, Instruction, Offset, Operand, Operation, ShiftAmount, ShiftKind, ShiftOp,
};

/// Mask selecting the low byte of a register used as a shift amount.
const SHIFT_REG_MASK: u32 = 0xFF;

/// A single memory store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryWrite {
    /// Word-aligned byte address.
    pub address: u32,
    /// Value stored.
    pub value: u32,
}

/// Everything one instruction changes.
///
/// Produced by [`Cpu::evaluate`] and applied by [`Cpu::commit`]; the fetch-execute loop
/// only consumes `branch_target`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Effect {
    /// Whether the condition passed.
    pub executed: bool,
    /// Registers written, in order.
    pub register_writes: Vec<(Reg, u32)>,
    /// The store performed, if any.
    pub memory_write: Option<MemoryWrite>,
    /// The complete new flag set, if the instruction rewrites the flags.
    pub new_flags: Option<Flags>,
    /// Destination of a taken branch.
    pub branch_target: Option<u32>,
    /// Whether the instruction read data memory.
    pub loaded: bool,
}

impl Effect {
    /// The effect of an instruction whose condition failed.
    pub fn skipped() -> Self {
        Self::default()
    }

    /// Returns `true` if the flags are rewritten.
    pub const fn flags_changed(&self) -> bool {
        self.new_flags.is_some()
    }

    fn executed() -> Self {
        Self {
            executed: true,
            ..Self::default()
        }
    }

    fn write(mut self, reg: Reg, value: u32) -> Self {
        self.register_writes.push((reg, value));
        self
    }

    fn flags_if(mut self, set: bool, flags: Flags) -> Self {
        if set {
            self.new_flags = Some(flags);
        }
        self
    }
}

impl Cpu {
    /// Executes one decoded instruction and commits its effect.
    ///
    /// # Arguments
    ///
    /// * `inst` - The decoded instruction.
    /// * `fetch_pc` - Address the instruction was fetched from.
    ///
    /// # Returns
    ///
    /// The committed [`Effect`]. The program counter is not advanced; that is the
    /// caller's job, using [`Effect::branch_target`].
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::UnknownRegister`](crate::common::error::SimError::UnknownRegister),
    /// [`SimError::UnalignedAccess`](crate::common::error::SimError::UnalignedAccess) and
    /// [`SimError::OutOfBounds`](crate::common::error::SimError::OutOfBounds) unchanged.
    /// State is untouched on error.
    pub fn execute(&mut self, inst: &Instruction, fetch_pc: u32) -> Result<Effect> {
        let effect = self.evaluate(inst, fetch_pc)?;
        self.commit(&effect)?;
        if self.trace {
            trace!(
                pc = %format_args!("{fetch_pc:#010x}"),
                executed = effect.executed,
                flags = %self.regs.read_flags(),
                "{inst}"
            );
        }
        Ok(effect)
    }

    /// Computes the effect of an instruction without changing any state.
    ///
    /// # Errors
    ///
    /// Same as [`Cpu::execute`].
    pub fn evaluate(&self, inst: &Instruction, fetch_pc: u32) -> Result<Effect> {
        let prev = self.regs.read_flags();
        if !inst.condition.passes(prev) {
            return Ok(Effect::skipped());
        }
        let s = inst.set_flags;

        let effect = match inst.op {
            Operation::Mov { rd, op2 } => {
                let sh = self.operand2(op2, fetch_pc, prev.c)?;
                let flags = AluResult::plain(sh.value).flags(prev, sh.carry);
                Effect::executed().write(rd, sh.value).flags_if(s, flags)
            }
            Operation::Add(data) => self.data_op(AluOp::Add, data, fetch_pc, prev, s)?,
            Operation::Sub(data) => self.data_op(AluOp::Sub, data, fetch_pc, prev, s)?,
            Operation::And(data) => self.data_op(AluOp::And, data, fetch_pc, prev, s)?,
            Operation::Orr(data) => self.data_op(AluOp::Orr, data, fetch_pc, prev, s)?,
            Operation::Eor(data) => self.data_op(AluOp::Eor, data, fetch_pc, prev, s)?,
            Operation::Mul { rd, rn, rm } => {
                let res = Alu::execute(
                    AluOp::Mul,
                    self.read(rn, fetch_pc)?,
                    self.read(rm, fetch_pc)?,
                );
                Effect::executed()
                    .write(rd, res.value)
                    .flags_if(s, res.flags(prev, prev.c))
            }
            Operation::Mla { rd, rn, rm, ra } => {
                let res = multiply_accumulate(
                    self.read(rn, fetch_pc)?,
                    self.read(rm, fetch_pc)?,
                    self.read(ra, fetch_pc)?,
                );
                Effect::executed()
                    .write(rd, res.value)
                    .flags_if(s, res.flags(prev, prev.c))
            }
            Operation::Cmp { rn, op2 } => {
                let a = self.read(rn, fetch_pc)?;
                let b = self.operand2(op2, fetch_pc, prev.c)?.value;
                Effect::executed().flags_if(true, compare(a, b))
            }
            Operation::Lsl(op) => self.shift_op(ShiftKind::Lsl, op, fetch_pc, prev, s)?,
            Operation::Lsr(op) => self.shift_op(ShiftKind::Lsr, op, fetch_pc, prev, s)?,
            Operation::Asr(op) => self.shift_op(ShiftKind::Asr, op, fetch_pc, prev, s)?,
            Operation::Ror(op) => self.shift_op(ShiftKind::Ror, op, fetch_pc, prev, s)?,
            Operation::Ldr { rt, addr } => {
                let address = self.effective_address(addr, fetch_pc)?;
                let value = self.memory.load_word(address)?;
                let mut effect = Effect::executed().write(rt, value);
                effect.loaded = true;
                effect
            }
            Operation::Str { rt, addr } => {
                let address = self.effective_address(addr, fetch_pc)?;
                self.memory.check_word(address)?;
                let value = self.read(rt, fetch_pc)?;
                Effect {
                    memory_write: Some(MemoryWrite { address, value }),
                    ..Effect::executed()
                }
            }
            Operation::B(target) => Effect {
                branch_target: Some(target.resolve(fetch_pc)),
                ..Effect::executed()
            },
            Operation::Bl(target) => Effect {
                branch_target: Some(target.resolve(fetch_pc)),
                ..Effect::executed().write(Reg::LR, fetch_pc.wrapping_add(INSTRUCTION_SIZE))
            },
        };
        Ok(effect)
    }

    /// Applies an effect to registers, memory and flags, and counts it.
    ///
    /// # Errors
    ///
    /// Propagates register and memory errors. Effects produced by [`Cpu::evaluate`] on
    /// the same state never fail.
    pub fn commit(&mut self, effect: &Effect) -> Result<()> {
        if !effect.executed {
            self.stats.instructions_skipped += 1;
            return Ok(());
        }
        if let Some(write) = effect.memory_write {
            self.memory.store_word(write.address, write.value)?;
            self.stats.inst_store += 1;
        }
        for &(reg, value) in &effect.register_writes {
            self.regs.write(reg.index(), value)?;
        }
        if let Some(flags) = effect.new_flags {
            self.regs.set_flags(flags);
            self.stats.flag_updates += 1;
        }

        self.stats.instructions_executed += 1;
        if effect.branch_target.is_some() {
            self.stats.branches_taken += 1;
        } else if effect.loaded {
            self.stats.inst_load += 1;
        } else if effect.memory_write.is_none() {
            self.stats.inst_alu += 1;
        }
        Ok(())
    }

    /// Reads a register, substituting the fetch-time value for `pc`.
    fn read(&self, reg: Reg, fetch_pc: u32) -> Result<u32> {
        if reg.is_pc() {
            Ok(fetch_pc)
        } else {
            self.regs.read(reg.index())
        }
    }

    /// Evaluates a flexible second operand through the barrel shifter.
    fn operand2(&self, op2: Operand, fetch_pc: u32, carry_in: bool) -> Result<ShiftResult> {
        match op2 {
            Operand::Immediate(value) => Ok(ShiftResult {
                value,
                carry: carry_in,
            }),
            Operand::Register(rm) => Ok(ShiftResult {
                value: self.read(rm, fetch_pc)?,
                carry: carry_in,
            }),
            Operand::Shifted { rm, shift } => {
                let value = self.read(rm, fetch_pc)?;
                let amount = self.shift_amount(shift.amount, fetch_pc)?;
                Ok(shifts::execute(shift.kind, value, amount, carry_in))
            }
        }
    }

    fn shift_amount(&self, amount: ShiftAmount, fetch_pc: u32) -> Result<u32> {
        match amount {
            ShiftAmount::Immediate(n) => Ok(n),
            ShiftAmount::Register(rs) => Ok(self.read(rs, fetch_pc)? & SHIFT_REG_MASK),
        }
    }

    fn data_op(
        &self,
        op: AluOp,
        data: DataOp,
        fetch_pc: u32,
        prev: Flags,
        set_flags: bool,
    ) -> Result<Effect> {
        let a = self.read(data.rn, fetch_pc)?;
        let sh = self.operand2(data.op2, fetch_pc, prev.c)?;
        let res = Alu::execute(op, a, sh.value);
        Ok(Effect::executed()
            .write(data.rd, res.value)
            .flags_if(set_flags, res.flags(prev, sh.carry)))
    }

    fn shift_op(
        &self,
        kind: ShiftKind,
        op: ShiftOp,
        fetch_pc: u32,
        prev: Flags,
        set_flags: bool,
    ) -> Result<Effect> {
        let value = self.read(op.rm, fetch_pc)?;
        let amount = self.shift_amount(op.amount, fetch_pc)?;
        let sh = shifts::execute(kind, value, amount, prev.c);
        Ok(Effect::executed()
            .write(op.rd, sh.value)
            .flags_if(set_flags, prev.with_result(sh.value).with_carry(sh.carry)))
    }

    fn effective_address(&self, addr: Address, fetch_pc: u32) -> Result<u32> {
        let base = self.read(addr.base, fetch_pc)?;
        Ok(match addr.offset {
            Offset::Immediate(off) => base.wrapping_add_signed(off),
            Offset::Register { rm, subtract } => {
                let off = self.read(rm, fetch_pc)?;
                if subtract {
                    base.wrapping_sub(off)
                } else {
                    base.wrapping_add(off)
                }
            }
        })
    }
}
