//! Single-cycle execution engine.
//!
//! Every instruction completes in one tick: fetch, decode, execute, memory
//! access, and writeback all happen before the PC advances, so CPI is
//! exactly 1.0 and there are no hazards to manage. This is the reference
//! model the pipeline is compared against.

use crate::common::{Address, Byte, HalfWord, Word, TEXT_BASE};
use crate::core::alu;
use crate::core::gpr::Gpr;
use crate::core::memory::Memory;
use crate::core::StepOutcome;
use crate::isa::{decode, Instruction, Kind};

/// The single-cycle engine.
///
/// Owns only its own PC, counters, and breakpoints; memory and the
/// register file are borrowed per step so the pipelined engine can share
/// them.
pub struct Cpu {
    pc: Address,
    cycles: u64,
    instructions: u64,
    halted: bool,
    breakpoints: Vec<Address>,
    last_ins: Instruction,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Creates an engine ready to fetch from the text base.
    pub fn new() -> Self {
        Self {
            pc: TEXT_BASE,
            cycles: 0,
            instructions: 0,
            halted: false,
            breakpoints: Vec::new(),
            last_ins: Instruction::default(),
        }
    }

    /// Resets execution state and counters; breakpoints persist.
    pub fn reset(&mut self) {
        self.pc = TEXT_BASE;
        self.cycles = 0;
        self.instructions = 0;
        self.halted = false;
        self.last_ins = Instruction::default();
    }

    /// Executes one instruction.
    pub fn step(&mut self, mem: &mut Memory, regs: &mut Gpr) -> StepOutcome {
        if self.halted {
            return StepOutcome::Halted;
        }

        let raw = mem.read_word(self.pc);
        let ins = decode(raw, self.pc);
        log::trace!("step pc={:#010x} {}", self.pc, ins.text);
        self.last_ins = ins.clone();

        if ins.kind == Kind::Ecall {
            self.halted = true;
            self.cycles += 1;
            self.instructions += 1;
            return StepOutcome::Halted;
        }

        let rs1_val = regs.read(ins.rs1);
        let rs2_val = regs.read(ins.rs2);

        let alu_a = if ins.kind == Kind::Auipc {
            self.pc
        } else {
            rs1_val
        };
        let alu_b = if ins.alu_src {
            ins.imm as Word
        } else {
            rs2_val
        };
        let mut alu_result = alu::execute(ins.alu_op, alu_a, alu_b);

        let mut next_pc = self.pc.wrapping_add(4);
        if ins.jump {
            next_pc = match ins.kind {
                Kind::Jalr => rs1_val.wrapping_add(ins.imm as Word) & !1,
                _ => self.pc.wrapping_add(ins.imm as Word),
            };
            alu_result = self.pc.wrapping_add(4);
        } else if ins.branch && alu::branch_taken(ins.kind, rs1_val, rs2_val) {
            next_pc = self.pc.wrapping_add(ins.imm as Word);
        }

        let mem_result = self.memory_access(&ins, alu_result, rs2_val, mem);

        if ins.reg_write && ins.rd != 0 {
            let wb_result = if ins.mem_to_reg { mem_result } else { alu_result };
            regs.write(ins.rd, wb_result);
        }

        self.pc = next_pc;
        self.cycles += 1;
        self.instructions += 1;

        if self.has_breakpoint(self.pc) {
            StepOutcome::Paused
        } else {
            StepOutcome::Running
        }
    }

    /// Runs until the program halts or a breakpoint pauses execution.
    pub fn run(&mut self, mem: &mut Memory, regs: &mut Gpr) -> StepOutcome {
        loop {
            match self.step(mem, regs) {
                StepOutcome::Running => {}
                outcome => return outcome,
            }
        }
    }

    /// Typed memory access: loads produce the writeback value, stores
    /// commit to memory. Non-memory instructions pass the ALU result
    /// through.
    fn memory_access(
        &mut self,
        ins: &Instruction,
        alu_result: Word,
        rs2_val: Word,
        mem: &mut Memory,
    ) -> Word {
        let addr = alu_result;

        if ins.mem_read {
            return match ins.kind {
                Kind::Lb => mem.read_byte_signed(addr) as Word,
                Kind::Lh => mem.read_half_signed(addr) as Word,
                Kind::Lw => mem.read_word(addr),
                Kind::Lbu => mem.read_byte(addr) as Word,
                Kind::Lhu => mem.read_half(addr) as Word,
                _ => alu_result,
            };
        }

        if ins.mem_write {
            match ins.kind {
                Kind::Sb => mem.write_byte(addr, (rs2_val & 0xFF) as Byte),
                Kind::Sh => mem.write_half(addr, (rs2_val & 0xFFFF) as HalfWord),
                Kind::Sw => mem.write_word(addr, rs2_val),
                _ => {}
            }
        }

        alu_result
    }

    /// Current PC.
    pub fn pc(&self) -> Address {
        self.pc
    }

    /// Sets the PC.
    pub fn set_pc(&mut self, addr: Address) {
        self.pc = addr;
    }

    /// Total cycles executed (equals the instruction count).
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// Instructions executed.
    pub fn instruction_count(&self) -> u64 {
        self.instructions
    }

    /// Whether an ECALL has halted the engine.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The most recently executed instruction.
    pub fn last_instruction(&self) -> &Instruction {
        &self.last_ins
    }

    /// Registers a breakpoint at `addr` (no-op if already present).
    pub fn add_breakpoint(&mut self, addr: Address) {
        if !self.has_breakpoint(addr) {
            self.breakpoints.push(addr);
        }
    }

    /// Removes the breakpoint at `addr`.
    pub fn remove_breakpoint(&mut self, addr: Address) {
        self.breakpoints.retain(|&a| a != addr);
    }

    /// Removes every breakpoint.
    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// Whether `addr` carries a breakpoint.
    pub fn has_breakpoint(&self, addr: Address) -> bool {
        self.breakpoints.contains(&addr)
    }

    /// Registered breakpoints, in insertion order.
    pub fn breakpoints(&self) -> &[Address] {
        &self.breakpoints
    }
}
