//! Five-stage pipelined execution engine.
//!
//! Classic IF/ID/EX/MEM/WB pipeline with four inter-stage latches. Within
//! a cycle the stages run in reverse latch order (WB, MEM, EX, ID, IF) so
//! each stage consumes the value its input latch held when the cycle
//! began; this simulates parallel stage operation with single-threaded
//! updates and requires no locking. Hazard detection and forwarding are
//! user-controllable so their absence is observable: with forwarding off,
//! RAW hazards read stale register values; with hazard detection off, the
//! load-use stall is suppressed. Control flushes are always honored.

/// Hazard detection and forwarding selection (pure predicates).
pub mod hazards;
/// Inter-stage latch structures.
pub mod latches;
mod stages;

use crate::common::{Address, TEXT_BASE};
use crate::core::gpr::Gpr;
use crate::core::memory::Memory;
use crate::core::StepOutcome;
use crate::isa::decode;
use self::latches::{ExMem, IdEx, IfId, MemWb};

/// The pipelined engine.
///
/// Owns only pipeline state; memory and the register file are borrowed per
/// cycle so the single-cycle engine can share them.
pub struct Pipeline {
    pub(crate) pc: Address,
    pub(crate) next_pc: Address,

    pub(crate) if_id: IfId,
    pub(crate) id_ex: IdEx,
    pub(crate) ex_mem: ExMem,
    pub(crate) mem_wb: MemWb,
    /// Copy of MEM/WB as of the start of the current cycle. MEM overwrites
    /// the live latch before EX runs; forwarding must see the value that
    /// was latched at the cycle boundary, and this copy preserves it.
    pub(crate) wb_latch: MemWb,

    pub(crate) hazard_detection: bool,
    pub(crate) forwarding: bool,
    pub(crate) halted: bool,
    pub(crate) stalled: bool,

    pub(crate) cycles: u64,
    pub(crate) instructions: u64,
    pub(crate) stalls: u64,
    pub(crate) flushes: u64,
    pub(crate) forwards: u64,

    breakpoints: Vec<Address>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Creates a pipeline with both hazard detection and forwarding
    /// enabled, ready to fetch from the text base.
    pub fn new() -> Self {
        Self {
            pc: TEXT_BASE,
            next_pc: TEXT_BASE.wrapping_add(4),
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            wb_latch: MemWb::default(),
            hazard_detection: true,
            forwarding: true,
            halted: false,
            stalled: false,
            cycles: 0,
            instructions: 0,
            stalls: 0,
            flushes: 0,
            forwards: 0,
            breakpoints: Vec::new(),
        }
    }

    /// Resets execution state and counters; breakpoints and the hazard
    /// toggles persist across resets.
    pub fn reset(&mut self) {
        self.pc = TEXT_BASE;
        self.next_pc = TEXT_BASE.wrapping_add(4);
        self.halted = false;
        self.stalled = false;
        self.cycles = 0;
        self.instructions = 0;
        self.stalls = 0;
        self.flushes = 0;
        self.forwards = 0;
        self.if_id.flush();
        self.id_ex.flush();
        self.ex_mem.flush();
        self.mem_wb.flush();
        self.wb_latch.flush();
    }

    /// Advances the pipeline by one cycle.
    ///
    /// On a load-use stall the back half of the pipeline (WB, MEM, EX)
    /// drains forward, a bubble replaces ID/EX, and IF/ID and the PC hold
    /// still. Otherwise all five stages run in reverse latch order.
    pub fn cycle(&mut self, mem: &mut Memory, regs: &mut Gpr) -> StepOutcome {
        if self.halted {
            return StepOutcome::Halted;
        }

        self.stalled = if self.hazard_detection {
            let next_ins = decode(self.if_id.instruction, self.if_id.pc);
            hazards::detect_load_use(&self.id_ex, &next_ins)
        } else {
            false
        };

        if self.stalled {
            self.stalls += 1;
            log::trace!("load-use hazard: stalling (bubble into ID/EX)");

            stages::writeback_stage(self, regs);
            self.wb_latch = self.mem_wb.clone();
            stages::memory_stage(self, mem);
            stages::execute_stage(self);
            self.id_ex.flush();
        } else {
            stages::writeback_stage(self, regs);
            self.wb_latch = self.mem_wb.clone();
            stages::memory_stage(self, mem);
            stages::execute_stage(self);
            stages::decode_stage(self, regs);
            stages::fetch_stage(self, mem);
        }

        self.cycles += 1;

        if self.has_breakpoint(self.pc) {
            return StepOutcome::Paused;
        }
        if self.halted {
            StepOutcome::Halted
        } else {
            StepOutcome::Running
        }
    }

    /// Runs until the program halts or a breakpoint pauses execution.
    pub fn run(&mut self, mem: &mut Memory, regs: &mut Gpr) -> StepOutcome {
        loop {
            match self.cycle(mem, regs) {
                StepOutcome::Running => {}
                outcome => return outcome,
            }
        }
    }

    /// Current fetch PC.
    pub fn pc(&self) -> Address {
        self.pc
    }

    /// Redirects fetch to `addr`.
    pub fn set_pc(&mut self, addr: Address) {
        self.pc = addr;
        self.next_pc = addr.wrapping_add(4);
    }

    /// Enables or disables load-use stall insertion.
    pub fn set_hazard_detection(&mut self, enabled: bool) {
        self.hazard_detection = enabled;
    }

    /// Enables or disables EX/MEM and MEM/WB operand forwarding.
    pub fn set_forwarding(&mut self, enabled: bool) {
        self.forwarding = enabled;
    }

    /// Whether load-use stalls are inserted.
    pub fn hazard_detection(&self) -> bool {
        self.hazard_detection
    }

    /// Whether operand forwarding is active.
    pub fn forwarding(&self) -> bool {
        self.forwarding
    }

    /// Total cycles executed.
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// Instructions committed (counted at MEM).
    pub fn instruction_count(&self) -> u64 {
        self.instructions
    }

    /// Load-use stalls inserted.
    pub fn stall_count(&self) -> u64 {
        self.stalls
    }

    /// Latch slots squashed by taken branches (two per redirect).
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    /// Operand values satisfied by forwarding.
    pub fn forward_count(&self) -> u64 {
        self.forwards
    }

    /// Whether an ECALL has retired.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Whether the last cycle stalled.
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    /// The IF/ID latch (for inspection).
    pub fn if_id(&self) -> &IfId {
        &self.if_id
    }

    /// The ID/EX latch (for inspection).
    pub fn id_ex(&self) -> &IdEx {
        &self.id_ex
    }

    /// The EX/MEM latch (for inspection).
    pub fn ex_mem(&self) -> &ExMem {
        &self.ex_mem
    }

    /// The MEM/WB latch (for inspection).
    pub fn mem_wb(&self) -> &MemWb {
        &self.mem_wb
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

    /// Prints a per-stage view of the in-flight instructions.
    pub fn print_state(&self) {
        println!("Cycle {}:", self.cycles);

        let print_stage = |name: &str, valid: bool, pc: Address, text: &str| {
            if valid {
                println!("  {}: [{:#010x}] {}", name, pc, text);
            } else {
                println!("  {}: (bubble)", name);
            }
        };

        let if_text = decode(self.if_id.instruction, self.if_id.pc).text;
        print_stage("IF ", self.if_id.valid, self.if_id.pc, &if_text);
        print_stage("ID ", self.id_ex.valid, self.id_ex.pc, &self.id_ex.ins.text);
        print_stage(
            "EX ",
            self.ex_mem.valid,
            self.ex_mem.ins.pc,
            &self.ex_mem.ins.text,
        );
        print_stage(
            "MEM",
            self.mem_wb.valid,
            self.mem_wb.ins.pc,
            &self.mem_wb.ins.text,
        );

        if self.mem_wb.valid && self.mem_wb.ins.reg_write {
            let result = if self.mem_wb.ins.mem_to_reg {
                self.mem_wb.mem_data
            } else {
                self.mem_wb.alu_result
            };
            println!(
                "  WB : {} <- {:#010x}",
                crate::isa::abi::reg_name(self.mem_wb.ins.rd),
                result
            );
        } else {
            println!("  WB : (none)");
        }
    }
}
