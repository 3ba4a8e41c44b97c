//! Top-level simulator facade.
//!
//! Owns the memory, the register file, and both engines side-by-side; the
//! engines borrow the shared state per step. Loading a program (or an
//! explicit reset) reinitializes everything, so the two engines must not
//! be interleaved on the same program without an intervening reset.

use std::path::Path;

use serde::Deserialize;

use crate::asm::{self, AsmResult};
use crate::common::{Address, LoadError, Word};
use crate::config::Config;
use crate::core::{Cpu, Gpr, Memory, Pipeline, StepOutcome};
use crate::isa::abi::REG_A0;
use crate::sim::loader;
use crate::stats::RunStats;

/// Which microarchitectural model executes the program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One instruction per cycle, no hazards.
    #[default]
    Single,
    /// Five-stage pipeline with hazard handling.
    Pipeline,
}

/// The simulator: shared state plus both engines.
pub struct Simulator {
    /// Byte-addressable sparse memory, shared by both engines.
    pub mem: Memory,
    /// Register file, shared by both engines.
    pub regs: Gpr,
    /// Single-cycle engine.
    pub cpu: Cpu,
    /// Pipelined engine.
    pub pipeline: Pipeline,

    mode: Mode,
    program: Option<AsmResult>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Creates a simulator in single-cycle mode with no program loaded.
    pub fn new() -> Self {
        Self {
            mem: Memory::new(),
            regs: Gpr::new(),
            cpu: Cpu::new(),
            pipeline: Pipeline::new(),
            mode: Mode::Single,
            program: None,
        }
    }

    /// Creates a simulator configured from `config`.
    pub fn with_config(config: &Config) -> Self {
        let mut sim = Self::new();
        sim.mode = config.general.mode;
        sim.pipeline
            .set_hazard_detection(config.pipeline.hazard_detection);
        sim.pipeline.set_forwarding(config.pipeline.forwarding);
        sim
    }

    /// Assembles and loads a source file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        self.install(asm::assemble_file(path))
    }

    /// Assembles and loads source text.
    pub fn load_source(&mut self, source: &str) -> Result<(), LoadError> {
        self.install(asm::assemble(source))
    }

    fn install(&mut self, result: AsmResult) -> Result<(), LoadError> {
        if !result.success {
            return Err(LoadError {
                errors: result.errors,
            });
        }

        self.mem.reset();
        self.regs.reset();
        self.cpu.reset();
        self.pipeline.reset();
        loader::install(&mut self.mem, &mut self.regs, &result);
        self.program = Some(result);
        Ok(())
    }

    /// Resets both engines and re-installs the loaded program image.
    ///
    /// Returns false when no program has been loaded.
    pub fn reset(&mut self) -> bool {
        let program = match self.program.take() {
            Some(p) => p,
            None => return false,
        };

        self.mem.reset();
        self.regs.reset();
        self.cpu.reset();
        self.pipeline.reset();
        loader::install(&mut self.mem, &mut self.regs, &program);
        self.program = Some(program);
        true
    }

    /// Advances the active engine by one instruction (single-cycle) or one
    /// cycle (pipeline).
    pub fn step(&mut self) -> StepOutcome {
        match self.mode {
            Mode::Single => self.cpu.step(&mut self.mem, &mut self.regs),
            Mode::Pipeline => self.pipeline.cycle(&mut self.mem, &mut self.regs),
        }
    }

    /// Runs the active engine until halt or breakpoint.
    pub fn run(&mut self) -> StepOutcome {
        match self.mode {
            Mode::Single => self.cpu.run(&mut self.mem, &mut self.regs),
            Mode::Pipeline => self.pipeline.run(&mut self.mem, &mut self.regs),
        }
    }

    /// PC of the active engine.
    pub fn pc(&self) -> Address {
        match self.mode {
            Mode::Single => self.cpu.pc(),
            Mode::Pipeline => self.pipeline.pc(),
        }
    }

    /// Redirects the active engine to `addr`.
    pub fn set_pc(&mut self, addr: Address) {
        match self.mode {
            Mode::Single => self.cpu.set_pc(addr),
            Mode::Pipeline => self.pipeline.set_pc(addr),
        }
    }

    /// The active execution mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Selects the execution mode. State is not transferred between
    /// engines; reset before switching on a live program.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Whether the active engine has halted.
    pub fn is_halted(&self) -> bool {
        match self.mode {
            Mode::Single => self.cpu.is_halted(),
            Mode::Pipeline => self.pipeline.is_halted(),
        }
    }

    /// Enables or disables load-use stall insertion in the pipeline.
    pub fn set_hazard_detection(&mut self, enabled: bool) {
        self.pipeline.set_hazard_detection(enabled);
    }

    /// Enables or disables operand forwarding in the pipeline.
    pub fn set_forwarding(&mut self, enabled: bool) {
        self.pipeline.set_forwarding(enabled);
    }

    /// Registers a breakpoint with the active engine.
    pub fn add_breakpoint(&mut self, addr: Address) {
        match self.mode {
            Mode::Single => self.cpu.add_breakpoint(addr),
            Mode::Pipeline => self.pipeline.add_breakpoint(addr),
        }
    }

    /// Removes a breakpoint from the active engine.
    pub fn remove_breakpoint(&mut self, addr: Address) {
        match self.mode {
            Mode::Single => self.cpu.remove_breakpoint(addr),
            Mode::Pipeline => self.pipeline.remove_breakpoint(addr),
        }
    }

    /// Clears the active engine's breakpoints.
    pub fn clear_breakpoints(&mut self) {
        match self.mode {
            Mode::Single => self.cpu.clear_breakpoints(),
            Mode::Pipeline => self.pipeline.clear_breakpoints(),
        }
    }

    /// The loaded program, if any (symbols, source map, images).
    pub fn program(&self) -> Option<&AsmResult> {
        self.program.as_ref()
    }

    /// The program's result by convention: register a0 after halt.
    pub fn exit_value(&self) -> Word {
        self.regs.read(REG_A0)
    }

    /// Resolves a symbol or numeric string to an address.
    ///
    /// Tries the loaded program's symbol table first, then hex (`0x...`)
    /// and decimal forms.
    pub fn resolve_address(&self, s: &str) -> Option<Address> {
        if let Some(program) = &self.program {
            if let Some(&addr) = program.symbols.get(s) {
                return Some(addr);
            }
        }
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return Address::from_str_radix(hex, 16).ok();
        }
        s.parse::<Address>().ok()
    }

    /// Snapshot of the active engine's counters.
    pub fn stats(&self) -> RunStats {
        match self.mode {
            Mode::Single => RunStats {
                mode: Mode::Single,
                cycles: self.cpu.cycle_count(),
                instructions: self.cpu.instruction_count(),
                stalls: 0,
                flushes: 0,
                forwards: 0,
                hazard_detection: self.pipeline.hazard_detection(),
                forwarding: self.pipeline.forwarding(),
                mem_reads: self.mem.read_count(),
                mem_writes: self.mem.write_count(),
            },
            Mode::Pipeline => RunStats {
                mode: Mode::Pipeline,
                cycles: self.pipeline.cycle_count(),
                instructions: self.pipeline.instruction_count(),
                stalls: self.pipeline.stall_count(),
                flushes: self.pipeline.flush_count(),
                forwards: self.pipeline.forward_count(),
                hazard_detection: self.pipeline.hazard_detection(),
                forwarding: self.pipeline.forwarding(),
                mem_reads: self.mem.read_count(),
                mem_writes: self.mem.write_count(),
            },
        }
    }
}
