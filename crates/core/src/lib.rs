//! RV32IM teaching simulator library.
//!
//! This crate implements an RV32IM instruction-set simulator built for
//! teaching pipeline behavior. It provides:
//! 1. **Assembler:** Two-pass assembly of the GNU-style RV32IM subset
//!    (labels, directives, pseudo-instructions) into machine code.
//! 2. **ISA:** Bit-exact decoding into a uniform control-signal form, plus
//!    encoding helpers and a disassembler.
//! 3. **Engines:** A single-cycle engine and a classic five-stage pipeline
//!    with load-use stall detection, EX/MEM and MEM/WB forwarding, and
//!    branch-taken flushes, each of which can be toggled off to observe the
//!    resulting hazards.
//! 4. **Simulation:** A facade owning memory, registers, and both engines,
//!    with program loading, breakpoints, and statistics collection.

/// Assembler (two-pass), operand parsing, and instruction encoders.
pub mod asm;
/// Common types and constants (words, addresses, memory layout, errors).
pub mod common;
/// Simulator configuration (defaults, JSON deserialization).
pub mod config;
/// CPU core (ALU, register file, memory, single-cycle and pipeline engines).
pub mod core;
/// Instruction set (opcode tables, decode, disassembly, ABI names).
pub mod isa;
/// Simulator facade and program loader.
pub mod sim;
/// Run-statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Execution mode selector (single-cycle or pipelined).
pub use crate::sim::Mode;
/// Top-level simulator; owns memory, registers, and both engines.
pub use crate::sim::Simulator;
