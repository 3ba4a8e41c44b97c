//! Pipeline latch structures for inter-stage communication.
//!
//! Four latches separate the five stages: IF/ID, ID/EX, EX/MEM, and
//! MEM/WB. Each carries a `valid` flag; `flush` resets a latch to a benign
//! default (a NOP, PC 0, invalid) so a flushed slot flows through the
//! remaining stages with no architectural effect.

use crate::common::{Address, Word, NOP};
use crate::isa::Instruction;

/// IF/ID latch: the fetched instruction word with its PC metadata.
#[derive(Clone, Debug)]
pub struct IfId {
    /// Raw instruction word fetched from memory.
    pub instruction: Word,
    /// PC the word was fetched at.
    pub pc: Address,
    /// PC + 4.
    pub next_pc: Address,
    /// Whether this latch holds a live instruction.
    pub valid: bool,
}

impl Default for IfId {
    fn default() -> Self {
        Self {
            instruction: NOP,
            pc: 0,
            next_pc: 4,
            valid: false,
        }
    }
}

impl IfId {
    /// Resets the latch to an invalid NOP slot.
    pub fn flush(&mut self) {
        *self = Self::default();
    }
}

/// ID/EX latch: the decoded instruction with its register read values.
#[derive(Clone, Debug, Default)]
pub struct IdEx {
    /// Decoded instruction.
    pub ins: Instruction,
    /// Value read from rs1 (unmodified by forwarding; forwarding applies
    /// in EX).
    pub rs1_val: Word,
    /// Value read from rs2.
    pub rs2_val: Word,
    /// PC of the instruction.
    pub pc: Address,
    /// PC + 4.
    pub next_pc: Address,
    /// Whether this latch holds a live instruction.
    pub valid: bool,
}

impl IdEx {
    /// Resets the latch to an invalid NOP slot (a bubble).
    pub fn flush(&mut self) {
        *self = Self::default();
    }
}

/// EX/MEM latch: execution results.
#[derive(Clone, Debug, Default)]
pub struct ExMem {
    /// Decoded instruction.
    pub ins: Instruction,
    /// ALU result; the effective address for memory operations, the
    /// return address for jumps.
    pub alu_result: Word,
    /// Forwarded rs2 value, used as store data.
    pub rs2_val: Word,
    /// Branch or jump target address.
    pub branch_target: Address,
    /// Whether the branch/jump was resolved taken.
    pub branch_taken: bool,
    /// Whether this latch holds a live instruction.
    pub valid: bool,
}

impl ExMem {
    /// Resets the latch to an invalid NOP slot.
    pub fn flush(&mut self) {
        *self = Self::default();
    }
}

/// MEM/WB latch: memory stage results.
#[derive(Clone, Debug, Default)]
pub struct MemWb {
    /// Decoded instruction.
    pub ins: Instruction,
    /// ALU result carried through for non-load writebacks.
    pub alu_result: Word,
    /// Data loaded from memory (for loads).
    pub mem_data: Word,
    /// Whether this latch holds a live instruction.
    pub valid: bool,
}

impl MemWb {
    /// Resets the latch to an invalid NOP slot.
    pub fn flush(&mut self) {
        *self = Self::default();
    }
}
