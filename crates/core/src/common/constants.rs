//! Memory layout and architectural constants.

use super::types::{Address, Word};

/// Number of general-purpose registers in RV32.
pub const NUM_REGISTERS: usize = 32;

/// Base address of the text (code) segment.
pub const TEXT_BASE: Address = 0x0000_0000;

/// Base address of the data segment.
pub const DATA_BASE: Address = 0x1000_0000;

/// Initial stack pointer value; the stack grows downward from here.
pub const STACK_TOP: Address = 0x7FFF_FFF0;

/// The canonical NOP encoding: `addi x0, x0, 0`.
pub const NOP: Word = 0x0000_0013;
