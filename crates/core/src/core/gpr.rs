//! General-purpose register file.
//!
//! Thirty-two 32-bit registers. Register x0 is hardwired to zero: reads
//! always return 0 and writes are ignored. An index outside 0-31 is a
//! programmer error and panics (the engines only ever produce 5-bit
//! indices).

use crate::common::{SignedWord, Word, NUM_REGISTERS};
use crate::isa::abi::reg_name;

/// The register file.
pub struct Gpr {
    regs: [Word; NUM_REGISTERS],
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates a register file with all registers zeroed.
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Zeroes every register.
    pub fn reset(&mut self) {
        self.regs = [0; NUM_REGISTERS];
    }

    /// Reads a register. Register x0 always reads as 0.
    pub fn read(&self, idx: usize) -> Word {
        if idx == 0 {
            0
        } else {
            self.regs[idx]
        }
    }

    /// Writes a register. Writes to x0 are ignored.
    pub fn write(&mut self, idx: usize, val: Word) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Prints all registers, four per row, with ABI names.
    pub fn dump(&self) {
        for row in 0..8 {
            let mut line = String::new();
            for col in 0..4 {
                let reg = row * 4 + col;
                line.push_str(&format!(
                    "x{:<2}/{:<4} = {:#010x}  ",
                    reg,
                    reg_name(reg),
                    self.regs[reg]
                ));
            }
            println!("  {}", line.trim_end());
        }
    }

    /// Prints a single register with both hex and signed decimal values.
    pub fn dump_reg(&self, idx: usize) {
        println!(
            "x{}/{} = {:#010x} ({})",
            idx,
            reg_name(idx),
            self.regs[idx],
            self.regs[idx] as SignedWord
        );
    }
}
