//! RV32I base integer instruction set constants.

/// funct3 values for the base integer instructions.
pub mod funct3;
/// funct7 values for the base integer instructions.
pub mod funct7;
/// Major opcodes (bits 6-0).
pub mod opcodes;
