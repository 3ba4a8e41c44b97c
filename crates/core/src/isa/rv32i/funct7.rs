//! RV32I funct7 values.

/// Default function code for base R-type operations.
pub const DEFAULT: u32 = 0b0000000;

/// Alternate function code: SUB (with funct3 ADD_SUB) and SRA/SRAI (with
/// funct3 SRL_SRA).
pub const SUB_SRA: u32 = 0b0100000;

/// M-extension marker on the OP_REG opcode.
pub const M_EXTENSION: u32 = 0b0000001;
