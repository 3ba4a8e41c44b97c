//! Instruction set definitions for RV32IM.
//!
//! This module groups everything that is a pure function of instruction
//! encodings: opcode and function-code tables, the decoder, the
//! disassembler, and ABI register naming.

/// ABI register names and name/index conversion.
pub mod abi;
/// Instruction decoder (32-bit word -> decoded form with control signals).
pub mod decode;
/// Instruction disassembler for listings, tracing, and test diagnostics.
pub mod disasm;
/// Decoded instruction record, field extraction, and operation enums.
pub mod instruction;
/// Base integer (RV32I) opcode and function-code constants.
pub mod rv32i;
/// Multiply/divide extension (RV32M) function-code constants.
pub mod rv32m;

pub use self::decode::decode;
pub use self::disasm::disassemble;
pub use self::instruction::{AluOp, Format, Instruction, InstructionBits, Kind};
