//! RV32I funct3 values, grouped by major opcode.

// OP_REG / OP_IMM arithmetic.
/// ADD/SUB (register) or ADDI (immediate).
pub const ADD_SUB: u32 = 0b000;
/// Shift left logical.
pub const SLL: u32 = 0b001;
/// Set less than (signed).
pub const SLT: u32 = 0b010;
/// Set less than (unsigned).
pub const SLTU: u32 = 0b011;
/// Exclusive OR.
pub const XOR: u32 = 0b100;
/// Shift right logical/arithmetic (distinguished by funct7).
pub const SRL_SRA: u32 = 0b101;
/// Inclusive OR.
pub const OR: u32 = 0b110;
/// Bitwise AND.
pub const AND: u32 = 0b111;

// OP_LOAD.
/// Load byte, sign-extended.
pub const LB: u32 = 0b000;
/// Load half-word, sign-extended.
pub const LH: u32 = 0b001;
/// Load word.
pub const LW: u32 = 0b010;
/// Load byte, zero-extended.
pub const LBU: u32 = 0b100;
/// Load half-word, zero-extended.
pub const LHU: u32 = 0b101;

// OP_STORE.
/// Store byte.
pub const SB: u32 = 0b000;
/// Store half-word.
pub const SH: u32 = 0b001;
/// Store word.
pub const SW: u32 = 0b010;

// OP_BRANCH.
/// Branch if equal.
pub const BEQ: u32 = 0b000;
/// Branch if not equal.
pub const BNE: u32 = 0b001;
/// Branch if less than (signed).
pub const BLT: u32 = 0b100;
/// Branch if greater or equal (signed).
pub const BGE: u32 = 0b101;
/// Branch if less than (unsigned).
pub const BLTU: u32 = 0b110;
/// Branch if greater or equal (unsigned).
pub const BGEU: u32 = 0b111;
