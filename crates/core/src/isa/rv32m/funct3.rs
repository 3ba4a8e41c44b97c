//! RV32M funct3 values (all under OP_REG with funct7 = 0x01).

/// Multiply, low 32 bits of signed x signed.
pub const MUL: u32 = 0b000;
/// Multiply, high 32 bits of signed x signed.
pub const MULH: u32 = 0b001;
/// Multiply, high 32 bits of signed x unsigned.
pub const MULHSU: u32 = 0b010;
/// Multiply, high 32 bits of unsigned x unsigned.
pub const MULHU: u32 = 0b011;
/// Divide, signed.
pub const DIV: u32 = 0b100;
/// Divide, unsigned.
pub const DIVU: u32 = 0b101;
/// Remainder, signed.
pub const REM: u32 = 0b110;
/// Remainder, unsigned.
pub const REMU: u32 = 0b111;
