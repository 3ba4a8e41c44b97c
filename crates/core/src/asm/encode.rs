//! Instruction encoders.
//!
//! Bit packers for the six RV32 formats, used by the assembler, plus
//! re-encoding of a decoded instruction. The encoders and the decoder are
//! written from the same opcode/funct tables, so
//! `encode(&decode(w, pc)) == w` for every encodable word.

use crate::common::{SignedWord, Word};
use crate::isa::instruction::{Instruction, Kind};
use crate::isa::rv32i::{funct3, funct7, opcodes};
use crate::isa::rv32m::funct3 as m_funct3;

/// Packs an R-type instruction.
pub fn enc_r(op: u32, rd: usize, f3: u32, rs1: usize, rs2: usize, f7: u32) -> Word {
    (f7 << 25) | ((rs2 as u32) << 20) | ((rs1 as u32) << 15) | (f3 << 12) | ((rd as u32) << 7) | op
}

/// Packs an I-type instruction; the low 12 bits of `imm` are encoded.
pub fn enc_i(op: u32, rd: usize, f3: u32, rs1: usize, imm: SignedWord) -> Word {
    (((imm as u32) & 0xFFF) << 20) | ((rs1 as u32) << 15) | (f3 << 12) | ((rd as u32) << 7) | op
}

/// Packs an S-type instruction.
pub fn enc_s(op: u32, f3: u32, rs1: usize, rs2: usize, imm: SignedWord) -> Word {
    let imm = imm as u32;
    let hi = (imm >> 5) & 0x7F;
    let lo = imm & 0x1F;
    (hi << 25) | ((rs2 as u32) << 20) | ((rs1 as u32) << 15) | (f3 << 12) | (lo << 7) | op
}

/// Packs a B-type instruction; `imm` is a byte offset and must be even.
pub fn enc_b(op: u32, f3: u32, rs1: usize, rs2: usize, imm: SignedWord) -> Word {
    let imm = imm as u32;
    let b12 = (imm >> 12) & 1;
    let b11 = (imm >> 11) & 1;
    let b10_5 = (imm >> 5) & 0x3F;
    let b4_1 = (imm >> 1) & 0xF;
    (b12 << 31)
        | (b10_5 << 25)
        | ((rs2 as u32) << 20)
        | ((rs1 as u32) << 15)
        | (f3 << 12)
        | (b4_1 << 8)
        | (b11 << 7)
        | op
}

/// Packs a U-type instruction; `imm` carries the upper immediate already
/// shifted into bits 31-12.
pub fn enc_u(op: u32, rd: usize, imm: SignedWord) -> Word {
    ((imm as u32) & 0xFFFF_F000) | ((rd as u32) << 7) | op
}

/// Packs a J-type instruction; `imm` is a byte offset and must be even.
pub fn enc_j(op: u32, rd: usize, imm: SignedWord) -> Word {
    let imm = imm as u32;
    let b20 = (imm >> 20) & 1;
    let b19_12 = (imm >> 12) & 0xFF;
    let b11 = (imm >> 11) & 1;
    let b10_1 = (imm >> 1) & 0x3FF;
    (b20 << 31) | (b10_1 << 21) | (b11 << 20) | (b19_12 << 12) | ((rd as u32) << 7) | op
}

/// R-type funct3/funct7 pair for a kind, if it is an R-type operation.
fn r_funct(kind: Kind) -> Option<(u32, u32)> {
    Some(match kind {
        Kind::Add => (funct3::ADD_SUB, funct7::DEFAULT),
        Kind::Sub => (funct3::ADD_SUB, funct7::SUB_SRA),
        Kind::Sll => (funct3::SLL, funct7::DEFAULT),
        Kind::Slt => (funct3::SLT, funct7::DEFAULT),
        Kind::Sltu => (funct3::SLTU, funct7::DEFAULT),
        Kind::Xor => (funct3::XOR, funct7::DEFAULT),
        Kind::Srl => (funct3::SRL_SRA, funct7::DEFAULT),
        Kind::Sra => (funct3::SRL_SRA, funct7::SUB_SRA),
        Kind::Or => (funct3::OR, funct7::DEFAULT),
        Kind::And => (funct3::AND, funct7::DEFAULT),
        Kind::Mul => (m_funct3::MUL, funct7::M_EXTENSION),
        Kind::Mulh => (m_funct3::MULH, funct7::M_EXTENSION),
        Kind::Mulhsu => (m_funct3::MULHSU, funct7::M_EXTENSION),
        Kind::Mulhu => (m_funct3::MULHU, funct7::M_EXTENSION),
        Kind::Div => (m_funct3::DIV, funct7::M_EXTENSION),
        Kind::Divu => (m_funct3::DIVU, funct7::M_EXTENSION),
        Kind::Rem => (m_funct3::REM, funct7::M_EXTENSION),
        Kind::Remu => (m_funct3::REMU, funct7::M_EXTENSION),
        _ => return None,
    })
}

/// Re-encodes a decoded instruction bit-for-bit.
///
/// Returns `None` for `Kind::Unknown`; every other decoded kind is
/// encodable.
pub fn encode(ins: &Instruction) -> Option<Word> {
    if let Some((f3, f7)) = r_funct(ins.kind) {
        return Some(enc_r(opcodes::OP_REG, ins.rd, f3, ins.rs1, ins.rs2, f7));
    }

    Some(match ins.kind {
        Kind::Addi => enc_i(opcodes::OP_IMM, ins.rd, funct3::ADD_SUB, ins.rs1, ins.imm),
        Kind::Slti => enc_i(opcodes::OP_IMM, ins.rd, funct3::SLT, ins.rs1, ins.imm),
        Kind::Sltiu => enc_i(opcodes::OP_IMM, ins.rd, funct3::SLTU, ins.rs1, ins.imm),
        Kind::Xori => enc_i(opcodes::OP_IMM, ins.rd, funct3::XOR, ins.rs1, ins.imm),
        Kind::Ori => enc_i(opcodes::OP_IMM, ins.rd, funct3::OR, ins.rs1, ins.imm),
        Kind::Andi => enc_i(opcodes::OP_IMM, ins.rd, funct3::AND, ins.rs1, ins.imm),

        // Shift-immediates carry the shamt in the rs2 field; SRAI sets
        // funct7 bit 5 through the immediate's upper bits.
        Kind::Slli => enc_i(opcodes::OP_IMM, ins.rd, funct3::SLL, ins.rs1, ins.imm & 0x1F),
        Kind::Srli => enc_i(
            opcodes::OP_IMM,
            ins.rd,
            funct3::SRL_SRA,
            ins.rs1,
            ins.imm & 0x1F,
        ),
        Kind::Srai => enc_i(
            opcodes::OP_IMM,
            ins.rd,
            funct3::SRL_SRA,
            ins.rs1,
            ((funct7::SUB_SRA as SignedWord) << 5) | (ins.imm & 0x1F),
        ),

        Kind::Lb => enc_i(opcodes::OP_LOAD, ins.rd, funct3::LB, ins.rs1, ins.imm),
        Kind::Lh => enc_i(opcodes::OP_LOAD, ins.rd, funct3::LH, ins.rs1, ins.imm),
        Kind::Lw => enc_i(opcodes::OP_LOAD, ins.rd, funct3::LW, ins.rs1, ins.imm),
        Kind::Lbu => enc_i(opcodes::OP_LOAD, ins.rd, funct3::LBU, ins.rs1, ins.imm),
        Kind::Lhu => enc_i(opcodes::OP_LOAD, ins.rd, funct3::LHU, ins.rs1, ins.imm),

        Kind::Sb => enc_s(opcodes::OP_STORE, funct3::SB, ins.rs1, ins.rs2, ins.imm),
        Kind::Sh => enc_s(opcodes::OP_STORE, funct3::SH, ins.rs1, ins.rs2, ins.imm),
        Kind::Sw => enc_s(opcodes::OP_STORE, funct3::SW, ins.rs1, ins.rs2, ins.imm),

        Kind::Beq => enc_b(opcodes::OP_BRANCH, funct3::BEQ, ins.rs1, ins.rs2, ins.imm),
        Kind::Bne => enc_b(opcodes::OP_BRANCH, funct3::BNE, ins.rs1, ins.rs2, ins.imm),
        Kind::Blt => enc_b(opcodes::OP_BRANCH, funct3::BLT, ins.rs1, ins.rs2, ins.imm),
        Kind::Bge => enc_b(opcodes::OP_BRANCH, funct3::BGE, ins.rs1, ins.rs2, ins.imm),
        Kind::Bltu => enc_b(opcodes::OP_BRANCH, funct3::BLTU, ins.rs1, ins.rs2, ins.imm),
        Kind::Bgeu => enc_b(opcodes::OP_BRANCH, funct3::BGEU, ins.rs1, ins.rs2, ins.imm),

        Kind::Jal => enc_j(opcodes::OP_JAL, ins.rd, ins.imm),
        Kind::Jalr => enc_i(opcodes::OP_JALR, ins.rd, 0, ins.rs1, ins.imm),

        Kind::Lui => enc_u(opcodes::OP_LUI, ins.rd, ins.imm),
        Kind::Auipc => enc_u(opcodes::OP_AUIPC, ins.rd, ins.imm),

        Kind::Ecall => 0x0000_0073,
        Kind::Ebreak => 0x0010_0073,

        _ => return None,
    })
}
