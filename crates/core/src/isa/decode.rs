//! RV32IM instruction decoder.
//!
//! Decodes a 32-bit instruction word into the uniform [`Instruction`] form:
//! register indices, the sign-extended format-specific immediate, the
//! instruction kind, and the control signals the engines consume. Decoding
//! is a pure function of the word and the fetching PC; the PC only
//! influences metadata (it never alters the control signals or the
//! immediate).
//!
//! Unrecognized encodings decode to `Kind::Unknown` with no control bits
//! set, so the engines treat them as harmless bubbles rather than halting.

use crate::common::{sign_extend, Address, SignedWord, Word};
use crate::isa::instruction::{AluOp, Format, Instruction, InstructionBits, Kind};
use crate::isa::rv32i::{funct3, funct7, opcodes};
use crate::isa::rv32m::funct3 as m_funct3;
use crate::isa::disasm;

/// Decodes the immediate for I-type instructions (bits 31-20, 12-bit
/// sign-extended).
fn imm_i(raw: Word) -> SignedWord {
    (raw as SignedWord) >> 20
}

/// Decodes the immediate for S-type instructions: `{bits[31:25],
/// bits[11:7]}`, 12-bit sign-extended.
fn imm_s(raw: Word) -> SignedWord {
    let low = (raw >> 7) & 0x1F;
    let high = (raw >> 25) & 0x7F;
    sign_extend((high << 5) | low, 12)
}

/// Decodes the immediate for B-type instructions: `{bits[31], bits[7],
/// bits[30:25], bits[11:8], 0}`, 13-bit sign-extended. Bit 0 is always 0.
fn imm_b(raw: Word) -> SignedWord {
    let bit_12 = (raw >> 31) & 1;
    let bit_11 = (raw >> 7) & 1;
    let bits_10_5 = (raw >> 25) & 0x3F;
    let bits_4_1 = (raw >> 8) & 0xF;
    sign_extend(
        (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1),
        13,
    )
}

/// Decodes the immediate for U-type instructions (bits 31-12, pre-shifted).
fn imm_u(raw: Word) -> SignedWord {
    (raw & 0xFFFF_F000) as SignedWord
}

/// Decodes the immediate for J-type instructions: `{bits[31], bits[19:12],
/// bits[20], bits[30:21], 0}`, 21-bit sign-extended. Bit 0 is always 0.
fn imm_j(raw: Word) -> SignedWord {
    let bit_20 = (raw >> 31) & 1;
    let bits_19_12 = (raw >> 12) & 0xFF;
    let bit_11 = (raw >> 20) & 1;
    let bits_10_1 = (raw >> 21) & 0x3FF;
    sign_extend(
        (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1),
        21,
    )
}

/// Decodes a 32-bit instruction word fetched at `pc`.
pub fn decode(raw: Word, pc: Address) -> Instruction {
    let mut ins = Instruction {
        raw,
        pc,
        rd: raw.rd(),
        rs1: raw.rs1(),
        rs2: raw.rs2(),
        ..Instruction::default()
    };

    let opcode = raw.opcode();
    let f3 = raw.funct3();
    let f7 = raw.funct7();

    match opcode {
        opcodes::OP_LUI => {
            ins.kind = Kind::Lui;
            ins.format = Format::U;
            ins.imm = imm_u(raw);
            ins.reg_write = true;
            ins.alu_src = true;
            ins.alu_op = AluOp::PassB;
        }

        opcodes::OP_AUIPC => {
            // Operand A is the PC; the engines substitute it in EX.
            ins.kind = Kind::Auipc;
            ins.format = Format::U;
            ins.imm = imm_u(raw);
            ins.reg_write = true;
            ins.alu_src = true;
            ins.alu_op = AluOp::Add;
        }

        opcodes::OP_JAL => {
            ins.kind = Kind::Jal;
            ins.format = Format::J;
            ins.imm = imm_j(raw);
            ins.reg_write = true;
            ins.jump = true;
        }

        opcodes::OP_JALR => {
            ins.kind = Kind::Jalr;
            ins.format = Format::I;
            ins.imm = imm_i(raw);
            ins.reg_write = true;
            ins.jump = true;
            ins.alu_src = true;
            ins.alu_op = AluOp::Add;
        }

        opcodes::OP_BRANCH => {
            ins.format = Format::B;
            ins.imm = imm_b(raw);
            ins.branch = true;
            ins.kind = match f3 {
                funct3::BEQ => Kind::Beq,
                funct3::BNE => Kind::Bne,
                funct3::BLT => Kind::Blt,
                funct3::BGE => Kind::Bge,
                funct3::BLTU => Kind::Bltu,
                funct3::BGEU => Kind::Bgeu,
                _ => Kind::Unknown,
            };
        }

        opcodes::OP_LOAD => {
            ins.format = Format::I;
            ins.imm = imm_i(raw);
            ins.reg_write = true;
            ins.mem_read = true;
            ins.mem_to_reg = true;
            ins.alu_src = true;
            ins.alu_op = AluOp::Add;
            ins.kind = match f3 {
                funct3::LB => Kind::Lb,
                funct3::LH => Kind::Lh,
                funct3::LW => Kind::Lw,
                funct3::LBU => Kind::Lbu,
                funct3::LHU => Kind::Lhu,
                _ => Kind::Unknown,
            };
        }

        opcodes::OP_STORE => {
            ins.format = Format::S;
            ins.imm = imm_s(raw);
            ins.mem_write = true;
            ins.alu_src = true;
            ins.alu_op = AluOp::Add;
            ins.kind = match f3 {
                funct3::SB => Kind::Sb,
                funct3::SH => Kind::Sh,
                funct3::SW => Kind::Sw,
                _ => Kind::Unknown,
            };
        }

        opcodes::OP_IMM => {
            ins.format = Format::I;
            ins.imm = imm_i(raw);
            ins.reg_write = true;
            ins.alu_src = true;
            match f3 {
                funct3::ADD_SUB => {
                    ins.kind = Kind::Addi;
                    ins.alu_op = AluOp::Add;
                }
                funct3::SLT => {
                    ins.kind = Kind::Slti;
                    ins.alu_op = AluOp::Slt;
                }
                funct3::SLTU => {
                    ins.kind = Kind::Sltiu;
                    ins.alu_op = AluOp::Sltu;
                }
                funct3::XOR => {
                    ins.kind = Kind::Xori;
                    ins.alu_op = AluOp::Xor;
                }
                funct3::OR => {
                    ins.kind = Kind::Ori;
                    ins.alu_op = AluOp::Or;
                }
                funct3::AND => {
                    ins.kind = Kind::Andi;
                    ins.alu_op = AluOp::And;
                }
                funct3::SLL => {
                    // Shift amount lives in the rs2 field.
                    ins.kind = Kind::Slli;
                    ins.alu_op = AluOp::Sll;
                    ins.imm = ins.rs2 as SignedWord;
                }
                funct3::SRL_SRA => {
                    ins.imm = ins.rs2 as SignedWord;
                    if f7 & 0x20 != 0 {
                        ins.kind = Kind::Srai;
                        ins.alu_op = AluOp::Sra;
                    } else {
                        ins.kind = Kind::Srli;
                        ins.alu_op = AluOp::Srl;
                    }
                }
                _ => ins.kind = Kind::Unknown,
            }
        }

        opcodes::OP_REG => {
            ins.format = Format::R;
            ins.reg_write = true;
            if f7 == funct7::M_EXTENSION {
                let (kind, op) = match f3 {
                    m_funct3::MUL => (Kind::Mul, AluOp::Mul),
                    m_funct3::MULH => (Kind::Mulh, AluOp::Mulh),
                    m_funct3::MULHSU => (Kind::Mulhsu, AluOp::Mulhsu),
                    m_funct3::MULHU => (Kind::Mulhu, AluOp::Mulhu),
                    m_funct3::DIV => (Kind::Div, AluOp::Div),
                    m_funct3::DIVU => (Kind::Divu, AluOp::Divu),
                    m_funct3::REM => (Kind::Rem, AluOp::Rem),
                    m_funct3::REMU => (Kind::Remu, AluOp::Remu),
                    _ => (Kind::Unknown, AluOp::None),
                };
                ins.kind = kind;
                ins.alu_op = op;
            } else {
                let (kind, op) = match f3 {
                    funct3::ADD_SUB if f7 & 0x20 != 0 => (Kind::Sub, AluOp::Sub),
                    funct3::ADD_SUB => (Kind::Add, AluOp::Add),
                    funct3::SLL => (Kind::Sll, AluOp::Sll),
                    funct3::SLT => (Kind::Slt, AluOp::Slt),
                    funct3::SLTU => (Kind::Sltu, AluOp::Sltu),
                    funct3::XOR => (Kind::Xor, AluOp::Xor),
                    funct3::SRL_SRA if f7 & 0x20 != 0 => (Kind::Sra, AluOp::Sra),
                    funct3::SRL_SRA => (Kind::Srl, AluOp::Srl),
                    funct3::OR => (Kind::Or, AluOp::Or),
                    funct3::AND => (Kind::And, AluOp::And),
                    _ => (Kind::Unknown, AluOp::None),
                };
                ins.kind = kind;
                ins.alu_op = op;
            }
        }

        opcodes::OP_SYSTEM => {
            ins.format = Format::I;
            ins.imm = imm_i(raw);
            ins.kind = match ins.imm {
                0 => Kind::Ecall,
                1 => Kind::Ebreak,
                _ => Kind::Unknown,
            };
        }

        _ => {
            ins.kind = Kind::Unknown;
            ins.format = Format::Unknown;
        }
    }

    ins.text = disasm::disassemble(&ins);
    ins
}
