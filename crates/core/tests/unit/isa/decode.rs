//! Decoder tests: field extraction, control-signal assignment, and
//! decoder purity.

use crate::common::builder;
use rv32_core::isa::{decode, AluOp, Format, Kind};

// ══════════════════════════════════════════════════════════
// 1. Representative encodings
// ══════════════════════════════════════════════════════════

#[test]
fn decode_addi() {
    // addi x1, x0, 5
    let ins = decode(0x0050_0093, 0);
    assert_eq!(ins.kind, Kind::Addi);
    assert_eq!(ins.format, Format::I);
    assert_eq!((ins.rd, ins.rs1, ins.imm), (1, 0, 5));
    assert!(ins.reg_write && ins.alu_src);
    assert!(!ins.mem_read && !ins.mem_write && !ins.branch && !ins.jump);
    assert_eq!(ins.alu_op, AluOp::Add);
}

#[test]
fn decode_add() {
    // add x3, x1, x2
    let ins = decode(0x0020_81B3, 0);
    assert_eq!(ins.kind, Kind::Add);
    assert_eq!(ins.format, Format::R);
    assert_eq!((ins.rd, ins.rs1, ins.rs2), (3, 1, 2));
    assert!(ins.reg_write && !ins.alu_src);
}

#[test]
fn decode_sub_vs_add_by_funct7() {
    let add = builder::add(3, 1, 2);
    let sub = builder::sub(3, 1, 2);
    assert_eq!(decode(add, 0).kind, Kind::Add);
    assert_eq!(decode(sub, 0).kind, Kind::Sub);
    assert_eq!(decode(sub, 0).alu_op, AluOp::Sub);
}

#[test]
fn decode_load() {
    // lw x6, 8(x5)
    let ins = decode(0x0082_A303, 0);
    assert_eq!(ins.kind, Kind::Lw);
    assert_eq!((ins.rd, ins.rs1, ins.imm), (6, 5, 8));
    assert!(ins.mem_read && ins.mem_to_reg && ins.reg_write && ins.alu_src);
    assert_eq!(ins.alu_op, AluOp::Add);
}

#[test]
fn decode_store() {
    // sw x6, 12(x5)
    let ins = decode(0x0062_A623, 0);
    assert_eq!(ins.kind, Kind::Sw);
    assert_eq!(ins.format, Format::S);
    assert_eq!((ins.rs1, ins.rs2, ins.imm), (5, 6, 12));
    assert!(ins.mem_write && !ins.reg_write && !ins.mem_to_reg);
}

#[test]
fn decode_branch() {
    // beq x1, x2, 8
    let ins = decode(0x0020_8463, 0);
    assert_eq!(ins.kind, Kind::Beq);
    assert_eq!(ins.format, Format::B);
    assert_eq!((ins.rs1, ins.rs2, ins.imm), (1, 2, 8));
    assert!(ins.branch && !ins.reg_write);
}

#[test]
fn decode_negative_branch_offset() {
    let ins = decode(builder::beq(1, 2, -4), 0);
    assert_eq!(ins.imm, -4);
}

#[test]
fn branch_and_jump_immediates_are_even() {
    for imm in [-4096, -2, 0, 2, 4094] {
        assert_eq!(decode(builder::beq(0, 0, imm), 0).imm % 2, 0);
    }
    for imm in [-1048576, -2, 0, 2, 1048574] {
        assert_eq!(decode(builder::jal(0, imm), 0).imm % 2, 0);
    }
}

#[test]
fn decode_lui_and_auipc() {
    // lui x5, 0x12345
    let lui = decode(0x1234_52B7, 0);
    assert_eq!(lui.kind, Kind::Lui);
    assert_eq!(lui.imm, 0x1234_5000);
    assert_eq!(lui.alu_op, AluOp::PassB);
    assert!(lui.alu_src);

    let auipc = decode(builder::auipc(5, 0x12345), 0x40);
    assert_eq!(auipc.kind, Kind::Auipc);
    assert_eq!(auipc.alu_op, AluOp::Add);
    assert_eq!(auipc.imm, 0x1234_5000);
}

#[test]
fn decode_jal() {
    // jal x1, 16
    let ins = decode(0x0100_00EF, 0);
    assert_eq!(ins.kind, Kind::Jal);
    assert_eq!(ins.format, Format::J);
    assert_eq!((ins.rd, ins.imm), (1, 16));
    assert!(ins.jump && ins.reg_write);
}

#[test]
fn decode_jalr() {
    // jalr x0, x1, 0 (ret)
    let ins = decode(0x0000_8067, 0);
    assert_eq!(ins.kind, Kind::Jalr);
    assert_eq!((ins.rd, ins.rs1, ins.imm), (0, 1, 0));
    assert!(ins.jump && ins.reg_write && ins.alu_src);
}

#[test]
fn decode_shift_immediates() {
    // srai x1, x2, 3
    let srai = decode(0x4031_5093, 0);
    assert_eq!(srai.kind, Kind::Srai);
    assert_eq!(srai.imm, 3, "imm holds the shamt");
    assert_eq!(srai.alu_op, AluOp::Sra);

    // srli x1, x2, 3
    let srli = decode(0x0031_5093, 0);
    assert_eq!(srli.kind, Kind::Srli);
    assert_eq!(srli.alu_op, AluOp::Srl);

    // slli x1, x2, 31
    let slli = decode(0x01F1_1093, 0);
    assert_eq!(slli.kind, Kind::Slli);
    assert_eq!(slli.imm, 31);
}

#[test]
fn decode_m_extension() {
    // mul x5, x6, x7
    let mul = decode(0x0273_02B3, 0);
    assert_eq!(mul.kind, Kind::Mul);
    assert_eq!(mul.alu_op, AluOp::Mul);
    assert_eq!(mul.format, Format::R);

    let div = decode(builder::mul(5, 6, 7) | (0b100 << 12), 0);
    assert_eq!(div.kind, Kind::Div);
}

#[test]
fn decode_system() {
    let ecall = decode(0x0000_0073, 0);
    assert_eq!(ecall.kind, Kind::Ecall);
    assert!(!ecall.reg_write && !ecall.mem_read && !ecall.mem_write);

    let ebreak = decode(0x0010_0073, 0);
    assert_eq!(ebreak.kind, Kind::Ebreak);
}

// ══════════════════════════════════════════════════════════
// 2. Unknown encodings
// ══════════════════════════════════════════════════════════

#[test]
fn unknown_opcode_has_no_control_effects() {
    let ins = decode(0xFFFF_FFFF, 0);
    assert_eq!(ins.kind, Kind::Unknown);
    assert_eq!(ins.format, Format::Unknown);
    assert!(!ins.reg_write && !ins.mem_read && !ins.mem_write);
    assert!(!ins.branch && !ins.jump);
    assert_eq!(ins.alu_op, AluOp::None);
}

#[test]
fn unknown_funct3_within_branch_opcode() {
    // funct3 = 0b010 is not a branch encoding.
    let raw = 0b1100011 | (0b010 << 12);
    assert_eq!(decode(raw, 0).kind, Kind::Unknown);
}

#[test]
fn zero_word_is_a_nop_like_unknown() {
    let ins = decode(0, 0);
    assert_eq!(ins.kind, Kind::Unknown);
    assert!(ins.is_nop());
}

// ══════════════════════════════════════════════════════════
// 3. Purity and invariants
// ══════════════════════════════════════════════════════════

#[test]
fn pc_only_influences_metadata() {
    let a = decode(0x0050_0093, 0);
    let b = decode(0x0050_0093, 0x1000);
    assert_eq!(a.pc, 0);
    assert_eq!(b.pc, 0x1000);

    assert_eq!(a.kind, b.kind);
    assert_eq!(a.imm, b.imm);
    assert_eq!(a.text, b.text);
    assert_eq!(
        (a.reg_write, a.mem_read, a.mem_write, a.branch, a.jump, a.alu_src),
        (b.reg_write, b.mem_read, b.mem_write, b.branch, b.jump, b.alu_src)
    );
}

#[test]
fn mem_read_implies_mem_to_reg() {
    let words = [
        builder::lw(1, 2, 0),
        builder::lbu(3, 4, 8),
        builder::sw(1, 2, 0),
        builder::add(1, 2, 3),
        0xFFFF_FFFF,
    ];
    for w in words {
        let ins = decode(w, 0);
        assert!(!ins.mem_read || ins.mem_to_reg, "mem_read implies mem_to_reg");
    }
}
