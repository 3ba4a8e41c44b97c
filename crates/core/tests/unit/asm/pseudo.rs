//! Pseudo-instruction expansion tests.
//!
//! Each expansion is checked through the decoder so the assertions state
//! the architectural meaning rather than raw bit patterns.

use rv32_core::asm::assemble;
use rv32_core::isa::{decode, Kind};

fn words(source: &str) -> Vec<u32> {
    let result = assemble(source);
    assert!(result.success, "should assemble: {:?}", result.errors);
    result.text
}

// ══════════════════════════════════════════════════════════
// 1. Register-move family
// ══════════════════════════════════════════════════════════

#[test]
fn nop_is_canonical() {
    assert_eq!(words("nop"), vec![0x0000_0013]);
}

#[test]
fn mv_expands_to_addi_zero() {
    let ins = decode(words("mv x5, x6")[0], 0);
    assert_eq!(ins.kind, Kind::Addi);
    assert_eq!((ins.rd, ins.rs1, ins.imm), (5, 6, 0));
}

#[test]
fn not_expands_to_xori_minus_one() {
    let ins = decode(words("not x5, x6")[0], 0);
    assert_eq!(ins.kind, Kind::Xori);
    assert_eq!((ins.rd, ins.rs1, ins.imm), (5, 6, -1));
}

#[test]
fn neg_expands_to_sub_from_zero() {
    let ins = decode(words("neg x5, x6")[0], 0);
    assert_eq!(ins.kind, Kind::Sub);
    assert_eq!((ins.rd, ins.rs1, ins.rs2), (5, 0, 6));
}

#[test]
fn comparison_pseudos() {
    let seqz = decode(words("seqz x5, x6")[0], 0);
    assert_eq!(seqz.kind, Kind::Sltiu);
    assert_eq!((seqz.rd, seqz.rs1, seqz.imm), (5, 6, 1));

    let snez = decode(words("snez x5, x6")[0], 0);
    assert_eq!(snez.kind, Kind::Sltu);
    assert_eq!((snez.rd, snez.rs1, snez.rs2), (5, 0, 6));

    let sltz = decode(words("sltz x5, x6")[0], 0);
    assert_eq!(sltz.kind, Kind::Slt);
    assert_eq!((sltz.rd, sltz.rs1, sltz.rs2), (5, 6, 0));

    let sgtz = decode(words("sgtz x5, x6")[0], 0);
    assert_eq!(sgtz.kind, Kind::Slt);
    assert_eq!((sgtz.rd, sgtz.rs1, sgtz.rs2), (5, 0, 6));
}

// ══════════════════════════════════════════════════════════
// 2. li
// ══════════════════════════════════════════════════════════

#[test]
fn li_small_is_single_addi() {
    let text = words("li x5, 100");
    assert_eq!(text.len(), 1);
    let ins = decode(text[0], 0);
    assert_eq!(ins.kind, Kind::Addi);
    assert_eq!((ins.rd, ins.rs1, ins.imm), (5, 0, 100));
}

#[test]
fn li_range_boundaries() {
    assert_eq!(words("li x5, -2048").len(), 1);
    assert_eq!(words("li x5, 2047").len(), 1);
    assert_eq!(words("li x5, 2048").len(), 2);
    assert_eq!(words("li x5, -2049").len(), 2);
}

#[test]
fn li_large_is_lui_addi_pair() {
    let text = words("li x5, 0x12345678");
    assert_eq!(text.len(), 2);

    let lui = decode(text[0], 0);
    assert_eq!(lui.kind, Kind::Lui);
    assert_eq!(lui.imm as u32, 0x1234_5000);

    let addi = decode(text[1], 4);
    assert_eq!(addi.kind, Kind::Addi);
    assert_eq!((addi.rd, addi.rs1, addi.imm), (5, 5, 0x678));
}

#[test]
fn li_negative_low_half_rounds_upper() {
    // 0x12345FFF: low 12 bits sign-extend to -1, so the upper part must
    // round up to compensate.
    let text = words("li x5, 0x12345FFF");
    let lui = decode(text[0], 0);
    let addi = decode(text[1], 4);
    assert_eq!(
        (lui.imm as u32).wrapping_add(addi.imm as u32),
        0x1234_5FFF,
        "lui + addi reconstruct the constant"
    );
}

#[test]
fn li_aligned_constant_omits_addi() {
    let text = words("li x5, 0x10000000");
    assert_eq!(text.len(), 1, "zero low half needs no addi");
    assert_eq!(decode(text[0], 0).kind, Kind::Lui);
}

// ══════════════════════════════════════════════════════════
// 3. la
// ══════════════════════════════════════════════════════════

#[test]
fn la_is_pc_relative_pair() {
    let result = assemble(
        "
        la x5, value
        ecall
    .data
    value:
        .word 7
        ",
    );
    assert!(result.success);
    assert_eq!(result.text.len(), 3);

    let auipc = decode(result.text[0], 0);
    let addi = decode(result.text[1], 4);
    assert_eq!(auipc.kind, Kind::Auipc);
    assert_eq!(addi.kind, Kind::Addi);

    // auipc at 0: pc + upper + lower must equal the data address.
    let resolved = (auipc.imm as u32).wrapping_add(addi.imm as u32);
    assert_eq!(resolved, result.symbols["value"]);
}

// ══════════════════════════════════════════════════════════
// 4. Jump family
// ══════════════════════════════════════════════════════════

#[test]
fn j_is_jal_zero() {
    let text = words("main:\n    j main");
    let ins = decode(text[0], 0);
    assert_eq!(ins.kind, Kind::Jal);
    assert_eq!((ins.rd, ins.imm), (0, 0));
}

#[test]
fn jr_and_ret() {
    let jr = decode(words("jr x5")[0], 0);
    assert_eq!(jr.kind, Kind::Jalr);
    assert_eq!((jr.rd, jr.rs1, jr.imm), (0, 5, 0));

    let ret = decode(words("ret")[0], 0);
    assert_eq!(ret.kind, Kind::Jalr);
    assert_eq!((ret.rd, ret.rs1, ret.imm), (0, 1, 0));
}

#[test]
fn call_links_and_tail_does_not() {
    let text = words(
        "
        call fn
        tail fn
    fn:
        nop
        ",
    );
    let call = decode(text[0], 0);
    assert_eq!((call.kind, call.rd, call.imm), (Kind::Jal, 1, 8));

    let tail = decode(text[1], 4);
    assert_eq!((tail.kind, tail.rd, tail.imm), (Kind::Jal, 0, 4));
}

// ══════════════════════════════════════════════════════════
// 5. Branch pseudos
// ══════════════════════════════════════════════════════════

#[test]
fn zero_comparison_branches() {
    let src = "
    target:
        beqz x5, target
        bnez x5, target
        blez x5, target
        bgez x5, target
        bltz x5, target
        bgtz x5, target
        ";
    let text = words(src);

    let beqz = decode(text[0], 0);
    assert_eq!((beqz.kind, beqz.rs1, beqz.rs2), (Kind::Beq, 5, 0));

    let bnez = decode(text[1], 4);
    assert_eq!((bnez.kind, bnez.rs1, bnez.rs2), (Kind::Bne, 5, 0));

    let blez = decode(text[2], 8);
    assert_eq!((blez.kind, blez.rs1, blez.rs2), (Kind::Bge, 0, 5));

    let bgez = decode(text[3], 12);
    assert_eq!((bgez.kind, bgez.rs1, bgez.rs2), (Kind::Bge, 5, 0));

    let bltz = decode(text[4], 16);
    assert_eq!((bltz.kind, bltz.rs1, bltz.rs2), (Kind::Blt, 5, 0));

    let bgtz = decode(text[5], 20);
    assert_eq!((bgtz.kind, bgtz.rs1, bgtz.rs2), (Kind::Blt, 0, 5));
}

#[test]
fn reversed_operand_branches() {
    let src = "
    target:
        bgt x5, x6, target
        ble x5, x6, target
        bgtu x5, x6, target
        bleu x5, x6, target
        ";
    let text = words(src);

    let bgt = decode(text[0], 0);
    assert_eq!((bgt.kind, bgt.rs1, bgt.rs2), (Kind::Blt, 6, 5));

    let ble = decode(text[1], 4);
    assert_eq!((ble.kind, ble.rs1, ble.rs2), (Kind::Bge, 6, 5));

    let bgtu = decode(text[2], 8);
    assert_eq!((bgtu.kind, bgtu.rs1, bgtu.rs2), (Kind::Bltu, 6, 5));

    let bleu = decode(text[3], 12);
    assert_eq!((bleu.kind, bleu.rs1, bleu.rs2), (Kind::Bgeu, 6, 5));
}

#[test]
fn branch_pseudos_accept_numeric_offsets() {
    let ins = decode(words("beqz x5, 16")[0], 0);
    assert_eq!(ins.imm, 16);
}
