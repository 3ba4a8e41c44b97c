//! Single-cycle engine tests.

use crate::common::TestContext;
use rv32_core::core::StepOutcome;
use rv32_core::Mode;

const ARITH: &str = "
    addi x1, x0, 5
    addi x2, x0, 7
    add x3, x1, x2
    ecall
";

#[test]
fn arithmetic_program() {
    let mut ctx = TestContext::new(Mode::Single).load(ARITH);
    assert_eq!(ctx.run_bounded(100), StepOutcome::Halted);
    assert_eq!(ctx.reg(3), 12);
}

#[test]
fn cpi_is_exactly_one() {
    let mut ctx = TestContext::new(Mode::Single).load(ARITH);
    ctx.run_bounded(100);
    let stats = ctx.stats();
    assert_eq!(stats.cycles, stats.instructions, "single-cycle CPI = 1.0");
    assert_eq!(stats.instructions, 4, "three addi/add plus ecall");
}

#[test]
fn ecall_halts_and_counts() {
    let mut ctx = TestContext::new(Mode::Single).load("ecall\n");
    assert_eq!(ctx.run_bounded(10), StepOutcome::Halted);
    assert!(ctx.sim.cpu.is_halted());
    assert_eq!(ctx.stats().instructions, 1);

    // Further steps stay halted without advancing counters.
    assert_eq!(ctx.sim.step(), StepOutcome::Halted);
    assert_eq!(ctx.stats().instructions, 1);
}

#[test]
fn jalr_clears_low_bit_of_target() {
    // t0 = 9; jalr lands on (9 + 0) & !1 = 8, skipping nothing but
    // entering at an even address.
    let mut ctx = TestContext::new(Mode::Single).load(
        "
        addi t0, x0, 9
        jalr x0, t0, 0
        addi x1, x0, 111
        ecall
        ",
    );
    ctx.run_bounded(100);
    assert_eq!(ctx.reg(1), 111, "instruction at 8 executes");
}

#[test]
fn jal_writes_return_address() {
    let mut ctx = TestContext::new(Mode::Single).load(
        "
        jal ra, target
        nop
    target:
        ecall
        ",
    );
    ctx.run_bounded(100);
    assert_eq!(ctx.reg(1), 4, "ra = pc + 4 of the jal");
}

#[test]
fn branch_taken_and_not_taken() {
    let mut ctx = TestContext::new(Mode::Single).load(
        "
        addi x1, x0, 1
        beq x1, x0, skip       # not taken
        addi x2, x0, 2
        bne x1, x0, skip       # taken
        addi x3, x0, 3         # skipped
    skip:
        ecall
        ",
    );
    ctx.run_bounded(100);
    assert_eq!(ctx.reg(2), 2);
    assert_eq!(ctx.reg(3), 0);
}

#[test]
fn breakpoint_pauses_then_resumes() {
    let mut ctx = TestContext::new(Mode::Single).load(ARITH);
    ctx.sim.add_breakpoint(8);

    assert_eq!(ctx.run_bounded(100), StepOutcome::Paused);
    assert_eq!(ctx.sim.pc(), 8);
    assert_eq!(ctx.reg(2), 7, "state intact at the pause");

    assert_eq!(ctx.run_bounded(100), StepOutcome::Halted);
    assert_eq!(ctx.reg(3), 12);
}

#[test]
fn stores_and_loads_roundtrip_through_memory() {
    let mut ctx = TestContext::new(Mode::Single).load(
        "
        li t0, 0x10000000
        li t1, -2
        sw t1, 0(t0)
        lb t2, 0(t0)            # sign-extended byte: 0xFE -> -2
        lbu t3, 0(t0)           # zero-extended: 0xFE
        ecall
        ",
    );
    ctx.run_bounded(100);
    assert_eq!(ctx.reg(7) as i32, -2);
    assert_eq!(ctx.reg(28), 0xFE);
}

#[test]
fn unknown_instruction_is_a_bubble() {
    // 0xFFFFFFFF decodes to Unknown: no writeback, no memory access, no
    // halt; execution falls through to the next word.
    let mut ctx = TestContext::new(Mode::Single).load_words(&[
        0xFFFF_FFFF,
        crate::common::builder::addi(1, 0, 3),
        crate::common::builder::ecall(),
    ]);
    ctx.run_bounded(10);
    assert_eq!(ctx.reg(1), 3);
}
