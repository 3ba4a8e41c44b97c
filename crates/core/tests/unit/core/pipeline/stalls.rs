//! Load-use stall behavior and cycle accounting.

use crate::common::TestContext;
use rv32_core::Mode;

const LOAD_USE: &str = "
    li t0, 0x10000000
    li t1, 42
    sw t1, 0(t0)
    lw t3, 0(t0)
    addi t4, t3, 1
    ecall
";

#[test]
fn load_use_pair_stalls_exactly_once() {
    let mut ctx = TestContext::new(Mode::Pipeline).load(LOAD_USE);
    ctx.run_bounded(100);

    assert_eq!(ctx.stats().stalls, 1, "one load-use pair, one stall");
    assert_eq!(ctx.reg(29), 43, "t4 = loaded 42 + 1");
}

#[test]
fn disabling_hazard_detection_skips_the_stall() {
    let mut ctx = TestContext::new(Mode::Pipeline).load(LOAD_USE);
    ctx.sim.set_hazard_detection(false);
    ctx.run_bounded(100);

    assert_eq!(ctx.stats().stalls, 0);
    // Without the stall the EX/MEM bypass hands the consumer the load's
    // ALU result, which is the effective address, not the loaded data.
    assert_eq!(ctx.reg(29), 0x1000_0001, "address + 1, not data + 1");
}

#[test]
fn hazard_off_and_forwarding_off_reads_stale_register() {
    let mut ctx = TestContext::new(Mode::Pipeline).load(LOAD_USE);
    ctx.sim.set_hazard_detection(false);
    ctx.sim.set_forwarding(false);
    ctx.run_bounded(100);

    assert_eq!(ctx.stats().stalls, 0);
    assert_eq!(ctx.reg(29), 1, "stale t3 = 0, so t4 = 1");
}

#[test]
fn independent_instruction_after_load_does_not_stall() {
    let mut ctx = TestContext::new(Mode::Pipeline).load(
        "
        li t0, 0x10000000
        lw t3, 0(t0)
        addi t4, x0, 5
        ecall
        ",
    );
    ctx.run_bounded(100);
    assert_eq!(ctx.stats().stalls, 0);
    assert_eq!(ctx.reg(29), 5);
}

#[test]
fn pipeline_conservation() {
    let mut ctx = TestContext::new(Mode::Pipeline).load(LOAD_USE);
    ctx.run_bounded(100);

    let stats = ctx.stats();
    assert!(stats.instructions <= stats.cycles);
    // Straight-line code: cycles = fill (4) + instructions + stalls.
    assert_eq!(stats.cycles, 4 + stats.instructions + stats.stalls);
}

#[test]
fn straight_line_cycle_count() {
    let mut ctx = TestContext::new(Mode::Pipeline).load(
        "
        addi x1, x0, 5
        addi x2, x0, 7
        add x3, x1, x2
        ecall
        ",
    );
    ctx.run_bounded(100);

    let stats = ctx.stats();
    assert_eq!(stats.instructions, 4);
    assert_eq!(stats.cycles, 8, "4 instructions + 4 cycles of fill");
}
