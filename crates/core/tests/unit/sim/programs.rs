//! End-to-end program runs through the simulator facade.

use crate::common::TestContext;
use rv32_core::common::STACK_TOP;
use rv32_core::core::StepOutcome;
use rv32_core::isa::abi::REG_A0;
use rv32_core::Mode;

const FACTORIAL: &str = include_str!("../../programs/factorial.s");
const FIBONACCI: &str = include_str!("../../programs/fibonacci.s");

#[test]
fn factorial_single_cycle() {
    let mut ctx = TestContext::new(Mode::Single).load(FACTORIAL);
    assert_eq!(ctx.run_bounded(10_000), StepOutcome::Halted);
    assert_eq!(ctx.sim.exit_value(), 120);
}

#[test]
fn factorial_pipeline() {
    let mut ctx = TestContext::new(Mode::Pipeline).load(FACTORIAL);
    assert_eq!(ctx.run_bounded(10_000), StepOutcome::Halted);
    assert_eq!(ctx.sim.exit_value(), 120);
}

#[test]
fn factorial_uses_the_stack() {
    let mut ctx = TestContext::new(Mode::Single).load(FACTORIAL);
    ctx.run_bounded(10_000);

    // The outermost frame saved ra (the address after `call factorial`,
    // which is 8) at STACK_TOP-4 and the argument 5 at STACK_TOP-8.
    assert_eq!(ctx.sim.mem.peek_word(STACK_TOP - 4), 8);
    assert_eq!(ctx.sim.mem.peek_word(STACK_TOP - 8), 5);
    // Deeper frames saved the descending arguments.
    assert_eq!(ctx.sim.mem.peek_word(STACK_TOP - 16), 4);
}

#[test]
fn fibonacci_single_cycle() {
    let mut ctx = TestContext::new(Mode::Single).load(FIBONACCI);
    ctx.run_bounded(10_000);
    assert_eq!(ctx.reg(REG_A0), 55);
}

#[test]
fn fibonacci_pipeline() {
    let mut ctx = TestContext::new(Mode::Pipeline).load(FIBONACCI);
    ctx.run_bounded(10_000);
    assert_eq!(ctx.reg(REG_A0), 55);
}

#[test]
fn stack_pointer_initialized_on_load() {
    let ctx = TestContext::new(Mode::Single).load("ecall");
    assert_eq!(ctx.reg(2), STACK_TOP);
}

#[test]
fn reset_restores_the_loaded_image() {
    let mut ctx = TestContext::new(Mode::Single).load(FACTORIAL);
    ctx.run_bounded(10_000);
    assert_eq!(ctx.sim.exit_value(), 120);

    assert!(ctx.sim.reset());
    assert_eq!(ctx.sim.pc(), 0);
    assert_eq!(ctx.reg(REG_A0), 0, "registers cleared");
    assert_eq!(ctx.reg(2), STACK_TOP, "sp reinitialized");

    ctx.run_bounded(10_000);
    assert_eq!(ctx.sim.exit_value(), 120, "program reruns identically");
}

#[test]
fn reset_without_program_is_refused() {
    let mut sim = rv32_core::Simulator::new();
    assert!(!sim.reset());
}

#[test]
fn load_failure_reports_errors() {
    let mut sim = rv32_core::Simulator::new();
    let err = sim.load_source("frobnicate").unwrap_err();
    assert_eq!(err.errors.len(), 1);
}

#[test]
fn mode_switch_with_reset_reruns_cleanly() {
    let mut ctx = TestContext::new(Mode::Single).load(FIBONACCI);
    ctx.run_bounded(10_000);
    assert_eq!(ctx.reg(REG_A0), 55);

    ctx.sim.set_mode(Mode::Pipeline);
    assert!(ctx.sim.reset());
    ctx.run_bounded(10_000);
    assert_eq!(ctx.reg(REG_A0), 55);
}

#[test]
fn symbols_resolve_addresses() {
    let ctx = TestContext::new(Mode::Single).load(FACTORIAL);
    let fact = ctx.sim.resolve_address("factorial").expect("symbol");
    assert_eq!(fact, 12, "factorial follows the three-word main");
    assert_eq!(ctx.sim.resolve_address("0x10"), Some(16));
    assert_eq!(ctx.sim.resolve_address("32"), Some(32));
    assert_eq!(ctx.sim.resolve_address("nonsense"), None);
}

#[test]
fn pipeline_counters_on_factorial() {
    let mut ctx = TestContext::new(Mode::Pipeline).load(FACTORIAL);
    ctx.run_bounded(10_000);

    let stats = ctx.stats();
    assert!(stats.instructions <= stats.cycles, "pipeline conservation");
    assert_eq!(stats.stalls, 4, "one load-use stall per multiply level");
    assert!(stats.flushes > 0, "calls and returns redirect fetch");
    assert!(stats.forwards > 0);
    assert!(stats.cpi() > 1.0);
}
