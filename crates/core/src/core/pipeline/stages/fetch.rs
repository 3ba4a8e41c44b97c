//! IF stage: instruction fetch.

use crate::core::memory::Memory;
use crate::core::pipeline::Pipeline;

/// Fetches the word at PC into IF/ID and advances PC.
pub(crate) fn fetch_stage(pl: &mut Pipeline, mem: &mut Memory) {
    pl.if_id.instruction = mem.read_word(pl.pc);
    pl.if_id.pc = pl.pc;
    pl.if_id.next_pc = pl.pc.wrapping_add(4);
    pl.if_id.valid = true;

    log::trace!(
        "IF  pc={:#010x} inst={:#010x}",
        pl.if_id.pc,
        pl.if_id.instruction
    );

    pl.pc = pl.next_pc;
    pl.next_pc = pl.pc.wrapping_add(4);
}
