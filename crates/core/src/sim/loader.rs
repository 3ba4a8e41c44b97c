//! Program image placement.

use crate::asm::AsmResult;
use crate::common::STACK_TOP;
use crate::core::{Gpr, Memory};
use crate::isa::abi::REG_SP;

/// Writes an assembled program into memory and initializes the stack
/// pointer.
///
/// The text image lands word-by-word at its base, the data image
/// byte-by-byte at its base, and `sp` is set to the top of the stack
/// region.
pub fn install(mem: &mut Memory, regs: &mut Gpr, program: &AsmResult) {
    mem.write_block(program.text_base, &program.text);
    mem.write_bytes(program.data_base, &program.data);
    regs.write(REG_SP, STACK_TOP);

    log::debug!(
        "loaded {} instruction(s), {} data byte(s), entry {:#010x}",
        program.text.len(),
        program.data.len(),
        program.text_base
    );
}
