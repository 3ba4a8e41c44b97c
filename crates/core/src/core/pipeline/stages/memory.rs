//! MEM stage: typed memory access.

use crate::common::{Byte, HalfWord, Word};
use crate::core::memory::Memory;
use crate::core::pipeline::Pipeline;
use crate::isa::Kind;

/// Performs the load or store for the instruction in EX/MEM and populates
/// MEM/WB. Committed instructions are counted here: everything that
/// reaches MEM and is neither UNKNOWN nor a NOP retires.
pub(crate) fn memory_stage(pl: &mut Pipeline, mem: &mut Memory) {
    if !pl.ex_mem.valid {
        pl.mem_wb.flush();
        return;
    }

    let ins = pl.ex_mem.ins.clone();
    let addr = pl.ex_mem.alu_result;
    let mut mem_data: Word = 0;

    if ins.mem_read {
        mem_data = match ins.kind {
            Kind::Lb => mem.read_byte_signed(addr) as Word,
            Kind::Lh => mem.read_half_signed(addr) as Word,
            Kind::Lw => mem.read_word(addr),
            Kind::Lbu => mem.read_byte(addr) as Word,
            Kind::Lhu => mem.read_half(addr) as Word,
            _ => 0,
        };
        log::trace!("MEM load {:#010x} -> {:#010x}", addr, mem_data);
    }

    if ins.mem_write {
        let val = pl.ex_mem.rs2_val;
        match ins.kind {
            Kind::Sb => mem.write_byte(addr, (val & 0xFF) as Byte),
            Kind::Sh => mem.write_half(addr, (val & 0xFFFF) as HalfWord),
            Kind::Sw => mem.write_word(addr, val),
            _ => {}
        }
        log::trace!("MEM store {:#010x} <- {:#010x}", addr, val);
    }

    pl.mem_wb.alu_result = pl.ex_mem.alu_result;
    pl.mem_wb.mem_data = mem_data;
    pl.mem_wb.valid = true;

    if ins.kind != Kind::Unknown && !ins.is_nop() {
        pl.instructions += 1;
    }
    pl.mem_wb.ins = ins;
}
