//! Hazard detection and forwarding selection.
//!
//! Pure predicates over the pipeline latches. The engine decides what to
//! do with the answers (stall, select a forwarding source, flush); nothing
//! here mutates state, which keeps every contract independently testable.

use crate::common::Word;
use crate::core::pipeline::latches::{ExMem, IdEx, MemWb};
use crate::isa::Instruction;

/// Source of an EX-stage operand value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Forward {
    /// Use the value read from the register file in ID.
    None,
    /// Bypass from the EX/MEM latch (ALU result of the previous
    /// instruction).
    ExMem,
    /// Bypass from the MEM/WB latch (ALU result or loaded data of the
    /// instruction two ahead).
    MemWb,
}

/// Checks for a load-use hazard between the instruction in ID/EX and the
/// next instruction (decoded from IF/ID).
///
/// A load-use hazard exists when the instruction in EX is a load whose
/// destination feeds either source of the instruction about to enter EX.
/// Forwarding cannot resolve it because the loaded value does not exist
/// until MEM; the pipeline must stall one cycle.
pub fn detect_load_use(id_ex: &IdEx, next_ins: &Instruction) -> bool {
    if !id_ex.valid || !id_ex.ins.mem_read || id_ex.ins.rd == 0 {
        return false;
    }
    next_ins.rs1 == id_ex.ins.rd || next_ins.rs2 == id_ex.ins.rd
}

/// Selects the forwarding source for a source register.
///
/// EX/MEM takes precedence over MEM/WB: the more recent writer wins.
/// Register 0 never forwards.
pub fn forward_source(rs: usize, ex_mem: &ExMem, mem_wb: &MemWb) -> Forward {
    if rs == 0 {
        return Forward::None;
    }

    if ex_mem.valid && ex_mem.ins.reg_write && ex_mem.ins.rd == rs {
        return Forward::ExMem;
    }

    if mem_wb.valid && mem_wb.ins.reg_write && mem_wb.ins.rd == rs {
        return Forward::MemWb;
    }

    Forward::None
}

/// Resolves a forwarding selection to the operand value.
///
/// The MEM/WB path selects loaded data for loads (`mem_to_reg`) and the
/// ALU result otherwise; `Forward::None` falls back to the latched
/// register read.
pub fn forwarded_value(fwd: Forward, reg_val: Word, ex_mem: &ExMem, mem_wb: &MemWb) -> Word {
    match fwd {
        Forward::ExMem => ex_mem.alu_result,
        Forward::MemWb => {
            if mem_wb.ins.mem_to_reg {
                mem_wb.mem_data
            } else {
                mem_wb.alu_result
            }
        }
        Forward::None => reg_val,
    }
}

/// Checks for a control hazard: a taken branch or jump resolved in EX/MEM.
pub fn detect_branch_hazard(ex_mem: &ExMem) -> bool {
    ex_mem.valid && ex_mem.branch_taken
}
