//! WB stage: register writeback and halt detection.

use crate::core::gpr::Gpr;
use crate::core::pipeline::Pipeline;
use crate::isa::Kind;

/// Writes the result into the register file and halts the engine when an
/// ECALL retires.
///
/// Running first in the cycle makes the written value visible to register
/// reads performed by this cycle's ID stage (write-first-half,
/// read-second-half behavior).
pub(crate) fn writeback_stage(pl: &mut Pipeline, regs: &mut Gpr) {
    if !pl.mem_wb.valid {
        return;
    }

    let ins = &pl.mem_wb.ins;

    if ins.reg_write && ins.rd != 0 {
        let result = if ins.mem_to_reg {
            pl.mem_wb.mem_data
        } else {
            pl.mem_wb.alu_result
        };
        log::trace!("WB  x{} <- {:#010x}", ins.rd, result);
        regs.write(ins.rd, result);
    }

    if ins.kind == Kind::Ecall {
        pl.halted = true;
    }
}
