//! ID stage: decode and register read.

use crate::core::gpr::Gpr;
use crate::core::pipeline::Pipeline;
use crate::isa::decode;

/// Decodes IF/ID and reads both source registers into ID/EX.
///
/// Register reads happen here unconditionally and are not modified by
/// forwarding; forwarding reconciles them against in-flight writers in EX.
pub(crate) fn decode_stage(pl: &mut Pipeline, regs: &Gpr) {
    if !pl.if_id.valid {
        pl.id_ex.flush();
        return;
    }

    let ins = decode(pl.if_id.instruction, pl.if_id.pc);

    log::trace!("ID  pc={:#010x} {}", pl.if_id.pc, ins.text);

    pl.id_ex.rs1_val = regs.read(ins.rs1);
    pl.id_ex.rs2_val = regs.read(ins.rs2);
    pl.id_ex.pc = pl.if_id.pc;
    pl.id_ex.next_pc = pl.if_id.next_pc;
    pl.id_ex.ins = ins;
    pl.id_ex.valid = true;
}
