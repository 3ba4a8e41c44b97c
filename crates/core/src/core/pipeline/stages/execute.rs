//! EX stage: ALU execution, forwarding, and branch resolution.

use crate::common::Word;
use crate::core::alu;
use crate::core::pipeline::hazards::{self, Forward};
use crate::core::pipeline::Pipeline;
use crate::isa::Kind;

/// Runs the ALU on (possibly forwarded) operands, resolves branches and
/// jumps, and populates EX/MEM.
///
/// Forwarding queries run against the EX/MEM latch and the WB-side copy of
/// MEM/WB taken at the start of the cycle (`wb_latch`), so the values seen
/// here are the ones latched when this cycle began. A taken branch or jump
/// redirects PC and flushes the two younger in-flight slots.
pub(crate) fn execute_stage(pl: &mut Pipeline) {
    if !pl.id_ex.valid {
        pl.ex_mem.flush();
        return;
    }

    let ins = pl.id_ex.ins.clone();

    let (fwd_a, fwd_b) = if pl.forwarding {
        (
            hazards::forward_source(ins.rs1, &pl.ex_mem, &pl.wb_latch),
            hazards::forward_source(ins.rs2, &pl.ex_mem, &pl.wb_latch),
        )
    } else {
        (Forward::None, Forward::None)
    };

    if fwd_a != Forward::None {
        pl.forwards += 1;
        log::trace!("EX  forward rs1=x{} from {:?}", ins.rs1, fwd_a);
    }
    if fwd_b != Forward::None {
        pl.forwards += 1;
        log::trace!("EX  forward rs2=x{} from {:?}", ins.rs2, fwd_b);
    }

    let rs1_val = hazards::forwarded_value(fwd_a, pl.id_ex.rs1_val, &pl.ex_mem, &pl.wb_latch);
    let rs2_val = hazards::forwarded_value(fwd_b, pl.id_ex.rs2_val, &pl.ex_mem, &pl.wb_latch);

    let alu_a = if ins.kind == Kind::Auipc {
        pl.id_ex.pc
    } else {
        rs1_val
    };
    let alu_b = if ins.alu_src {
        ins.imm as Word
    } else {
        rs2_val
    };

    let mut alu_result = alu::execute(ins.alu_op, alu_a, alu_b);

    let mut branch_target = 0;
    let mut branch_taken = false;

    if ins.jump {
        branch_target = match ins.kind {
            Kind::Jalr => rs1_val.wrapping_add(ins.imm as Word) & !1,
            _ => pl.id_ex.pc.wrapping_add(ins.imm as Word),
        };
        branch_taken = true;
        alu_result = pl.id_ex.pc.wrapping_add(4);
    } else if ins.branch && alu::branch_taken(ins.kind, rs1_val, rs2_val) {
        branch_target = pl.id_ex.pc.wrapping_add(ins.imm as Word);
        branch_taken = true;
    }

    log::trace!(
        "EX  pc={:#010x} {} result={:#010x}",
        pl.id_ex.pc,
        ins.text,
        alu_result
    );

    pl.ex_mem.ins = ins;
    pl.ex_mem.alu_result = alu_result;
    pl.ex_mem.rs2_val = rs2_val;
    pl.ex_mem.branch_target = branch_target;
    pl.ex_mem.branch_taken = branch_taken;
    pl.ex_mem.valid = true;

    // Mispredict (predict-not-taken): redirect and squash the two
    // instructions fetched past the branch.
    if branch_taken {
        log::trace!("EX  taken -> {:#010x}, flushing IF/ID and ID/EX", branch_target);
        pl.pc = branch_target;
        pl.next_pc = branch_target.wrapping_add(4);
        pl.if_id.flush();
        pl.id_ex.flush();
        pl.flushes += 2;
    }
}
