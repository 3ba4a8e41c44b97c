//! Instruction disassembler.
//!
//! Converts a decoded instruction into a human-readable mnemonic string
//! for listings, debug tracing, and test diagnostics.

use crate::common::Word;
use crate::isa::abi::reg_name;
use crate::isa::instruction::{Format, Instruction, Kind};

/// Disassembles a decoded instruction into a human-readable string.
///
/// Returns a mnemonic like `"add a0, a1, a2"` or `"unknown"` for
/// unrecognized encodings.
pub fn disassemble(ins: &Instruction) -> String {
    let name = ins.kind.mnemonic();

    match ins.format {
        Format::R => format!(
            "{} {}, {}, {}",
            name,
            reg_name(ins.rd),
            reg_name(ins.rs1),
            reg_name(ins.rs2)
        ),

        Format::I => {
            if ins.mem_read {
                format!(
                    "{} {}, {}({})",
                    name,
                    reg_name(ins.rd),
                    ins.imm,
                    reg_name(ins.rs1)
                )
            } else if matches!(ins.kind, Kind::Ecall | Kind::Ebreak) {
                name.to_string()
            } else {
                format!(
                    "{} {}, {}, {}",
                    name,
                    reg_name(ins.rd),
                    reg_name(ins.rs1),
                    ins.imm
                )
            }
        }

        Format::S => format!(
            "{} {}, {}({})",
            name,
            reg_name(ins.rs2),
            ins.imm,
            reg_name(ins.rs1)
        ),

        Format::B => format!(
            "{} {}, {}, {}",
            name,
            reg_name(ins.rs1),
            reg_name(ins.rs2),
            ins.imm
        ),

        Format::U => format!(
            "{} {}, {:#07x}",
            name,
            reg_name(ins.rd),
            ((ins.imm as Word) >> 12) & 0xFFFFF
        ),

        Format::J => format!("{} {}, {}", name, reg_name(ins.rd), ins.imm),

        Format::Unknown => "unknown".to_string(),
    }
}
