//! Writeback stage.
//!
//! Selects the register write address and data and drives the register-file
//! write port. Write data comes from the dcache response for loads
//! (`mem_to_reg`) and from the latched ALU result otherwise. Instructions
//! that update no register carry `write_reg = false` (and writes to x0 are
//! suppressed by the register file itself).

use crate::core::pipeline::latches::MemWb;
use crate::core::pipeline::signals::RegWrite;
use crate::isa;

/// Runs the writeback stage.
///
/// `mem_read_data` is the dcache's S2 response, which lines up with the
/// instruction now in WB.
pub fn run(mem_wb: &MemWb, mem_read_data: u64) -> RegWrite {
    let ctrl = &mem_wb.ctrl;

    RegWrite {
        addr: isa::rd(ctrl.inst),
        data: if ctrl.wb.mem_to_reg {
            mem_read_data
        } else {
            mem_wb.alu_result
        },
        en: ctrl.wb.write_reg && ctrl.valid,
    }
}
