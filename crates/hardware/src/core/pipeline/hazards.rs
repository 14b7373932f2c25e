//! Hazard detection and forwarding selection.
//!
//! Two small combinational units keep data dependencies correct:
//! 1. **HazardUnit:** detects the load-use case (a memory read in EX whose
//!    destination is a source of the instruction in ID) that forwarding
//!    cannot cover. The top pipeline answers with a one-cycle stall and a
//!    bubble into ID/EX.
//! 2. **ForwardUnit:** selects each EX operand among the register-file read,
//!    the MEM-stage result, and the WB-stage write data. MEM wins over WB
//!    (freshest value); x0 never forwards.

use crate::core::pipeline::latches::{ExMem, IdEx, MemWb};
use crate::isa;

/// Detects a load-use hazard between EX and the instruction being decoded.
///
/// The fetch-depth of the frontend absorbs longer dependencies through
/// forwarding; only the single-cycle load-use window needs a stall.
pub fn load_use_hazard(id_ex: &IdEx, id_inst: u32) -> bool {
    if !id_ex.ctrl.valid || !id_ex.ctrl.mem.mem_read {
        return false;
    }
    let ex_rd = isa::rd(id_ex.ctrl.inst);
    if ex_rd == 0 {
        return false;
    }
    ex_rd == isa::rs1(id_inst) || ex_rd == isa::rs2(id_inst)
}

/// Source selected for one EX operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForwardSrc {
    /// Use the register-file read value.
    #[default]
    None,
    /// Use the MEM-stage ALU result.
    Mem,
    /// Use the WB-stage write data.
    Wb,
}

/// Forward selections for both EX source operands.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardSelect {
    /// Selection for rs1.
    pub rs1: ForwardSrc,
    /// Selection for rs2.
    pub rs2: ForwardSrc,
}

fn select_one(rs: usize, mem_writes: bool, mem_rd: usize, wb_writes: bool, wb_rd: usize) -> ForwardSrc {
    if mem_writes && mem_rd != 0 && mem_rd == rs {
        ForwardSrc::Mem
    } else if wb_writes && wb_rd != 0 && wb_rd == rs {
        ForwardSrc::Wb
    } else {
        ForwardSrc::None
    }
}

/// Computes the forward selections for the instruction in EX against the
/// MEM and WB stages.
pub fn forward_select(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> ForwardSelect {
    let ex_rs1 = isa::rs1(id_ex.ctrl.inst);
    let ex_rs2 = isa::rs2(id_ex.ctrl.inst);

    let mem_writes = ex_mem.ctrl.valid && ex_mem.ctrl.wb.write_reg;
    let mem_rd = isa::rd(ex_mem.ctrl.inst);
    let wb_writes = mem_wb.ctrl.valid && mem_wb.ctrl.wb.write_reg;
    let wb_rd = isa::rd(mem_wb.ctrl.inst);

    ForwardSelect {
        rs1: select_one(ex_rs1, mem_writes, mem_rd, wb_writes, wb_rd),
        rs2: select_one(ex_rs2, mem_writes, mem_rd, wb_writes, wb_rd),
    }
}
