//! Execute stage.
//!
//! Selects operands through the forward muxes, drives the ALU, computes the
//! branch target, and issues the dcache request. The ALU result latched into
//! EX/MEM is substituted for the special cases:
//! - `lui` writes the immediate directly,
//! - `auipc` writes `pc + imm`,
//! - `jal`/`jalr` write the link address `pc + 4` (their targets travel in
//!   `branch_target`).

use crate::common::bits::mask;
use crate::core::cache::CacheReq;
use crate::core::pipeline::hazards::{ForwardSelect, ForwardSrc};
use crate::core::pipeline::latches::{ExMem, IdEx};
use crate::core::pipeline::signals::AluSrc;
use crate::core::units::aligner::AccessKind;
use crate::core::units::alu;

/// Everything execute produces in one cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExecuteOutput {
    /// Next EX/MEM latch value.
    pub ex_mem: ExMem,
    /// Request presented to the dcache's S0 stage.
    pub dcache_req: CacheReq,
}

/// Forwarded data inputs to the execute stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardData {
    /// Selections from the forward unit.
    pub select: ForwardSelect,
    /// MEM-stage result (EX/MEM `alu_result`).
    pub mem_data: u64,
    /// WB-stage write data.
    pub wb_data: u64,
}

fn forward_mux(select: ForwardSrc, regfile_data: u64, fwd: &ForwardData) -> u64 {
    match select {
        ForwardSrc::None => regfile_data,
        ForwardSrc::Mem => fwd.mem_data,
        ForwardSrc::Wb => fwd.wb_data,
    }
}

/// Runs the execute stage.
///
/// `mispredicted` is the correction state for this cycle (latched or via the
/// branch unit's same-cycle bypass); it squashes the outgoing dcache request
/// so a killed instruction produces no memory side effect.
pub fn run(
    id_ex: &IdEx,
    rs1_data: u64,
    rs2_data: u64,
    fwd: &ForwardData,
    mispredicted: bool,
    paddr_width: u32,
    core_width: u32,
) -> ExecuteOutput {
    let ctrl = &id_ex.ctrl;
    let paddr_mask = mask(paddr_width);

    let rs1_fwd = forward_mux(fwd.select.rs1, rs1_data, fwd);
    let rs2_fwd = forward_mux(fwd.select.rs2, rs2_data, fwd);

    let op0 = rs1_fwd;
    let op1 = match ctrl.ex.alu_src {
        AluSrc::Rs2 => rs2_fwd,
        AluSrc::Imm => id_ex.imm,
    };

    let is_mem = ctrl.mem.mem_read || ctrl.mem.mem_write;
    let alu_inst = alu::control(ctrl.ex.alu_op, ctrl.ex.funct3, ctrl.ex.funct7, is_mem || ctrl.ex.jalr);
    let (alu_result, alu_flags) = alu::execute(alu_inst, op0, op1, core_width);

    // Branch target: pc-relative by default, the ALU result (rs1 + imm) for
    // jalr.
    let branch_target = if ctrl.ex.jalr {
        alu_result & paddr_mask
    } else {
        ctrl.pc.wrapping_add(id_ex.imm) & paddr_mask
    };

    let link = ctrl.pc.wrapping_add(4) & paddr_mask;
    let result = if ctrl.ex.lui {
        id_ex.imm & mask(core_width)
    } else if ctrl.ex.auipc {
        ctrl.pc.wrapping_add(id_ex.imm) & mask(core_width)
    } else if ctrl.mem.jal {
        link
    } else {
        alu_result
    };

    // The execute stage owns the dcache request port.
    let dcache_req = CacheReq {
        valid: ctrl.valid && is_mem && !mispredicted,
        addr: alu_result & paddr_mask,
        kind: AccessKind::from_funct3(ctrl.ex.funct3),
        read: ctrl.mem.mem_read,
    };

    ExecuteOutput {
        ex_mem: ExMem {
            ctrl: *ctrl,
            branch_target,
            rs2_data,
            alu_result: result,
            alu_flags,
        },
        dcache_req,
    }
}
