//! Decode stage.
//!
//! Consumes the IF/ID latch and the raw instruction word delivered by the
//! icache's S2 stage. Produces the ID/EX bundle (control + immediate), the
//! register-file read values, and the RAS push/pop control.
//!
//! When the latch is a bubble the instruction presented to the decoder is
//! the zero word, which matches no table row and therefore produces the
//! all-zero nop control.

use crate::core::pipeline::latches::{FetchLatch, IdEx};
use crate::core::pipeline::signals::{CtrlBundle, RasControl};
use crate::core::units::regfile::RegisterFile;
use crate::isa;
use crate::isa::instruction;
use crate::isa::opcodes;

/// Everything decode produces in one cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecodeOutput {
    /// Next ID/EX latch value.
    pub id_ex: IdEx,
    /// RAS control for the instruction in ID.
    pub ras: RasControl,
    /// Register-file read port 0 (rs1).
    pub rs1_data: u64,
    /// Register-file read port 1 (rs2).
    pub rs2_data: u64,
}

/// Runs the decode stage.
///
/// The register file has already absorbed this cycle's writeback (the
/// write-before-read bypass), so the read ports observe the freshest
/// architectural values.
pub fn run(if_id: &FetchLatch, raw_inst: u32, regfile: &RegisterFile) -> DecodeOutput {
    let inst = if if_id.valid { raw_inst } else { 0 };

    let mut ctrl = CtrlBundle {
        valid: if_id.valid,
        inst,
        pc: if_id.pc,
        ..CtrlBundle::default()
    };

    let mut imm = 0u64;
    if let Some(spec) = instruction::lookup(inst) {
        ctrl.ex = spec.ex;
        ctrl.mem = spec.mem;
        ctrl.wb = spec.wb;
        imm = instruction::immediate(inst, spec.format);
    }
    // funct3/funct7 pass through even for unmatched encodings; the ALU
    // control consumes them independently of the table.
    ctrl.ex.funct3 = isa::funct3(inst);
    ctrl.ex.funct7 = isa::funct7(inst);

    DecodeOutput {
        id_ex: IdEx { ctrl, imm },
        ras: ras_control(inst, if_id.pc),
        rs1_data: regfile.read(isa::rs1(inst)),
        rs2_data: regfile.read(isa::rs2(inst)),
    }
}

/// Call/return recognition per the standard link-register convention.
///
/// For `jalr`: push when rd is a link register; pop when rs1 is a link
/// register and either rd is not, or rd is a different link register
/// (the equal-register case is a re-entry, push only).
fn ras_control(inst: u32, pc: u64) -> RasControl {
    let mut ctrl = RasControl {
        push: false,
        pop: false,
        pc,
    };

    if isa::opcode(inst) == opcodes::JALR {
        let link_rd = isa::is_link_reg(isa::rd(inst));
        let link_rs1 = isa::is_link_reg(isa::rs1(inst));

        ctrl.push = link_rd;
        if !link_rd && link_rs1 {
            ctrl.pop = true;
        }
        if link_rd && link_rs1 && isa::rs1(inst) != isa::rd(inst) {
            ctrl.pop = true;
        }
    }

    ctrl
}

/// Whether `inst` is recognized as a function return.
///
/// Shared with the mem stage, which records the flag in the misprediction
/// correction so the BTB can steer future fetches at the RAS.
pub fn is_return(inst: u32) -> bool {
    let ctrl = ras_control(inst, 0);
    ctrl.pop
}
