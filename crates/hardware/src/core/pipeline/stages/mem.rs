//! Mem stage.
//!
//! Passes control and the ALU result forward and resolves control flow.
//! The branch outcome is derived from the SUB flags latched by execute:
//!
//! | kind | taken when |
//! |------|------------|
//! | EQ   | zero       |
//! | NEQ  | ¬zero      |
//! | LT   | sign       |
//! | GEQ  | ¬sign      |
//! | LTU  | overflow   |
//! | GEQU | ¬overflow  |
//!
//! `overflow` is the carry out of the width-extended subtract, i.e. the
//! unsigned borrow, which is what makes the LTU/GEQU rows correct.

use crate::core::pipeline::latches::{ExMem, MemWb};
use crate::core::pipeline::signals::{BranchKind, BranchResolution};
use crate::core::pipeline::stages::decode;
use crate::core::units::alu::AluFlags;

/// Everything the mem stage produces in one cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemOutput {
    /// Next MEM/WB latch value.
    pub mem_wb: MemWb,
    /// Resolved branch outcome for the branch unit.
    pub branch: BranchResolution,
}

fn resolve(kind: BranchKind, flags: &AluFlags) -> bool {
    match kind {
        BranchKind::Eq => flags.zero,
        BranchKind::Neq => !flags.zero,
        BranchKind::Lt => flags.sign,
        BranchKind::Geq => !flags.sign,
        BranchKind::Ltu => flags.overflow,
        BranchKind::Gequ => !flags.overflow,
    }
}

/// Runs the mem stage.
pub fn run(ex_mem: &ExMem) -> MemOutput {
    let ctrl = &ex_mem.ctrl;

    let is_ctrl_change = ctrl.mem.branch || ctrl.mem.jal;
    let resolved = ctrl.mem.branch && resolve(ctrl.mem.branch_kind, &ex_mem.alu_flags);
    let taken = resolved || ctrl.mem.jal;

    let target = if (ctrl.mem.branch && resolved) || ctrl.mem.jal {
        ex_mem.branch_target
    } else {
        ctrl.pc.wrapping_add(4)
    };

    MemOutput {
        mem_wb: MemWb {
            ctrl: *ctrl,
            alu_result: ex_mem.alu_result,
        },
        branch: BranchResolution {
            valid: ctrl.valid && is_ctrl_change,
            taken,
            target,
            is_return: decode::is_return(ctrl.inst),
        },
    }
}
