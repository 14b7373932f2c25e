//! Pipeline latches.
//!
//! Each latch is a plain value updated atomically at the cycle boundary from
//! the upstream stage's computed next value, subject to the top pipeline's
//! stall/flush policy. A default-constructed latch is a bubble
//! (`valid = false`), which is also the reset value.

use crate::core::pipeline::signals::CtrlBundle;
use crate::core::units::alu::AluFlags;

/// A fetch-pipeline latch (IF2, IF3, and IF/ID all carry the same shape).
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchLatch {
    /// The latched fetch is live.
    pub valid: bool,
    /// PC of the fetch.
    pub pc: u64,
}

/// ID/EX latch: decoded control plus the generated immediate.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdEx {
    /// Control word (includes validity, raw instruction, and PC).
    pub ctrl: CtrlBundle,
    /// Sign-extended immediate.
    pub imm: u64,
}

/// EX/MEM latch: execution results.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExMem {
    /// Control word.
    pub ctrl: CtrlBundle,
    /// Computed branch target (`pc + imm`, or the ALU result for `jalr`).
    pub branch_target: u64,
    /// The rs2 read value, latched alongside.
    pub rs2_data: u64,
    /// ALU result (or substituted immediate/link value).
    pub alu_result: u64,
    /// ALU comparison flags.
    pub alu_flags: AluFlags,
}

/// MEM/WB latch: what writeback needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemWb {
    /// Control word.
    pub ctrl: CtrlBundle,
    /// ALU result forwarded past the memory stage.
    pub alu_result: u64,
}
