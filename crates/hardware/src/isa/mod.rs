//! Instruction set definitions.
//!
//! This module holds everything the decode stage needs to know about the
//! base integer subset:
//! 1. **Opcodes:** the major opcode constants.
//! 2. **Fields:** fixed-position field extraction from a raw 32-bit word.
//! 3. **Table:** the static instruction table mapping wildcard patterns to
//!    pre-packaged control bundles, plus immediate generation by format.

/// Major opcode constants.
pub mod opcodes;

/// Instruction formats, patterns, immediates, and the decode table.
pub mod instruction;

/// The canonical nop encoding (`addi x0, x0, 0`).
pub const NOP: u32 = 0x0000_0013;

/// Extracts the major opcode, `inst[6:0]`.
#[inline]
pub fn opcode(inst: u32) -> u32 {
    inst & 0x7f
}

/// Extracts the destination register, `inst[11:7]`.
#[inline]
pub fn rd(inst: u32) -> usize {
    ((inst >> 7) & 0x1f) as usize
}

/// Extracts `funct3`, `inst[14:12]`.
#[inline]
pub fn funct3(inst: u32) -> u32 {
    (inst >> 12) & 0x7
}

/// Extracts the first source register, `inst[19:15]`.
#[inline]
pub fn rs1(inst: u32) -> usize {
    ((inst >> 15) & 0x1f) as usize
}

/// Extracts the second source register, `inst[24:20]`.
#[inline]
pub fn rs2(inst: u32) -> usize {
    ((inst >> 20) & 0x1f) as usize
}

/// Extracts `funct7`, `inst[31:25]`.
#[inline]
pub fn funct7(inst: u32) -> u32 {
    (inst >> 25) & 0x7f
}

/// Whether `reg` is a link register under the standard calling convention.
///
/// `x1` (ra) and `x5` (t0/alternate link) are the two registers the
/// call/return recognition rules key on.
#[inline]
pub fn is_link_reg(reg: usize) -> bool {
    reg == 1 || reg == 5
}
