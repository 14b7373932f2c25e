//! Arithmetic Logic Unit.
//!
//! The ALU is a pure function `(op0, op1, alu_inst) -> (result, flags)` over
//! the configured datapath width. It implements:
//! 1. **Operations:** and, or, add, sub, sll, srl, xor.
//! 2. **Flags:** `zero` and `sign` of the result, and `overflow`, the carry
//!    out of the width-extended add/subtract. For a subtract this is the
//!    unsigned borrow, which is exactly what the branch resolution table
//!    needs for `bltu`/`bgeu`.
//! 3. **Control:** a static wildcard table refining the coarse operation
//!    class from decode into a concrete ALU instruction.

use crate::common::bits::mask;
use crate::core::pipeline::signals::AluOpClass;

/// Concrete ALU instruction selected by the control table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluInst {
    /// Bitwise AND. Also the no-match default, as in the control table's
    /// all-zero encoding.
    #[default]
    And,
    /// Bitwise OR.
    Or,
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Logical shift left.
    Sll,
    /// Logical shift right.
    Srl,
    /// Bitwise XOR.
    Xor,
}

/// Comparison flags exported alongside every result.
#[derive(Clone, Copy, Debug, Default)]
pub struct AluFlags {
    /// Result is zero.
    pub zero: bool,
    /// Most significant (sign) bit of the result.
    pub sign: bool,
    /// Carry out of the width-extended add/subtract.
    pub overflow: bool,
}

/// Executes `alu_inst` over `op0`/`op1` at `width` bits.
///
/// Shift amounts use the low 6 bits of `op1`; 32-bit encodings leave bit 5
/// clear, so the same extraction serves both widths. Results are masked to
/// `width`.
pub fn execute(alu_inst: AluInst, op0: u64, op1: u64, width: u32) -> (u64, AluFlags) {
    let m = mask(width);
    let op0 = op0 & m;
    let op1 = op1 & m;
    let shamt = (op1 & 0x3f) as u32;

    let extended: u128 = match alu_inst {
        AluInst::Sub => (op0 as u128).wrapping_sub(op1 as u128),
        _ => (op0 as u128) + (op1 as u128),
    };

    let result = match alu_inst {
        AluInst::And => op0 & op1,
        AluInst::Or => op0 | op1,
        AluInst::Add => op0.wrapping_add(op1),
        AluInst::Sub => op0.wrapping_sub(op1),
        AluInst::Sll => op0.wrapping_shl(shamt),
        AluInst::Srl => op0.wrapping_shr(shamt),
        AluInst::Xor => op0 ^ op1,
    } & m;

    let flags = AluFlags {
        zero: result == 0,
        sign: (result >> (width - 1)) & 1 == 1,
        overflow: (extended >> width) & 1 == 1,
    };

    (result, flags)
}

/// One row of the ALU-control table.
///
/// `None` entries are wildcards, as in the instruction table.
struct AluCtrlRow {
    alu_op: AluOpClass,
    funct3: Option<u32>,
    funct7: Option<u32>,
    alu_inst: AluInst,
}

const fn ctrl(
    alu_op: AluOpClass,
    funct3: Option<u32>,
    funct7: Option<u32>,
    alu_inst: AluInst,
) -> AluCtrlRow {
    AluCtrlRow {
        alu_op,
        funct3,
        funct7,
        alu_inst,
    }
}

/// The ALU-control table.
///
/// Branches always subtract so the flags carry the comparison. Register
/// operations decode funct3/funct7 in full. Immediate operations decode
/// funct3, with funct7 qualifying only the shifts (for the other I-type
/// operations those bits belong to the immediate).
static ALU_CONTROL: &[AluCtrlRow] = &[
    ctrl(AluOpClass::Branch, None, None, AluInst::Sub),
    // Register-register
    ctrl(
        AluOpClass::Reg,
        Some(0b000),
        Some(0b000_0000),
        AluInst::Add,
    ),
    ctrl(
        AluOpClass::Reg,
        Some(0b000),
        Some(0b010_0000),
        AluInst::Sub,
    ),
    ctrl(
        AluOpClass::Reg,
        Some(0b001),
        Some(0b000_0000),
        AluInst::Sll,
    ),
    ctrl(
        AluOpClass::Reg,
        Some(0b100),
        Some(0b000_0000),
        AluInst::Xor,
    ),
    ctrl(
        AluOpClass::Reg,
        Some(0b101),
        Some(0b000_0000),
        AluInst::Srl,
    ),
    ctrl(AluOpClass::Reg, Some(0b110), Some(0b000_0000), AluInst::Or),
    ctrl(
        AluOpClass::Reg,
        Some(0b111),
        Some(0b000_0000),
        AluInst::And,
    ),
    // Register-immediate
    ctrl(AluOpClass::Imm, Some(0b000), None, AluInst::Add),
    ctrl(
        AluOpClass::Imm,
        Some(0b001),
        Some(0b000_0000),
        AluInst::Sll,
    ),
    ctrl(AluOpClass::Imm, Some(0b100), None, AluInst::Xor),
    ctrl(
        AluOpClass::Imm,
        Some(0b101),
        Some(0b000_0000),
        AluInst::Srl,
    ),
    ctrl(AluOpClass::Imm, Some(0b110), None, AluInst::Or),
    ctrl(AluOpClass::Imm, Some(0b111), None, AluInst::And),
];

/// Selects the concrete ALU instruction for the decoded operation class.
///
/// `is_mem_or_jalr` forces ADD: loads, stores, and `jalr` compute
/// `rs1 + imm` regardless of the funct fields their encodings carry (for a
/// load the funct3 is the access size, not an operation). No matching row
/// yields the zero default.
pub fn control(alu_op: AluOpClass, funct3: u32, funct7: u32, is_mem_or_jalr: bool) -> AluInst {
    if is_mem_or_jalr {
        return AluInst::Add;
    }
    ALU_CONTROL
        .iter()
        .find(|r| {
            r.alu_op == alu_op
                && r.funct3.map_or(true, |f3| f3 == funct3)
                && r.funct7.map_or(true, |f7| f7 == funct7)
        })
        .map_or(AluInst::default(), |r| r.alu_inst)
}
