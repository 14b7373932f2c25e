//! The static instruction table and immediate generation.
//!
//! Decode control is data, not code: each known instruction is a record
//! relating a wildcard [`Pattern`] to the three pre-packaged control bundles
//! it produces. The decoder scans the table for the unique matching row and
//! emits its bundles; no match emits the all-zero default, which downstream
//! stages treat as a nop (funct3/funct7 still pass through for ALU control).

use crate::common::bits::sign_extend;
use crate::core::pipeline::signals::{AluOpClass, AluSrc, BranchKind, ExCtrl, MemCtrl, WbCtrl};
use crate::isa::opcodes;

/// Instruction encoding formats, selecting the immediate composition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstFormat {
    /// Register-register; no immediate.
    #[default]
    R,
    /// Short immediate in `inst[31:20]`.
    I,
    /// Store immediate split across `inst[31:25]` and `inst[11:7]`.
    S,
    /// Branch immediate, bit-shuffled, always even.
    B,
    /// Upper immediate in `inst[31:12]`.
    U,
    /// Jump immediate, bit-shuffled, always even.
    J,
}

/// Instruction match pattern.
///
/// `None` in `funct3`/`funct7` is a wildcard: the field is ignored when
/// matching. The opcode always participates.
#[derive(Clone, Copy, Debug)]
pub struct Pattern {
    /// Major opcode to match.
    pub opcode: u32,
    /// funct3 to match, or wildcard.
    pub funct3: Option<u32>,
    /// funct7 to match, or wildcard.
    pub funct7: Option<u32>,
}

impl Pattern {
    const fn new(opcode: u32, funct3: Option<u32>, funct7: Option<u32>) -> Self {
        Self {
            opcode,
            funct3,
            funct7,
        }
    }

    /// Whether the pattern matches the given decoded fields.
    pub fn matches(&self, opcode: u32, funct3: u32, funct7: u32) -> bool {
        self.opcode == opcode
            && self.funct3.map_or(true, |f3| f3 == funct3)
            && self.funct7.map_or(true, |f7| f7 == funct7)
    }
}

/// One row of the instruction table.
#[derive(Clone, Copy, Debug)]
pub struct InstSpec {
    /// Encoding format (drives immediate generation).
    pub format: InstFormat,
    /// Match pattern.
    pub pattern: Pattern,
    /// Execute-stage control to emit (funct3/funct7 filled in by decode).
    pub ex: ExCtrl,
    /// Mem-stage control to emit.
    pub mem: MemCtrl,
    /// Writeback-stage control to emit.
    pub wb: WbCtrl,
}

// Control-bundle factories, mirroring how the table is phrased: every row is
// a pattern plus a handful of stereotyped bundles.

const fn ex(alu_src: AluSrc, alu_op: AluOpClass) -> ExCtrl {
    ExCtrl {
        alu_src,
        alu_op,
        lui: false,
        auipc: false,
        jalr: false,
        funct3: 0,
        funct7: 0,
    }
}

const fn ex_lui() -> ExCtrl {
    ExCtrl {
        alu_src: AluSrc::Rs2,
        alu_op: AluOpClass::Imm,
        lui: true,
        auipc: false,
        jalr: false,
        funct3: 0,
        funct7: 0,
    }
}

const fn ex_auipc() -> ExCtrl {
    ExCtrl {
        alu_src: AluSrc::Rs2,
        alu_op: AluOpClass::Imm,
        lui: false,
        auipc: true,
        jalr: false,
        funct3: 0,
        funct7: 0,
    }
}

const fn ex_jalr() -> ExCtrl {
    ExCtrl {
        alu_src: AluSrc::Imm,
        alu_op: AluOpClass::Imm,
        lui: false,
        auipc: false,
        jalr: true,
        funct3: 0,
        funct7: 0,
    }
}

const fn mem_nop() -> MemCtrl {
    MemCtrl {
        branch: false,
        branch_kind: BranchKind::Eq,
        jal: false,
        mem_read: false,
        mem_write: false,
    }
}

const fn mem_load() -> MemCtrl {
    MemCtrl {
        branch: false,
        branch_kind: BranchKind::Eq,
        jal: false,
        mem_read: true,
        mem_write: false,
    }
}

const fn mem_store() -> MemCtrl {
    MemCtrl {
        branch: false,
        branch_kind: BranchKind::Eq,
        jal: false,
        mem_read: false,
        mem_write: true,
    }
}

const fn mem_jal() -> MemCtrl {
    MemCtrl {
        branch: false,
        branch_kind: BranchKind::Eq,
        jal: true,
        mem_read: false,
        mem_write: false,
    }
}

const fn mem_branch(kind: BranchKind) -> MemCtrl {
    MemCtrl {
        branch: true,
        branch_kind: kind,
        jal: false,
        mem_read: false,
        mem_write: false,
    }
}

const fn wb_reg() -> WbCtrl {
    WbCtrl {
        mem_to_reg: false,
        write_reg: true,
    }
}

const fn wb_load() -> WbCtrl {
    WbCtrl {
        mem_to_reg: true,
        write_reg: true,
    }
}

const fn wb_none() -> WbCtrl {
    WbCtrl {
        mem_to_reg: false,
        write_reg: false,
    }
}

const fn row(
    format: InstFormat,
    pattern: Pattern,
    ex: ExCtrl,
    mem: MemCtrl,
    wb: WbCtrl,
) -> InstSpec {
    InstSpec {
        format,
        pattern,
        ex,
        mem,
        wb,
    }
}

/// The instruction table: the base integer subset.
///
/// Patterns are disjoint, so at most one row matches any word. `jal` and
/// `jalr` are register-writing; execute substitutes the link address as the
/// ALU result so the ordinary writeback path carries it.
pub static INSTRUCTIONS: &[InstSpec] = &[
    // R-type
    row(
        InstFormat::R,
        Pattern::new(opcodes::OP, Some(0b000), Some(0b000_0000)),
        ex(AluSrc::Rs2, AluOpClass::Reg),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::R,
        Pattern::new(opcodes::OP, Some(0b000), Some(0b010_0000)),
        ex(AluSrc::Rs2, AluOpClass::Reg),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::R,
        Pattern::new(opcodes::OP, Some(0b001), Some(0b000_0000)),
        ex(AluSrc::Rs2, AluOpClass::Reg),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::R,
        Pattern::new(opcodes::OP, Some(0b100), Some(0b000_0000)),
        ex(AluSrc::Rs2, AluOpClass::Reg),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::R,
        Pattern::new(opcodes::OP, Some(0b101), Some(0b000_0000)),
        ex(AluSrc::Rs2, AluOpClass::Reg),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::R,
        Pattern::new(opcodes::OP, Some(0b110), Some(0b000_0000)),
        ex(AluSrc::Rs2, AluOpClass::Reg),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::R,
        Pattern::new(opcodes::OP, Some(0b111), Some(0b000_0000)),
        ex(AluSrc::Rs2, AluOpClass::Reg),
        mem_nop(),
        wb_reg(),
    ),
    // Loads
    row(
        InstFormat::I,
        Pattern::new(opcodes::LOAD, Some(0b000), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_load(),
        wb_load(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::LOAD, Some(0b001), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_load(),
        wb_load(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::LOAD, Some(0b010), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_load(),
        wb_load(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::LOAD, Some(0b011), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_load(),
        wb_load(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::LOAD, Some(0b100), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_load(),
        wb_load(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::LOAD, Some(0b101), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_load(),
        wb_load(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::LOAD, Some(0b110), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_load(),
        wb_load(),
    ),
    // Register-immediate ALU
    row(
        InstFormat::I,
        Pattern::new(opcodes::OP_IMM, Some(0b000), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::OP_IMM, Some(0b001), Some(0b000_0000)),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::OP_IMM, Some(0b100), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::OP_IMM, Some(0b101), Some(0b000_0000)),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::OP_IMM, Some(0b101), Some(0b010_0000)),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::OP_IMM, Some(0b110), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::I,
        Pattern::new(opcodes::OP_IMM, Some(0b111), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_nop(),
        wb_reg(),
    ),
    // jalr
    row(
        InstFormat::I,
        Pattern::new(opcodes::JALR, Some(0b000), None),
        ex_jalr(),
        mem_jal(),
        wb_reg(),
    ),
    // Stores
    row(
        InstFormat::S,
        Pattern::new(opcodes::STORE, Some(0b000), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_store(),
        wb_none(),
    ),
    row(
        InstFormat::S,
        Pattern::new(opcodes::STORE, Some(0b001), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_store(),
        wb_none(),
    ),
    row(
        InstFormat::S,
        Pattern::new(opcodes::STORE, Some(0b010), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_store(),
        wb_none(),
    ),
    row(
        InstFormat::S,
        Pattern::new(opcodes::STORE, Some(0b011), None),
        ex(AluSrc::Imm, AluOpClass::Imm),
        mem_store(),
        wb_none(),
    ),
    // Branches
    row(
        InstFormat::B,
        Pattern::new(opcodes::BRANCH, Some(0b000), None),
        ex(AluSrc::Rs2, AluOpClass::Branch),
        mem_branch(BranchKind::Eq),
        wb_none(),
    ),
    row(
        InstFormat::B,
        Pattern::new(opcodes::BRANCH, Some(0b001), None),
        ex(AluSrc::Rs2, AluOpClass::Branch),
        mem_branch(BranchKind::Neq),
        wb_none(),
    ),
    row(
        InstFormat::B,
        Pattern::new(opcodes::BRANCH, Some(0b100), None),
        ex(AluSrc::Rs2, AluOpClass::Branch),
        mem_branch(BranchKind::Lt),
        wb_none(),
    ),
    row(
        InstFormat::B,
        Pattern::new(opcodes::BRANCH, Some(0b101), None),
        ex(AluSrc::Rs2, AluOpClass::Branch),
        mem_branch(BranchKind::Geq),
        wb_none(),
    ),
    row(
        InstFormat::B,
        Pattern::new(opcodes::BRANCH, Some(0b110), None),
        ex(AluSrc::Rs2, AluOpClass::Branch),
        mem_branch(BranchKind::Ltu),
        wb_none(),
    ),
    row(
        InstFormat::B,
        Pattern::new(opcodes::BRANCH, Some(0b111), None),
        ex(AluSrc::Rs2, AluOpClass::Branch),
        mem_branch(BranchKind::Gequ),
        wb_none(),
    ),
    // Upper immediates
    row(
        InstFormat::U,
        Pattern::new(opcodes::LUI, None, None),
        ex_lui(),
        mem_nop(),
        wb_reg(),
    ),
    row(
        InstFormat::U,
        Pattern::new(opcodes::AUIPC, None, None),
        ex_auipc(),
        mem_nop(),
        wb_reg(),
    ),
    // jal
    row(
        InstFormat::J,
        Pattern::new(opcodes::JAL, None, None),
        ex(AluSrc::Rs2, AluOpClass::Imm),
        mem_jal(),
        wb_reg(),
    ),
];

/// Looks up the unique table row matching `inst`, if any.
pub fn lookup(inst: u32) -> Option<&'static InstSpec> {
    let opcode = crate::isa::opcode(inst);
    let funct3 = crate::isa::funct3(inst);
    let funct7 = crate::isa::funct7(inst);
    INSTRUCTIONS
        .iter()
        .find(|spec| spec.pattern.matches(opcode, funct3, funct7))
}

/// Composes the sign-extended immediate of `inst` for the given format.
///
/// RISC-V keeps the immediate's sign bit at `inst[31]` for every format, so
/// extension is uniform; only the bit shuffle differs.
pub fn immediate(inst: u32, format: InstFormat) -> u64 {
    let inst = u64::from(inst);
    match format {
        InstFormat::R => 0,
        InstFormat::I => sign_extend(inst >> 20, 12),
        InstFormat::S => {
            let imm = ((inst >> 25) << 5) | ((inst >> 7) & 0x1f);
            sign_extend(imm, 12)
        }
        InstFormat::B => {
            let imm = ((inst >> 31) << 12)
                | (((inst >> 7) & 0x1) << 11)
                | (((inst >> 25) & 0x3f) << 5)
                | (((inst >> 8) & 0xf) << 1);
            sign_extend(imm, 13)
        }
        InstFormat::U => sign_extend(inst & 0xffff_f000, 32),
        InstFormat::J => {
            let imm = ((inst >> 31) << 20)
                | (((inst >> 12) & 0xff) << 12)
                | (((inst >> 20) & 0x1) << 11)
                | (((inst >> 21) & 0x3ff) << 1);
            sign_extend(imm, 21)
        }
    }
}
