//! Pipeline control signals.
//!
//! This module defines the signal bundles that flow between stages:
//! 1. **Stage control:** per-stage control bundles (`ExCtrl`, `MemCtrl`,
//!    `WbCtrl`) packaged by the decode table.
//! 2. **Operand selection:** ALU operand source and operation class.
//! 3. **Branching:** branch comparison kinds, the resolved branch outcome,
//!    and the latched misprediction record.
//! 4. **Register traffic:** the writeback port bundle and the RAS
//!    push/pop control.

/// Source of the ALU's second operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluSrc {
    /// Use the (possibly forwarded) `rs2` value.
    #[default]
    Rs2,
    /// Use the sign-extended immediate.
    Imm,
}

/// Coarse ALU operation class, refined by the ALU-control table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOpClass {
    /// Register-immediate operations (also loads, stores, `jalr`).
    #[default]
    Imm,
    /// Register-register operations, decoded by funct3/funct7.
    Reg,
    /// Conditional branches; always subtract so the flags carry the compare.
    Branch,
}

/// Conditional branch comparison kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchKind {
    /// Branch if equal.
    #[default]
    Eq,
    /// Branch if not equal.
    Neq,
    /// Branch if less than (signed).
    Lt,
    /// Branch if greater or equal (signed).
    Geq,
    /// Branch if less than (unsigned).
    Ltu,
    /// Branch if greater or equal (unsigned).
    Gequ,
}

/// Execute-stage control signals.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExCtrl {
    /// ALU second-operand source.
    pub alu_src: AluSrc,
    /// ALU operation class.
    pub alu_op: AluOpClass,
    /// Instruction is `lui`; the immediate bypasses the ALU.
    pub lui: bool,
    /// Instruction is `auipc`; the result is `pc + imm`.
    pub auipc: bool,
    /// Instruction is `jalr`; the branch target is the ALU result.
    pub jalr: bool,
    /// Raw funct3 field, passed through for ALU control and access sizing.
    pub funct3: u32,
    /// Raw funct7 field, passed through for ALU control.
    pub funct7: u32,
}

/// Mem-stage control signals.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemCtrl {
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Which comparison resolves the branch.
    pub branch_kind: BranchKind,
    /// Instruction is an unconditional jump (`jal` or `jalr`).
    pub jal: bool,
    /// Instruction reads data memory.
    pub mem_read: bool,
    /// Instruction writes data memory.
    pub mem_write: bool,
}

/// Writeback-stage control signals.
#[derive(Clone, Copy, Debug, Default)]
pub struct WbCtrl {
    /// Select the memory read datum over the ALU result.
    pub mem_to_reg: bool,
    /// Enable the register-file write port.
    pub write_reg: bool,
}

/// The control word that accompanies an instruction down the pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct CtrlBundle {
    /// Latch validity; a cleared bundle is a bubble.
    pub valid: bool,
    /// Raw instruction word.
    pub inst: u32,
    /// Program counter of the instruction.
    pub pc: u64,
    /// Execute-stage control.
    pub ex: ExCtrl,
    /// Mem-stage control.
    pub mem: MemCtrl,
    /// Writeback-stage control.
    pub wb: WbCtrl,
}

/// Register-file write port bundle, driven by the writeback stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegWrite {
    /// Destination register index.
    pub addr: usize,
    /// Value to write.
    pub data: u64,
    /// Write enable.
    pub en: bool,
}

/// Branch outcome resolved by the mem stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchResolution {
    /// A control-flow instruction is resolving this cycle.
    pub valid: bool,
    /// The branch is taken (always true for jumps).
    pub taken: bool,
    /// Where execution must continue.
    pub target: u64,
    /// The instruction is a function return.
    pub is_return: bool,
}

/// Latched misprediction correction delivered to the frontend.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mispredict {
    /// A correction is pending this cycle.
    pub valid: bool,
    /// PC of the mispredicted control-flow instruction.
    pub pc: u64,
    /// Corrected target.
    pub target: u64,
    /// Resolved direction.
    pub taken: bool,
    /// The instruction was a function return.
    pub is_return: bool,
}

/// RAS push/pop control derived by decode from the instruction in ID.
#[derive(Clone, Copy, Debug, Default)]
pub struct RasControl {
    /// Push the link address (`pc + 4`).
    pub push: bool,
    /// Pop the top entry.
    pub pop: bool,
    /// PC of the instruction driving the control.
    pub pc: u64,
}
