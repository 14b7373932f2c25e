//! Major opcode constants for the base integer subset.

/// Integer loads (`lb`/`lh`/`lw`/`ld`/`lbu`/`lhu`/`lwu`).
pub const LOAD: u32 = 0b000_0011;

/// Integer stores (`sb`/`sh`/`sw`/`sd`).
pub const STORE: u32 = 0b010_0011;

/// Conditional branches (`beq`/`bne`/`blt`/`bge`/`bltu`/`bgeu`).
pub const BRANCH: u32 = 0b110_0011;

/// Indirect jump-and-link (`jalr`).
pub const JALR: u32 = 0b110_0111;

/// Direct jump-and-link (`jal`).
pub const JAL: u32 = 0b110_1111;

/// Register-immediate ALU operations.
pub const OP_IMM: u32 = 0b001_0011;

/// Register-register ALU operations.
pub const OP: u32 = 0b011_0011;

/// Add upper immediate to PC.
pub const AUIPC: u32 = 0b001_0111;

/// Load upper immediate.
pub const LUI: u32 = 0b011_0111;
