//! Functional units of the core.
//!
//! The pure combinational blocks the pipeline stages are built from:
//! 1. **ALU:** integer arithmetic/logic with comparison flags, plus the
//!    ALU-control table.
//! 2. **Aligner:** sub-word extraction and sign/zero extension out of a
//!    cache line.
//! 3. **Register file:** 32 entries, two read ports, one write port, x0
//!    hardwired to zero with same-cycle write-to-read forwarding.

/// Cache-line sub-word aligner.
pub mod aligner;

/// Arithmetic Logic Unit and its control table.
pub mod alu;

/// Architectural register file.
pub mod regfile;
