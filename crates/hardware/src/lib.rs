//! Cycle-accurate model of a 5-stage in-order RISC-V pipeline.
//!
//! This crate implements a behavioral simulator of a pipelined RV32I/RV64I-subset
//! core at the granularity of architecturally visible signals:
//! 1. **Core:** the 5-stage pipeline (Fetch1/2/3, Decode, Execute, Mem, Writeback)
//!    with its latches, hazard/forward/branch units, and stall/flush policy.
//! 2. **Frontend:** 3-cycle predicted-PC fetch pipeline with BTB, RAS, and a
//!    pluggable direction predictor.
//! 3. **Caches:** 3-stage pipelined set-associative instruction and data caches
//!    with miss state machines and write-back eviction.
//! 4. **ISA:** table-driven decode of the base integer subset with wildcard
//!    pattern matching; unknown encodings decode to nop.
//! 5. **Simulation:** `Simulator` (core + two mock memory ports), flat-image
//!    loader, configuration, and statistics.

/// Common utilities (bit slicing, sign extension, error types).
pub mod common;
/// Simulator configuration (widths, reset address, cache geometry, predictors).
pub mod config;
/// The processor core: pipeline, frontend, caches, and functional units.
pub mod core;
/// Instruction set: opcodes, field extraction, formats, and the decode table.
pub mod isa;
/// Simulation: `Simulator` harness and flat-image loader.
pub mod sim;
/// External memory contract: ready/valid wire bundles and a mock main memory.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The top-level pipeline; advances one cycle per `step` call.
pub use crate::core::Core;
/// Whole-program simulator; owns the core and its two memory ports.
pub use crate::sim::simulator::Simulator;
