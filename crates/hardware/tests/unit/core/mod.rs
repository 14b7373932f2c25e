//! Core tests: functional units, caches, frontend, and the pipeline.

/// Cache tests (hit pipelining, miss state machine, eviction).
pub mod cache;

/// Frontend tests (BTB, RAS).
pub mod frontend;

/// Pipeline tests (decode, hazards/forwarding, whole-pipeline scenarios).
pub mod pipeline;

/// Functional unit tests (ALU, aligner, register file).
pub mod units;
