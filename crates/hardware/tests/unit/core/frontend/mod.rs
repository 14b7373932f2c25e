//! Frontend tests.

/// Branch target buffer behavior.
pub mod btb;


/// Return address stack behavior.
pub mod ras;
