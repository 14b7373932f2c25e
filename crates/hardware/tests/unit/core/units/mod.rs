//! Functional unit tests.


/// ALU operations, flags, and the control table.
pub mod alu;
