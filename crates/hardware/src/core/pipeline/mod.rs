//! Pipeline structure: latches, stages, and the management units.
//!
//! The stages are pure functions from current latch state to next latch
//! values; the top pipeline owns the latches and applies the stall/flush
//! policy when committing them. Management units:
//! 1. **Hazards:** load-use detection and forward-source selection.
//! 2. **Branch unit:** misprediction detection and the one-cycle correction
//!    latch.

/// Misprediction detection and latch.
pub mod branch;

/// Load-use hazard detection and operand forwarding selection.
pub mod hazards;

/// Pipeline latch types.
pub mod latches;

/// Control signal bundles.
pub mod signals;

/// The five stage functions.
pub mod stages;
