//! Branch direction prediction.
//!
//! The frontend consults a direction predictor for every PC it considers.
//! The shipped predictor is the trivial always-taken policy; the trait seam
//! routes updates `{pc, taken}` through unchanged so a history-based
//! predictor can be swapped in without touching the frontend.

/// Update delivered to the predictor when a branch resolves incorrectly.
#[derive(Clone, Copy, Debug, Default)]
pub struct PredictorUpdate {
    /// Perform the update.
    pub valid: bool,
    /// PC of the resolved branch.
    pub pc: u64,
    /// Resolved direction.
    pub taken: bool,
}

/// Direction predictor interface.
pub trait DirectionPredictor {
    /// Predicts the direction of a control-flow instruction at `pc`.
    fn predict(&self, pc: u64) -> bool;

    /// Trains the predictor with a resolved outcome.
    fn update(&mut self, update: &PredictorUpdate);
}

/// Always-taken direction predictor.
pub struct AlwaysTaken;

impl DirectionPredictor for AlwaysTaken {
    /// Every lookup predicts taken.
    fn predict(&self, _pc: u64) -> bool {
        true
    }

    /// Maintains no state.
    fn update(&mut self, _update: &PredictorUpdate) {}
}
