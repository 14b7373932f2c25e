//! Branch unit: misprediction detection and correction latch.
//!
//! Compares the branch target resolved in MEM against the PC of the
//! instruction currently in EX. On a mismatch, while `branch.valid` and not
//! already mispredicting, it latches a one-cycle correction record
//! `{pc, target, taken, is_return}` and raises a same-cycle bypass so
//! execute squashes its outgoing dcache request. The latched record flushes
//! the younger latches and redirects the frontend on the following cycle.
//!
//! Back-to-back corrections cannot be consumed: the instruction following a
//! correction is flushed whether or not it is a branch, which is why a
//! pending correction suppresses detection.

use tracing::debug;

use crate::core::pipeline::signals::{BranchResolution, Mispredict};

/// The misprediction latch.
#[derive(Default)]
pub struct BranchUnit {
    mispredict: Mispredict,
}

impl BranchUnit {
    /// Creates the unit with no pending correction.
    pub fn new() -> Self {
        Self::default()
    }

    /// The correction latched on the previous cycle, visible this cycle.
    pub fn mispredict(&self) -> &Mispredict {
        &self.mispredict
    }

    /// Evaluates detection for this cycle.
    ///
    /// `mem_pc` is the PC of the instruction in MEM (the resolving branch),
    /// `ex_pc` the PC of the instruction in EX (the fetch that followed it).
    /// Returns the same-cycle bypass and the next latch value.
    pub fn evaluate(
        &self,
        branch: &BranchResolution,
        mem_pc: u64,
        ex_pc: u64,
    ) -> (bool, Mispredict) {
        if branch.valid && branch.target != ex_pc && !self.mispredict.valid {
            debug!(pc = mem_pc, target = branch.target, "misprediction detected");
            let next = Mispredict {
                valid: true,
                pc: mem_pc,
                target: branch.target,
                taken: branch.taken,
                is_return: branch.is_return,
            };
            (true, next)
        } else {
            (false, Mispredict::default())
        }
    }

    /// Commits the next latch value for the coming cycle.
    pub fn commit(&mut self, next: Mispredict) {
        self.mispredict = next;
    }
}
