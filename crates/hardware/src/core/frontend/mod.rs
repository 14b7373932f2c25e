//! Instruction-fetch frontend.
//!
//! The frontend owns the prediction machinery behind the 3-cycle fetch
//! pipeline (the latches themselves belong to the top pipeline):
//! 1. **IF1 selection:** the fetch PC `if1_pc` defaults to the PC register;
//!    a direction-predicted-taken BTB hit redirects it to the BTB target,
//!    and a BTB return hit redirects it to the RAS top.
//! 2. **Next PC:** a pending misprediction correction wins; otherwise the
//!    PC register advances to `if1_pc + 4`.
//! 3. **Training:** a misprediction installs the full BTB entry and trains
//!    the direction predictor; decode's RAS control pushes/pops link
//!    addresses as calls and returns move through ID.
//!
//! The BTB behaves as a registered SRAM, so its prediction output refers to
//! the PC presented on the previous cycle. Presentation and RAS edges are
//! clocked only on cycles their stage actually advances, keeping predictions
//! aligned with a frozen fetch and a frozen decode from pushing twice.

/// Direction prediction (always-taken stub behind a trait).
pub mod bpred;

/// Branch target buffer.
pub mod btb;

/// GShare history-based direction predictor.
pub mod gshare;

/// Return address stack.
pub mod ras;

use crate::common::bits::mask;
use crate::config::{Config, PredictorKind};
use crate::core::pipeline::signals::{Mispredict, RasControl};

use self::bpred::{AlwaysTaken, DirectionPredictor, PredictorUpdate};
use self::btb::{Btb, BtbUpdate};
use self::gshare::GShare;
use self::ras::Ras;

/// The next-PC decision computed in IF1.
#[derive(Clone, Copy, Debug)]
pub struct FetchDecision {
    /// PC to fetch this cycle.
    pub if1_pc: u64,
    /// Value the PC register advances to.
    pub next_pc: u64,
}

/// Prediction machinery of the fetch frontend.
pub struct Frontend {
    btb: Btb,
    ras: Ras,
    predictor: Box<dyn DirectionPredictor>,
    paddr_mask: u64,
}

impl Frontend {
    /// Creates the frontend for `config` with its configured direction
    /// predictor.
    pub fn new(config: &Config) -> Self {
        let predictor: Box<dyn DirectionPredictor> = match config.bpred.kind {
            PredictorKind::AlwaysTaken => Box::new(AlwaysTaken),
            PredictorKind::GShare => Box::new(GShare::new(config.bpred.table_bits)),
        };
        Self {
            btb: Btb::new(config.btb.size),
            ras: Ras::new(config.ras.size),
            predictor,
            paddr_mask: mask(config.paddr_width),
        }
    }

    /// Replaces the direction predictor; the interface is unchanged for any
    /// drop-in.
    pub fn set_predictor(&mut self, predictor: Box<dyn DirectionPredictor>) {
        self.predictor = predictor;
    }

    /// Read-only view of the BTB (tests).
    pub fn btb(&self) -> &Btb {
        &self.btb
    }

    /// Read-only view of the RAS (tests).
    pub fn ras(&self) -> &Ras {
        &self.ras
    }

    /// IF1: selects the fetch PC and the next PC register value.
    ///
    /// The prediction can be wrong; a wrong `if1_pc` is caught later in the
    /// pipeline and corrected through `mispredict`.
    pub fn decide(&self, pc: u64, mispredict: &Mispredict) -> FetchDecision {
        let prediction = self.btb.prediction();
        let taken = self.predictor.predict(pc);

        let mut if1_pc = pc;
        if taken && prediction.valid && !prediction.is_return {
            if1_pc = prediction.target;
        }
        if prediction.valid && prediction.is_return {
            if1_pc = self.ras.top();
        }
        if1_pc &= self.paddr_mask;

        let next_pc = if mispredict.valid {
            mispredict.target & self.paddr_mask
        } else {
            if1_pc.wrapping_add(4) & self.paddr_mask
        };

        FetchDecision { if1_pc, next_pc }
    }

    /// Commit phase: trains on a misprediction and clocks the prediction
    /// state.
    ///
    /// The BTB presentation follows the PC register, so it advances with the
    /// fetch latches (`fetch_advance`); the RAS control is derived from the
    /// instruction in ID, so it is applied once per decode-stage advance
    /// (`decode_advance`); a frozen decode stage must not push twice.
    pub fn commit(
        &mut self,
        decision: &FetchDecision,
        mispredict: &Mispredict,
        ras_ctrl: &RasControl,
        fetch_advance: bool,
        decode_advance: bool,
    ) {
        if mispredict.valid {
            self.btb.update(&BtbUpdate {
                valid: true,
                pc: mispredict.pc,
                target: mispredict.target,
                is_return: mispredict.is_return,
            });
            self.predictor.update(&PredictorUpdate {
                valid: true,
                pc: mispredict.pc,
                taken: mispredict.taken,
            });
        }

        if decode_advance {
            self.ras.step(ras_ctrl);
        }
        if fetch_advance {
            // The BTB sees the PC actually fetched this cycle, so next
            // cycle's prediction can redirect the fetch that follows a
            // branch. A fetch squashed by the redirect presents as invalid.
            self.btb.present(decision.if1_pc, !mispredict.valid);
        }
    }
}
