//! Branch Target Buffer tests.
//!
//! Verifies the install/predict round trip, the registered-read behavior
//! (a prediction refers to the previously presented PC), tag matching, and
//! the return flag.

use rvpipe_core::core::frontend::btb::{Btb, BtbUpdate};

fn install(btb: &mut Btb, pc: u64, target: u64, is_return: bool) {
    btb.update(&BtbUpdate {
        valid: true,
        pc,
        target,
        is_return,
    });
}

// ──────────────────────────────────────────────────────────
// 1. Install/predict round trip
// ──────────────────────────────────────────────────────────

#[test]
fn install_then_predict() {
    let mut btb = Btb::new(64);
    install(&mut btb, 0x1000, 0x2000, false);

    btb.present(0x1000, true);
    let pred = btb.prediction();
    assert!(pred.valid, "installed entry predicts for its PC");
    assert_eq!(pred.target, 0x2000);
    assert!(!pred.is_return);
}

#[test]
fn return_flag_round_trips() {
    let mut btb = Btb::new(64);
    install(&mut btb, 0x1008, 0x1004, true);

    btb.present(0x1008, true);
    assert!(btb.prediction().is_return);
}

#[test]
fn empty_btb_never_predicts() {
    let mut btb = Btb::new(64);
    btb.present(0x1000, true);
    assert!(!btb.prediction().valid);
}

// ──────────────────────────────────────────────────────────
// 2. Registered read
// ──────────────────────────────────────────────────────────

#[test]
fn prediction_tracks_previous_presentation() {
    let mut btb = Btb::new(64);
    install(&mut btb, 0x1000, 0x2000, false);

    btb.present(0x1000, true);
    assert!(btb.prediction().valid);

    // Present a different PC: the old prediction is replaced next cycle.
    btb.present(0x3000, true);
    assert!(!btb.prediction().valid);
}

#[test]
fn squashed_fetch_presents_invalid() {
    let mut btb = Btb::new(64);
    install(&mut btb, 0x1000, 0x2000, false);

    // The fetch at 0x1000 was squashed by a redirect; its prediction must
    // not fire.
    btb.present(0x1000, false);
    assert!(!btb.prediction().valid);
}

// ──────────────────────────────────────────────────────────
// 3. Tag matching and aliasing
// ──────────────────────────────────────────────────────────

#[test]
fn different_pc_same_index_misses_on_tag() {
    // 64 entries: PCs 0x1000 and 0x2000 share index 0 but differ in tag.
    let mut btb = Btb::new(64);
    install(&mut btb, 0x1000, 0x2000, false);

    btb.present(0x2000, true);
    assert!(!btb.prediction().valid, "tag mismatch must not predict");
}

#[test]
fn aliasing_update_evicts() {
    let mut btb = Btb::new(64);
    install(&mut btb, 0x1000, 0xAAAA, false);
    install(&mut btb, 0x2000, 0xBBBB, false);

    btb.present(0x1000, true);
    assert!(
        !btb.prediction().valid,
        "direct-mapped overwrite evicted the first entry"
    );

    btb.present(0x2000, true);
    let pred = btb.prediction();
    assert!(pred.valid);
    assert_eq!(pred.target, 0xBBBB);
}

#[test]
fn latest_update_wins() {
    let mut btb = Btb::new(64);
    install(&mut btb, 0x1000, 0x2000, false);
    install(&mut btb, 0x1000, 0x3000, true);

    btb.present(0x1000, true);
    let pred = btb.prediction();
    assert_eq!(pred.target, 0x3000);
    assert!(pred.is_return);
}
