//! Return Address Stack tests.
//!
//! Verifies the LIFO round trip, tail-call overwrite, pointer wrap, and the
//! link-address (`pc + 4`) push convention.

use rvpipe_core::core::frontend::ras::Ras;
use rvpipe_core::core::pipeline::signals::RasControl;

fn push(ras: &mut Ras, pc: u64) {
    ras.step(&RasControl {
        push: true,
        pop: false,
        pc,
    });
}

fn pop(ras: &mut Ras) {
    ras.step(&RasControl {
        push: false,
        pop: true,
        pc: 0,
    });
}

fn push_pop(ras: &mut Ras, pc: u64) {
    ras.step(&RasControl {
        push: true,
        pop: true,
        pc,
    });
}

// ──────────────────────────────────────────────────────────
// 1. LIFO round trip
// ──────────────────────────────────────────────────────────

#[test]
fn pushes_then_pops_read_lifo() {
    let mut ras = Ras::new(8);
    let calls = [0x1000u64, 0x2000, 0x3000, 0x4000];
    for &pc in &calls {
        push(&mut ras, pc);
    }

    // Reading `top` before each pop yields the link addresses in LIFO order.
    for &pc in calls.iter().rev() {
        assert_eq!(ras.top(), pc + 4, "top is the most recent link address");
        pop(&mut ras);
    }
}

#[test]
fn push_stores_link_address() {
    let mut ras = Ras::new(4);
    push(&mut ras, 0x1000);
    assert_eq!(ras.top(), 0x1004, "push data is pc + 4");
}

// ──────────────────────────────────────────────────────────
// 2. Tail-call semantics
// ──────────────────────────────────────────────────────────

#[test]
fn simultaneous_push_pop_overwrites_top() {
    let mut ras = Ras::new(4);
    push(&mut ras, 0x1000);
    push(&mut ras, 0x2000);

    push_pop(&mut ras, 0x3000);
    assert_eq!(ras.top(), 0x3004, "tail call replaces the top entry");

    pop(&mut ras);
    assert_eq!(ras.top(), 0x1004, "entry below is untouched");
}

// ──────────────────────────────────────────────────────────
// 3. Wrap behavior
// ──────────────────────────────────────────────────────────

#[test]
fn overflow_wraps_the_circular_buffer() {
    let mut ras = Ras::new(4);
    for i in 0..5 {
        push(&mut ras, 0x1000 + 0x100 * i);
    }
    // The fifth push overwrote the oldest slot; the newest is still on top.
    assert_eq!(ras.top(), 0x1404);
}

#[test]
fn idle_cycles_do_not_move_the_pointer() {
    let mut ras = Ras::new(4);
    push(&mut ras, 0x1000);
    ras.step(&RasControl {
        push: false,
        pop: false,
        pc: 0x9999,
    });
    assert_eq!(ras.top(), 0x1004);
}
