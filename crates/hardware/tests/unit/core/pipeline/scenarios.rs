//! Whole-pipeline scenario runs.
//!
//! End-to-end programs through the simulator, checking architectural state
//! at retirement: forwarding, the load-use stall, branch flush, call/return,
//! and the cache miss/evict path. Also the global invariants: x0 stays zero,
//! no wrong-path instruction ever retires, and runs are deterministic.

use pretty_assertions::assert_eq;

use crate::common::{self as asm, retired_pcs, run_to_retired, sim_with_program, small_config, RESET};

use rvpipe_core::config::{CacheParams, Config};

// ──────────────────────────────────────────────────────────
// S1. Single ALU instruction
// ──────────────────────────────────────────────────────────

#[test]
fn single_add_retires_with_sum() {
    let config = small_config();
    let mut sim = sim_with_program(&config, &[asm::add(1, 2, 3)]);
    sim.core.regs.write(2, 5);
    sim.core.regs.write(3, 7);

    run_to_retired(&mut sim, 1, 2000);

    assert_eq!(sim.trace()[0].pc, RESET);
    assert_eq!(sim.trace()[0].inst, asm::add(1, 2, 3));
    assert_eq!(sim.core.regs.read(1), 12);
}

// ──────────────────────────────────────────────────────────
// S2. Back-to-back RAW, resolved by forwarding
// ──────────────────────────────────────────────────────────

#[test]
fn back_to_back_raw_forwards_without_stall() {
    let config = small_config();
    let mut sim = sim_with_program(&config, &[asm::addi(1, 0, 3), asm::add(2, 1, 1)]);

    run_to_retired(&mut sim, 2, 2000);

    assert_eq!(sim.core.regs.read(1), 3);
    assert_eq!(sim.core.regs.read(2), 6);
    assert_eq!(sim.core.stats.stalls_data, 0, "MEM->EX forwarding, no stall");
    assert_eq!(
        sim.trace()[1].cycle,
        sim.trace()[0].cycle + 1,
        "the dependent pair retires on consecutive cycles"
    );
}

// ──────────────────────────────────────────────────────────
// S3. Load-use stall
// ──────────────────────────────────────────────────────────

#[test]
fn load_use_stalls_one_cycle_then_forwards() {
    let config = small_config();
    let mut sim = sim_with_program(&config, &[asm::lw(1, 2, 0), asm::add(3, 1, 1)]);
    sim.core.regs.write(2, 0x200);
    sim.dmem.poke_u32(0x200, 9);

    run_to_retired(&mut sim, 2, 2000);

    assert_eq!(sim.core.regs.read(1), 9);
    assert_eq!(sim.core.regs.read(3), 18);
    assert_eq!(sim.core.stats.stalls_data, 1, "exactly the load-use window");
}

// ──────────────────────────────────────────────────────────
// S4. Taken branch with flush
// ──────────────────────────────────────────────────────────

#[test]
fn taken_branch_flushes_wrong_path() {
    let config = small_config();
    let program = [
        asm::addi(1, 0, 1),     // 0x1000
        asm::beq(1, 1, 8),      // 0x1004 -> 0x100c
        asm::addi(2, 0, 0x2AD), // 0x1008: must be squashed
        asm::addi(3, 0, 42),    // 0x100c
    ];
    let mut sim = sim_with_program(&config, &program);

    run_to_retired(&mut sim, 4, 2000);

    assert_eq!(sim.core.regs.read(2), 0, "flushed instruction left no effect");
    assert_eq!(sim.core.regs.read(3), 42);
    assert!(
        !retired_pcs(&sim).contains(&0x1008),
        "nothing fetched past a mispredicting branch retires"
    );
    assert_eq!(sim.core.stats.branch_mispredictions, 1);
}

// ──────────────────────────────────────────────────────────
// S5. Call and return
// ──────────────────────────────────────────────────────────

#[test]
fn call_return_retires_the_link_path() {
    let config = small_config();
    let program = [
        asm::jal(1, 8),      // 0x1000: call, link in x1
        asm::addi(2, 0, 1),  // 0x1004: the return target
        asm::jalr(0, 1, 0),  // 0x1008: return through x1
    ];
    let mut sim = sim_with_program(&config, &program);

    run_to_retired(&mut sim, 6, 4000);
    let pcs = retired_pcs(&sim);

    assert_eq!(sim.core.regs.read(1), 0x1004, "jal wrote the link address");

    // Every retirement of the return is followed by the instruction at
    // jal+4; the fall-through at 0x100c never slips past the redirect.
    let mut returns_seen = 0;
    for pair in pcs.windows(2) {
        if pair[0] == 0x1008 {
            returns_seen += 1;
            assert_eq!(
                pair[1], 0x1004,
                "the instruction at jal+4 retires right after the return"
            );
        }
    }
    assert!(returns_seen >= 1, "the return retired");
    assert_eq!(sim.core.regs.read(2), 1);
}

// ──────────────────────────────────────────────────────────
// S6. Data cache miss + eviction
// ──────────────────────────────────────────────────────────

#[test]
fn conflict_misses_evict_and_reread() {
    // A degenerate dcache (one set, one way, 8-byte lines) makes every
    // second access a conflict.
    let config = Config {
        dcache: CacheParams {
            num_sets: 1,
            num_ways: 1,
            line_width: 64,
        },
        ..small_config()
    };
    let a = 0x100u64;
    let b = 0x108u64; // same (only) set, different tag

    let program = [
        asm::sw(1, 5, 0), // store to A: cold fill
        asm::sw(1, 6, 0), // store to B: evicts A's line
        asm::lw(7, 5, 0), // read A back: evicts B's line, refills from memory
    ];
    let mut sim = sim_with_program(&config, &program);
    sim.core.regs.write(5, a);
    sim.core.regs.write(6, b);
    sim.dmem.poke_u32(a, 0x1111_1111);
    sim.dmem.poke_u32(b, 0x2222_2222);

    run_to_retired(&mut sim, 3, 2000);

    assert_eq!(
        sim.core.regs.read(7),
        0x1111_1111,
        "the read returns A's data after the round trip through memory"
    );
    assert_eq!(sim.core.stats.dcache_misses, 3, "cold, conflict, conflict");
    assert_eq!(
        sim.core.stats.dcache_evictions, 2,
        "both conflict misses wrote the valid way back"
    );
}

// ──────────────────────────────────────────────────────────
// Invariants
// ──────────────────────────────────────────────────────────

#[test]
fn x0_survives_write_attempts() {
    let config = small_config();
    let mut sim = sim_with_program(&config, &[asm::addi(0, 0, 5), asm::add(1, 0, 0)]);

    run_to_retired(&mut sim, 2, 2000);

    assert_eq!(sim.core.regs.read(0), 0);
    assert_eq!(sim.core.regs.read(1), 0, "reads of x0 see zero, not 5");
    assert_eq!(sim.core.regs.dump()[0], 0);
}

#[test]
fn unknown_instruction_changes_nothing() {
    // A SYSTEM-class word retires as a nop.
    let config = small_config();
    let mut sim = sim_with_program(&config, &[0x0000_0073, asm::addi(1, 0, 7)]);

    run_to_retired(&mut sim, 2, 2000);

    let snapshot = sim.core.regs.dump();
    assert_eq!(snapshot[1], 7);
    let others: u64 = snapshot.iter().skip(2).sum();
    assert_eq!(others, 0, "no architectural effect from the unknown word");
}

#[test]
fn identical_runs_are_bit_identical() {
    let config = small_config();
    let program = [
        asm::addi(1, 0, 3),
        asm::add(2, 1, 1),
        asm::beq(2, 2, 8),
        asm::addi(3, 0, 9),
        asm::addi(4, 0, 11),
    ];

    let mut first = sim_with_program(&config, &program);
    let mut second = sim_with_program(&config, &program);
    first.run(400);
    second.run(400);

    assert_eq!(first.trace(), second.trace());
    assert_eq!(first.core.regs.dump(), second.core.regs.dump());
    assert_eq!(first.core.stats.cycles, second.core.stats.cycles);
}

#[test]
fn retirement_trace_reports_pc_and_word() {
    let config = small_config();
    let program = [asm::addi(1, 0, 1), asm::addi(2, 0, 2)];
    let mut sim = sim_with_program(&config, &program);

    run_to_retired(&mut sim, 2, 2000);

    let trace = sim.trace();
    assert_eq!(trace[0].pc, RESET);
    assert_eq!(trace[0].inst, program[0]);
    assert_eq!(trace[1].pc, RESET + 4);
    assert_eq!(trace[1].inst, program[1]);
}
