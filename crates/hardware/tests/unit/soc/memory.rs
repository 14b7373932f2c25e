//! Mock main memory tests.
//!
//! Exercises the ready/valid handshake against programmable delays: a read
//! transfers when both sides are high, the response delivers a full aligned
//! line, a held write commits once accepted, and responses wait for the
//! consumer.

use rvpipe_core::soc::{MainMemory, MemPortOut, MemReadReq, MemWriteReq, MemoryTiming};

const LINE: usize = 8;

fn memory(read_latency: u64, write_latency: u64) -> MainMemory {
    MainMemory::new(
        0x1000,
        LINE,
        MemoryTiming {
            read_latency,
            write_latency,
        },
    )
}

fn read_req(addr: u64) -> MemPortOut {
    MemPortOut {
        read: MemReadReq { valid: true, addr },
        ..MemPortOut::default()
    }
}

fn write_req(addr: u64, data: Vec<u8>) -> MemPortOut {
    MemPortOut {
        write: MemWriteReq {
            valid: true,
            addr,
            data,
        },
        ..MemPortOut::default()
    }
}

fn consume() -> MemPortOut {
    MemPortOut {
        resp_ready: true,
        ..MemPortOut::default()
    }
}

#[test]
fn read_delivers_full_aligned_line() {
    let mut mem = memory(0, 0);
    mem.poke_u64(0x100, 0x1122_3344_5566_7788);

    assert!(mem.outputs().read_ready);
    mem.step(&read_req(0x104)); // mid-line address

    let out = mem.outputs();
    assert!(out.resp.valid, "zero-latency read responds next cycle");
    assert_eq!(out.resp.addr, 0x100, "response is line-aligned");
    assert_eq!(out.resp.data, 0x1122_3344_5566_7788u64.to_le_bytes());
}

#[test]
fn read_latency_delays_the_response() {
    let mut mem = memory(2, 0);
    mem.step(&read_req(0x100));

    assert!(!mem.outputs().resp.valid);
    mem.step(&MemPortOut::default());
    assert!(!mem.outputs().resp.valid);
    mem.step(&MemPortOut::default());
    assert!(mem.outputs().resp.valid, "response appears after the latency");
}

#[test]
fn response_waits_for_consumer() {
    let mut mem = memory(0, 0);
    mem.step(&read_req(0x100));
    assert!(mem.outputs().resp.valid);

    // Not consumed: the response stays presented, no new read is accepted.
    mem.step(&MemPortOut::default());
    assert!(mem.outputs().resp.valid);
    assert!(!mem.outputs().read_ready);

    mem.step(&consume());
    assert!(!mem.outputs().resp.valid, "consumed on valid & ready");
    assert!(mem.outputs().read_ready);
}

#[test]
fn write_commits_on_accept() {
    let mut mem = memory(0, 0);
    let line: Vec<u8> = (1..=8).collect();

    assert!(mem.outputs().write_ready, "zero write latency accepts at once");
    mem.step(&write_req(0x204, line));
    assert_eq!(
        mem.peek_u64(0x200),
        0x0807_0605_0403_0201,
        "the line lands at the aligned base"
    );
}

#[test]
fn write_latency_holds_ready_low() {
    let mut mem = memory(0, 2);
    let line = vec![0xAB; LINE];

    assert!(!mem.outputs().write_ready);
    mem.step(&write_req(0x100, line.clone()));
    assert!(!mem.outputs().write_ready);
    mem.step(&write_req(0x100, line.clone()));
    assert!(mem.outputs().write_ready, "ready rises after the hold");
    mem.step(&write_req(0x100, line));
    assert_eq!(mem.peek(0x100, LINE), vec![0xAB; LINE]);
}

#[test]
fn out_of_range_accesses_are_harmless() {
    let mut mem = memory(0, 0);
    mem.load(0xff_ffff, &[1, 2, 3]);
    mem.step(&read_req(0xff_fff8));
    let out = mem.outputs();
    assert!(out.resp.valid);
    assert!(out.resp.data.iter().all(|&b| b == 0), "past-the-end reads zero-fill");
}
