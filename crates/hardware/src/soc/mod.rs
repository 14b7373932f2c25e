//! External memory contract.
//!
//! Each cache owns one memory port carrying three sub-channels, all with
//! ready/valid handshakes: a read request, a write request, and a read
//! response. The initiator asserts `valid`, the responder asserts `ready`,
//! and a transfer occurs on the cycle both are high. A refill delivers the
//! entire line in a single response (`mem-width >= line-width`).
//!
//! The module provides:
//! 1. **Wire types:** the per-cycle bundles exchanged between a cache and
//!    its memory.
//! 2. **Mock memory:** [`MainMemory`], a flat byte image with programmable
//!    latencies, used by the simulator harness and the tests.

/// Mock main memory answering the bundle handshake.
pub mod memory;

pub use memory::{MainMemory, MemoryTiming};

/// Read-request channel, cache to memory.
#[derive(Clone, Debug, Default)]
pub struct MemReadReq {
    /// Request present this cycle.
    pub valid: bool,
    /// Address of the missing line.
    pub addr: u64,
}

/// Write-request channel, cache to memory.
#[derive(Clone, Debug, Default)]
pub struct MemWriteReq {
    /// Request present this cycle.
    pub valid: bool,
    /// Address the write is issued against.
    pub addr: u64,
    /// Line data to write back.
    pub data: Vec<u8>,
}

/// Read-response channel, memory to cache.
#[derive(Clone, Debug, Default)]
pub struct MemReadResp {
    /// Response present this cycle.
    pub valid: bool,
    /// Address of the delivered line.
    pub addr: u64,
    /// The full line.
    pub data: Vec<u8>,
}

/// Everything a cache drives onto its memory port in one cycle.
#[derive(Clone, Debug, Default)]
pub struct MemPortOut {
    /// Read-request channel.
    pub read: MemReadReq,
    /// Write-request channel.
    pub write: MemWriteReq,
    /// Ready to consume a read response.
    pub resp_ready: bool,
}

/// Everything the memory drives back in one cycle.
#[derive(Clone, Debug, Default)]
pub struct MemPortIn {
    /// Memory will accept a read request this cycle.
    pub read_ready: bool,
    /// Memory will accept a write request this cycle.
    pub write_ready: bool,
    /// Read-response channel.
    pub resp: MemReadResp,
}

impl MemPortIn {
    /// A port with nothing to say: not ready, no response.
    pub fn idle() -> Self {
        Self::default()
    }
}
