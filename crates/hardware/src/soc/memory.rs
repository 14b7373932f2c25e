//! Mock main memory.
//!
//! A flat byte image that answers one cache's memory port. Latencies are
//! programmable so the cache's miss state machine can be exercised against
//! controllable delays; every cycle the model exposes its `ready` and
//! `resp.valid` wires as plain values and advances in `step`.
//!
//! The model is strictly deterministic: given the same sequence of port
//! outputs it produces the same sequence of port inputs.

use super::{MemPortIn, MemPortOut, MemReadResp};

/// Handshake latencies of the mock memory.
#[derive(Clone, Copy, Debug)]
pub struct MemoryTiming {
    /// Cycles between accepting a read request and presenting its response.
    pub read_latency: u64,
    /// Cycles the write channel holds `ready` low before accepting.
    pub write_latency: u64,
}

impl Default for MemoryTiming {
    fn default() -> Self {
        Self {
            read_latency: 2,
            write_latency: 1,
        }
    }
}

/// Flat-image main memory with programmable latencies.
pub struct MainMemory {
    bytes: Vec<u8>,
    line_bytes: usize,
    timing: MemoryTiming,
    /// Accepted read waiting to become a response: (line address, cycles left).
    pending_read: Option<(u64, u64)>,
    /// Cycles the write channel has been held waiting.
    write_wait: u64,
}

impl MainMemory {
    /// Creates a memory of `size` bytes serving lines of `line_bytes`.
    pub fn new(size: usize, line_bytes: usize, timing: MemoryTiming) -> Self {
        Self {
            bytes: vec![0; size],
            line_bytes,
            timing,
            pending_read: None,
            write_wait: 0,
        }
    }

    /// Size of the backing image in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Copies `data` into the image at `addr`. Out-of-range bytes are
    /// dropped; the external memory owns the semantics of stray addresses.
    pub fn load(&mut self, addr: u64, data: &[u8]) {
        for (i, &b) in data.iter().enumerate() {
            let at = addr as usize + i;
            if at < self.bytes.len() {
                self.bytes[at] = b;
            }
        }
    }

    /// Reads `len` bytes at `addr`, zero-filling past the end of the image.
    pub fn peek(&self, addr: u64, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| self.bytes.get(addr as usize + i).copied().unwrap_or(0))
            .collect()
    }

    /// Reads a little-endian u64 at `addr` (test convenience).
    pub fn peek_u64(&self, addr: u64) -> u64 {
        let bytes = self.peek(addr, 8);
        u64::from_le_bytes(bytes.try_into().unwrap_or([0; 8]))
    }

    /// Writes a little-endian u32 at `addr` (test convenience).
    pub fn poke_u32(&mut self, addr: u64, value: u32) {
        self.load(addr, &value.to_le_bytes());
    }

    /// Writes a little-endian u64 at `addr` (test convenience).
    pub fn poke_u64(&mut self, addr: u64, value: u64) {
        self.load(addr, &value.to_le_bytes());
    }

    fn line_base(&self, addr: u64) -> u64 {
        addr & !(self.line_bytes as u64 - 1)
    }

    /// The wires the memory presents this cycle.
    pub fn outputs(&self) -> MemPortIn {
        let resp = match self.pending_read {
            Some((addr, 0)) => MemReadResp {
                valid: true,
                addr,
                data: self.peek(addr, self.line_bytes),
            },
            _ => MemReadResp::default(),
        };
        MemPortIn {
            read_ready: self.pending_read.is_none(),
            write_ready: self.write_wait >= self.timing.write_latency,
            resp,
        }
    }

    /// Advances one cycle against the cache's port outputs.
    ///
    /// Transfers occur where this cycle's `valid` and `ready` coincide:
    /// an accepted read schedules a response, a presented response is
    /// retired when the cache was ready, and an accepted write commits the
    /// line to the image.
    pub fn step(&mut self, from_cache: &MemPortOut) {
        let presented = self.outputs();

        // Write channel: count cycles the request has been held, accept when
        // the latency is met.
        if from_cache.write.valid {
            if presented.write_ready {
                let base = self.line_base(from_cache.write.addr);
                let take = from_cache.write.data.len().min(self.line_bytes);
                for i in 0..take {
                    let at = base as usize + i;
                    if at < self.bytes.len() {
                        self.bytes[at] = from_cache.write.data[i];
                    }
                }
                self.write_wait = 0;
            } else {
                self.write_wait += 1;
            }
        } else {
            self.write_wait = 0;
        }

        // Response channel: retire when the cache consumed it.
        if presented.resp.valid && from_cache.resp_ready {
            self.pending_read = None;
        }

        // Read channel: accept a new request when idle.
        if from_cache.read.valid && presented.read_ready {
            self.pending_read = Some((self.line_base(from_cache.read.addr), self.timing.read_latency));
        } else if let Some((_, remaining)) = &mut self.pending_read {
            if *remaining > 0 {
                *remaining -= 1;
            }
        }
    }
}
