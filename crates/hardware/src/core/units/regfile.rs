//! Architectural register file.
//!
//! 32 entries of the datapath width, two read ports, one write port.
//! It enforces:
//! 1. **x0 semantics:** entry 0 reads as zero and ignores writes.
//! 2. **Write-before-read:** a read of the address being written in the same
//!    cycle returns the new data, so a WB→ID dependency needs no bubble.

use crate::common::bits::mask;
use crate::core::pipeline::signals::RegWrite;

/// The 32-entry register file.
pub struct RegisterFile {
    regs: [u64; 32],
    width_mask: u64,
}

impl RegisterFile {
    /// Creates a register file of the given width with every entry zero.
    pub fn new(core_width: u32) -> Self {
        Self {
            regs: [0; 32],
            width_mask: mask(core_width),
        }
    }

    /// Reads register `idx`. Register 0 always returns 0.
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 {
            0
        } else {
            self.regs[idx]
        }
    }

    /// Writes `val` to register `idx`. Writes to register 0 are suppressed.
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val & self.width_mask;
        }
    }

    /// Commits a writeback-port bundle.
    pub fn commit(&mut self, port: &RegWrite) {
        if port.en {
            self.write(port.addr, port.data);
        }
    }

    /// Snapshot of all 32 registers, for tests and state dumps.
    pub fn dump(&self) -> [u64; 32] {
        let mut out = self.regs;
        out[0] = 0;
        out
    }
}
