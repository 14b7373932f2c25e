//! Branch Target Buffer.
//!
//! A direct-mapped target cache keyed by PC. Each entry is
//! `{tag, is_return, target}`; the index is the low bits of the PC and the
//! tag is the remaining high bits. The table behaves like a registered SRAM:
//! a PC presented this cycle produces its prediction on the next, so the
//! prediction output always refers to the previously presented PC. A
//! prediction is valid only when the stored tag matches that PC and the
//! entry's valid bit is set, so the BTB never produces a false-positive
//! branch; the pipeline assumes a non-branch is never predicted as one.

/// One BTB entry.
#[derive(Clone, Copy, Debug, Default)]
struct BtbEntry {
    tag: u64,
    is_return: bool,
    target: u64,
}

/// Prediction output for the previously presented PC.
#[derive(Clone, Copy, Debug, Default)]
pub struct BtbPrediction {
    /// Entry valid and tag matched.
    pub valid: bool,
    /// The predicted instruction is a function return.
    pub is_return: bool,
    /// Predicted target address.
    pub target: u64,
}

/// Update request installed on a misprediction.
#[derive(Clone, Copy, Debug, Default)]
pub struct BtbUpdate {
    /// Perform the update.
    pub valid: bool,
    /// PC of the mispredicted instruction.
    pub pc: u64,
    /// Resolved target.
    pub target: u64,
    /// The instruction is a function return.
    pub is_return: bool,
}

/// Direct-mapped branch target buffer.
pub struct Btb {
    table: Vec<BtbEntry>,
    valid: Vec<bool>,
    last_pc: u64,
    last_fetch_valid: bool,
    hash_mask: u64,
    hash_bits: u32,
}

impl Btb {
    /// Creates a BTB with `size` entries (a power of two, validated at
    /// configuration time).
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![BtbEntry::default(); size],
            valid: vec![false; size],
            last_pc: 0,
            last_fetch_valid: false,
            hash_mask: size as u64 - 1,
            hash_bits: (size as u64).trailing_zeros(),
        }
    }

    /// The hash is the low-order bits of the PC; anything combinational
    /// would do.
    fn index(&self, pc: u64) -> usize {
        (pc & self.hash_mask) as usize
    }

    /// The prediction for the PC presented on the previous cycle.
    ///
    /// Invalid when that fetch was itself squashed: a prediction must never
    /// outlive the fetch it describes.
    pub fn prediction(&self) -> BtbPrediction {
        let idx = self.index(self.last_pc);
        let entry = self.table[idx];
        BtbPrediction {
            valid: self.last_fetch_valid
                && self.valid[idx]
                && entry.tag == (self.last_pc >> self.hash_bits),
            is_return: entry.is_return,
            target: entry.target,
        }
    }

    /// Presents the PC fetched this cycle; `fetch_valid` is clear when the
    /// fetch was squashed by a redirect.
    pub fn present(&mut self, pc: u64, fetch_valid: bool) {
        self.last_pc = pc;
        self.last_fetch_valid = fetch_valid;
    }

    /// Handles an update request: a direct-mapped overwrite of the hashed
    /// index with the full entry, setting its valid bit.
    pub fn update(&mut self, update: &BtbUpdate) {
        if !update.valid {
            return;
        }
        let idx = self.index(update.pc);
        self.table[idx] = BtbEntry {
            tag: update.pc >> self.hash_bits,
            is_return: update.is_return,
            target: update.target,
        };
        self.valid[idx] = true;
    }
}
