//! Cache meta (tag/valid) array.
//!
//! One tag store and one valid bitmap per way. A lookup compares the incoming
//! tag against every way's stored tag in parallel, gated by that way's valid
//! bit. On a miss the reported way is the round-robin evict counter, together
//! with its valid bit so the caller can decide whether eviction needs a
//! write-back. All valid bits are clear at reset, so the first access to any
//! set always misses regardless of (undefined) tag contents.

use crate::config::CacheGeometry;

/// Result of a meta-array lookup.
#[derive(Clone, Copy, Debug, Default)]
pub struct MetaLookup {
    /// Some way's valid tag matched.
    pub hit: bool,
    /// The matching way on a hit, the evict way on a miss.
    pub way: usize,
    /// Valid bit of the reported way.
    pub valid: bool,
}

/// Per-way tag store and valid bitmap.
pub struct MetaArray {
    tags: Vec<Vec<u64>>,
    valid: Vec<Vec<bool>>,
    evict_way: usize,
    num_ways: usize,
}

impl MetaArray {
    /// Creates the array for the given geometry with all valid bits clear.
    pub fn new(geometry: &CacheGeometry) -> Self {
        Self {
            tags: vec![vec![0; geometry.num_sets()]; geometry.num_ways()],
            valid: vec![vec![false; geometry.num_sets()]; geometry.num_ways()],
            evict_way: 0,
            num_ways: geometry.num_ways(),
        }
    }

    /// Parallel tag comparison for `addr`.
    pub fn lookup(&self, geometry: &CacheGeometry, addr: u64) -> MetaLookup {
        let set = geometry.set(addr);
        let tag = geometry.tag(addr);

        for way in 0..self.num_ways {
            if self.valid[way][set] && self.tags[way][set] == tag {
                return MetaLookup {
                    hit: true,
                    way,
                    valid: true,
                };
            }
        }

        MetaLookup {
            hit: false,
            way: self.evict_way,
            valid: self.valid[self.evict_way][set],
        }
    }

    /// Installs `tag` at `(set, way)` and sets the valid bit, as one write.
    pub fn update(&mut self, set: usize, way: usize, tag: u64) {
        self.tags[way][set] = tag;
        self.valid[way][set] = true;
    }

    /// Advances the round-robin evict counter; called every cycle.
    pub fn tick(&mut self) {
        self.evict_way = (self.evict_way + 1) % self.num_ways;
    }
}
