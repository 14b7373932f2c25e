//! Cache data array.
//!
//! One physical line store per way, read combinationally and written only on
//! refill of the chosen way.

use crate::config::CacheGeometry;

/// Per-way line storage.
pub struct DataArray {
    lines: Vec<Vec<Vec<u8>>>,
}

impl DataArray {
    /// Creates the array for the given geometry. Line contents are undefined
    /// at reset (zero here); the cleared valid bits in the meta array keep
    /// them unobservable.
    pub fn new(geometry: &CacheGeometry) -> Self {
        Self {
            lines: vec![
                vec![vec![0; geometry.line_bytes()]; geometry.num_sets()];
                geometry.num_ways()
            ],
        }
    }

    /// The line stored at `(way, set)`.
    pub fn read(&self, way: usize, set: usize) -> &[u8] {
        &self.lines[way][set]
    }

    /// Refills `(way, set)` with `data` (truncated/zero-padded to the line).
    pub fn update(&mut self, set: usize, way: usize, data: &[u8]) {
        let line = &mut self.lines[way][set];
        for (i, byte) in line.iter_mut().enumerate() {
            *byte = data.get(i).copied().unwrap_or(0);
        }
    }
}
