//! Flat-image loader.
//!
//! Programs are raw little-endian instruction streams placed at the reset
//! address (or anywhere the caller chooses). The memory contract has no
//! notion of object formats; anything beyond a flat image belongs to host
//! tooling.

use std::fs;
use std::io;
use std::path::Path;

use crate::sim::Simulator;

/// Reads a flat binary from disk.
///
/// # Errors
///
/// Propagates the underlying I/O error.
pub fn read_image(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
}

/// Loads a flat binary at `addr` into both of the simulator's images.
pub fn load_image(sim: &mut Simulator, addr: u64, bytes: &[u8]) {
    sim.load(addr, bytes);
}

/// Convenience: assembles a program from encoded words and loads it.
pub fn load_words(sim: &mut Simulator, addr: u64, words: &[u32]) {
    let mut bytes = Vec::with_capacity(words.len() * 4);
    for word in words {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    load_image(sim, addr, &bytes);
}
