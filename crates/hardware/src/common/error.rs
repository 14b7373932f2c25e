//! Error types for simulator construction.
//!
//! The core itself does not raise exceptions: unrecognized instructions decode
//! to nop and stray memory accesses are forwarded to the external memory
//! unchanged. The only fallible surface is construction, where an invalid
//! configuration is rejected before any state exists.

use thiserror::Error;

/// Errors produced while validating a [`crate::config::Config`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A width parameter is outside the supported range.
    #[error("{name} is {value} bits; supported range is {min}..={max}")]
    WidthOutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// Configured value.
        value: u32,
        /// Minimum supported value.
        min: u32,
        /// Maximum supported value.
        max: u32,
    },

    /// A parameter that must be a power of two is not.
    #[error("{name} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending parameter.
        name: &'static str,
        /// Configured value.
        value: u64,
    },

    /// The register count is fixed by the ISA.
    #[error("reg-count must be 32, got {0}")]
    RegCount(u32),

    /// The memory bus must be able to carry a full cache line per response.
    #[error("mem-width ({mem_width}) is narrower than {cache} line-width ({line_width})")]
    MemNarrowerThanLine {
        /// Which cache the line width belongs to.
        cache: &'static str,
        /// Configured memory width in bits.
        mem_width: u32,
        /// Configured line width in bits.
        line_width: u32,
    },

    /// The cache address decomposition does not fit in the physical address.
    #[error("{cache}: set and line index widths exceed paddr-width ({paddr_width})")]
    CacheGeometry {
        /// Which cache is misconfigured.
        cache: &'static str,
        /// Configured physical address width.
        paddr_width: u32,
    },
}
