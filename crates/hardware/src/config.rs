//! Configuration for the pipeline model.
//!
//! This module defines the construction-time parameter hierarchy. It provides:
//! 1. **Defaults:** a baseline core (64-bit datapath, 32-bit physical
//!    addresses, small 2-way caches) usable without any configuration file.
//! 2. **Structures:** `Config` with per-cache, BTB, RAS, and predictor
//!    sub-configs, deserializable from kebab-case JSON.
//! 3. **Geometry:** `CacheGeometry`, the widths derived from a cache's
//!    parameter set, with the tag/set/index address slicing used everywhere.
//!
//! Configuration is consumed at construction only; nothing here changes at
//! runtime.

use serde::Deserialize;

use crate::common::bits::mask;
use crate::common::error::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Physical address width in bits.
    pub const PADDR_WIDTH: u32 = 32;

    /// Datapath (register) width in bits.
    pub const CORE_WIDTH: u32 = 64;

    /// Memory bus width in bits; must cover a full cache line per response.
    pub const MEM_WIDTH: u32 = 512;

    /// Architectural register count, fixed by the ISA.
    pub const REG_COUNT: u32 = 32;

    /// Reset program counter.
    pub const RESET_ADDR: u64 = 0x1000;

    /// Default number of cache sets.
    pub const CACHE_SETS: usize = 64;

    /// Default cache associativity.
    pub const CACHE_WAYS: usize = 2;

    /// Default cache line width in bits (64 bytes).
    pub const CACHE_LINE_WIDTH: u32 = 512;

    /// Default Branch Target Buffer size (entries, power of two).
    pub const BTB_SIZE: usize = 256;

    /// Default Return Address Stack size (entries, power of two).
    pub const RAS_SIZE: usize = 8;

    /// Default GShare pattern-history-table size (log2 entries).
    pub const BPRED_TABLE_BITS: u32 = 12;
}

/// Direction predictor implementations selectable at construction.
///
/// All implementations sit behind the same predict/update interface; the
/// correction channel carries `{pc, taken}` regardless of the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredictorKind {
    /// Predict every lookup as taken (the baseline stub).
    #[default]
    AlwaysTaken,
    /// Global-history XOR-indexed 2-bit counters.
    #[serde(alias = "gshare")]
    GShare,
}

/// Direction predictor parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BpredParams {
    /// Which predictor to instantiate.
    pub kind: PredictorKind,
    /// Pattern-history-table size as log2 entries (GShare only).
    pub table_bits: u32,
}

impl Default for BpredParams {
    fn default() -> Self {
        Self {
            kind: PredictorKind::default(),
            table_bits: defaults::BPRED_TABLE_BITS,
        }
    }
}

/// Parameters of one cache: `{num-sets, num-ways, line-width}`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CacheParams {
    /// Number of sets; must be a power of two.
    pub num_sets: usize,
    /// Number of ways per set; must be a power of two.
    pub num_ways: usize,
    /// Line width in bits; must be a power of two and at least 32.
    pub line_width: u32,
}

impl Default for CacheParams {
    fn default() -> Self {
        Self {
            num_sets: defaults::CACHE_SETS,
            num_ways: defaults::CACHE_WAYS,
            line_width: defaults::CACHE_LINE_WIDTH,
        }
    }
}

/// Branch Target Buffer parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BtbParams {
    /// Number of entries; must be a power of two.
    pub size: usize,
}

impl Default for BtbParams {
    fn default() -> Self {
        Self {
            size: defaults::BTB_SIZE,
        }
    }
}

/// Return Address Stack parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RasParams {
    /// Number of entries in the circular buffer; must be a power of two.
    pub size: usize,
}

impl Default for RasParams {
    fn default() -> Self {
        Self {
            size: defaults::RAS_SIZE,
        }
    }
}

/// Root configuration consumed by [`crate::core::Core`] at construction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Physical address width in bits (PC and memory addresses).
    pub paddr_width: u32,
    /// Datapath width in bits (register file and ALU).
    pub core_width: u32,
    /// Memory bus width in bits; at least the widest cache line.
    pub mem_width: u32,
    /// Architectural register count; must be 32.
    pub reg_count: u32,
    /// Program counter value at reset.
    pub reset_addr: u64,
    /// Instruction cache parameters.
    pub icache: CacheParams,
    /// Data cache parameters.
    pub dcache: CacheParams,
    /// Branch Target Buffer parameters.
    pub btb: BtbParams,
    /// Return Address Stack parameters.
    pub ras: RasParams,
    /// Direction predictor parameters.
    pub bpred: BpredParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paddr_width: defaults::PADDR_WIDTH,
            core_width: defaults::CORE_WIDTH,
            mem_width: defaults::MEM_WIDTH,
            reg_count: defaults::REG_COUNT,
            reset_addr: defaults::RESET_ADDR,
            icache: CacheParams::default(),
            dcache: CacheParams::default(),
            btb: BtbParams::default(),
            ras: RasParams::default(),
            bpred: BpredParams::default(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first violated constraint:
    /// width ranges, power-of-two requirements, the fixed register count, and
    /// the `mem-width >= line-width` bus constraint for each cache.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_width("paddr-width", self.paddr_width, 16, 64)?;
        check_width("core-width", self.core_width, 32, 64)?;
        if self.reg_count != 32 {
            return Err(ConfigError::RegCount(self.reg_count));
        }
        check_pow2("btb.size", self.btb.size as u64)?;
        check_pow2("ras.size", self.ras.size as u64)?;
        check_width("bpred.table-bits", self.bpred.table_bits, 1, 24)?;
        self.check_cache("icache", &self.icache)?;
        self.check_cache("dcache", &self.dcache)?;
        Ok(())
    }

    fn check_cache(&self, name: &'static str, params: &CacheParams) -> Result<(), ConfigError> {
        check_pow2(name, params.num_sets as u64)?;
        check_pow2(name, params.num_ways as u64)?;
        check_pow2(name, params.line_width as u64)?;
        check_width(name, params.line_width, 32, 4096)?;
        if self.mem_width < params.line_width {
            return Err(ConfigError::MemNarrowerThanLine {
                cache: name,
                mem_width: self.mem_width,
                line_width: params.line_width,
            });
        }
        let geometry = CacheGeometry::new(CacheKind::Data, params, self);
        if geometry.tag_width() == 0 {
            return Err(ConfigError::CacheGeometry {
                cache: name,
                paddr_width: self.paddr_width,
            });
        }
        Ok(())
    }

    /// Mask covering one physical address.
    pub fn paddr_mask(&self) -> u64 {
        mask(self.paddr_width)
    }

    /// Mask covering one datapath value.
    pub fn core_mask(&self) -> u64 {
        mask(self.core_width)
    }
}

fn check_width(name: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::WidthOutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn check_pow2(name: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 || !value.is_power_of_two() {
        return Err(ConfigError::NotPowerOfTwo { name, value });
    }
    Ok(())
}

/// Which side of the core a cache serves.
///
/// The instruction cache never holds dirty data and always extracts 32-bit
/// words; the data cache write-backs valid evict ways and aligns by access
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    /// Instruction cache (frontend-owned).
    Instruction,
    /// Data cache (execute-owned).
    Data,
}

/// Derived widths and address slicing for one cache.
///
/// Addresses decompose as `tag ‖ set ‖ line_index`:
///
/// ```text
/// | -------- tag -------- | - set - | - index - |
/// | -------- tag -------- | ------ untag ------ |
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CacheGeometry {
    kind: CacheKind,
    num_sets: usize,
    num_ways: usize,
    line_width: u32,
    paddr_width: u32,
    core_width: u32,
    set_width: u32,
    line_index_width: u32,
}

impl CacheGeometry {
    /// Derives the geometry for `params` within the global widths of `config`.
    pub fn new(kind: CacheKind, params: &CacheParams, config: &Config) -> Self {
        let line_bytes = params.line_width / 8;
        Self {
            kind,
            num_sets: params.num_sets,
            num_ways: params.num_ways,
            line_width: params.line_width,
            paddr_width: config.paddr_width,
            core_width: config.core_width,
            set_width: (params.num_sets as u64).trailing_zeros(),
            line_index_width: u64::from(line_bytes).trailing_zeros(),
        }
    }

    /// Which side of the core this cache serves.
    pub fn kind(&self) -> CacheKind {
        self.kind
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Number of ways per set.
    pub fn num_ways(&self) -> usize {
        self.num_ways
    }

    /// Line width in bits.
    pub fn line_width(&self) -> u32 {
        self.line_width
    }

    /// Line size in bytes.
    pub fn line_bytes(&self) -> usize {
        (self.line_width / 8) as usize
    }

    /// Datapath width in bits.
    pub fn core_width(&self) -> u32 {
        self.core_width
    }

    /// Width of the set field.
    pub fn set_width(&self) -> u32 {
        self.set_width
    }

    /// Width of the intra-line byte index field.
    pub fn line_index_width(&self) -> u32 {
        self.line_index_width
    }

    /// Width of the set + index fields together.
    pub fn untag_width(&self) -> u32 {
        self.set_width + self.line_index_width
    }

    /// Width of the tag field.
    pub fn tag_width(&self) -> u32 {
        self.paddr_width.saturating_sub(self.untag_width())
    }

    /// Tag bits of `addr`.
    pub fn tag(&self, addr: u64) -> u64 {
        (addr & mask(self.paddr_width)) >> self.untag_width()
    }

    /// Set index of `addr`.
    pub fn set(&self, addr: u64) -> usize {
        ((addr >> self.line_index_width) & mask(self.set_width)) as usize
    }

    /// Intra-line byte index of `addr`.
    pub fn index(&self, addr: u64) -> usize {
        (addr & mask(self.line_index_width)) as usize
    }

    /// Base address of the line containing `addr`.
    pub fn line_base(&self, addr: u64) -> u64 {
        addr & !mask(self.line_index_width)
    }
}
