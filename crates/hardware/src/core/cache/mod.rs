//! Set-associative, 3-stage pipelined, write-back cache.
//!
//! Addresses decompose as `tag ‖ set ‖ line_index`. The pipeline:
//! - **S0** presents the incoming address to the tag and data arrays. While
//!   stalling, the S1 address is re-presented so the arrays replay the same
//!   read.
//! - **S1** holds the registered request; the hit/way lookup and the way mux
//!   feed the aligner.
//! - **S2** holds the aligned response datum. On a completing miss the
//!   freshly refilled, aligned datum is substituted.
//!
//! Misses are serviced by a four-state machine (`idle`, `evict`, `read`,
//! `update`). `miss_stall` is asserted for exactly the cycles the machine is
//! non-idle plus the detection cycle; the caller holds its request stable
//! until it deasserts. Each miss performs exactly one memory read and at most
//! one eviction write (data cache only, when the evict way holds a valid
//! line; every filled line is treated as potentially dirty).

/// Per-way line storage.
pub mod data;

/// Per-way tag/valid storage with the round-robin evict counter.
pub mod meta;

use tracing::trace;

use crate::config::{CacheGeometry, CacheKind};
use crate::core::units::aligner::{self, AccessKind};
use crate::soc::{MemPortIn, MemPortOut, MemReadReq, MemWriteReq};

use self::data::DataArray;
use self::meta::MetaArray;

/// A request presented to the cache's S0 stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct CacheReq {
    /// Request present.
    pub valid: bool,
    /// Byte address.
    pub addr: u64,
    /// Access size and extension.
    pub kind: AccessKind,
    /// Read (true) or write (false) intent.
    pub read: bool,
}

/// Miss state machine states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MissState {
    Idle,
    Evict,
    Read,
    Update,
}

/// Events observed during one cache cycle, for statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct CacheEvents {
    /// A valid S1 request hit and completed this cycle.
    pub hit: bool,
    /// A miss was detected this cycle.
    pub miss: bool,
    /// An eviction write-back was initiated this cycle.
    pub evict: bool,
}

/// One cache: arrays, pipeline registers, and the miss state machine.
pub struct Cache {
    geometry: CacheGeometry,
    meta: MetaArray,
    data: DataArray,

    s1: CacheReq,
    s2: CacheReq,
    s2_data: u64,

    state: MissState,
    miss_data: u64,
    complete_miss: bool,
    evict_way: usize,
    evict_data: Vec<u8>,
}

impl Cache {
    /// Creates a cache with cleared valid bits; the first access to any set
    /// misses.
    pub fn new(geometry: CacheGeometry) -> Self {
        Self {
            meta: MetaArray::new(&geometry),
            data: DataArray::new(&geometry),
            s1: CacheReq::default(),
            s2: CacheReq::default(),
            s2_data: 0,
            state: MissState::Idle,
            miss_data: 0,
            complete_miss: false,
            evict_way: 0,
            evict_data: vec![0; geometry.line_bytes()],
            geometry,
        }
    }

    /// The geometry this cache was built with.
    pub fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// The registered S2 response datum, aligned to the datapath width.
    ///
    /// Valid three cycles after the request was presented (in steady state).
    pub fn resp_data(&self) -> u64 {
        self.s2_data
    }

    /// The request currently held in S2.
    pub fn s2_req(&self) -> &CacheReq {
        &self.s2
    }

    /// Whether the cache is stalling the pipeline this cycle:
    /// a miss in service, or a valid S1 request about to miss.
    pub fn miss_stall(&self) -> bool {
        self.state != MissState::Idle || self.about_to_miss()
    }

    fn about_to_miss(&self) -> bool {
        self.s1.valid && !self.meta.lookup(&self.geometry, self.s1.addr).hit
    }

    /// Advances the cache one cycle.
    ///
    /// `s0` is the request presented this cycle, `cpu_stall` freezes the
    /// internal pipeline on behalf of a stalled downstream consumer, and
    /// `mem_in` carries the memory port's wires for this cycle. Returns the
    /// wires the cache drives back at the memory, plus the events observed.
    pub fn step(
        &mut self,
        s0: &CacheReq,
        cpu_stall: bool,
        mem_in: &MemPortIn,
    ) -> (MemPortOut, CacheEvents) {
        let stall = self.miss_stall();
        let mut events = CacheEvents::default();
        let mut out = MemPortOut::default();

        // S1: lookup and way mux feed the aligner. On a miss the reported way
        // is the evict way, so the muxed line is the eviction candidate.
        let lookup = self.meta.lookup(&self.geometry, self.s1.addr);
        let s1_set = self.geometry.set(self.s1.addr);
        let s1_line = self.data.read(lookup.way, s1_set).to_vec();
        let aligned = aligner::align(&self.geometry, self.s1.addr, self.s1.kind, &s1_line);

        let mut complete_miss_next = false;

        match self.state {
            MissState::Idle => {
                if self.about_to_miss() {
                    events.miss = true;
                    self.evict_way = lookup.way;
                    self.evict_data = s1_line;

                    // The data cache must write a valid evict way back to
                    // memory before pulling the new line in. The instruction
                    // cache never holds dirty data and goes straight to the
                    // read.
                    if self.geometry.kind() == CacheKind::Data && lookup.valid {
                        trace!(addr = self.s1.addr, "cache miss, evicting");
                        self.state = MissState::Evict;
                    } else {
                        trace!(addr = self.s1.addr, "cache miss");
                        self.state = MissState::Read;
                    }
                }
            }
            MissState::Evict => {
                out.write = MemWriteReq {
                    valid: true,
                    addr: self.s1.addr,
                    data: self.evict_data.clone(),
                };
                if mem_in.write_ready {
                    events.evict = true;
                    self.state = MissState::Read;
                }
            }
            MissState::Read => {
                out.read = MemReadReq {
                    valid: true,
                    addr: self.s1.addr,
                };
                if mem_in.read_ready {
                    self.state = MissState::Update;
                }
            }
            MissState::Update => {
                out.resp_ready = true;
                if mem_in.resp.valid {
                    // Re-run the aligner over the refilled line, install the
                    // new tag and data for the evict way, and retire the S1
                    // request to a bubble.
                    self.miss_data = aligner::align(
                        &self.geometry,
                        self.s1.addr,
                        self.s1.kind,
                        &mem_in.resp.data,
                    );
                    let set = self.geometry.set(mem_in.resp.addr);
                    let tag = self.geometry.tag(mem_in.resp.addr);
                    self.meta.update(set, self.evict_way, tag);
                    self.data.update(set, self.evict_way, &mem_in.resp.data);
                    complete_miss_next = true;
                    self.state = MissState::Idle;
                    self.s1 = CacheReq::default();
                    trace!(addr = mem_in.resp.addr, "cache refill complete");
                }
            }
        }

        // Latch shift, gated by this cycle's stall conditions. While frozen
        // the arrays replay the S1 read, which the recomputation above models.
        //
        // `complete_miss` must survive until the shift actually happens: the
        // refilled datum would otherwise be lost when a miss completes while
        // the downstream consumer holds `cpu_stall`.
        if !stall && !cpu_stall {
            if self.s1.valid && lookup.hit {
                events.hit = true;
            }
            self.s2_data = if self.complete_miss {
                self.miss_data
            } else {
                aligned
            };
            self.s2 = self.s1;
            self.s1 = *s0;
            self.complete_miss = complete_miss_next;
        } else {
            self.complete_miss = self.complete_miss || complete_miss_next;
        }
        self.meta.tick();

        (out, events)
    }
}
