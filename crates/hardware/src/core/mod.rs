//! The top pipeline.
//!
//! `Core` instantiates and wires every component, owns the pipeline latches,
//! and implements the stall/flush policy. One call to [`Core::step`] is one
//! clock cycle, split in two phases:
//! 1. **Evaluate:** every stage's next value is computed from the current
//!    latch state. The single intentional exception to pure reads is the
//!    register file, which absorbs this cycle's writeback before decode
//!    reads it (write-before-read within the cycle).
//! 2. **Commit:** each latch installs its next value subject to this cycle's
//!    stall and flush conditions, the PC advances, and the caches and
//!    prediction structures clock forward.
//!
//! Stall classes and the latches they freeze:
//! - **icache miss:** PC, IF2, IF3; IF/ID keeps moving but carries bubbles.
//! - **dcache miss:** PC, IF2, IF3, IF/ID, ID/EX, EX/MEM; MEM/WB is forced
//!   to a bubble so writeback cannot double-commit.
//! - **load-use hazard:** PC and the fetch latches; a bubble enters ID/EX.
//! - **misprediction:** bubbles IF2, IF3, IF/ID, ID/EX, EX/MEM, and MEM/WB
//!   for one cycle while the PC takes the corrected target.
//!
//! Flushes take precedence over stalls for the latches they clear; the PC
//! redirect likewise overrides a concurrent icache freeze, since the
//! correction pulse lasts a single cycle.

/// Set-associative pipelined caches.
pub mod cache;

/// Instruction-fetch frontend (BTB, RAS, direction predictor).
pub mod frontend;

/// Pipeline latches, stages, and management units.
pub mod pipeline;

/// Functional units (ALU, aligner, register file).
pub mod units;

use tracing::trace;

use crate::config::{CacheGeometry, CacheKind, Config};
use crate::core::cache::{Cache, CacheReq};
use crate::core::frontend::Frontend;
use crate::core::pipeline::branch::BranchUnit;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{ExMem, FetchLatch, IdEx, MemWb};
use crate::core::pipeline::stages::{decode, execute, mem, writeback};
use crate::core::units::aligner::AccessKind;
use crate::core::units::regfile::RegisterFile;
use crate::common::error::ConfigError;
use crate::soc::{MemPortIn, MemPortOut};
use crate::stats::SimStats;

/// Per-cycle debug bundle: the canonical retirement trace.
///
/// `pc_trigger` is high exactly on cycles where the MEM/WB latch is valid;
/// `pc_trace` and `pc_inst` then carry the PC and raw word of the retiring
/// instruction.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugBundle {
    /// An instruction retires this cycle.
    pub pc_trigger: bool,
    /// PC of the retiring instruction.
    pub pc_trace: u64,
    /// Raw encoding of the retiring instruction.
    pub pc_inst: u32,
}

/// Wires into the core for one cycle: one memory port per cache.
#[derive(Clone, Debug, Default)]
pub struct CoreInputs {
    /// Instruction-side memory port.
    pub imem: MemPortIn,
    /// Data-side memory port.
    pub dmem: MemPortIn,
}

/// Wires out of the core for one cycle.
#[derive(Clone, Debug, Default)]
pub struct CoreOutputs {
    /// Instruction-side memory requests.
    pub imem: MemPortOut,
    /// Data-side memory requests.
    pub dmem: MemPortOut,
    /// Retirement trace bundle.
    pub debug: DebugBundle,
}

/// The 5-stage in-order pipeline.
pub struct Core {
    paddr_mask: u64,
    paddr_width: u32,
    core_width: u32,

    /// Architectural register file.
    pub regs: RegisterFile,
    /// Run statistics.
    pub stats: SimStats,

    pc: u64,
    if2: FetchLatch,
    if3: FetchLatch,
    if_id: FetchLatch,
    id_ex: IdEx,
    ex_mem: ExMem,
    mem_wb: MemWb,

    frontend: Frontend,
    branch_unit: BranchUnit,
    icache: Cache,
    dcache: Cache,
}

impl Core {
    /// Builds a core from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] the configuration violates.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            paddr_mask: config.paddr_mask(),
            paddr_width: config.paddr_width,
            core_width: config.core_width,
            regs: RegisterFile::new(config.core_width),
            stats: SimStats::default(),
            pc: config.reset_addr & config.paddr_mask(),
            if2: FetchLatch::default(),
            if3: FetchLatch::default(),
            if_id: FetchLatch::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            frontend: Frontend::new(config),
            branch_unit: BranchUnit::new(),
            icache: Cache::new(CacheGeometry::new(
                CacheKind::Instruction,
                &config.icache,
                config,
            )),
            dcache: Cache::new(CacheGeometry::new(CacheKind::Data, &config.dcache, config)),
        })
    }

    /// Current program counter (IF1).
    pub fn pc(&self) -> u64 {
        self.pc
    }

    /// The fetch frontend, for predictor inspection or replacement.
    pub fn frontend_mut(&mut self) -> &mut Frontend {
        &mut self.frontend
    }

    /// Advances the core by one clock cycle.
    pub fn step(&mut self, inputs: &CoreInputs) -> CoreOutputs {
        // ------------------------------------------------------------------
        // Evaluate: everything below observes pre-commit latch state.
        // ------------------------------------------------------------------

        let ic_stall = self.icache.miss_stall();
        let dc_stall = self.dcache.miss_stall();
        let mispredict = *self.branch_unit.mispredict();

        debug_assert!(
            !(mispredict.valid && dc_stall),
            "correction pulse during a dcache stall; the bypass must have squashed this access"
        );

        // Retirement trace from the current MEM/WB latch.
        let dbg_bundle = DebugBundle {
            pc_trigger: self.mem_wb.ctrl.valid,
            pc_trace: self.mem_wb.ctrl.pc,
            pc_inst: self.mem_wb.ctrl.inst,
        };
        if dbg_bundle.pc_trigger {
            trace!(pc = dbg_bundle.pc_trace, inst = dbg_bundle.pc_inst, "retire");
        }

        // WB: select the write port and apply it ahead of the decode read
        // (write-before-read within the cycle).
        let reg_write = writeback::run(&self.mem_wb, self.dcache.resp_data());
        self.regs.commit(&reg_write);

        // MEM: pass-through and branch resolution.
        let mem_out = mem::run(&self.ex_mem);

        // Branch unit: same-cycle bypass plus the next correction latch.
        let (bypass, mispredict_next) =
            self.branch_unit
                .evaluate(&mem_out.branch, self.ex_mem.ctrl.pc, self.id_ex.ctrl.pc);

        // ID: decode the word the icache delivered for the IF/ID entry.
        let raw_inst = self.icache.resp_data() as u32;
        let decode_out = decode::run(&self.if_id, raw_inst, &self.regs);

        // Load-use hazard between EX and the instruction being decoded.
        let hazard = hazards::load_use_hazard(&self.id_ex, decode_out.id_ex.ctrl.inst);

        // EX: forwarding selections against MEM and WB, then the ALU.
        let fwd = execute::ForwardData {
            select: hazards::forward_select(&self.id_ex, &self.ex_mem, &self.mem_wb),
            mem_data: self.ex_mem.alu_result,
            wb_data: reg_write.data,
        };
        let exec_out = execute::run(
            &self.id_ex,
            decode_out.rs1_data,
            decode_out.rs2_data,
            &fwd,
            mispredict.valid || bypass,
            self.paddr_width,
            self.core_width,
        );

        // IF1: next-PC selection.
        let decision = self.frontend.decide(self.pc, &mispredict);

        // IF2 presents the icache request for the latched fetch.
        let icache_req = CacheReq {
            valid: self.if2.valid,
            addr: self.if2.pc,
            kind: AccessKind::Word,
            read: true,
        };

        // ------------------------------------------------------------------
        // Commit: advance caches, prediction state, latches, and the PC.
        // ------------------------------------------------------------------

        let fetch_advance = !(ic_stall || dc_stall || hazard);
        let decode_advance = !(dc_stall || hazard || mispredict.valid);

        let (imem_out, ic_events) = self.icache.step(&icache_req, dc_stall, &inputs.imem);
        let (dmem_out, dc_events) = self.dcache.step(&exec_out.dcache_req, false, &inputs.dmem);

        self.frontend.commit(
            &decision,
            &mispredict,
            &decode_out.ras,
            fetch_advance,
            decode_advance,
        );
        self.branch_unit.commit(mispredict_next);

        // PC: the correction pulse lasts one cycle, so its redirect overrides
        // a concurrent fetch freeze.
        if mispredict.valid || fetch_advance {
            self.pc = decision.next_pc;
        }

        // Fetch latches commit downstream-first so each consumes its
        // upstream's pre-commit value.
        //
        // IF/ID: advances even under an icache stall, but then only carries
        // bubbles, so decode stops seeing new valid entries.
        if mispredict.valid {
            self.if_id = FetchLatch::default();
        } else if !(dc_stall || hazard) {
            self.if_id = FetchLatch {
                valid: self.if3.valid && !ic_stall,
                pc: self.if3.pc,
            };
        }

        // IF3
        if mispredict.valid {
            self.if3 = FetchLatch::default();
        } else if fetch_advance {
            self.if3 = FetchLatch {
                valid: self.if2.valid,
                pc: self.if2.pc,
            };
        }

        // IF2
        if mispredict.valid {
            self.if2 = FetchLatch::default();
        } else if fetch_advance {
            self.if2 = FetchLatch {
                valid: true,
                pc: decision.if1_pc,
            };
        }

        // ID/EX: flush beats the dcache hold, which beats the hazard bubble.
        if mispredict.valid {
            self.id_ex = IdEx::default();
        } else if !dc_stall {
            if hazard {
                self.id_ex = IdEx::default();
            } else {
                self.id_ex = decode_out.id_ex;
            }
        }

        // EX/MEM
        if mispredict.valid {
            self.ex_mem = ExMem::default();
        } else if !dc_stall {
            self.ex_mem = exec_out.ex_mem;
        }

        // MEM/WB: forced bubble during a dcache stall (single-commit) and on
        // the correction pulse (kills the wrong-path instruction leaving MEM).
        if mispredict.valid || dc_stall {
            self.mem_wb = MemWb::default();
        } else {
            self.mem_wb = mem_out.mem_wb;
        }

        self.update_stats(
            &dbg_bundle,
            ic_stall,
            dc_stall,
            hazard,
            &mispredict,
            bypass,
            mem_out.branch.valid && !dc_stall && !mispredict.valid,
            &ic_events,
            &dc_events,
        );

        CoreOutputs {
            imem: imem_out,
            dmem: dmem_out,
            debug: dbg_bundle,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn update_stats(
        &mut self,
        debug: &DebugBundle,
        ic_stall: bool,
        dc_stall: bool,
        hazard: bool,
        mispredict: &crate::core::pipeline::signals::Mispredict,
        detected: bool,
        branch_resolved: bool,
        ic_events: &cache::CacheEvents,
        dc_events: &cache::CacheEvents,
    ) {
        let stats = &mut self.stats;
        stats.cycles += 1;
        if debug.pc_trigger {
            stats.instructions_retired += 1;
        }
        if dc_stall {
            stats.stalls_mem += 1;
        } else if ic_stall {
            stats.stalls_fetch += 1;
        } else if hazard {
            stats.stalls_data += 1;
        }
        if mispredict.valid {
            stats.stalls_control += 1;
        }
        if branch_resolved {
            stats.branches_resolved += 1;
        }
        if detected {
            stats.branch_mispredictions += 1;
        }
        stats.icache_hits += u64::from(ic_events.hit);
        stats.icache_misses += u64::from(ic_events.miss);
        stats.dcache_hits += u64::from(dc_events.hit);
        stats.dcache_misses += u64::from(dc_events.miss);
        stats.dcache_evictions += u64::from(dc_events.evict);
    }

    /// The architectural PC mask, exposed for harness code.
    pub fn paddr_mask(&self) -> u64 {
        self.paddr_mask
    }
}
