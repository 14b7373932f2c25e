//! Simulation statistics collection and reporting.
//!
//! Tracks the performance-visible events of a run:
//! 1. **Cycle and retirement counts** with derived IPC/CPI.
//! 2. **Stalls** by class: fetch (icache miss), memory (dcache miss), data
//!    (load-use), control (misprediction bubbles).
//! 3. **Cache behavior:** hits, misses, and eviction write-backs per cache.
//! 4. **Branch prediction:** resolved control transfers and mispredictions.

use std::time::Instant;

/// Statistics for one simulation run.
#[derive(Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulated cycles.
    pub cycles: u64,
    /// Instructions retired (MEM/WB valid cycles).
    pub instructions_retired: u64,

    /// Cycles stalled on an icache miss.
    pub stalls_fetch: u64,
    /// Cycles stalled on a dcache miss.
    pub stalls_mem: u64,
    /// Cycles stalled on a load-use hazard.
    pub stalls_data: u64,
    /// Bubble cycles injected by misprediction recovery.
    pub stalls_control: u64,

    /// Control transfers resolved in MEM.
    pub branches_resolved: u64,
    /// Control transfers that mispredicted.
    pub branch_mispredictions: u64,

    /// Instruction cache hits.
    pub icache_hits: u64,
    /// Instruction cache misses.
    pub icache_misses: u64,
    /// Data cache hits.
    pub dcache_hits: u64,
    /// Data cache misses.
    pub dcache_misses: u64,
    /// Data cache eviction write-backs.
    pub dcache_evictions: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            stalls_fetch: 0,
            stalls_mem: 0,
            stalls_data: 0,
            stalls_control: 0,
            branches_resolved: 0,
            branch_mispredictions: 0,
            icache_hits: 0,
            icache_misses: 0,
            dcache_hits: 0,
            dcache_misses: 0,
            dcache_evictions: 0,
        }
    }
}

impl SimStats {
    /// Prints the full report to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1);
        let instr = self.instructions_retired.max(1);

        println!("==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!(
            "sim_ipc                  {:.4}",
            self.instructions_retired as f64 / cyc as f64
        );
        println!("sim_cpi                  {:.4}", cyc as f64 / instr as f64);
        println!("----------------------------------------------------------");
        println!("STALL BREAKDOWN");
        let pct = |n: u64| (n as f64 / cyc as f64) * 100.0;
        println!(
            "  stalls.fetch           {} ({:.2}%)",
            self.stalls_fetch,
            pct(self.stalls_fetch)
        );
        println!(
            "  stalls.memory          {} ({:.2}%)",
            self.stalls_mem,
            pct(self.stalls_mem)
        );
        println!(
            "  stalls.data            {} ({:.2}%)",
            self.stalls_data,
            pct(self.stalls_data)
        );
        println!(
            "  stalls.control         {} ({:.2}%)",
            self.stalls_control,
            pct(self.stalls_control)
        );
        println!("----------------------------------------------------------");
        println!("BRANCH PREDICTION");
        let resolved = self.branches_resolved.max(1);
        println!("  bp.resolved            {}", self.branches_resolved);
        println!("  bp.mispredicts         {}", self.branch_mispredictions);
        println!(
            "  bp.accuracy            {:.2}%",
            100.0 * (1.0 - self.branch_mispredictions as f64 / resolved as f64)
        );
        println!("----------------------------------------------------------");
        println!("MEMORY HIERARCHY");
        let cache_line = |name: &str, hits: u64, misses: u64| {
            let total = hits + misses;
            let rate = if total > 0 {
                (misses as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            println!(
                "  {name:<6} accesses: {total:<10} | hits: {hits:<10} | miss_rate: {rate:.2}%"
            );
        };
        cache_line("L1-I", self.icache_hits, self.icache_misses);
        cache_line("L1-D", self.dcache_hits, self.dcache_misses);
        println!("  L1-D   evictions: {}", self.dcache_evictions);
        println!("==========================================================");
    }
}
