//! Simulator: owns the core and its two memory ports side-by-side.
//!
//! The core does not arbitrate between the instruction and data ports; each
//! cache owns one port and the simulator answers both. Per cycle the
//! simulator:
//! 1. samples both memories' output wires,
//! 2. steps the core against them,
//! 3. steps both memories against the core's requests,
//! 4. records the debug bundle when it signals a retirement.

use crate::config::Config;
use crate::core::{Core, CoreInputs, DebugBundle};
use crate::common::error::ConfigError;
use crate::soc::{MainMemory, MemoryTiming};

/// One entry of the retirement trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retirement {
    /// Cycle the instruction reached writeback.
    pub cycle: u64,
    /// PC of the retired instruction.
    pub pc: u64,
    /// Raw encoding of the retired instruction.
    pub inst: u32,
}

/// Whole-program simulator.
pub struct Simulator {
    /// The pipeline under simulation.
    pub core: Core,
    /// Instruction-side memory.
    pub imem: MainMemory,
    /// Data-side memory.
    pub dmem: MainMemory,
    trace: Vec<Retirement>,
    cycle: u64,
}

impl Simulator {
    /// Builds a simulator with `mem_size` bytes behind each port.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration is invalid.
    pub fn new(config: &Config, mem_size: usize, timing: MemoryTiming) -> Result<Self, ConfigError> {
        let core = Core::new(config)?;
        Ok(Self {
            core,
            imem: MainMemory::new(mem_size, (config.icache.line_width / 8) as usize, timing),
            dmem: MainMemory::new(mem_size, (config.dcache.line_width / 8) as usize, timing),
            trace: Vec::new(),
            cycle: 0,
        })
    }

    /// Builds a simulator with default memory timing and 1 MiB images.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration is invalid.
    pub fn with_defaults(config: &Config) -> Result<Self, ConfigError> {
        Self::new(config, 1 << 20, MemoryTiming::default())
    }

    /// Cycles simulated so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The retirement trace recorded so far.
    pub fn trace(&self) -> &[Retirement] {
        &self.trace
    }

    /// Loads `bytes` at `addr` into both memory images.
    ///
    /// The two ports back independent images; loading both keeps a program's
    /// code fetchable and its data loadable regardless of which side touches
    /// an address.
    pub fn load(&mut self, addr: u64, bytes: &[u8]) {
        self.imem.load(addr, bytes);
        self.dmem.load(addr, bytes);
    }

    /// Advances one cycle; returns the cycle's debug bundle.
    pub fn tick(&mut self) -> DebugBundle {
        let inputs = CoreInputs {
            imem: self.imem.outputs(),
            dmem: self.dmem.outputs(),
        };
        let outputs = self.core.step(&inputs);
        self.imem.step(&outputs.imem);
        self.dmem.step(&outputs.dmem);

        if outputs.debug.pc_trigger {
            self.trace.push(Retirement {
                cycle: self.cycle,
                pc: outputs.debug.pc_trace,
                inst: outputs.debug.pc_inst,
            });
        }
        self.cycle += 1;
        outputs.debug
    }

    /// Runs `cycles` cycles.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            let _ = self.tick();
        }
    }

    /// Runs until `count` instructions have retired or `max_cycles` elapse.
    ///
    /// Returns the number of instructions retired within the budget.
    pub fn run_until_retired(&mut self, count: usize, max_cycles: u64) -> usize {
        let mut spent = 0;
        while self.trace.len() < count && spent < max_cycles {
            let _ = self.tick();
            spent += 1;
        }
        self.trace.len()
    }
}
