//! Pipeline engine.
//!
//! `Cpu` owns the register file, both stores, the four inter-stage latches,
//! the stage-run flags, the stall latches, and the statistics. Each call to
//! [`Cpu::tick`] advances the whole machine by exactly one clock cycle.

use tracing::{debug, trace};

use super::pipeline::stages;
use super::pipeline::traits::PipelineLatch;
use super::pipeline::{ExMem, IdEx, IfId, MemWb, StageFlags, StallLatches};
use crate::common::{RegisterFile, SimError};
use crate::config::Config;
use crate::soc::System;
use crate::stats::SimStats;

/// The simulated processor.
#[derive(Debug)]
pub struct Cpu {
    /// Architectural registers and their pending-write flags.
    pub regs: RegisterFile,
    /// Byte address of the next instruction to fetch.
    pub pc: u16,
    /// Instruction and data stores.
    pub bus: System,

    /// Fetch to decode latch.
    pub if_id: IfId,
    /// Decode to execute latch.
    pub id_ex: IdEx,
    /// Execute to memory latch.
    pub ex_mem: ExMem,
    /// Memory to writeback latch.
    pub mem_wb: MemWb,

    /// Stage-run flags.
    pub run: StageFlags,
    /// Control-flow stall latches.
    pub stall: StallLatches,
    /// Set once `HLT` reaches writeback.
    pub halted: bool,

    /// Run statistics.
    pub stats: SimStats,
    /// Abort after this many cycles; 0 disables the limit.
    pub max_cycles: u64,
}

impl Cpu {
    /// Creates a CPU at PC 0 with an empty pipeline.
    pub fn new(system: System, regs: RegisterFile, config: &Config) -> Self {
        Self {
            regs,
            pc: 0,
            bus: system,
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            run: StageFlags::default(),
            stall: StallLatches::default(),
            halted: false,
            stats: SimStats::default(),
            max_cycles: config.general.max_cycles,
        }
    }

    /// Advances the machine by one clock cycle.
    ///
    /// Stages run writeback first and fetch last. The cycle counter
    /// increments once regardless of how many stages acted. Ticking a halted
    /// CPU does nothing.
    ///
    /// # Errors
    ///
    /// Any stage error is fatal. [`SimError::CycleLimitExceeded`] is
    /// returned once the configured budget is used up.
    pub fn tick(&mut self) -> Result<(), SimError> {
        if self.halted {
            return Ok(());
        }
        if self.max_cycles != 0 && self.stats.cycles >= self.max_cycles {
            return Err(SimError::CycleLimitExceeded(self.max_cycles));
        }

        self.print_pipeline_diagram();

        stages::wb_stage(self)?;
        stages::mem_stage(self)?;
        stages::execute_stage(self)?;
        stages::decode_stage(self)?;
        stages::fetch_stage(self)?;

        self.stats.cycles += 1;
        Ok(())
    }

    /// Ticks until `HLT` retires.
    ///
    /// `HLT` stops fetch at decode, so once it retires nothing may remain
    /// in flight.
    pub fn run(&mut self) -> Result<(), SimError> {
        while !self.halted {
            self.tick()?;
        }
        if !self.pipeline_empty() {
            return Err(SimError::PipelineInvariant("instructions in flight after halt"));
        }
        debug!(
            "halted after {} cycles, {} instructions",
            self.stats.cycles, self.stats.instructions
        );
        Ok(())
    }

    /// Discards every in-flight instruction younger than the redirecting one.
    ///
    /// Stage-run flags return to the initial configuration (fetch only),
    /// both stall latches drop, and all four latches are emptied.
    pub fn flush(&mut self) {
        self.run = StageFlags::default();
        self.stall = StallLatches::default();
        self.if_id.flush();
        self.id_ex.flush();
        self.ex_mem.flush();
        self.mem_wb.flush();
    }

    /// Returns `true` when no stage holds an instruction.
    pub fn pipeline_empty(&self) -> bool {
        !(self.run.decode || self.run.execute || self.run.memory || self.run.writeback)
    }

    /// Prints the PC and registers to stdout.
    pub fn dump_state(&self) {
        println!("PC = {:#06x}", self.pc);
        self.regs.dump();
    }

    /// Traces which stages are enabled this cycle.
    pub fn print_pipeline_diagram(&self) {
        let mark = |on: bool| if on { '#' } else { '.' };
        trace!(
            "cycle {:>5} IF:{} -> ID:{}{} -> EX:{}{} -> MEM:{} -> WB:{}",
            self.stats.cycles,
            mark(self.run.fetch),
            mark(self.run.decode),
            if self.stall.decode { "s" } else { "" },
            mark(self.run.execute),
            if self.stall.execute { "s" } else { "" },
            mark(self.run.memory),
            mark(self.run.writeback),
        );
    }
}
