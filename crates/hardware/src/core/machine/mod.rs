//! Machine state container and cycle driver.
//!
//! [`MachineState`] owns everything the simulation touches: architectural
//! state (registers, memory, PC), the four micro-architectural tables
//! (reservation stations, reorder buffer, register status, branch target
//! buffer), the cycle counter, and the statistics block. A tick is one
//! atomic state transition made of three strictly ordered phases:
//!
//! 1. **Commit:** retire the ROB head if it is eligible.
//! 2. **Advance:** run timers, write back results over the common data bus,
//!    and wake instructions whose operands arrived.
//! 3. **Issue:** fetch one instruction at the PC and place it into a free
//!    station plus a fresh ROB slot.
//!
//! The phase implementations live in sibling files; this file holds the
//! container, the reset paths, and the driver.

mod commit;
mod execute;
mod issue;

use crate::common::constants::{MEM_SIZE, NUM_REGS};
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::btb::BranchTargetBuffer;
use crate::core::rob::ReorderBuffer;
use crate::core::scoreboard::Scoreboard;
use crate::core::station::{ExecUnit, Stations};
use crate::stats::SimStats;

/// Complete state of one simulated machine.
///
/// Distinct simulations are obtained by cloning: the clone is a fully
/// independent deep copy, including the victim-selection generator state, so
/// two copies stepped identically stay identical.
#[derive(Clone, Debug)]
pub struct MachineState {
    /// Program counter (word address of the next fetch).
    pub pc: u32,
    /// Cycles elapsed since reset.
    pub cycles: u32,
    /// Exclusive upper bound of valid fetch addresses.
    pub memory_size: u32,
    /// Word-addressed main memory.
    pub memory: Vec<u32>,
    /// Architectural register file.
    pub reg_file: [u32; NUM_REGS],
    /// Reorder buffer.
    pub rob: ReorderBuffer,
    /// Reservation stations.
    pub stations: Stations,
    /// Register-status table.
    pub reg_status: Scoreboard,
    /// Branch target buffer.
    pub btb: BranchTargetBuffer,
    /// Statistics counters.
    pub stats: SimStats,
    /// Emit per-stage trace lines to stderr.
    pub trace: bool,
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}

impl MachineState {
    /// Creates a machine with the stock configuration.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates a machine from an explicit configuration.
    pub fn with_config(config: &Config) -> Self {
        Self {
            pc: config.general.start_pc,
            cycles: 0,
            memory_size: 0,
            memory: vec![0; MEM_SIZE],
            reg_file: [0; NUM_REGS],
            rob: ReorderBuffer::new(),
            stations: Stations::new(),
            reg_status: Scoreboard::new(),
            btb: BranchTargetBuffer::new(config.predictor.seed),
            stats: SimStats::default(),
            trace: config.general.trace,
        }
    }

    /// Writes an instruction word at the given word address. Out-of-range
    /// addresses are ignored.
    pub fn load_instr(&mut self, pc: u32, instr: u32) {
        if let Some(slot) = self.memory.get_mut(pc as usize) {
            *slot = instr;
        }
    }

    /// Sets the exclusive upper bound of valid fetch addresses.
    pub fn set_memory_size(&mut self, size: u32) {
        self.memory_size = size;
    }

    /// Advances the machine by one clock cycle. Returns `true` when this
    /// cycle retired a HALT.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidOpcode`] when the issue phase fetches a word whose
    /// primary opcode is not part of the instruction set.
    pub fn next_step(&mut self) -> Result<bool, SimError> {
        self.cycles += 1;
        if self.commit_phase() {
            return Ok(true);
        }
        self.advance_phase();
        self.issue_phase()?;
        Ok(false)
    }

    /// Reads a data word. Out-of-range addresses read as zero.
    pub(crate) fn read_mem(&self, addr: u32) -> u32 {
        self.memory.get(addr as usize).copied().unwrap_or(0)
    }

    /// Writes a data word. Out-of-range addresses are dropped.
    pub(crate) fn write_mem(&mut self, addr: u32, value: u32) {
        if let Some(slot) = self.memory.get_mut(addr as usize) {
            *slot = value;
        }
    }

    /// One common-data-bus event: `unit` publishes `value` to every waiting
    /// reservation station and ROB entry. All listeners observe it within
    /// the current cycle.
    pub(crate) fn broadcast(&mut self, unit: ExecUnit, value: u32) {
        self.stations.broadcast(unit, value);
        self.rob.broadcast(unit, value);
    }

    /// Misprediction squash: discard all speculative state and restart fetch
    /// at the architectural branch target. The BTB keeps what it learned.
    pub(crate) fn squash(&mut self, target: u32) {
        if self.trace {
            eprintln!("SQ  cycle={} redirect pc={}", self.cycles, target);
        }
        self.rob.reset();
        self.stations.reset();
        self.reg_status.flush();
        self.pc = target;
    }
}
