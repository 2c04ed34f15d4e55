//! Cycle-accurate simulator for a Tomasulo-style out-of-order pipeline.
//!
//! This crate implements the core of a small out-of-order machine with the
//! following pieces:
//! 1. **ISA:** A fixed early-MIPS-style subset with pure-function decoding.
//! 2. **Backend:** Six reservation stations, a 16-entry reorder buffer,
//!    register renaming through a register-status table, and a common data
//!    bus that delivers results to all listeners in one cycle.
//! 3. **Speculation:** A branch target buffer with 2-bit dynamic history,
//!    speculative fetch, and squash-on-misprediction at commit.
//! 4. **Driver:** A three-phase tick (commit, advance, issue) that produces
//!    a complete state snapshot after every cycle.
//! 5. **Support:** Configuration, statistics, and a program image loader.
//!
//! The machine state is a plain value: clone it to fork an independent
//! simulation, step it with [`MachineState::next_step`] until it retires a
//! HALT.

/// Common types and constants.
pub mod common;
/// Simulator configuration.
pub mod config;
/// Machine state, tables, and the cycle driver.
pub mod core;
/// Instruction set definitions and decoding.
pub mod isa;
/// Program loading.
pub mod sim;
/// Statistics collection and reporting.
pub mod stats;

pub use crate::common::SimError;
pub use crate::config::Config;
pub use crate::core::MachineState;
