//! Error definitions for the simulator.
//!
//! The only fatal condition the core can hit is an instruction word whose
//! primary opcode is not part of the instruction set. Everything else that
//! looks like trouble (full ROB, full station pool, BTB miss, misprediction)
//! is ordinary pipeline behaviour and never surfaces as an error.

use std::fmt;

/// Fatal simulation errors surfaced to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// An instruction word with an unrecognized primary opcode reached the
    /// issue stage. Carries the raw opcode field and the fetch PC.
    InvalidOpcode {
        /// The unrecognized 6-bit opcode value.
        opcode: u32,
        /// Word address the instruction was fetched from.
        pc: u32,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidOpcode { opcode, pc } => {
                write!(f, "invalid opcode {} at pc={}", opcode, pc)
            }
        }
    }
}

impl std::error::Error for SimError {}
