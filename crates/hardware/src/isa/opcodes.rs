//! Opcode and ALU function code definitions.
//!
//! The instruction set is a small early-MIPS-style subset: one
//! register-register ALU opcode discriminated by a function code, I-format
//! arithmetic, word load/store, a conditional branch on zero, an
//! unconditional jump, and the HALT/NOOP pair.

use crate::common::constants::{BRANCH_EXEC, INT_EXEC, LD_EXEC};
use crate::isa::decode::InstructionBits;

/// Primary opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Opcode {
    /// Register-register ALU operation; the function code selects the op.
    RrAlu = 0,
    /// Stop the machine at commit.
    Halt = 1,
    /// Unconditional PC-relative jump.
    J = 2,
    /// No operation.
    Noop = 3,
    /// Branch if the source register is zero.
    Beqz = 4,
    /// Add immediate.
    Addi = 8,
    /// And immediate.
    Andi = 12,
    /// Load word.
    Lw = 35,
    /// Store word.
    Sw = 43,
}

impl Opcode {
    /// Decodes the primary opcode of an instruction word. Returns `None` for
    /// opcodes outside the instruction set.
    pub fn decode(instr: u32) -> Option<Opcode> {
        match instr.opcode() {
            0 => Some(Opcode::RrAlu),
            1 => Some(Opcode::Halt),
            2 => Some(Opcode::J),
            3 => Some(Opcode::Noop),
            4 => Some(Opcode::Beqz),
            8 => Some(Opcode::Addi),
            12 => Some(Opcode::Andi),
            35 => Some(Opcode::Lw),
            43 => Some(Opcode::Sw),
            _ => None,
        }
    }

    /// The numeric opcode value as encoded in bits 31-26.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Execute cycles charged when the instruction enters a reservation
    /// station. The store's commit-side phase has its own latency and is
    /// charged separately.
    pub fn ex_time(self) -> u32 {
        match self {
            Opcode::Lw => LD_EXEC,
            Opcode::Beqz => BRANCH_EXEC,
            _ => INT_EXEC,
        }
    }
}

/// Function codes for `RrAlu` instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum AluFunc {
    /// Addition.
    Add = 32,
    /// Subtraction.
    Sub = 34,
    /// Bitwise and.
    And = 36,
}

impl AluFunc {
    /// Decodes an 11-bit function code. Returns `None` for codes outside the
    /// set; the execution model treats those as producing zero.
    pub fn decode(func: u32) -> Option<AluFunc> {
        match func {
            32 => Some(AluFunc::Add),
            34 => Some(AluFunc::Sub),
            36 => Some(AluFunc::And),
            _ => None,
        }
    }

    /// The numeric function code as encoded in bits 10-0.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }
}
