//! Instruction word encoders for tests.
//!
//! Field layout: opcode in bits 31-26, reg1 in 25-21, reg2 in 20-16,
//! reg3 in 15-11, ALU function in 10-0, 16-bit immediate in 15-0, 26-bit
//! jump offset in 25-0. Register operand order follows the assembly forms
//! (`addi rd, rs, imm`; `lw rd, base, off`; `sw data, base, off`).

use tomasim_core::isa::{AluFunc, Opcode};

fn i_type(op: Opcode, reg1: usize, reg2: usize, imm: i32) -> u32 {
    (op.code() << 26)
        | ((reg1 as u32 & 0x1F) << 21)
        | ((reg2 as u32 & 0x1F) << 16)
        | (imm as u32 & 0xFFFF)
}

fn r_type(func: AluFunc, rd: usize, rs1: usize, rs2: usize) -> u32 {
    (Opcode::RrAlu.code() << 26)
        | ((rs1 as u32 & 0x1F) << 21)
        | ((rs2 as u32 & 0x1F) << 16)
        | ((rd as u32 & 0x1F) << 11)
        | func.code()
}

/// `addi rd, rs, imm`
pub fn addi(rd: usize, rs: usize, imm: i32) -> u32 {
    i_type(Opcode::Addi, rs, rd, imm)
}

/// `andi rd, rs, imm`
pub fn andi(rd: usize, rs: usize, imm: i32) -> u32 {
    i_type(Opcode::Andi, rs, rd, imm)
}

/// `lw rd, base, off`: loads `memory[base + off]` into `rd`.
pub fn lw(rd: usize, base: usize, off: i32) -> u32 {
    i_type(Opcode::Lw, base, rd, off)
}

/// `sw data, base, off`: stores `data` to `memory[base + off]`.
pub fn sw(data: usize, base: usize, off: i32) -> u32 {
    i_type(Opcode::Sw, base, data, off)
}

/// `beqz rs, off`: branches to `pc + 1 + off` when `rs` is zero.
pub fn beqz(rs: usize, off: i32) -> u32 {
    i_type(Opcode::Beqz, rs, 0, off)
}

/// `add rd, rs1, rs2`
pub fn add(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(AluFunc::Add, rd, rs1, rs2)
}

/// `sub rd, rs1, rs2`
pub fn sub(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(AluFunc::Sub, rd, rs1, rs2)
}

/// `and rd, rs1, rs2`
pub fn and(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(AluFunc::And, rd, rs1, rs2)
}

/// `j off`: jumps to `pc + off + 1`.
pub fn j(off: i32) -> u32 {
    (Opcode::J.code() << 26) | (off as u32 & 0x03FF_FFFF)
}

/// `halt`
pub fn halt() -> u32 {
    Opcode::Halt.code() << 26
}

/// `noop`
pub fn noop() -> u32 {
    Opcode::Noop.code() << 26
}
