//! Advance phase and the functional execution model.
//!
//! Every cycle, each in-flight instruction moves one step: execution timers
//! count down, finished instructions broadcast over the common data bus and
//! free their station, and waiting instructions whose operands have all
//! arrived start executing. Entries are visited in ROB index order, so a
//! broadcast is observed by every later entry within the same cycle; earlier
//! entries still have their station operands updated by the same broadcast
//! and wake on the next cycle.

use crate::common::constants::ROB_SIZE;
use crate::core::rob::InstrStatus;
use crate::core::station::ExecUnit;
use crate::isa::{AluFunc, InstructionBits, Opcode};

use super::MachineState;

impl MachineState {
    /// Runs the advance phase for the current cycle.
    pub(crate) fn advance_phase(&mut self) {
        for rob_idx in 0..ROB_SIZE {
            let entry = *self.rob.entry(rob_idx);
            if !entry.busy {
                continue;
            }
            match entry.status {
                InstrStatus::Executing => {
                    let unit = entry.exec_unit;
                    if self.stations.get(unit).ex_time_left != 0 {
                        self.stations.get_mut(unit).ex_time_left -= 1;
                    } else {
                        self.writeback(rob_idx, unit);
                    }
                }
                InstrStatus::WritingResult => {
                    self.rob.entry_mut(rob_idx).status = InstrStatus::Committing;
                }
                InstrStatus::Issuing => {
                    let station = self.stations.get(entry.exec_unit);
                    if station.vj.is_ready() && station.vk.is_ready() {
                        self.rob.entry_mut(rob_idx).status = InstrStatus::Executing;
                        // The first execute cycle is charged immediately.
                        self.stations.get_mut(entry.exec_unit).ex_time_left -= 1;
                    }
                }
                InstrStatus::Committing => {}
            }
        }
    }

    /// Finishes execution: latches the store address, broadcasts the result,
    /// and frees the station.
    fn writeback(&mut self, rob_idx: usize, unit: ExecUnit) {
        let instr = self.stations.get(unit).instr;
        self.rob.entry_mut(rob_idx).status = InstrStatus::WritingResult;
        if Opcode::decode(instr) == Some(Opcode::Sw) {
            let base = self.stations.get(unit).vj.value().unwrap_or(0);
            self.rob.entry_mut(rob_idx).address = base.wrapping_add(instr.imm_ex());
        }
        let value = self.exec_result(unit);
        if self.trace {
            eprintln!(
                "WB  cycle={} unit={} rob={} value={}",
                self.cycles,
                unit.name(),
                rob_idx,
                value
            );
        }
        self.broadcast(unit, value);
        self.stations.clear(unit);
    }

    /// Architectural result of the instruction held in `unit`, computed from
    /// its captured operands. Two's-complement wraparound throughout.
    pub(crate) fn exec_result(&self, unit: ExecUnit) -> u32 {
        let station = self.stations.get(unit);
        let instr = station.instr;
        let vj = station.vj.value().unwrap_or(0);
        let vk = station.vk.value().unwrap_or(0);

        match Opcode::decode(instr) {
            Some(Opcode::Addi) => vj.wrapping_add(instr.imm_ex()),
            Some(Opcode::Andi) => vj & instr.imm_ex(),
            Some(Opcode::RrAlu) => match AluFunc::decode(instr.func()) {
                Some(AluFunc::Add) => vj.wrapping_add(vk),
                Some(AluFunc::Sub) => vj.wrapping_sub(vk),
                Some(AluFunc::And) => vj & vk,
                None => 0,
            },
            Some(Opcode::Lw) => self.read_mem(vj.wrapping_add(instr.imm_ex())),
            // The store data rides the result to commit; the branch result
            // is the tested value itself.
            Some(Opcode::Sw) => vk,
            Some(Opcode::Beqz) => vj,
            Some(Opcode::J) => instr.jmp_offset_ex(),
            _ => 0,
        }
    }
}
