//! Issue phase: fetch, allocation, operand capture, and renaming.
//!
//! One instruction is fetched per cycle. It needs a free station in its pool
//! and a free ROB slot; if either is missing the fetch is retried next cycle
//! and neither resource is consumed. Source operands are captured through
//! the register-status table, falling back to the producing ROB entry's
//! result or, failing that, its unit tag. Destination registers are renamed
//! to the new ROB slot for the opcodes that retire a register write.

use crate::common::error::SimError;
use crate::core::rob::{InstrStatus, RobEntry};
use crate::core::station::{ExecUnit, Operand, Station};
use crate::isa::{InstructionBits, Opcode};

use super::MachineState;

impl MachineState {
    /// Runs the issue phase for the current cycle.
    pub(crate) fn issue_phase(&mut self) -> Result<(), SimError> {
        if self.pc >= self.memory_size {
            return Ok(());
        }
        let instr = self.read_mem(self.pc);
        let op = Opcode::decode(instr).ok_or(SimError::InvalidOpcode {
            opcode: instr.opcode(),
            pc: self.pc,
        })?;

        let pool: &[ExecUnit] = match op {
            Opcode::Lw => &ExecUnit::LOAD_POOL,
            _ => &ExecUnit::INT_POOL,
        };
        let Some(unit) = self.stations.first_free(pool) else {
            self.stats.issue_stalls_station += 1;
            return Ok(());
        };
        let Some(rob_idx) = self.rob.push() else {
            self.stats.issue_stalls_rob += 1;
            return Ok(());
        };

        let issue_pc = self.pc;
        self.place(issue_pc, instr, op, unit, rob_idx);

        // Speculative PC update. Branches go through the predictor and
        // record the chosen next PC for the commit-time misprediction check;
        // jumps redirect immediately.
        match op {
            Opcode::Beqz => {
                self.pc = self.btb.predict(issue_pc);
                self.rob.entry_mut(rob_idx).address = self.pc;
            }
            Opcode::J => {
                self.pc = issue_pc.wrapping_add(instr.jmp_offset_ex()).wrapping_add(1);
            }
            _ => {
                if self.pc < self.memory_size - 1 {
                    self.pc += 1;
                }
            }
        }

        if self.trace {
            eprintln!(
                "IS  cycle={} pc={} {:?} unit={} rob={}",
                self.cycles,
                issue_pc,
                op,
                unit.name(),
                rob_idx
            );
        }
        Ok(())
    }

    /// Fills the station and ROB entry for a newly issued instruction.
    fn place(&mut self, pc: u32, instr: u32, op: Opcode, unit: ExecUnit, rob_idx: usize) {
        *self.stations.get_mut(unit) = Station {
            busy: true,
            instr,
            vj: Operand::default(),
            vk: Operand::default(),
            ex_time_left: op.ex_time(),
            rob_idx,
        };
        *self.rob.entry_mut(rob_idx) = RobEntry {
            busy: true,
            valid: false,
            pc,
            instr,
            exec_unit: unit,
            status: InstrStatus::Issuing,
            result: 0,
            address: 0,
        };

        // Capture before renaming, so an instruction reading its own
        // destination sees the previous producer.
        match op {
            Opcode::RrAlu => {
                let vj = self.capture(instr.reg1());
                let vk = self.capture(instr.reg2());
                let station = self.stations.get_mut(unit);
                station.vj = vj;
                station.vk = vk;
                self.reg_status.set_producer(instr.reg3(), rob_idx);
            }
            Opcode::Lw | Opcode::Addi | Opcode::Andi => {
                let vj = self.capture(instr.reg1());
                self.stations.get_mut(unit).vj = vj;
                self.reg_status.set_producer(instr.reg2(), rob_idx);
            }
            Opcode::Beqz => {
                let vj = self.capture(instr.reg1());
                self.stations.get_mut(unit).vj = vj;
            }
            Opcode::Sw => {
                // Vj carries the base address, Vk the data to store.
                let vj = self.capture(instr.reg1());
                let vk = self.capture(instr.reg2());
                let station = self.stations.get_mut(unit);
                station.vj = vj;
                station.vk = vk;
            }
            Opcode::J => {
                // Fall-through record; not an operand of the computation.
                self.stations.get_mut(unit).vk = Operand::Value(pc.wrapping_add(1));
            }
            Opcode::Halt | Opcode::Noop => {}
        }
    }

    /// Captures one source operand.
    ///
    /// A register with no pending producer reads the register file. A
    /// pending producer whose result has already been broadcast supplies the
    /// value from the ROB; otherwise the operand waits on the producer's
    /// unit tag.
    fn capture(&self, reg: usize) -> Operand {
        match self.reg_status.producer(reg) {
            None => Operand::Value(self.reg_file[reg]),
            Some(rob_idx) => {
                let producer = self.rob.entry(rob_idx);
                if producer.valid {
                    Operand::Value(producer.result)
                } else {
                    Operand::Tag(producer.exec_unit)
                }
            }
        }
    }
}
