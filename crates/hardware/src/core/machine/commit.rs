//! Commit phase: in-order retirement from the ROB head.
//!
//! Only the head entry may commit, and only once its result is valid and it
//! has reached the committing state. Retirement applies the per-opcode
//! architectural effect:
//! 1. **Register writers** update the register file and release their rename
//!    if it has not been superseded.
//! 2. **Branches** train the predictor and squash the pipeline when the
//!    speculative next PC chosen at issue disagrees with the outcome.
//! 3. **Stores** run a second, commit-side phase through a store unit before
//!    the memory write becomes visible.
//! 4. **HALT** stops the machine.
//!
//! At most one commit action happens per cycle.

use crate::common::constants::ST_EXEC;
use crate::core::rob::{InstrStatus, RobEntry};
use crate::core::station::{ExecUnit, Operand, Station};
use crate::isa::{InstructionBits, Opcode};

use super::MachineState;

impl MachineState {
    /// Runs the commit phase for the current cycle. Returns `true` when a
    /// HALT retired and the machine must stop.
    pub(crate) fn commit_phase(&mut self) -> bool {
        let Some(head) = self.rob.head() else {
            return false;
        };
        let entry = *self.rob.entry(head);
        if !entry.busy || !entry.valid || entry.status != InstrStatus::Committing {
            return false;
        }
        if Opcode::decode(entry.instr) == Some(Opcode::Halt) {
            if self.trace {
                eprintln!("CM  cycle={} pc={} HALT", self.cycles, entry.pc);
            }
            self.rob.pop();
            return true;
        }
        self.commit_entry(head, entry);
        false
    }

    /// Applies the architectural effect of the head entry.
    fn commit_entry(&mut self, rob_idx: usize, entry: RobEntry) {
        let Some(op) = Opcode::decode(entry.instr) else {
            return;
        };
        match op {
            Opcode::Lw | Opcode::Addi | Opcode::Andi => {
                self.commit_reg_write(rob_idx, entry, entry.instr.reg2(), op);
            }
            Opcode::RrAlu => {
                self.commit_reg_write(rob_idx, entry, entry.instr.reg3(), op);
            }
            Opcode::Beqz => self.commit_branch(entry),
            Opcode::Sw => self.commit_store(rob_idx, entry),
            Opcode::J => {
                // PC was redirected at issue; retiring is all that is left.
                self.rob.pop();
                self.stats.instructions_retired += 1;
                self.stats.inst_branch += 1;
            }
            Opcode::Noop => {
                self.rob.pop();
            }
            Opcode::Halt => {}
        }
    }

    /// Retires an instruction whose effect is a register write.
    fn commit_reg_write(&mut self, rob_idx: usize, entry: RobEntry, rd: usize, op: Opcode) {
        self.reg_status.clear_if_match(rd, rob_idx);
        self.reg_file[rd] = entry.result;
        self.rob.pop();
        self.stats.instructions_retired += 1;
        if op == Opcode::Lw {
            self.stats.inst_load += 1;
        } else {
            self.stats.inst_alu += 1;
        }
        if self.trace {
            eprintln!(
                "CM  cycle={} pc={} r{} <= {}",
                self.cycles, entry.pc, rd, entry.result
            );
        }
    }

    /// Resolves a conditional branch: trains the BTB and squashes on a wrong
    /// speculative next PC.
    fn commit_branch(&mut self, entry: RobEntry) {
        let target = entry.pc.wrapping_add(1).wrapping_add(entry.instr.imm_ex());
        let taken = entry.result == 0;
        self.btb.train(entry.pc, target, taken);
        self.stats.instructions_retired += 1;
        self.stats.inst_branch += 1;
        self.stats.branch_resolutions += 1;

        let fall_through = entry.pc.wrapping_add(1);
        let mispredicted = if taken {
            entry.address != target
        } else {
            entry.address != fall_through
        };
        if mispredicted {
            self.stats.branch_mispredictions += 1;
            if self.trace {
                eprintln!(
                    "CM  cycle={} pc={} BEQZ mispredicted (speculated {}, actual {})",
                    self.cycles,
                    entry.pc,
                    entry.address,
                    if taken { target } else { fall_through }
                );
            }
            self.squash(target);
        } else {
            self.rob.pop();
        }
    }

    /// Advances the two-phase store protocol.
    ///
    /// On first eligibility the store still sits on its issue-time integer
    /// unit; it is handed to a free store unit with its data and resolved
    /// target address, and stays at the ROB head. Once the store unit's
    /// timer expires the word is written to memory and the entry retires.
    fn commit_store(&mut self, rob_idx: usize, entry: RobEntry) {
        let unit = entry.exec_unit;
        if !unit.is_store() {
            if let Some(store_unit) = self.stations.first_free(&ExecUnit::STORE_POOL) {
                *self.stations.get_mut(store_unit) = Station {
                    busy: true,
                    instr: entry.instr,
                    vj: Operand::Value(entry.result),
                    vk: Operand::Value(entry.address),
                    ex_time_left: ST_EXEC - 1,
                    rob_idx,
                };
                self.rob.entry_mut(rob_idx).exec_unit = store_unit;
            }
            // No free store unit: retry next cycle, still at the head.
        } else if self.stations.get(unit).ex_time_left == 0 {
            let station = *self.stations.get(unit);
            let addr = station.vk.value().unwrap_or(0);
            let data = station.vj.value().unwrap_or(0);
            self.write_mem(addr, data);
            self.stations.clear(unit);
            self.rob.pop();
            self.stats.instructions_retired += 1;
            self.stats.inst_store += 1;
            if self.trace {
                eprintln!(
                    "CM  cycle={} pc={} mem[{}] <= {}",
                    self.cycles, entry.pc, addr, data
                );
            }
        } else {
            self.stations.get_mut(unit).ex_time_left -= 1;
        }
    }
}
