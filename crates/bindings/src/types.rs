//! Table-entry view types exposed to Python.
//!
//! Each micro-architectural table is surfaced as a list of small read-only
//! objects, rebuilt from the core state on every access. Pending-operand
//! tags appear as the producing unit's name and `None` when the value is
//! already captured; the 0-as-ready convention of the modeled hardware does
//! not leak into the Python surface.

use pyo3::prelude::*;

use tomasim_core::core::btb::{BranchHistory, BtbEntry};
use tomasim_core::core::rob::{InstrStatus, RobEntry};
use tomasim_core::core::station::{ExecUnit, Operand, Station};

/// 2-bit branch history states.
#[pyclass(name = "BHT", eq, eq_int)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Bht {
    /// Strongly predicted not-taken.
    STRONGNOT = 0,
    /// Weakly predicted not-taken.
    WEAKNOT = 1,
    /// Weakly predicted taken.
    WEAKTAKEN = 2,
    /// Strongly predicted taken.
    STRONGTAKEN = 3,
}

impl From<BranchHistory> for Bht {
    fn from(history: BranchHistory) -> Self {
        match history {
            BranchHistory::StrongNot => Bht::STRONGNOT,
            BranchHistory::WeakNot => Bht::WEAKNOT,
            BranchHistory::WeakTaken => Bht::WEAKTAKEN,
            BranchHistory::StrongTaken => Bht::STRONGTAKEN,
        }
    }
}

fn tag_name(operand: Operand) -> Option<&'static str> {
    operand.tag().map(ExecUnit::name)
}

fn status_name(status: InstrStatus) -> &'static str {
    match status {
        InstrStatus::Issuing => "ISSUING",
        InstrStatus::Executing => "EXECUTING",
        InstrStatus::WritingResult => "WRITING_RESULT",
        InstrStatus::Committing => "COMMITTING",
    }
}

/// Read-only view of one reservation station.
#[pyclass(name = "ResStation")]
#[derive(Clone)]
pub struct PyResStation {
    unit: ExecUnit,
    station: Station,
}

impl PyResStation {
    pub fn new(unit: ExecUnit, station: Station) -> Self {
        Self { unit, station }
    }
}

#[pymethods]
impl PyResStation {
    /// Name of the owning execution unit.
    #[getter]
    fn unit(&self) -> &'static str {
        self.unit.name()
    }

    #[getter]
    fn busy(&self) -> bool {
        self.station.busy
    }

    #[getter]
    fn instr(&self) -> u32 {
        self.station.instr
    }

    /// Captured first operand, or `None` while waiting on a tag.
    #[getter(vj)]
    fn vj(&self) -> Option<u32> {
        self.station.vj.value()
    }

    /// Captured second operand, or `None` while waiting on a tag.
    #[getter(vk)]
    fn vk(&self) -> Option<u32> {
        self.station.vk.value()
    }

    /// Name of the unit the first operand waits on, or `None` when ready.
    #[getter(qj)]
    fn qj(&self) -> Option<&'static str> {
        tag_name(self.station.vj)
    }

    /// Name of the unit the second operand waits on, or `None` when ready.
    #[getter(qk)]
    fn qk(&self) -> Option<&'static str> {
        tag_name(self.station.vk)
    }

    #[getter(exTimeLeft)]
    fn ex_time_left(&self) -> u32 {
        self.station.ex_time_left
    }

    #[getter(robIdx)]
    fn rob_idx(&self) -> usize {
        self.station.rob_idx
    }
}

/// Read-only view of one reorder buffer entry.
#[pyclass(name = "ROBEntry")]
#[derive(Clone)]
pub struct PyRobEntry {
    entry: RobEntry,
}

impl PyRobEntry {
    pub fn new(entry: RobEntry) -> Self {
        Self { entry }
    }
}

#[pymethods]
impl PyRobEntry {
    #[getter]
    fn busy(&self) -> bool {
        self.entry.busy
    }

    #[getter]
    fn valid(&self) -> bool {
        self.entry.valid
    }

    #[getter]
    fn pc(&self) -> u32 {
        self.entry.pc
    }

    #[getter]
    fn instr(&self) -> u32 {
        self.entry.instr
    }

    /// Name of the producing execution unit.
    #[getter(execUnit)]
    fn exec_unit(&self) -> &'static str {
        self.entry.exec_unit.name()
    }

    /// Lifecycle state name.
    #[getter(instrStatus)]
    fn instr_status(&self) -> &'static str {
        status_name(self.entry.status)
    }

    #[getter]
    fn result(&self) -> u32 {
        self.entry.result
    }

    #[getter]
    fn address(&self) -> u32 {
        self.entry.address
    }
}

/// Read-only view of one register-status slot.
#[pyclass(name = "RegResultEntry")]
#[derive(Clone)]
pub struct PyRegResultEntry {
    producer: Option<usize>,
}

impl PyRegResultEntry {
    pub fn new(producer: Option<usize>) -> Self {
        Self { producer }
    }
}

#[pymethods]
impl PyRegResultEntry {
    /// True when the register file holds the value.
    #[getter]
    fn valid(&self) -> bool {
        self.producer.is_none()
    }

    /// ROB index of the pending producer, or `None` when valid.
    #[getter(robIdx)]
    fn rob_idx(&self) -> Option<usize> {
        self.producer
    }
}

/// Read-only view of one branch target buffer entry.
#[pyclass(name = "BTBEntry")]
#[derive(Clone)]
pub struct PyBtbEntry {
    entry: BtbEntry,
}

impl PyBtbEntry {
    pub fn new(entry: BtbEntry) -> Self {
        Self { entry }
    }
}

#[pymethods]
impl PyBtbEntry {
    #[getter]
    fn valid(&self) -> bool {
        self.entry.valid
    }

    #[getter(branchPred)]
    fn branch_pred(&self) -> Bht {
        self.entry.history.into()
    }

    #[getter(branchPc)]
    fn branch_pc(&self) -> u32 {
        self.entry.branch_pc
    }

    #[getter(targetPc)]
    fn target_pc(&self) -> u32 {
        self.entry.target_pc
    }
}
