//! Machine state Python binding.
//!
//! Exposes the simulator to Python: construct from an optional config dict,
//! load instruction words, step cycles, snapshot every table, and fork
//! independent copies for lockstep visualization.

use pyo3::prelude::*;

use tomasim_core::config::Config;
use tomasim_core::MachineState;

use crate::conversion::py_dict_to_config;
use crate::stats::PyStats;
use crate::types::{PyBtbEntry, PyRegResultEntry, PyResStation, PyRobEntry};
use crate::TomasuloError;

/// Python-exposed machine state: wraps the core [`MachineState`] for
/// stepping and inspection from Python.
#[pyclass(name = "MachineState")]
#[derive(Clone)]
pub struct PyMachineState {
    pub inner: MachineState,
}

#[pymethods]
impl PyMachineState {
    /// Creates a new machine.
    ///
    /// # Arguments
    ///
    /// * `config_dict` - Optional configuration dict matching the core
    ///   schema (`general`, `predictor`). Omitted keys use defaults.
    #[new]
    #[pyo3(signature = (config_dict=None))]
    fn new(py: Python, config_dict: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let config = match config_dict {
            Some(dict) => py_dict_to_config(py, dict)?,
            None => Config::default(),
        };
        Ok(Self {
            inner: MachineState::with_config(&config),
        })
    }

    /// Advances the machine by one clock cycle.
    ///
    /// # Returns
    ///
    /// `True` when this cycle retired a HALT.
    ///
    /// # Errors
    ///
    /// Raises `TomasuloError` when issue fetches an invalid opcode.
    #[pyo3(name = "nextStep")]
    fn next_step(&mut self) -> PyResult<bool> {
        self.inner
            .next_step()
            .map_err(|e| TomasuloError::new_err(e.to_string()))
    }

    /// Writes a 32-bit instruction word at the given word address.
    #[pyo3(name = "loadInstr")]
    fn load_instr(&mut self, pc: u32, instr: u32) {
        self.inner.load_instr(pc, instr);
    }

    /// Sets the exclusive upper bound of valid fetch addresses.
    #[pyo3(name = "setMemorySize")]
    fn set_memory_size(&mut self, size: u32) {
        self.inner.set_memory_size(size);
    }

    /// Returns an independent deep copy of the machine.
    fn copy(&self) -> Self {
        self.clone()
    }

    fn __copy__(&self) -> Self {
        self.clone()
    }

    fn __deepcopy__(&self, _memo: &Bound<'_, PyAny>) -> Self {
        self.clone()
    }

    /// Program counter.
    #[getter]
    fn pc(&self) -> u32 {
        self.inner.pc
    }

    /// Cycles elapsed since reset.
    #[getter]
    fn cycles(&self) -> u32 {
        self.inner.cycles
    }

    /// Exclusive upper bound of valid fetch addresses.
    #[getter(memorySize)]
    fn memory_size(&self) -> u32 {
        self.inner.memory_size
    }

    /// Full memory contents as a list of words.
    #[getter]
    fn memory(&self) -> Vec<u32> {
        self.inner.memory.clone()
    }

    /// Architectural register file.
    #[getter(regFile)]
    fn reg_file(&self) -> Vec<u32> {
        self.inner.reg_file.to_vec()
    }

    /// Register-status table, one entry per architectural register.
    #[getter(regResult)]
    fn reg_result(&self) -> Vec<PyRegResultEntry> {
        self.inner
            .reg_status
            .producers()
            .iter()
            .map(|&producer| PyRegResultEntry::new(producer))
            .collect()
    }

    /// Reservation stations in unit order.
    #[getter]
    fn reservation(&self) -> Vec<PyResStation> {
        self.inner
            .stations
            .iter()
            .map(|(unit, station)| PyResStation::new(unit, *station))
            .collect()
    }

    /// Reorder buffer slots in index order.
    #[getter]
    fn rob(&self) -> Vec<PyRobEntry> {
        self.inner
            .rob
            .entries()
            .iter()
            .map(|&entry| PyRobEntry::new(entry))
            .collect()
    }

    /// Branch target buffer entries.
    #[getter]
    fn btb(&self) -> Vec<PyBtbEntry> {
        self.inner
            .btb
            .entries()
            .iter()
            .map(|&entry| PyBtbEntry::new(entry))
            .collect()
    }

    /// Snapshot of the statistics counters.
    fn get_stats(&self) -> PyStats {
        PyStats::new(self.inner.stats.clone(), self.inner.cycles)
    }
}
