//! Statistics Python binding.

use pyo3::prelude::*;

use tomasim_core::stats::SimStats;

/// Python-exposed statistics snapshot.
#[pyclass(name = "SimStats")]
#[derive(Clone)]
pub struct PyStats {
    inner: SimStats,
    cycles: u32,
}

impl PyStats {
    pub fn new(inner: SimStats, cycles: u32) -> Self {
        Self { inner, cycles }
    }
}

#[pymethods]
impl PyStats {
    #[getter]
    fn cycles(&self) -> u32 {
        self.cycles
    }

    #[getter]
    fn instructions_retired(&self) -> u64 {
        self.inner.instructions_retired
    }

    #[getter]
    fn inst_alu(&self) -> u64 {
        self.inner.inst_alu
    }

    #[getter]
    fn inst_load(&self) -> u64 {
        self.inner.inst_load
    }

    #[getter]
    fn inst_store(&self) -> u64 {
        self.inner.inst_store
    }

    #[getter]
    fn inst_branch(&self) -> u64 {
        self.inner.inst_branch
    }

    #[getter]
    fn branch_resolutions(&self) -> u64 {
        self.inner.branch_resolutions
    }

    #[getter]
    fn branch_mispredictions(&self) -> u64 {
        self.inner.branch_mispredictions
    }

    #[getter]
    fn branch_accuracy(&self) -> f64 {
        self.inner.branch_accuracy()
    }

    #[getter]
    fn issue_stalls_station(&self) -> u64 {
        self.inner.issue_stalls_station
    }

    #[getter]
    fn issue_stalls_rob(&self) -> u64 {
        self.inner.issue_stalls_rob
    }

    /// Prints the human-readable summary to stdout.
    fn print(&self) {
        self.inner.print(self.cycles);
    }
}
