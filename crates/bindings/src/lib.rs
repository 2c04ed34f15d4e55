//! Python bindings for the Tomasulo pipeline simulator.
//!
//! This crate exposes the simulator core to Python via PyO3. It provides:
//! 1. **Machine:** `MachineState` for stepping, loading, and deep copying.
//! 2. **Snapshots:** Read-only views of the reservation stations, reorder
//!    buffer, register status, and branch target buffer after every cycle.
//! 3. **Statistics:** Retirement and branch-prediction counters.
//! 4. **Errors:** The `TomasuloError` exception for fatal decode errors.

use pyo3::prelude::*;

/// Python dict to Rust `Config` conversion.
pub mod conversion;
/// Machine binding (`MachineState`).
pub mod machine;
/// Statistics binding (`SimStats`).
pub mod stats;
/// Table-entry view types.
pub mod types;

pyo3::create_exception!(
    tomasulo,
    TomasuloError,
    pyo3::exceptions::PyException,
    "Fatal simulator error (unrecognized opcode)."
);

/// Registers all simulator classes onto the given Python module.
///
/// # Arguments
///
/// * `m` - The Python module to register types on.
///
/// # Returns
///
/// `Ok(())` on success, or a `PyErr` if registration fails.
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<machine::PyMachineState>()?;
    m.add_class::<stats::PyStats>()?;

    m.add_class::<types::Bht>()?;
    m.add_class::<types::PyResStation>()?;
    m.add_class::<types::PyRobEntry>()?;
    m.add_class::<types::PyRegResultEntry>()?;
    m.add_class::<types::PyBtbEntry>()?;

    m.add("TomasuloError", m.py().get_type::<TomasuloError>())?;
    Ok(())
}

#[pymodule]
fn tomasulo(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_module(m)?;
    Ok(())
}
