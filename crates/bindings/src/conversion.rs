//! Python to Rust configuration conversion.
//!
//! Converts a Python dict into the core `Config` type via JSON
//! serialization, so Python callers and the CLI share one schema.

use pyo3::prelude::*;

use tomasim_core::config::Config;

/// Converts a Python dict to a simulator `Config`.
///
/// The dict is serialized to JSON and then deserialized into `Config`. Keys
/// must match the Rust config structure (`general`, `predictor`).
///
/// # Arguments
///
/// * `py` - Python interpreter handle.
/// * `dict` - A Python dict of configuration sections.
///
/// # Returns
///
/// The deserialized `Config`, or a `PyErr` if the dict is invalid.
pub fn py_dict_to_config(py: Python, dict: &Bound<'_, PyAny>) -> PyResult<Config> {
    let json = py.import("json")?;
    let dumps = json.getattr("dumps")?;
    let json_str: String = dumps.call1((dict,))?.extract()?;

    let config: Config = serde_json::from_str(&json_str).map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid config: {}", e))
    })?;

    Ok(config)
}
