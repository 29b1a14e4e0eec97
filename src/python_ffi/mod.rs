//! Python FFI
use pyo3::prelude::*;

pub mod graph;
mod gen_macros;

#[pymodule]
fn rpnnet(_py: Python, m: &PyModule) -> PyResult<()> {
    graph::construct_module(m)?;
    Ok(())
}
