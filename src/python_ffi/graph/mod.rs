pub mod builder;
pub mod network;

use pyo3::{prelude::*, wrap_pymodule};

#[pymodule]
fn graph(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<builder::Graph>()?;
    m.add_class::<network::Network>()?;
    Ok(())
}

pub fn construct_module(m: &PyModule) -> PyResult<()> {
    m.add_wrapped(wrap_pymodule!(graph))?;
    Ok(())
}
