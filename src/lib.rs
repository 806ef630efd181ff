//! # Persistent Homology - boundary-matrix reduction engine
//!
//! This library computes persistent homology of filtered simplicial complexes:
//! a standard column reduction over sparse boundary matrices (optionally dualized),
//! a union-find fast path for zero-dimensional persistence, and persistence
//! diagram assembly. Python bindings are available behind the `python` feature.

pub mod homology;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn _persistent_homology(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // 注册持久同调函数
    homology::ffi::register_homology_functions(m)?;

    m.add("__version__", homology::VERSION)?;

    Ok(())
}
