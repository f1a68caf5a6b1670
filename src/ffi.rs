//! Python FFI bindings via PyO3.
//!
//! Exposes the jet finder to Python with particles given as `[E, px, py, pz]`
//! lists. Only the built-in algorithms are available; custom metrics need the
//! Rust API.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from jetclust_core import JetFinder
//!
//! tracks = [[20.02, 1.0, 0.0, 20.0], [20.02, -1.0, 0.0, 20.0],
//!           [20.02, 1.0, 0.0, -20.0], [20.02, -1.0, 0.0, -20.0]]
//! finder = JetFinder("durham", ycut=0.01)
//! finder.initialize(tracks)
//! finder.find_jets()
//! print(finder.jet_count())          # 2
//! print(finder.jets())               # [[0, 1], [2, 3]]
//! converged = finder.force_jet_count(1)
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::JetError;
use crate::finder::{FinderConfig, JetFinder as RustJetFinder, DEFAULT_MAX_TRIALS};
use crate::metric::Algorithm;
use crate::vector::FourVector;

impl From<JetError> for PyErr {
    fn from(err: JetError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Iterative pairwise-merging jet finder.
///
/// Args:
///     algorithm:  "jade", "jade-e" or "durham"
///     ycut:       starting merge threshold (default 0.0)
///     max_trials: trial cap for force_jet_count (default 100)
#[pyclass(name = "JetFinder")]
#[derive(Clone)]
pub struct PyJetFinder {
    inner: RustJetFinder<Algorithm>,
}

#[pymethods]
impl PyJetFinder {
    /// Create a new jet finder.
    #[new]
    #[pyo3(signature = (algorithm="jade-e", ycut=0.0, max_trials=DEFAULT_MAX_TRIALS))]
    pub fn new(algorithm: &str, ycut: f64, max_trials: u32) -> PyResult<Self> {
        let algorithm: Algorithm = algorithm
            .parse()
            .map_err(|e: crate::metric::UnknownAlgorithm| PyValueError::new_err(e.to_string()))?;
        let inner = RustJetFinder::with_config(algorithm, FinderConfig { ycut, max_trials })?;
        Ok(Self { inner })
    }

    /// Seed one jet per particle. Each particle is `[E, px, py, pz]`.
    pub fn initialize(&mut self, particles: Vec<[f64; 4]>) -> PyResult<()> {
        self.inner.initialize(&particles)?;
        Ok(())
    }

    /// Raise the merge threshold.
    pub fn set_ycut(&mut self, ycut: f64) -> PyResult<()> {
        self.inner.set_ycut(ycut)?;
        Ok(())
    }

    /// Merge pairs below the current ycut. Returns the number of merges.
    pub fn find_jets(&mut self) -> PyResult<usize> {
        Ok(self.inner.find_jets()?)
    }

    /// Search for a ycut giving exactly `njets` jets. Returns True on success.
    pub fn force_jet_count(&mut self, njets: usize) -> PyResult<bool> {
        Ok(self.inner.force_jet_count(njets)?.converged)
    }

    /// Number of current jets.
    pub fn jet_count(&self) -> PyResult<usize> {
        Ok(self.inner.jet_count()?)
    }

    /// Constituent particle indices of each jet.
    pub fn jets(&self) -> PyResult<Vec<Vec<usize>>> {
        Ok(self
            .inner
            .jets()?
            .map(|jet| jet.constituents().to_vec())
            .collect())
    }

    /// Summed `[E, px, py, pz]` of each jet.
    pub fn jet_vectors(&self) -> PyResult<Vec<[f64; 4]>> {
        Ok(self
            .inner
            .jets()?
            .map(|jet| {
                let FourVector { e, px, py, pz } = *jet.vector();
                [e, px, py, pz]
            })
            .collect())
    }

    /// Distance of the next merge, or None when one jet remains.
    pub fn next_unmerged_distance(&self) -> PyResult<Option<f64>> {
        Ok(self.inner.next_unmerged_distance()?)
    }

    /// Current merge threshold.
    #[getter]
    pub fn ycut(&self) -> f64 {
        self.inner.ycut()
    }

    /// Visible energy of the seeded event.
    #[getter]
    pub fn visible_energy(&self) -> f64 {
        self.inner.visible_energy()
    }

    /// Independent deep copy of this finder.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "JetFinder(algorithm='{}', ycut={})",
            self.inner.metric(),
            self.inner.ycut()
        )
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Jade, Jade-E and Durham jet finders.
#[pymodule]
pub fn jetclust_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyJetFinder>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
