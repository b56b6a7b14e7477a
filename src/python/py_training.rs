//! Dataset bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::schema::OUTPUT_DIM;
use crate::training::{encode_lines, ObservationBatch};

use super::py_nn::{PyFeatureVector, PyFrameEncoder};

/// Python wrapper for ObservationBatch.
#[pyclass(name = "ObservationBatch")]
#[derive(Clone)]
pub struct PyObservationBatch {
    pub inner: ObservationBatch,
}

#[pymethods]
impl PyObservationBatch {
    /// Encode a JSONL session log.
    ///
    /// Returns the batch and a list of `(line, reason)` for skipped lines.
    #[staticmethod]
    fn from_session(
        py: Python<'_>,
        encoder: &PyFrameEncoder,
        text: &str,
    ) -> (Self, Vec<(usize, String)>) {
        let (samples, report) = py.allow_threads(|| encode_lines(&encoder.inner, text));
        let batch = Self {
            inner: ObservationBatch::new(samples),
        };
        (batch, report.skipped)
    }

    /// Load a batch written by `to_bytes`.
    #[staticmethod]
    fn from_bytes(bytes: &[u8]) -> PyResult<Self> {
        let inner = ObservationBatch::from_bytes(bytes)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    fn to_bytes<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self
            .inner
            .to_bytes()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    /// Returns (states, floors) as numpy arrays:
    /// - states: [N, output_dim] float32
    /// - floors: [N] uint32
    fn to_numpy<'py>(
        &self,
        py: Python<'py>,
    ) -> PyResult<(Bound<'py, PyArray2<f32>>, Bound<'py, PyArray1<u32>>)> {
        let n = self.inner.len();
        let mut states = Vec::with_capacity(n * OUTPUT_DIM);
        let mut floors = Vec::with_capacity(n);
        for sample in &self.inner.samples {
            states.extend_from_slice(sample.vector.as_slice());
            floors.push(sample.floor);
        }
        let states = PyArray1::from_vec_bound(py, states)
            .reshape([n, OUTPUT_DIM])
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok((states, PyArray1::from_vec_bound(py, floors)))
    }

    /// Recorded commands, `None` for bare frames.
    #[getter]
    fn actions(&self) -> Vec<Option<String>> {
        self.inner.samples.iter().map(|s| s.action.clone()).collect()
    }

    #[getter]
    fn schema_version(&self) -> u32 {
        self.inner.schema_version
    }

    /// Get one encoded vector.
    fn vector(&self, index: usize) -> Option<PyFeatureVector> {
        self.inner
            .samples
            .get(index)
            .map(|s| PyFeatureVector(s.vector.clone()))
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "ObservationBatch(len={}, schema_version={})",
            self.inner.len(),
            self.inner.schema_version
        )
    }
}
