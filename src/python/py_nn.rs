//! Encoder bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde_json::Value;

use crate::nn::{EncoderConfig, FeatureVector, FrameEncoder, StateEncoder};
use crate::schema::{BlockId, LAYOUT, OUTPUT_DIM, SCHEMA_VERSION};

fn parse_frame(text: &str) -> PyResult<Value> {
    serde_json::from_str(text).map_err(|e| PyValueError::new_err(format!("invalid frame JSON: {e}")))
}

fn parse_block(name: &str) -> PyResult<BlockId> {
    BlockId::from_name(name).ok_or_else(|| PyValueError::new_err(format!("unknown block: {name}")))
}

/// Python wrapper for FeatureVector.
#[pyclass(name = "FeatureVector")]
#[derive(Clone, Debug)]
pub struct PyFeatureVector(pub FeatureVector);

#[pymethods]
impl PyFeatureVector {
    fn __len__(&self) -> usize {
        self.0.len()
    }

    /// Convert to a flat numpy array.
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_slice_bound(py, self.0.as_slice())
    }

    /// Get a value at the given flat index.
    fn get(&self, index: usize) -> Option<f32> {
        self.0.get(index)
    }

    /// Values of one block as a numpy array.
    fn block<'py>(&self, py: Python<'py>, name: &str) -> PyResult<Bound<'py, PyArray1<f32>>> {
        let id = parse_block(name)?;
        Ok(PyArray1::from_slice_bound(py, self.0.block(id)))
    }

    /// Per-block `(name, nonzero, max, reserved_nonzero)` tuples.
    fn block_stats(&self) -> Vec<(String, usize, f32, usize)> {
        self.0
            .block_stats()
            .into_iter()
            .map(|s| (s.block.name().to_string(), s.nonzero, s.max, s.reserved_nonzero))
            .collect()
    }

    fn __repr__(&self) -> String {
        let nonzero = self.0.as_slice().iter().filter(|&&v| v != 0.0).count();
        format!("FeatureVector(len={}, nonzero={})", self.0.len(), nonzero)
    }
}

/// Python wrapper for FrameEncoder.
///
/// Frames are passed as JSON text, exactly as the game mod prints them.
#[pyclass(name = "FrameEncoder")]
#[derive(Clone)]
pub struct PyFrameEncoder {
    pub inner: FrameEncoder,
}

#[pymethods]
impl PyFrameEncoder {
    /// Create an encoder, optionally over a catalog file.
    #[new]
    #[pyo3(signature = (catalog_path=None, self_check=true))]
    fn new(catalog_path: Option<String>, self_check: bool) -> PyResult<Self> {
        let mut config = EncoderConfig::default().with_self_check(self_check);
        if let Some(path) = catalog_path {
            config = config.with_catalog_path(path);
        }
        let inner = FrameEncoder::new(&config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Encode one frame.
    fn encode(&self, frame_json: &str) -> PyResult<PyFeatureVector> {
        let frame = parse_frame(frame_json)?;
        Ok(PyFeatureVector(self.inner.encode(&frame)))
    }

    /// Encode one frame straight to a numpy array.
    fn encode_numpy<'py>(
        &self,
        py: Python<'py>,
        frame_json: &str,
    ) -> PyResult<Bound<'py, PyArray1<f32>>> {
        let frame = parse_frame(frame_json)?;
        let vector = self.inner.encode(&frame);
        Ok(PyArray1::from_vec_bound(py, vector.into_vec()))
    }

    /// Encode many frames into an `[N, output_dim]` array.
    ///
    /// Encoding runs in parallel with the GIL released.
    fn encode_batch<'py>(
        &self,
        py: Python<'py>,
        frames_json: Vec<String>,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let frames = frames_json
            .iter()
            .map(|text| parse_frame(text))
            .collect::<PyResult<Vec<Value>>>()?;
        let n = frames.len();
        let flat: Vec<f32> = py.allow_threads(|| {
            self.inner
                .encode_batch(&frames)
                .into_iter()
                .flat_map(FeatureVector::into_vec)
                .collect()
        });
        PyArray1::from_vec_bound(py, flat)
            .reshape([n, OUTPUT_DIM])
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Length of every encoded vector.
    #[getter]
    fn output_dim(&self) -> usize {
        self.inner.output_dim()
    }

    #[getter]
    fn schema_version(&self) -> u32 {
        SCHEMA_VERSION
    }

    /// `(start, len)` of a block in the flat vector.
    #[staticmethod]
    fn block_span(name: &str) -> PyResult<(usize, usize)> {
        let span = LAYOUT.span(parse_block(name)?);
        Ok((span.start, span.len))
    }

    /// Names of all blocks in layout order.
    #[staticmethod]
    fn block_names() -> Vec<&'static str> {
        BlockId::ALL.iter().map(|b| b.name()).collect()
    }

    /// Human-readable layout table.
    #[staticmethod]
    fn layout_summary() -> String {
        LAYOUT.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "FrameEncoder(output_dim={}, schema_version={}, catalog_version={})",
            OUTPUT_DIM,
            SCHEMA_VERSION,
            self.inner.registry().version()
        )
    }
}
