//! Python bindings for the spire-encoder state vector engine.
//!
//! This module provides PyO3 bindings so Python agents and training scripts
//! can encode mod frames without a Python reimplementation of the layout.
//!
//! # Quick Start
//!
//! ```python
//! import spire_encoder as se
//!
//! encoder = se.FrameEncoder()
//! vector = encoder.encode_numpy(frame_line)   # shape [output_dim]
//!
//! batch, skipped = se.ObservationBatch.from_session(encoder, open("session.jsonl").read())
//! states, floors = batch.to_numpy()
//! ```

use pyo3::prelude::*;

mod py_nn;
mod py_training;

pub use py_nn::*;
pub use py_training::*;

use crate::schema::{OUTPUT_DIM, SCHEMA_VERSION};

/// spire_encoder: fixed-length state vectors for deckbuilder agents.
#[pymodule]
fn spire_encoder(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("OUTPUT_DIM", OUTPUT_DIM)?;
    m.add("SCHEMA_VERSION", SCHEMA_VERSION)?;

    // Encoding
    m.add_class::<PyFrameEncoder>()?;
    m.add_class::<PyFeatureVector>()?;

    // Datasets
    m.add_class::<PyObservationBatch>()?;

    Ok(())
}
