//! Observation datasets built from recorded sessions.
//!
//! A session log holds one JSON value per line: either a bare frame or a
//! record `{"state": <frame>, "action": "<command>", "step": n}` written by
//! the data collector. Lines are encoded independently; a bad line is
//! reported and skipped, never fatal.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::frame::FrameView;
use crate::nn::{FeatureVector, FrameEncoder, StateEncoder};
use crate::schema::{OUTPUT_DIM, SCHEMA_VERSION};

/// Errors while building or loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: expected a JSON object")]
    NotAnObject { line: usize },

    #[error("batch encoding: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("batch has schema version {found}, this build reads {expected}")]
    SchemaMismatch { expected: u32, found: u32 },

    #[error("batch has output dim {found}, this build produces {expected}")]
    DimMismatch { expected: usize, found: usize },
}

/// One encoded decision point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub vector: FeatureVector,
    /// Command the agent answered with, when the line was a record.
    pub action: Option<String>,
    /// Collector step counter, when recorded.
    pub step: Option<u64>,
    pub floor: u32,
}

/// Outcome of [`encode_lines`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodeReport {
    /// Lines that produced a sample.
    pub encoded: usize,
    /// 1-based line numbers that were skipped, with the reason.
    pub skipped: Vec<(usize, String)>,
}

impl EncodeReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Split a parsed line into frame, action and step.
fn split_record(value: &Value) -> (&Value, Option<String>, Option<u64>) {
    match value.get("state") {
        Some(state) if state.is_object() => {
            let action = value
                .get("action")
                .and_then(Value::as_str)
                .map(str::to_owned);
            let step = value.get("step").and_then(Value::as_u64);
            (state, action, step)
        }
        _ => (value, None, None),
    }
}

fn encode_line(encoder: &FrameEncoder, line: usize, text: &str) -> Result<Sample, DatasetError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| DatasetError::Json { line, source })?;
    if !value.is_object() {
        return Err(DatasetError::NotAnObject { line });
    }
    let (frame, action, step) = split_record(&value);
    let view = FrameView::new(frame);
    Ok(Sample {
        vector: encoder.encode_view(&view),
        action,
        step,
        floor: view.floor().max(0.0) as u32,
    })
}

/// Encode every non-blank line of a session log.
///
/// Lines are encoded in parallel; samples keep their line order. Blank
/// lines are ignored, malformed ones are logged and listed in the report.
pub fn encode_lines(encoder: &FrameEncoder, text: &str) -> (Vec<Sample>, EncodeReport) {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    let results: Vec<Result<Sample, DatasetError>> = lines
        .par_iter()
        .map(|&(line, l)| encode_line(encoder, line, l))
        .collect();

    let mut samples = Vec::with_capacity(results.len());
    let mut report = EncodeReport::default();
    for ((line, _), result) in lines.iter().zip(results) {
        match result {
            Ok(sample) => samples.push(sample),
            Err(err) => {
                warn!(line, error = %err, "skipping session line");
                report.skipped.push((*line, err.to_string()));
            }
        }
    }
    report.encoded = samples.len();
    debug!(
        encoded = report.encoded,
        skipped = report.skipped.len(),
        "session encoded"
    );
    (samples, report)
}

/// Encode already-parsed frames in parallel, preserving order.
pub fn encode_frames<E: StateEncoder + ?Sized>(encoder: &E, frames: &[Value]) -> Vec<FeatureVector> {
    frames.par_iter().map(|f| encoder.encode(f)).collect()
}

#[derive(Deserialize)]
struct BatchHeader {
    schema_version: u32,
    output_dim: usize,
}

/// Samples tagged with the layout they were encoded under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservationBatch {
    pub schema_version: u32,
    pub output_dim: usize,
    pub samples: Vec<Sample>,
}

impl ObservationBatch {
    /// Tag samples with the current layout.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            output_dim: OUTPUT_DIM,
            samples,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Serialize with bincode.
    ///
    /// # Errors
    ///
    /// Returns the bincode error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DatasetError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize a batch written by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// Rejects batches from another schema version or output dimension
    /// before decoding their samples.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DatasetError> {
        let header: BatchHeader = bincode::deserialize(bytes)?;
        if header.schema_version != SCHEMA_VERSION {
            return Err(DatasetError::SchemaMismatch {
                expected: SCHEMA_VERSION,
                found: header.schema_version,
            });
        }
        if header.output_dim != OUTPUT_DIM {
            return Err(DatasetError::DimMismatch {
                expected: OUTPUT_DIM,
                found: header.output_dim,
            });
        }
        Ok(bincode::deserialize(bytes)?)
    }
}
