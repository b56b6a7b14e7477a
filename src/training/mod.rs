//! Dataset construction for model training.
//!
//! This module turns recorded session logs into encoded samples that can be
//! stored and reloaded without re-encoding.
//!
//! ## Overview
//!
//! - **encode_lines**: Encodes a JSONL session log, reporting bad lines
//! - **encode_frames**: Parallel encoding of already-parsed frames
//! - **ObservationBatch**: Samples tagged with the schema version, stored with bincode
//!
//! ## Usage
//!
//! ```rust
//! use spire_encoder::nn::FrameEncoder;
//! use spire_encoder::training::{encode_lines, ObservationBatch};
//!
//! let encoder = FrameEncoder::builtin();
//! let log = "{\"state\": {\"game_state\": {\"floor\": 1}}, \"action\": \"proceed\"}\n";
//! let (samples, report) = encode_lines(&encoder, log);
//! assert!(report.is_clean());
//!
//! let bytes = ObservationBatch::new(samples).to_bytes().unwrap();
//! let batch = ObservationBatch::from_bytes(&bytes).unwrap();
//! assert_eq!(batch.len(), 1);
//! ```

pub mod dataset;

pub use dataset::{
    encode_frames, encode_lines, DatasetError, EncodeReport, ObservationBatch, Sample,
};
