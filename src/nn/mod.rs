//! Model-facing encoder surface.
//!
//! This module provides the vector assembler agents call once per frame and
//! the observation type it returns.
//!
//! ## Overview
//!
//! - **Encoding**: `StateEncoder` trait and the `FrameEncoder` assembler
//! - **Output**: `FeatureVector` with per-block slicing and `BlockStats`
//! - **Configuration**: `EncoderConfig` selects the identifier catalog
//!
//! ## Usage
//!
//! ```rust
//! use spire_encoder::nn::{EncoderConfig, FrameEncoder, StateEncoder};
//! use spire_encoder::schema::{BlockId, OUTPUT_DIM};
//!
//! let encoder = FrameEncoder::new(&EncoderConfig::default()).unwrap();
//! let frame = serde_json::json!({"game_state": {"current_hp": 50, "max_hp": 80}});
//! let vector = encoder.encode(&frame);
//!
//! assert_eq!(vector.len(), OUTPUT_DIM);
//! assert!(vector.block(BlockId::PlayerCore)[0] > 0.0);
//! ```

pub mod config;
pub mod encoder;
pub mod traits;

pub use config::{CatalogSource, EncoderConfig};
pub use encoder::{FrameEncoder, StateEncoder};
pub use traits::{BlockStats, FeatureVector, LengthMismatch};
