//! # spire-encoder
//!
//! A state vector encoding engine for roguelike deckbuilder agents.
//!
//! Turns one frame of the game mod's JSON protocol into a fixed-length,
//! `[0, 1]`-bounded `f32` vector that rule-based, supervised and RL agents
//! all consume as their observation.
//!
//! ## Design Principles
//!
//! 1. **One Authoritative Layout**: Every block offset is derived at compile
//!    time by a builder from declared lengths. `SCHEMA_VERSION` changes with
//!    the layout.
//!
//! 2. **Total Encoding**: Encoding never fails. Missing fields read as their
//!    declared default, unknown identifiers land on index 0.
//!
//! 3. **Immutable Catalogs**: Identifier tables are built and validated once,
//!    then shared read-only across threads.
//!
//! ## Modules
//!
//! - `catalog`: Identifier normalization and per-category index tables
//! - `schema`: Block layout, sub-layouts, normalization ceilings, self-check
//! - `frame`: Typed, defaulting views over a raw JSON frame
//! - `encode`: Normalization helpers and one encoder per block family
//! - `nn`: The vector assembler and the `FeatureVector` it returns
//! - `training`: Session log encoding and bincode observation batches
//! - `python`: PyO3 bindings (feature `python`)

pub mod catalog;
pub mod encode;
pub mod frame;
pub mod nn;
pub mod schema;
pub mod training;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::catalog::{normalize, CatalogError, Category, IdentifierRegistry, IdentifierTable};

pub use crate::schema::{
    validate, BlockId, BlockSpec, Ceilings, Layout, LayoutError, Span, CEILINGS, LAYOUT,
    OUTPUT_DIM, SCHEMA_VERSION,
};

pub use crate::frame::FrameView;

pub use crate::nn::{
    BlockStats, CatalogSource, EncoderConfig, FeatureVector, FrameEncoder, StateEncoder,
};

pub use crate::training::{encode_lines, DatasetError, EncodeReport, ObservationBatch, Sample};
