//! Output layout: block table, per-block sub-layouts and ceilings.
//!
//! This module is the single source of truth for where every feature lives
//! in the vector. Encoders index their block slice exclusively through the
//! spans defined here.

pub mod blocks;
mod ceilings;
mod layout;
mod validate;

pub use ceilings::{Ceilings, CEILINGS};
pub use layout::{BlockId, BlockSlices, BlockSpec, Cursor, Layout, LayoutBuilder, Span, LAYOUT, OUTPUT_DIM};
pub use validate::{self_check, validate, validate_ceilings, validate_layout, LayoutError};

/// Layout version. Bumped whenever any offset, width or ceiling changes.
pub const SCHEMA_VERSION: u32 = 3;
