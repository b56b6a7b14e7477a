//! The observation type handed to agents.
//!
//! A [`FeatureVector`] is the only thing downstream models see: a flat
//! `f32` tensor of exactly [`OUTPUT_DIM`] values in `[0, 1]`, laid out by
//! [`LAYOUT`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{BlockId, LAYOUT, OUTPUT_DIM};

/// A vector whose length is not [`OUTPUT_DIM`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("feature vector has {found} values, expected {expected}")]
pub struct LengthMismatch {
    pub expected: usize,
    pub found: usize,
}

/// Encoded frame as a flat tensor for model input.
///
/// Immutable once built. Deserializing checks the length, so a vector read
/// back from disk still has [`OUTPUT_DIM`] values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    /// An all-zero vector.
    pub fn zeros() -> Self {
        Self {
            values: vec![0.0; OUTPUT_DIM],
        }
    }

    /// Total number of elements, always [`OUTPUT_DIM`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Element at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// The values of one block.
    #[must_use]
    pub fn block(&self, id: BlockId) -> &[f32] {
        LAYOUT.span(id).of(&self.values)
    }

    /// Per-block activity, in layout order.
    #[must_use]
    pub fn block_stats(&self) -> Vec<BlockStats> {
        LAYOUT
            .blocks()
            .iter()
            .map(|spec| {
                let values = spec.span().of(&self.values);
                let reserved = &values[spec.len - spec.reserved_tail..];
                BlockStats {
                    block: spec.id,
                    len: spec.len,
                    nonzero: values.iter().filter(|&&v| v != 0.0).count(),
                    max: values.iter().copied().fold(0.0, f32::max),
                    reserved_nonzero: reserved.iter().filter(|&&v| v != 0.0).count(),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.values
    }

    /// Wrap a buffer the assembler filled. Callers guarantee the length.
    pub(crate) fn from_filled(values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), OUTPUT_DIM);
        Self { values }
    }
}

impl TryFrom<Vec<f32>> for FeatureVector {
    type Error = LengthMismatch;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        if values.len() != OUTPUT_DIM {
            return Err(LengthMismatch {
                expected: OUTPUT_DIM,
                found: values.len(),
            });
        }
        Ok(Self { values })
    }
}

impl From<FeatureVector> for Vec<f32> {
    fn from(vector: FeatureVector) -> Self {
        vector.values
    }
}

impl AsRef<[f32]> for FeatureVector {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}

/// How much of a block one vector uses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockStats {
    pub block: BlockId,
    pub len: usize,
    /// Positions holding a non-zero value.
    pub nonzero: usize,
    /// Largest value in the block, 0 for an all-zero block.
    pub max: f32,
    /// Non-zero positions inside the reserved tail. Always 0 for vectors
    /// produced by this version of the encoder.
    pub reserved_nonzero: usize,
}

impl BlockStats {
    /// Share of the block's positions that are non-zero.
    #[must_use]
    pub fn density(&self) -> f32 {
        if self.len == 0 {
            0.0
        } else {
            self.nonzero as f32 / self.len as f32
        }
    }
}
