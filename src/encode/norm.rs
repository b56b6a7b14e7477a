//! Scalar normalization and hot-vector helpers.
//!
//! Every value an encoder writes goes through one of these, which is what
//! keeps the whole vector inside `[0, 1]`.

use crate::catalog::normalize;

/// `clamp(value / ceiling, 0, 1)`; 0 for a non-positive ceiling or a
/// non-finite value.
#[inline]
#[must_use]
pub fn clamp_norm(value: f32, ceiling: f32) -> f32 {
    if !(ceiling > 0.0) || !value.is_finite() {
        return 0.0;
    }
    (value / ceiling).clamp(0.0, 1.0)
}

/// `part / whole`, 0 when `whole` is empty.
#[inline]
#[must_use]
pub fn ratio(part: usize, whole: usize) -> f32 {
    if whole == 0 {
        0.0
    } else {
        clamp_norm(part as f32, whole as f32)
    }
}

#[inline]
#[must_use]
pub fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// Mark position `index`; out-of-range indices are ignored.
#[inline]
pub fn one_hot(out: &mut [f32], index: usize) {
    if let Some(slot) = out.get_mut(index) {
        *slot = 1.0;
    }
}

/// Count one occurrence at `index`; out-of-range indices are ignored.
#[inline]
pub fn multi_hot(out: &mut [f32], index: usize) {
    if let Some(slot) = out.get_mut(index) {
        *slot += 1.0;
    }
}

/// Fold raw counts in `out` into `[0, 1]` against `ceiling`.
pub fn saturate(out: &mut [f32], ceiling: f32) {
    for v in out {
        *v = clamp_norm(*v, ceiling);
    }
}

/// Position of `name` in a fixed vocabulary. Both sides are compared in
/// canonical form, so `"The Silent"` finds `THE_SILENT`.
#[must_use]
pub fn named_index(vocabulary: &[&str], name: &str) -> Option<usize> {
    let key = normalize(name);
    if key.is_empty() {
        return None;
    }
    vocabulary.iter().position(|v| normalize(v) == key)
}

/// One-hot by name over a fixed vocabulary. Unknown names leave `out`
/// untouched.
pub fn one_hot_named(out: &mut [f32], vocabulary: &[&str], name: &str) {
    if let Some(i) = named_index(vocabulary, name) {
        one_hot(out, i);
    }
}
