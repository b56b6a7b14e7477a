//! Catalog loading errors.
//!
//! All of these are fatal: a registry is never constructed from a catalog
//! that fails any check.

use std::path::PathBuf;

use super::Category;

/// A problem found while loading an identifier catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unsupported catalog version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("catalog is missing the `{0}` list")]
    MissingCategory(Category),

    #[error("catalog has an unknown list `{0}`")]
    UnknownCategory(String),

    #[error("`{category}` must start with the reserved UNKNOWN entry, found {found:?}")]
    MissingUnknownSlot { category: Category, found: String },

    #[error("`{category}` has {len} entries but its span holds {dim}")]
    Overflow {
        category: Category,
        len: usize,
        dim: usize,
    },

    #[error("`{category}` entry {index} is blank")]
    BlankEntry { category: Category, index: usize },

    #[error("`{category}` lists {id:?} twice (indices {first} and {second})")]
    Duplicate {
        category: Category,
        id: String,
        first: usize,
        second: usize,
    },

    #[error("`{category}` alias {alias:?} points at missing entry {target:?}")]
    DanglingAlias {
        category: Category,
        alias: String,
        target: String,
    },
}
