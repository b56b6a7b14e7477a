//! Identifier catalogs.
//!
//! Cards, relics, potions, powers, monsters and the smaller enumerations
//! arrive as free-form strings. This module owns the mapping from those
//! strings to dense indices:
//!
//! - [`Category`]: the identifier families and their fixed span widths
//! - [`normalize`]: canonical lookup keys
//! - [`IdentifierTable`]: one category's index
//! - [`IdentifierRegistry`]: all categories, loaded from a TOML catalog

mod category;
mod error;
mod normalize;
mod registry;
mod table;

pub use category::Category;
pub use error::CatalogError;
pub use normalize::normalize;
pub use registry::{IdentifierRegistry, SUPPORTED_CATALOG_VERSION};
pub use table::{IdentifierTable, UNKNOWN_INDEX};
