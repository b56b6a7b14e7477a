//! Identifier registry: one [`IdentifierTable`] per [`Category`].

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::normalize::normalize;
use super::table::{IdentifierTable, UNKNOWN_INDEX};
use super::{CatalogError, Category};

/// Catalog format version this build understands.
pub const SUPPORTED_CATALOG_VERSION: u32 = 1;

const BUILTIN_CATALOG: &str = include_str!("builtin.toml");

static BUILTIN: Lazy<IdentifierRegistry> = Lazy::new(|| {
    IdentifierRegistry::from_toml_str(BUILTIN_CATALOG)
        .unwrap_or_else(|err| panic!("builtin identifier catalog is malformed: {err}"))
});

/// On-disk catalog shape.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: u32,
    #[serde(default)]
    aliases: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(flatten)]
    lists: BTreeMap<String, Vec<String>>,
}

/// Immutable identifier-to-index mapping for every category.
///
/// Built once at startup (or through [`IdentifierRegistry::builtin`]) and
/// shared by reference afterwards. Lookups never fail: anything the catalog
/// does not know maps to index 0.
#[derive(Clone, Debug)]
pub struct IdentifierRegistry {
    version: u32,
    tables: Vec<IdentifierTable>,
}

impl IdentifierRegistry {
    /// The embedded catalog, constructed on first use.
    ///
    /// # Panics
    ///
    /// Panics if the embedded catalog fails validation, which is a build
    /// defect rather than a runtime condition.
    #[must_use]
    pub fn builtin() -> &'static IdentifierRegistry {
        &BUILTIN
    }

    /// Parse and validate a TOML catalog.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        Self::from_catalog(file)
    }

    /// Read, parse and validate a TOML catalog from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    fn from_catalog(mut file: CatalogFile) -> Result<Self, CatalogError> {
        if file.version != SUPPORTED_CATALOG_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: file.version,
                supported: SUPPORTED_CATALOG_VERSION,
            });
        }
        if let Some(key) = file
            .lists
            .keys()
            .chain(file.aliases.keys())
            .find(|key| Category::from_key(key).is_none())
        {
            return Err(CatalogError::UnknownCategory(key.clone()));
        }

        let mut tables = Vec::with_capacity(Category::COUNT);
        for category in Category::ALL {
            let entries = file
                .lists
                .remove(category.key())
                .ok_or(CatalogError::MissingCategory(category))?;
            let aliases: Vec<(String, String)> = file
                .aliases
                .remove(category.key())
                .map(|table| table.into_iter().collect())
                .unwrap_or_default();

            let table = IdentifierTable::build(category, &entries, &aliases)?;
            tracing::debug!(
                category = %category,
                entries = table.len(),
                aliases = aliases.len(),
                dim = category.dim(),
                "identifier table built"
            );
            tables.push(table);
        }

        Ok(Self {
            version: file.version,
            tables,
        })
    }

    /// Catalog version this registry was loaded from.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Table for one category.
    #[must_use]
    pub fn table(&self, category: Category) -> &IdentifierTable {
        &self.tables[category.slot()]
    }

    /// Dense index of `raw` within `category`; misses resolve to 0.
    #[must_use]
    pub fn index(&self, category: Category, raw: &str) -> usize {
        let key = normalize(raw);
        if key.is_empty() {
            return UNKNOWN_INDEX;
        }
        match self.table(category).get(&key) {
            Some(index) => index,
            None => {
                tracing::trace!(category = %category, id = raw, "unknown identifier");
                UNKNOWN_INDEX
            }
        }
    }

    /// True when `raw` resolves to a real (non-UNKNOWN) entry.
    #[must_use]
    pub fn contains(&self, category: Category, raw: &str) -> bool {
        self.table(category)
            .get(&normalize(raw))
            .is_some_and(|i| i != UNKNOWN_INDEX)
    }

    /// Number of entries in `category`, UNKNOWN included.
    #[must_use]
    pub fn len(&self, category: Category) -> usize {
        self.table(category).len()
    }

    /// Catalog spelling of `index` within `category`.
    #[must_use]
    pub fn name(&self, category: Category, index: usize) -> Option<&str> {
        self.table(category).name(index)
    }
}

impl Default for IdentifierRegistry {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_catalog(extra: &str) -> String {
        let mut out = String::from("version = 1\n");
        for category in Category::ALL {
            out.push_str(&format!("{} = [\"UNKNOWN\"]\n", category.key()));
        }
        out.push_str(extra);
        out
    }

    #[test]
    fn test_builtin_loads() {
        let registry = IdentifierRegistry::builtin();
        assert_eq!(registry.version(), SUPPORTED_CATALOG_VERSION);
        for category in Category::ALL {
            assert!(registry.len(category) >= 1);
            assert!(registry.len(category) <= category.dim());
            assert_eq!(registry.name(category, 0), Some("UNKNOWN"));
        }
    }

    #[test]
    fn test_builtin_known_ids() {
        let registry = IdentifierRegistry::builtin();
        assert!(registry.index(Category::Cards, "Strike_G") > 0);
        assert!(registry.index(Category::Relics, "Ring of the Snake") > 0);
        assert!(registry.index(Category::Monsters, "JawWorm") > 0);
        assert!(registry.index(Category::Intents, "ATTACK") > 0);
        assert_eq!(registry.index(Category::Cards, "Not A Real Card"), 0);
        assert_eq!(registry.index(Category::Cards, ""), 0);
    }

    #[test]
    fn test_builtin_aliases() {
        let registry = IdentifierRegistry::builtin();
        assert_eq!(
            registry.index(Category::Cards, "Sneaky Strike"),
            registry.index(Category::Cards, "Underhanded Strike")
        );
        assert_eq!(
            registry.index(Category::Powers, "Weak"),
            registry.index(Category::Powers, "Weakened")
        );
    }

    #[test]
    fn test_minimal_catalog() {
        let registry = IdentifierRegistry::from_toml_str(&minimal_catalog("")).unwrap();
        for category in Category::ALL {
            assert_eq!(registry.len(category), 1);
        }
        assert!(!registry.contains(Category::Cards, "UNKNOWN"));
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let source = minimal_catalog("").replace("version = 1", "version = 99");
        let err = IdentifierRegistry::from_toml_str(&source).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedVersion { found: 99, .. }));
    }

    #[test]
    fn test_rejects_missing_category() {
        let source = minimal_catalog("").replace("rarities = [\"UNKNOWN\"]\n", "");
        let err = IdentifierRegistry::from_toml_str(&source).unwrap_err();
        assert!(matches!(err, CatalogError::MissingCategory(Category::Rarities)));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let err = IdentifierRegistry::from_toml_str(&minimal_catalog("orbs = [\"UNKNOWN\"]\n"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory(ref key) if key == "orbs"));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = IdentifierRegistry::from_toml_str("version = ").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
