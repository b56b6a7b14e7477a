//! Dense index tables for one identifier category.

use rustc_hash::FxHashMap;

use super::normalize::normalize;
use super::{CatalogError, Category};

/// Index every lookup miss resolves to.
pub const UNKNOWN_INDEX: usize = 0;

/// Immutable mapping from canonical id to a dense index in `[0, dim)`.
#[derive(Clone, Debug)]
pub struct IdentifierTable {
    category: Category,
    names: Vec<String>,
    index: FxHashMap<String, u16>,
}

impl IdentifierTable {
    /// Build a table from an ordered entry list and `(alias, target)` pairs.
    ///
    /// Entry 0 must be the reserved UNKNOWN marker; the list must fit the
    /// category's dimension and no two entries or aliases may share a
    /// canonical id.
    pub fn build(
        category: Category,
        entries: &[String],
        aliases: &[(String, String)],
    ) -> Result<Self, CatalogError> {
        let first = entries
            .first()
            .ok_or(CatalogError::MissingUnknownSlot {
                category,
                found: String::new(),
            })?;
        if normalize(first) != "unknown" {
            return Err(CatalogError::MissingUnknownSlot {
                category,
                found: first.clone(),
            });
        }
        if entries.len() > category.dim() {
            return Err(CatalogError::Overflow {
                category,
                len: entries.len(),
                dim: category.dim(),
            });
        }

        let mut index: FxHashMap<String, u16> = FxHashMap::default();
        index.reserve(entries.len() + aliases.len());

        for (i, raw) in entries.iter().enumerate() {
            let key = normalize(raw);
            if key.is_empty() {
                return Err(CatalogError::BlankEntry { category, index: i });
            }
            if let Some(&first) = index.get(&key) {
                return Err(CatalogError::Duplicate {
                    category,
                    id: raw.clone(),
                    first: first as usize,
                    second: i,
                });
            }
            // dim() is far below u16::MAX for every category
            index.insert(key, i as u16);
        }

        for (alias, target) in aliases {
            let target_index = index.get(&normalize(target)).copied().ok_or_else(|| {
                CatalogError::DanglingAlias {
                    category,
                    alias: alias.clone(),
                    target: target.clone(),
                }
            })?;
            let key = normalize(alias);
            if key.is_empty() {
                return Err(CatalogError::DanglingAlias {
                    category,
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
            match index.get(&key) {
                Some(&existing) if existing != target_index => {
                    return Err(CatalogError::Duplicate {
                        category,
                        id: alias.clone(),
                        first: existing as usize,
                        second: target_index as usize,
                    });
                }
                Some(_) => {}
                None => {
                    index.insert(key, target_index);
                }
            }
        }

        Ok(Self {
            category,
            names: entries.to_vec(),
            index,
        })
    }

    /// Category this table indexes.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Index of an already-canonical key.
    #[must_use]
    pub fn get(&self, canonical: &str) -> Option<usize> {
        self.index.get(canonical).map(|&i| i as usize)
    }

    /// Normalize `raw` and look it up; misses resolve to [`UNKNOWN_INDEX`].
    #[must_use]
    pub fn lookup(&self, raw: &str) -> usize {
        self.get(&normalize(raw)).unwrap_or(UNKNOWN_INDEX)
    }

    /// Catalog spelling of the entry at `index`.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Number of catalog entries (aliases excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lookup_is_normalized() {
        let table = IdentifierTable::build(
            Category::Relics,
            &entries(&["UNKNOWN", "Ring of the Snake", "Burning Blood"]),
            &[],
        )
        .unwrap();

        assert_eq!(table.lookup("Ring of the Snake"), 1);
        assert_eq!(table.lookup("ring_of_the_snake"), 1);
        assert_eq!(table.lookup("RING OF THE SNAKE"), 1);
        assert_eq!(table.lookup("Burning Blood"), 2);
        assert_eq!(table.lookup("Black Blood"), UNKNOWN_INDEX);
        assert_eq!(table.lookup(""), UNKNOWN_INDEX);
        assert_eq!(table.name(1), Some("Ring of the Snake"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_alias_resolves_to_target() {
        let table = IdentifierTable::build(
            Category::Cards,
            &entries(&["UNKNOWN", "Underhanded Strike"]),
            &[("Sneaky Strike".into(), "Underhanded Strike".into())],
        )
        .unwrap();

        assert_eq!(table.lookup("sneaky strike"), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_rejects_missing_unknown_slot() {
        let err = IdentifierTable::build(Category::Cards, &entries(&["Strike_G"]), &[]).unwrap_err();
        assert!(matches!(err, CatalogError::MissingUnknownSlot { .. }));

        let err = IdentifierTable::build(Category::Cards, &[], &[]).unwrap_err();
        assert!(matches!(err, CatalogError::MissingUnknownSlot { .. }));
    }

    #[test]
    fn test_rejects_normalized_duplicate() {
        let err = IdentifierTable::build(
            Category::Cards,
            &entries(&["UNKNOWN", "Blade Dance", "blade_dance"]),
            &[],
        )
        .unwrap_err();

        match err {
            CatalogError::Duplicate { first, second, .. } => {
                assert_eq!(first, 1);
                assert_eq!(second, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_overflow() {
        let mut names = vec!["UNKNOWN".to_string()];
        names.extend((0..Category::CardTypes.dim()).map(|i| format!("TYPE_{i}")));
        let err = IdentifierTable::build(Category::CardTypes, &names, &[]).unwrap_err();
        assert!(matches!(err, CatalogError::Overflow { .. }));
    }

    #[test]
    fn test_rejects_blank_entry() {
        let err =
            IdentifierTable::build(Category::Events, &entries(&["UNKNOWN", " _ "]), &[]).unwrap_err();
        assert!(matches!(err, CatalogError::BlankEntry { index: 1, .. }));
    }

    #[test]
    fn test_rejects_dangling_alias() {
        let err = IdentifierTable::build(
            Category::Cards,
            &entries(&["UNKNOWN", "Shiv"]),
            &[("Knife".into(), "Dagger".into())],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DanglingAlias { .. }));
    }
}
