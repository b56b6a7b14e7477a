//! Encoder configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the identifier catalog comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum CatalogSource {
    /// The catalog compiled into the crate.
    #[default]
    Builtin,
    /// A TOML catalog file.
    Path(PathBuf),
    /// TOML catalog text.
    Inline(String),
}

/// Encoder configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Identifier catalog to build tables from.
    #[serde(default)]
    pub catalog: CatalogSource,

    /// Run the layout self-check when the encoder is built.
    /// A failing check panics.
    #[serde(default = "default_self_check")]
    pub self_check: bool,
}

fn default_self_check() -> bool {
    true
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogSource::Builtin,
            self_check: true,
        }
    }
}

impl EncoderConfig {
    /// Load identifiers from a catalog file.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = CatalogSource::Path(path.into());
        self
    }

    /// Load identifiers from catalog text.
    pub fn with_catalog_toml(mut self, toml: impl Into<String>) -> Self {
        self.catalog = CatalogSource::Inline(toml.into());
        self
    }

    /// Enable or disable the startup self-check.
    pub fn with_self_check(mut self, enabled: bool) -> Self {
        self.self_check = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.catalog, CatalogSource::Builtin);
        assert!(config.self_check);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EncoderConfig::default()
            .with_catalog_path("/tmp/catalog.toml")
            .with_self_check(false);
        assert_eq!(
            config.catalog,
            CatalogSource::Path(PathBuf::from("/tmp/catalog.toml"))
        );
        assert!(!config.self_check);
    }

    #[test]
    fn test_from_toml() {
        let config: EncoderConfig = toml::from_str("self_check = false").unwrap();
        assert_eq!(config.catalog, CatalogSource::Builtin);
        assert!(!config.self_check);

        let config: EncoderConfig = toml::from_str(
            r#"
            [catalog]
            kind = "path"
            value = "data/catalog.toml"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.catalog,
            CatalogSource::Path(PathBuf::from("data/catalog.toml"))
        );
        assert!(config.self_check);
    }
}
