use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::style::{StyleRegistry, TableStyle};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub font: FontConfig,
    pub layout: LayoutConfig,
    pub styles: StyleRegistry,
    pub table: TableStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Family for body text and headings
    pub body: String,
    /// Family for code blocks and code spans
    pub mono: String,
    /// Also search fonts installed on the system
    pub system_fonts: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            body: "Libertinus Serif".to_string(),
            mono: "DejaVu Sans Mono".to_string(),
            system_fonts: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Never leave a heading alone at the bottom of a page.
    pub keep_headings_with_next: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            keep_headings_with_next: true,
        }
    }
}

impl Config {
    /// The defaults bundled with the binary.
    pub fn compiled_default() -> Self {
        // Checked by build.rs; the fallback only guards against a schema mismatch.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::warn!("bundled default config is invalid, using built-in values: {e}");
            Self::default()
        })
    }

    /// Load config from a TOML file, layered over the bundled defaults so a
    /// file only needs the keys it changes.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let parse_error = |source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let overlay: toml::Table = toml::from_str(&content).map_err(parse_error)?;

        let mut table: toml::Table = toml::from_str(DEFAULT_CONFIG).unwrap_or_default();
        merge(&mut table, overlay);
        toml::Value::Table(table).try_into().map_err(parse_error)
    }
}

/// Recursively overwrite `base` with the keys of `overlay`.
fn merge(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(overlay_table) => {
                if let Some(toml::Value::Table(base_table)) = base.get_mut(&key) {
                    merge(base_table, overlay_table);
                    continue;
                }
                base.insert(key, toml::Value::Table(overlay_table));
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Alignment;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn bundled_defaults_match_built_in_defaults() {
        assert_eq!(
            toml::from_str::<Config>(DEFAULT_CONFIG).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[page]\nnumbers = true\n\n[styles.title]\nfont_size = 24.0\nalignment = \"left\"\n\n[table]\ngrid_width = 1.0"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.page.numbers);
        assert_eq!(config.styles.title.font_size, 24.0);
        assert_eq!(config.styles.title.alignment, Alignment::Left);
        assert_eq!(config.styles.title.leading, 22.0);
        assert_eq!(config.styles.title.color, "#1a1a2e");
        assert_eq!(config.styles.heading2, Config::default().styles.heading2);
        assert_eq!(config.table.grid_width, 1.0);
        assert_eq!(config.table.header_background, "#2c3e50");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[page]\nnumbers = \"yes\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
