//! Marketplace configuration module.
//!
//! Handles loading, validating, and merging `market.toml`. Stock defaults are
//! serialized to a TOML table and the user file is merged on top of it, so a
//! config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! fixture = "public/data/templates.json"  # Listing fixture to load
//! fallback_color = "#6C63FF"              # Color for platforms not listed below
//!
//! [browse]
//! default_sort = "sales"     # sales | price_asc | price_desc | rating | newest
//! default_platform = "all"   # "all" or one of the platform values below
//! card_tags = 3              # Tags shown per card
//!
//! [[platforms]]
//! label = "ThemeForest"
//! value = "ThemeForest"
//! color = "#82B541"
//!
//! [[platforms]]
//! label = "Webflow"
//! value = "Webflow"
//! color = "#4353FF"
//!
//! [[platforms]]
//! label = "Framer"
//! value = "Framer"
//! color = "#0099FF"
//! ```
//!
//! ## Partial Configuration
//!
//! ```toml
//! # Only change the default ordering
//! [browse]
//! default_sort = "newest"
//! ```
//!
//! Arrays are replaced, not merged: a `[[platforms]]` entry in the user file
//! replaces the whole stock platform list. Unknown keys are rejected to catch
//! typos early.

use crate::view::{ALL_PLATFORMS, PlatformFilter, SortKey};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "market.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Marketplace configuration loaded from `market.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    /// Path to the listing fixture, relative to the working directory.
    pub fixture: String,
    /// Color used for platforms without an entry in `platforms`.
    pub fallback_color: String,
    /// Defaults for the browse view.
    pub browse: BrowseConfig,
    /// Platforms offered as filters, in display order.
    pub platforms: Vec<PlatformEntry>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            fixture: "public/data/templates.json".to_string(),
            fallback_color: "#6C63FF".to_string(),
            browse: BrowseConfig::default(),
            platforms: vec![
                PlatformEntry::new("ThemeForest", "#82B541"),
                PlatformEntry::new("Webflow", "#4353FF"),
                PlatformEntry::new("Framer", "#0099FF"),
            ],
        }
    }
}

impl MarketConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.browse.card_tags == 0 {
            return Err(ConfigError::Validation(
                "browse.card_tags must be at least 1".into(),
            ));
        }
        if !is_hex_color(&self.fallback_color) {
            return Err(ConfigError::Validation(format!(
                "fallback_color must be a #hex color, got '{}'",
                self.fallback_color
            )));
        }
        let mut seen = HashSet::new();
        for entry in &self.platforms {
            if entry.value.is_empty() || entry.value == ALL_PLATFORMS {
                return Err(ConfigError::Validation(format!(
                    "platform value '{}' is reserved or empty",
                    entry.value
                )));
            }
            if !seen.insert(entry.value.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "platform '{}' is listed twice",
                    entry.value
                )));
            }
            if !is_hex_color(&entry.color) {
                return Err(ConfigError::Validation(format!(
                    "platform '{}' color must be a #hex color, got '{}'",
                    entry.value, entry.color
                )));
            }
        }
        let default_platform = &self.browse.default_platform;
        if default_platform != ALL_PLATFORMS && !seen.contains(default_platform.as_str()) {
            return Err(ConfigError::Validation(format!(
                "browse.default_platform '{default_platform}' is not a configured platform"
            )));
        }
        Ok(())
    }

    /// Color for a platform, or the fallback when it is not configured.
    pub fn platform_color(&self, platform: &str) -> &str {
        self.platforms
            .iter()
            .find(|p| p.value == platform)
            .map(|p| p.color.as_str())
            .unwrap_or(self.fallback_color.as_str())
    }

    pub fn default_filter(&self) -> PlatformFilter {
        PlatformFilter::from(self.browse.default_platform.as_str())
    }
}

/// Browse view defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowseConfig {
    pub default_sort: SortKey,
    /// `"all"` or a configured platform value.
    pub default_platform: String,
    /// Maximum number of tags printed on a listing card.
    pub card_tags: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            default_sort: SortKey::Sales,
            default_platform: ALL_PLATFORMS.to_string(),
            card_tags: 3,
        }
    }
}

/// A platform filter option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformEntry {
    /// Display label.
    pub label: String,
    /// Exact `platform` value matched against listings.
    pub value: String,
    /// `#rrggbb` accent color.
    pub color: String,
}

impl PlatformEntry {
    fn new(name: &str, color: &str) -> Self {
        Self {
            label: name.to_string(),
            value: name.to_string(),
            color: color.to_string(),
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(MarketConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `market.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `market.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<MarketConfig, ConfigError> {
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => {
            tracing::debug!(dir = %dir.display(), "no {CONFIG_FILE}, using stock defaults");
            stock_defaults_value()
        }
    };
    let config: MarketConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `market.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Template Market Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Listing fixture written by the marketplace scrapers.
fixture = "public/data/templates.json"

# Accent color for platforms not listed under [[platforms]].
fallback_color = "#6C63FF"

# ---------------------------------------------------------------------------
# Browse view
# ---------------------------------------------------------------------------
[browse]
# Initial ordering: sales | price_asc | price_desc | rating | newest
default_sort = "sales"

# Initial platform filter: "all" or one of the platform values below.
default_platform = "all"

# Maximum number of tags printed on each listing card.
card_tags = 3

# ---------------------------------------------------------------------------
# Platforms offered as filters, in display order.
# Declaring any [[platforms]] entry replaces the whole list.
# ---------------------------------------------------------------------------
[[platforms]]
label = "ThemeForest"
value = "ThemeForest"
color = "#82B541"

[[platforms]]
label = "Webflow"
value = "Webflow"
color = "#4353FF"

[[platforms]]
label = "Framer"
value = "Framer"
color = "#0099FF"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        MarketConfig::default().validate().unwrap();
    }

    #[test]
    fn default_config_has_three_platforms() {
        let config = MarketConfig::default();
        let values: Vec<&str> = config.platforms.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(values, vec!["ThemeForest", "Webflow", "Framer"]);
        assert_eq!(config.browse.default_sort, SortKey::Sales);
        assert_eq!(config.default_filter(), PlatformFilter::All);
    }

    #[test]
    fn stock_toml_matches_defaults() {
        let parsed: MarketConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = MarketConfig::default();
        assert_eq!(parsed.fixture, defaults.fixture);
        assert_eq!(parsed.platforms, defaults.platforms);
        assert_eq!(parsed.browse.card_tags, defaults.browse.card_tags);
    }

    #[test]
    fn parse_partial_config() {
        let config: MarketConfig = toml::from_str(
            r#"
[browse]
default_sort = "newest"
"#,
        )
        .unwrap();
        assert_eq!(config.browse.default_sort, SortKey::Newest);
        // Defaults preserved
        assert_eq!(config.browse.card_tags, 3);
        assert_eq!(config.platforms.len(), 3);
    }

    #[test]
    fn unknown_sort_key_is_parse_error() {
        let result: Result<MarketConfig, _> = toml::from_str(
            r#"
[browse]
default_sort = "popular"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn platform_color_falls_back() {
        let config = MarketConfig::default();
        assert_eq!(config.platform_color("Webflow"), "#4353FF");
        assert_eq!(config.platform_color("Notion"), "#6C63FF");
    }

    #[test]
    fn validation_rejects_zero_card_tags() {
        let mut config = MarketConfig::default();
        config.browse.card_tags = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_rejects_bad_colors() {
        let mut config = MarketConfig::default();
        config.platforms[0].color = "green".to_string();
        assert!(config.validate().is_err());

        let mut config = MarketConfig::default();
        config.fallback_color = "#12345".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_reserved_and_duplicate_platforms() {
        let mut config = MarketConfig::default();
        config.platforms.push(PlatformEntry::new("all", "#000000"));
        assert!(config.validate().is_err());

        let mut config = MarketConfig::default();
        config.platforms.push(PlatformEntry::new("Framer", "#000000"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_unknown_default_platform() {
        let mut config = MarketConfig::default();
        config.browse.default_platform = "Notion".to_string();
        assert!(config.validate().is_err());

        config.browse.default_platform = "Framer".to_string();
        config.validate().unwrap();
        assert_eq!(
            config.default_filter(),
            PlatformFilter::Only("Framer".to_string())
        );
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_overrides_scalars_and_keeps_siblings() {
        let base: toml::Value = toml::from_str("a = 1\n[t]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[t]\ny = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn merge_replaces_arrays() {
        let base: toml::Value = toml::from_str("list = [1, 2, 3]").unwrap();
        let overlay: toml::Value = toml::from_str("list = [9]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["list"].as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.fixture, "public/data/templates.json");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r##"
fixture = "data/market.json"

[[platforms]]
label = "Notion"
value = "Notion"
color = "#000000"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.fixture, "data/market.json");
        assert_eq!(config.platforms.len(), 1);
        assert_eq!(config.platform_color("Notion"), "#000000");
        // Unspecified values should be defaults
        assert_eq!(config.browse.default_sort, SortKey::Sales);
    }

    #[test]
    fn load_config_rejects_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[browse]\npage_size = 20\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_runs_validation() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[browse]\ncard_tags = 0\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }
}
