use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::buffer::MAX_ENTRIES;
use crate::core::debounce::DEFAULT_DEBOUNCE;
use crate::core::defaults::{DefaultsSettings, SearchEngineProvider};
use crate::error::{OmniboxError, OmniboxResult};
use crate::services::tld::TldTable;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub search_provider: Option<SearchEngineProvider>,
    /// Remembered domain suffixes and their scores, e.g. `".com" = 10`
    #[serde(default)]
    pub suggested_tlds: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Offer a "Go to <domain>" row
    #[serde(alias = "completion-enabled")]
    pub completion_enabled: bool,
    /// Offer a "Search for ... on ..." row
    #[serde(alias = "search-enabled")]
    pub search_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub debounce_ms: u64,
    pub visible_entries: usize,
}

#[allow(clippy::derivable_impls)]
impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            behavior: BehaviorConfig::default(),
            search_provider: None,
            suggested_tlds: BTreeMap::new(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            completion_enabled: true,
            search_enabled: true,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            visible_entries: MAX_ENTRIES,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("omnibox")
            .join("config.toml")
    }

    /// Load config from the default path, or return defaults if missing or broken
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// Load and validate config from `path`
    pub fn load_from(path: &Path) -> OmniboxResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> OmniboxResult<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Clamp values to acceptable ranges and reject unusable ones
    fn validate(&mut self) -> OmniboxResult<()> {
        self.behavior.debounce_ms = self.behavior.debounce_ms.clamp(0, 2000);
        self.behavior.visible_entries = self.behavior.visible_entries.clamp(1, MAX_ENTRIES);
        self.suggested_tlds.retain(|suffix, _| !suffix.is_empty());

        if let Some(provider) = &self.search_provider {
            if provider.name.trim().is_empty() || provider.url_template.trim().is_empty() {
                return Err(OmniboxError::Config(
                    "search_provider needs both name and url_template".to_string(),
                ));
            }
            if !provider.has_query_placeholder() {
                tracing::debug!(provider = %provider.name, "no %s in url_template, search text will be appended");
            }
        }
        Ok(())
    }

    /// Save config to the default path
    pub fn save(&self) -> OmniboxResult<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> OmniboxResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn defaults_settings(&self) -> DefaultsSettings {
        DefaultsSettings {
            search_enabled: self.general.search_enabled,
            completion_enabled: self.general.completion_enabled,
        }
    }

    pub fn tld_table(&self) -> TldTable {
        self.suggested_tlds
            .iter()
            .map(|(suffix, score)| (suffix.as_str(), *score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.general.completion_enabled);
        assert!(config.general.search_enabled);
        assert_eq!(config.behavior.debounce_ms, 100);
        assert_eq!(config.behavior.visible_entries, 15);
        assert!(config.search_provider.is_none());
    }

    #[test]
    fn test_parse_full() {
        let config = Config::from_toml_str(
            r#"
            [general]
            completion-enabled = false

            [behavior]
            debounce_ms = 250

            [search_provider]
            name = "DuckDuckGo"
            url_template = "https://duckduckgo.com/?q=%s"

            [suggested_tlds]
            ".com" = 10
            ".co.uk" = 3
            "#,
        )
        .unwrap();

        assert!(!config.general.completion_enabled);
        assert!(config.general.search_enabled);
        assert_eq!(config.behavior.debounce_ms, 250);
        assert_eq!(config.search_provider.as_ref().unwrap().name, "DuckDuckGo");
        let tlds = config.tld_table();
        assert_eq!(tlds.best(), Some(".com"));
        assert_eq!(tlds.len(), 2);
    }

    #[test]
    fn test_validate_clamps() {
        let config = Config::from_toml_str(
            r#"
            [behavior]
            debounce_ms = 99999
            visible_entries = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.behavior.debounce_ms, 2000);
        assert_eq!(config.behavior.visible_entries, 1);
    }

    #[test]
    fn test_rejects_incomplete_provider() {
        let err = Config::from_toml_str(
            r#"
            [search_provider]
            name = ""
            url_template = "https://x/?q=%s"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, OmniboxError::Config(_)));
    }

    #[test]
    fn test_provider_without_marker_appends() {
        let config = Config::from_toml_str(
            r#"
            [search_provider]
            name = "Plain"
            url_template = "https://plain.example/search?q="
            "#,
        )
        .unwrap();
        let provider = config.search_provider.unwrap();
        assert!(!provider.has_query_placeholder());
        assert_eq!(provider.resolve_url("a b"), "https://plain.example/search?q=a%20b");
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_toml_str("[general\n").unwrap_err();
        assert!(matches!(err, OmniboxError::TomlParse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search_provider = Some(SearchEngineProvider::new("Kagi", "https://kagi.com/search?q=%s"));
        config.suggested_tlds.insert(".org".into(), 4);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.search_provider, config.search_provider);
        assert_eq!(loaded.suggested_tlds.get(".org"), Some(&4));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, OmniboxError::Io(_)));
    }
}
