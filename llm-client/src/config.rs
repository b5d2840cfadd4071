use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{LlmError, Result};

const DEFAULT_PRESET: &str = "github-gpt-4o";

/// Model presets and provider settings, stored in `llm.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Preset used when no --model flag is provided
    #[serde(default = "default_preset")]
    pub default_preset: String,

    /// Named model presets for quick access
    #[serde(default = "default_presets")]
    pub presets: HashMap<String, ModelPreset>,

    /// Provider-specific configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}

fn default_presets() -> HashMap<String, ModelPreset> {
    let mut presets = HashMap::new();
    presets.insert(
        DEFAULT_PRESET.to_string(),
        ModelPreset {
            provider: "github-models".to_string(),
            model: "gpt-4o".to_string(),
        },
    );
    presets
}

/// A named model configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPreset {
    /// Provider identifier (github-models, openrouter)
    pub provider: String,

    /// Model name/identifier for the provider
    pub model: String,
}

/// Provider-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API token (optional, can use env var instead)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Custom base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home =
            std::env::var("HOME").map_err(|_| LlmError::ConfigError("HOME not set".into()))?;
        Ok(PathBuf::from(home).join(".config/cli-programs/llm.toml"))
    }

    /// Get a preset by name
    pub fn get_preset(&self, name: &str) -> Result<&ModelPreset> {
        self.presets
            .get(name)
            .ok_or_else(|| LlmError::InvalidPreset(name.to_string()))
    }

    /// Resolve an explicit preset name, or the default one when `None`
    pub fn resolve_preset(&self, name: Option<&str>) -> Result<(&str, &ModelPreset)> {
        let name = name.unwrap_or(self.default_preset.as_str());
        let (name, preset) = self
            .presets
            .get_key_value(name)
            .ok_or_else(|| LlmError::InvalidPreset(name.to_string()))?;
        Ok((name.as_str(), preset))
    }

    /// Get provider config by provider name
    pub fn get_provider_config(&self, provider: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_preset: default_preset(),
            presets: default_presets(),
            providers: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_preset, "github-gpt-4o");

        let preset = config.get_preset("github-gpt-4o").unwrap();
        assert_eq!(preset.provider, "github-models");
        assert_eq!(preset.model, "gpt-4o");
    }

    #[test]
    fn test_invalid_preset() {
        let config = Config::default();
        assert!(matches!(
            config.get_preset("nonexistent"),
            Err(LlmError::InvalidPreset(name)) if name == "nonexistent"
        ));
    }

    #[test]
    fn test_resolve_preset() {
        let mut config = Config::default();
        config.presets.insert(
            "router-mini".to_string(),
            ModelPreset {
                provider: "openrouter".to_string(),
                model: "openai/gpt-4o-mini".to_string(),
            },
        );

        let (name, preset) = config.resolve_preset(None).unwrap();
        assert_eq!(name, "github-gpt-4o");
        assert_eq!(preset.model, "gpt-4o");

        let (name, preset) = config.resolve_preset(Some("router-mini")).unwrap();
        assert_eq!(name, "router-mini");
        assert_eq!(preset.provider, "openrouter");

        assert!(config.resolve_preset(Some("missing")).is_err());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.default_preset, "github-gpt-4o");
        assert!(config.presets.contains_key("github-gpt-4o"));
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/llm.toml");

        let mut config = Config::default();
        config.providers.insert(
            "github-models".to_string(),
            ProviderConfig {
                api_key: Some("ghp_test".to_string()),
                base_url: None,
            },
        );
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        let provider = loaded.get_provider_config("github-models").unwrap();
        assert_eq!(provider.api_key.as_deref(), Some("ghp_test"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.default_preset, "github-gpt-4o");
    }

    #[test]
    fn test_config_path() {
        let path = Config::config_path().unwrap();
        assert!(path.ends_with(".config/cli-programs/llm.toml"));
    }
}
