//! LLM provider implementations

pub mod mock;
mod openai_compatible;

pub use mock::MockProvider;
pub use openai_compatible::OpenAICompatibleProvider;

use std::str::FromStr;

use crate::config::{ModelPreset, ProviderConfig};
use crate::error::{LlmError, Result};
use crate::provider::LlmProvider;

/// Supported provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    GithubModels,
    OpenRouter,
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "github-models" | "github_models" | "github" => Ok(Self::GithubModels),
            "openrouter" => Ok(Self::OpenRouter),
            _ => Err(LlmError::ConfigError(format!("Unknown provider: {}", s))),
        }
    }
}

impl ProviderKind {
    /// Environment variable holding this provider's API token
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::GithubModels => "PAT_TOKEN",
            Self::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GithubModels => "GitHub Models",
            Self::OpenRouter => "OpenRouter",
        }
    }
}

/// Create a provider instance from a preset and optional config
pub fn get_provider(
    preset: &ModelPreset,
    provider_config: Option<&ProviderConfig>,
) -> Result<Box<dyn LlmProvider>> {
    let kind: ProviderKind = preset.provider.parse()?;
    let api_key = get_api_key(provider_config, kind)?;
    let base_url = provider_config.and_then(|c| c.base_url.as_deref());

    let provider = match kind {
        ProviderKind::GithubModels => {
            OpenAICompatibleProvider::github_models(&preset.model, api_key, base_url)
        }
        ProviderKind::OpenRouter => {
            OpenAICompatibleProvider::openrouter(&preset.model, api_key, base_url)
        }
    };

    Ok(Box::new(provider))
}

/// Get API key from config or environment variable
fn get_api_key(config: Option<&ProviderConfig>, kind: ProviderKind) -> Result<String> {
    // Check config first
    if let Some(key) = config.and_then(|c| c.api_key.clone()) {
        return Ok(key);
    }

    std::env::var(kind.env_var()).map_err(|_| LlmError::MissingApiKey {
        provider: kind.display_name().to_string(),
        env_var: kind.env_var().to_string(),
    })
}
