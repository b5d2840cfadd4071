//! LLM client wrapper for research-brief
//!
//! Provides a simplified interface to the llm-client crate.

use anyhow::{Context, Result};
use llm_client::{Config, LlmProvider, LlmRequest, get_provider};

/// Wrapper around the configured completion provider
pub struct LlmClient {
    provider: Box<dyn LlmProvider>,
}

impl LlmClient {
    /// Create a client from `llm.toml`
    ///
    /// If preset_name is None, uses the default preset from config.
    pub fn new(preset_name: Option<&str>) -> Result<Self> {
        let config = Config::load().context("Failed to load LLM configuration")?;
        let (preset_name, preset) = config
            .resolve_preset(preset_name)
            .context("Unknown model preset")?;

        let provider_config = config.get_provider_config(&preset.provider);
        let provider = get_provider(preset, provider_config).context(format!(
            "Failed to initialize provider '{}' for preset '{}'",
            preset.provider, preset_name
        ))?;

        log::debug!(
            "Using LLM provider: {} (model: {})",
            provider.name(),
            preset.model
        );

        Ok(Self { provider })
    }

    /// Wrap an already-built provider
    pub fn from_provider(provider: Box<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Send a completion request to the LLM
    pub async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        log::debug!("Sending request to {}", self.provider.name());

        let response = self
            .provider
            .complete(LlmRequest::with_system(system_prompt, prompt))
            .await
            .context("LLM request failed")?;

        if let Some(usage) = &response.usage {
            log::debug!(
                "Tokens: {} in, {} out",
                usage.input_tokens,
                usage.output_tokens
            );
        }

        Ok(response.content)
    }
}
