//! Chat-completion client for research-brief
//!
//! Provides one interface over OpenAI-compatible chat completion endpoints:
//! - GitHub Models (default, authenticated with a personal access token)
//! - OpenRouter
//!
//! plus a scripted [`MockProvider`] for tests.

pub mod config;
pub mod error;
pub mod provider;
pub mod providers;

pub use config::{Config, ModelPreset, ProviderConfig};
pub use error::{LlmError, Result};
pub use provider::{LlmProvider, LlmRequest, LlmResponse, TokenUsage};
pub use providers::{MockProvider, ProviderKind, get_provider};
