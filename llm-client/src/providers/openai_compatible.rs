//! OpenAI-compatible chat completions provider
//!
//! Serves every endpoint that speaks the `/chat/completions` wire format:
//! - GitHub Models (Azure inference endpoint)
//! - OpenRouter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{LlmError, Result};
use crate::provider::{LlmProvider, LlmRequest, LlmResponse, TokenUsage};

const GITHUB_MODELS_URL: &str = "https://models.inference.ai.azure.com";
const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";

/// Provider for OpenAI-compatible APIs
pub struct OpenAICompatibleProvider {
    model: String,
    base_url: String,
    api_key: String,
    name: &'static str,
    client: Client,
}

impl OpenAICompatibleProvider {
    pub fn new(model: &str, base_url: &str, api_key: String, name: &'static str) -> Self {
        Self {
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            name,
            client: Client::new(),
        }
    }

    /// Create a GitHub Models provider, optionally pointed at another endpoint
    pub fn github_models(model: &str, api_key: String, base_url: Option<&str>) -> Self {
        Self::new(
            model,
            base_url.unwrap_or(GITHUB_MODELS_URL),
            api_key,
            "GitHub Models",
        )
    }

    /// Create an OpenRouter provider
    pub fn openrouter(model: &str, api_key: String, base_url: Option<&str>) -> Self {
        Self::new(
            model,
            base_url.unwrap_or(OPENROUTER_URL),
            api_key,
            "OpenRouter",
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

// OpenAI API request/response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

fn build_messages(request: &LlmRequest) -> Vec<Message<'_>> {
    let mut messages = Vec::with_capacity(2);

    if let Some(system) = &request.system_prompt {
        messages.push(Message {
            role: "system",
            content: system,
        });
    }

    messages.push(Message {
        role: "user",
        content: &request.prompt,
    });

    messages
}

/// First non-blank choice content, or `EmptyResponse`
fn extract_content(response: ChatCompletionResponse, model: &str) -> Result<(String, Option<Usage>)> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| LlmError::EmptyResponse {
            model: model.to_string(),
        })?;

    Ok((content, response.usage))
}

#[async_trait]
impl LlmProvider for OpenAICompatibleProvider {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages: build_messages(&request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        log::debug!("POST {} (model {})", self.completions_url(), self.model);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| LlmError::ApiError {
                message: format!("Request failed: {}", e),
                status_code: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let error_text = response.text().await.unwrap_or_default();
            let message =
                if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                    error_response.error.message
                } else {
                    error_text
                };

            return Err(match status.as_u16() {
                429 => LlmError::RateLimited { retry_after },
                503 => LlmError::ServerOverloaded { message },
                code => LlmError::ApiError {
                    message,
                    status_code: Some(code),
                },
            });
        }

        let chat_response: ChatCompletionResponse =
            response.json().await.map_err(|e| LlmError::ApiError {
                message: format!("Failed to parse response: {}", e),
                status_code: None,
            })?;

        let (content, usage) = extract_content(chat_response, &self.model)?;

        Ok(LlmResponse {
            content,
            model: self.model.clone(),
            usage: usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        })
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
