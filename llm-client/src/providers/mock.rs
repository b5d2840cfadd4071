//! Scripted provider for tests
//!
//! Replays canned completions (or errors) in order and records every request
//! it receives so callers can assert on the prompts they built. Clones share
//! the same script and request log, so a test can keep one handle after
//! boxing another into a client.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::{LlmError, Result};
use crate::provider::{LlmProvider, LlmRequest, LlmResponse};

type Reply = std::result::Result<String, String>;

#[derive(Clone)]
pub struct MockProvider {
    /// Remaining scripted replies; the last one repeats once the queue drains
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<LlmRequest>>>,
}

impl MockProvider {
    /// Create a provider that returns the given replies in order
    pub fn scripted(replies: Vec<Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a provider that always returns `response`
    pub fn always_succeeds(response: &str) -> Self {
        Self::scripted(vec![Ok(response.to_string())])
    }

    /// Create a provider that always fails with an API error carrying `message`
    pub fn always_fails(message: &str) -> Self {
        Self::scripted(vec![Err(message.to_string())])
    }

    /// Number of times complete() was called
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<LlmRequest> {
        self.requests.lock().ok().and_then(|r| r.last().cloned())
    }

    fn next_reply(&self) -> Reply {
        let mut replies = self
            .replies
            .lock()
            .map_err(|_| "mock reply queue poisoned".to_string())?;

        match replies.len() {
            0 => Ok(String::new()),
            1 => replies[0].clone(),
            _ => replies.pop_front().unwrap_or_else(|| Ok(String::new())),
        }
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let content = self.next_reply().map_err(|message| LlmError::ApiError {
            message,
            status_code: Some(500),
        })?;

        if content.trim().is_empty() {
            return Err(LlmError::EmptyResponse {
                model: "mock-model".to_string(),
            });
        }

        Ok(LlmResponse {
            content,
            model: "mock-model".to_string(),
            usage: None,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
