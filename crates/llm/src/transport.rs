use std::future::Future;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RemoteConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response format")]
    UnexpectedEnvelope { body: String },
}

/// Generated text plus the raw response body it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub content: String,
    pub raw_body: String,
}

/// Abstraction over a chat-completion service: one user turn in, one reply out.
pub trait ChatTransport: Send + Sync {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<ChatReply, TransportError>> + Send;
}

// ── Mock transport (always available, used for tests) ─────────────────────────

/// Replies with a preset result and records every prompt it receives.
pub struct MockTransport {
    reply: Result<ChatReply, TransportError>,
    prompts: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Reply with `content`, wrapped in a minimal chat-completion body.
    pub fn replying(content: impl Into<String>) -> Self {
        let content = content.into();
        let raw_body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string();
        Self::with_result(Ok(ChatReply { content, raw_body }))
    }

    pub fn failing(error: TransportError) -> Self {
        Self::with_result(Err(error))
    }

    pub fn with_result(reply: Result<ChatReply, TransportError>) -> Self {
        Self { reply, prompts: Mutex::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl ChatTransport for MockTransport {
    async fn complete(&self, prompt: &str) -> Result<ChatReply, TransportError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.reply.clone()
    }
}

// ── HTTP transport (OpenAI-compatible chat completions) ───────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Read `choices[0].message.content` from a chat-completion body.
pub fn parse_envelope(body: &str) -> Option<String> {
    let response: ChatResponse = serde_json::from_str(body).ok()?;
    response.choices.into_iter().next()?.message.content
}

pub struct HttpTransport {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl HttpTransport {
    pub fn new(config: RemoteConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }
}

impl ChatTransport for HttpTransport {
    async fn complete(&self, prompt: &str) -> Result<ChatReply, TransportError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![Message { role: "user", content: prompt }],
        };

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), body });
        }

        match parse_envelope(&body) {
            Some(content) => Ok(ChatReply { content, raw_body: body }),
            None => Err(TransportError::UnexpectedEnvelope { body }),
        }
    }
}
