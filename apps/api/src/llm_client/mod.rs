//! LLM Client: the single point of entry for all model calls in the agent suite.
//!
//! ARCHITECTURAL RULE: No other module may talk to the model backend directly.
//! Agents build prompts and go through `StructuredInvoker`.
//!
//! Backend: a local Ollama server (`/api/chat`, non-streaming, `format` = JSON Schema).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;
pub mod structured;

pub use structured::{Invocation, InvocationFailure, StructuredInvoker, StructuredResponse};

/// Model used when `OLLAMA_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemma3";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// The opaque model boundary: `{model, message content, target JSON schema}` in,
/// raw message content (expected to be JSON) out.
///
/// Carried in `StructuredInvoker` as `Arc<dyn ModelBackend>` so tests can swap in doubles.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn chat(&self, model: &str, content: &str, format: &Value) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    format: &'a Value,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct OllamaChatResponse {
    pub message: OllamaReplyMessage,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct OllamaReplyMessage {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// Ollama chat backend. No auth; one HTTP request per call, no retries.
#[derive(Clone)]
pub struct OllamaBackend {
    client: Client,
    base_url: String,
}

impl OllamaBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ModelBackend for OllamaBackend {
    async fn chat(&self, model: &str, content: &str, format: &Value) -> Result<String, LlmError> {
        let request_body = OllamaChatRequest {
            model,
            messages: vec![OllamaMessage {
                role: "user",
                content,
            }],
            format,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OllamaError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let reply: OllamaChatResponse = serde_json::from_str(&body)?;

        debug!(
            model,
            prompt_tokens = reply.prompt_eval_count.unwrap_or_default(),
            output_tokens = reply.eval_count.unwrap_or_default(),
            "Ollama chat succeeded"
        );

        if reply.message.content.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(reply.message.content)
    }
}

/// Strips trailing slashes and an OpenAI-compat `/v1` suffix from the Ollama host.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    url.strip_suffix("/v1").unwrap_or(url).to_string()
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped)
}

/// Backend doubles shared by the unit tests of every module that goes through the invoker.
#[cfg(test)]
pub mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Replies with a fixed body (or a fixed failure) and records every prompt it sees.
    pub struct ScriptedBackend {
        reply: Result<String, u16>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        formats: Mutex<Vec<Value>>,
    }

    impl ScriptedBackend {
        pub fn replying(body: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(body.into()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                formats: Mutex::new(Vec::new()),
            })
        }

        /// Every call fails with an API error carrying `status`.
        pub fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                formats: Mutex::new(Vec::new()),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.prompts.lock().unwrap().last().cloned()
        }

        pub fn last_format(&self) -> Option<Value> {
            self.formats.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl ModelBackend for ScriptedBackend {
        async fn chat(
            &self,
            _model: &str,
            content: &str,
            format: &Value,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(content.to_string());
            self.formats.lock().unwrap().push(format.clone());
            match &self.reply {
                Ok(body) => Ok(body.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "backend unavailable".to_string(),
                }),
            }
        }
    }

    pub fn invoker(backend: Arc<ScriptedBackend>) -> StructuredInvoker {
        StructuredInvoker::new(backend, DEFAULT_MODEL)
    }
}
