use std::time::Duration;

use async_trait::async_trait;
use guard_protocol::ChatMessage;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::ChatError;

/// Inference calls can legitimately take minutes on local hardware, but an
/// unresponsive backend must not hang the caller forever.
pub const BACKEND_TIMEOUT: Duration = Duration::from_secs(120);

/// One full completion from the inference backend for a conversation.
#[async_trait]
pub trait BackendChat: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError>;
}

pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.backend_url.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl BackendChat for OllamaClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .http
            .post(&url)
            .timeout(BACKEND_TIMEOUT)
            .json(&json!({
                "model": self.model,
                "messages": messages,
                "stream": false,
            }))
            .send()
            .await
            .map_err(|err| ChatError::BackendUnavailable(format!("not reachable: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::BackendUnavailable(format!(
                "status {status}: {body}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| ChatError::BackendUnavailable(format!("bad response body: {err}")))?;
        Ok(payload
            .pointer("/message/content")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string())
    }
}
