#![allow(dead_code)] // not every stub is used by every test binary

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use guard_protocol::{ChatMessage, GuardVerdict};
use guard_proxy::backend::BackendChat;
use guard_proxy::cli::Args;
use guard_proxy::config::Config;
use guard_proxy::decision;
use guard_proxy::error::ChatError;
use guard_proxy::guard::Scanner;
use guard_proxy::policy::EnforceSide;
use serde_json::{json, Value};

/// Scanner stub that replays a canned guard payload when the scanned text
/// contains a trigger substring, and a clean payload otherwise. Verdicts go
/// through the real normalizer.
pub struct StubScanner {
    triggers: Vec<(String, Value)>,
}

impl StubScanner {
    pub fn allow_all() -> Self {
        Self {
            triggers: Vec::new(),
        }
    }

    pub fn flagging(trigger: &str, payload: Value) -> Self {
        Self {
            triggers: vec![(trigger.to_string(), payload)],
        }
    }
}

#[async_trait]
impl Scanner for StubScanner {
    async fn scan(&self, text: &str) -> Option<GuardVerdict> {
        let payload = self
            .triggers
            .iter()
            .find(|(trigger, _)| text.contains(trigger.as_str()))
            .map(|(_, payload)| payload.clone())
            .unwrap_or_else(|| json!({"action": "allow"}));
        Some(GuardVerdict::clean(decision::normalize(&payload), payload))
    }
}

/// Scanner stub standing in for an unreachable guard service.
pub struct UnreachableScanner;

#[async_trait]
impl Scanner for UnreachableScanner {
    async fn scan(&self, _text: &str) -> Option<GuardVerdict> {
        Some(GuardVerdict::transport_error("connection refused"))
    }
}

/// Backend stub with a fixed outcome and a call counter.
pub struct StubBackend {
    reply: Result<String, String>,
    pub calls: AtomicUsize,
}

impl StubBackend {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendChat for StubBackend {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .map_err(ChatError::BackendUnavailable)
    }
}

pub fn test_config(enforce_side: EnforceSide) -> Config {
    Config::from_args(Args {
        listen_addr: "127.0.0.1:8080".to_string(),
        backend_url: "http://127.0.0.1:11434".to_string(),
        model: "llama3.1:8b".to_string(),
        guard_url: "https://guard.example.com/scan".to_string(),
        guard_api_key: "test-key".to_string(),
        guard_enabled: true,
        guard_detailed: true,
        enforce_side,
    })
    .expect("config")
}

/// A guard payload shaped like a harmful-content hit from the service.
pub fn harmful_payload() -> Value {
    json!({
        "action": "allow",
        "harmful_content": [{"category": "violence", "content_violation": true}],
        "reason": "harmful content detected",
    })
}
