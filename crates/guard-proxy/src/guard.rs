use std::time::Duration;

use async_trait::async_trait;
use guard_protocol::GuardVerdict;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;
use crate::decision;

/// Hard ceiling on a single guard call. A timed-out call is a transport
/// failure and yields the fail-safe verdict.
pub const GUARD_TIMEOUT: Duration = Duration::from_secs(30);

/// Safety classification of a text blob. `None` means no verdict was
/// produced at all (empty text or guarding disabled), which is distinct
/// from an `allow` verdict.
#[async_trait]
pub trait Scanner: Send + Sync {
    async fn scan(&self, text: &str) -> Option<GuardVerdict>;
}

pub struct GuardClient {
    http: Client,
    url: String,
    api_key: String,
    enabled: bool,
    detailed: bool,
}

impl GuardClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            url: config.guard_url.clone(),
            api_key: config.guard_api_key.clone(),
            enabled: config.guard_enabled,
            detailed: config.guard_detailed,
        }
    }
}

#[async_trait]
impl Scanner for GuardClient {
    /// Exactly one outbound call per invocation; no retries. A struggling
    /// guard service must not be hit with follow-up load from here.
    async fn scan(&self, text: &str) -> Option<GuardVerdict> {
        if !self.enabled || text.is_empty() {
            return None;
        }
        let detailed = if self.detailed { "true" } else { "false" };
        let result = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .query(&[("detailedResponse", detailed)])
            .timeout(GUARD_TIMEOUT)
            .json(&json!({ "guard": text }))
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "guard request failed; falling back to review");
                return Some(GuardVerdict::transport_error(err.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "guard returned non-success; falling back to review");
            return Some(GuardVerdict::upstream_error(status.as_u16(), body));
        }

        match response.json::<Value>().await {
            Ok(payload) => {
                let decision = decision::normalize(&payload);
                tracing::debug!(decision = ?decision, "guard verdict");
                Some(GuardVerdict::clean(decision, payload))
            }
            Err(err) => {
                tracing::warn!(error = %err, "guard payload unreadable; falling back to review");
                Some(GuardVerdict::transport_error(err.to_string()))
            }
        }
    }
}
