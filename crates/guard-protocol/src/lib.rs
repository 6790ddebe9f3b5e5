use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reply returned in place of content that enforcement refused to deliver.
pub const BLOCKED_REPLY: &str = "[Blocked by AI Guard]";

/// Decision applied when the guard service cannot be reached or answers with
/// a non-success status. Availability failures of the safety service must
/// never silently become `allow`.
pub const FAIL_SAFE_DECISION: Decision = Decision::Review;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Block,
    Review,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    User,
    Assistant,
}

/// Outcome of a single guard scan. Request-local; never persisted.
///
/// On the `ok` path the guard service's full payload is flattened into the
/// serialized verdict so callers see the raw evidence next to the normalized
/// decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuardVerdict {
    pub status: VerdictStatus,
    pub decision: Decision,
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub raw: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GuardVerdict {
    pub fn clean(decision: Decision, payload: Value) -> Self {
        Self {
            status: VerdictStatus::Ok,
            decision,
            raw: payload.as_object().cloned().unwrap_or_default(),
            http_status: None,
            error: None,
        }
    }

    pub fn upstream_error(http_status: u16, body: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Error,
            decision: FAIL_SAFE_DECISION,
            raw: Map::new(),
            http_status: Some(http_status),
            error: Some(body.into()),
        }
    }

    pub fn transport_error(message: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Error,
            decision: FAIL_SAFE_DECISION,
            raw: Map::new(),
            http_status: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GuardReport {
    pub user: Option<GuardVerdict>,
    pub assistant: Option<GuardVerdict>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub reply: String,
    pub guard: GuardReport,
    pub blocked: Option<Side>,
}

impl ChatResponse {
    /// Exchange completed; the backend's real reply goes to the caller.
    pub fn answered(
        reply: impl Into<String>,
        user: Option<GuardVerdict>,
        assistant: Option<GuardVerdict>,
    ) -> Self {
        Self {
            reply: reply.into(),
            guard: GuardReport { user, assistant },
            blocked: None,
        }
    }

    /// Enforcement halted the exchange on `side`; the caller gets a labeled
    /// placeholder instead of real content.
    pub fn refused(
        side: Side,
        user: Option<GuardVerdict>,
        assistant: Option<GuardVerdict>,
    ) -> Self {
        Self {
            reply: BLOCKED_REPLY.to_string(),
            guard: GuardReport { user, assistant },
            blocked: Some(side),
        }
    }
}
