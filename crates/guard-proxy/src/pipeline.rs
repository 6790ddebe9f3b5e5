//! The guard-decision pipeline: scan the user's prompt, enforce, forward to
//! the backend, scan the reply, enforce again. Strictly sequential per
//! request; each step depends on the previous one's output.

use std::sync::Arc;

use guard_protocol::{ChatMessage, ChatResponse, GuardVerdict, Role, Side};

use crate::backend::BackendChat;
use crate::error::ChatError;
use crate::guard::Scanner;
use crate::policy::{self, EnforceSide};

pub struct ChatPipeline {
    guard: Arc<dyn Scanner>,
    backend: Arc<dyn BackendChat>,
    enforce_side: EnforceSide,
}

impl ChatPipeline {
    pub fn new(
        guard: Arc<dyn Scanner>,
        backend: Arc<dyn BackendChat>,
        enforce_side: EnforceSide,
    ) -> Self {
        Self {
            guard,
            backend,
            enforce_side,
        }
    }

    pub async fn run(&self, messages: &[ChatMessage]) -> Result<ChatResponse, ChatError> {
        if messages.is_empty() {
            return Err(ChatError::InvalidInput(
                "messages must be a non-empty list".to_string(),
            ));
        }
        let last_user = messages
            .iter()
            .rev()
            .find(|message| message.role == Role::User && !message.content.is_empty())
            .ok_or_else(|| {
                ChatError::InvalidInput("conversation has no user message".to_string())
            })?;

        let user_verdict = self.guard.scan(&last_user.content).await;
        if self.blocks(&user_verdict, Side::User) {
            tracing::info!(side = "user", "exchange blocked before backend call");
            return Ok(ChatResponse::refused(Side::User, user_verdict, None));
        }

        let reply = self.backend.complete(messages).await?;

        let assistant_verdict = self.guard.scan(&reply).await;
        if self.blocks(&assistant_verdict, Side::Assistant) {
            // The real reply never leaves the pipeline.
            tracing::info!(side = "assistant", "backend reply withheld");
            return Ok(ChatResponse::refused(
                Side::Assistant,
                user_verdict,
                assistant_verdict,
            ));
        }

        Ok(ChatResponse::answered(reply, user_verdict, assistant_verdict))
    }

    fn blocks(&self, verdict: &Option<GuardVerdict>, side: Side) -> bool {
        verdict
            .as_ref()
            .map_or(false, |v| policy::should_block(v.decision, side, self.enforce_side))
    }
}
