use std::sync::Arc;

use crate::backend::OllamaClient;
use crate::config::Config;
use crate::guard::GuardClient;
use crate::pipeline::ChatPipeline;

/// Immutable per-process state shared by all requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Arc<ChatPipeline>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let guard = Arc::new(GuardClient::new(&config));
        let backend = Arc::new(OllamaClient::new(&config));
        let pipeline = Arc::new(ChatPipeline::new(guard, backend, config.enforce_side));
        Self {
            config: Arc::new(config),
            pipeline,
        }
    }

    /// Same state with an injected pipeline; used by tests to stub the
    /// guard and backend clients.
    pub fn with_pipeline(config: Config, pipeline: ChatPipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
        }
    }
}
