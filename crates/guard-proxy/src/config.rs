use std::net::SocketAddr;

use anyhow::Context;

use crate::cli::Args;
use crate::policy::EnforceSide;

/// Process-wide settings, validated once at startup and immutable after.
/// Components receive this explicitly; nothing reads the environment later.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub backend_url: String,
    pub model: String,
    pub guard_url: String,
    pub guard_api_key: String,
    pub guard_enabled: bool,
    pub guard_detailed: bool,
    pub enforce_side: EnforceSide,
}

impl Config {
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let listen_addr: SocketAddr = args
            .listen_addr
            .parse()
            .with_context(|| format!("invalid listen addr {}", args.listen_addr))?;
        if args.guard_api_key.trim().is_empty() {
            anyhow::bail!("GUARD_API_KEY must be set");
        }
        if args.model.trim().is_empty() {
            anyhow::bail!("OLLAMA_MODEL must not be empty");
        }
        validate_url("backend url", &args.backend_url)?;
        validate_url("guard url", &args.guard_url)?;
        Ok(Self {
            listen_addr,
            backend_url: args.backend_url.trim_end_matches('/').to_string(),
            model: args.model,
            guard_url: args.guard_url,
            guard_api_key: args.guard_api_key,
            guard_enabled: args.guard_enabled,
            guard_detailed: args.guard_detailed,
            enforce_side: args.enforce_side,
        })
    }
}

fn validate_url(label: &str, url: &str) -> anyhow::Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        anyhow::bail!("{} must be http(s), got {:?}", label, url)
    }
}
