use clap::{ArgAction, Parser};

use crate::policy::EnforceSide;

#[derive(Parser, Debug)]
#[command(
    name = "guard-proxy",
    version,
    about = "Chat proxy that screens prompts and replies through an AI guard service"
)]
pub struct Args {
    #[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:8080")]
    pub listen_addr: String,
    #[arg(long, env = "OLLAMA_BASE_URL", default_value = "http://127.0.0.1:11434")]
    pub backend_url: String,
    #[arg(long, env = "OLLAMA_MODEL", default_value = "llama3.1:8b")]
    pub model: String,
    #[arg(
        long,
        env = "GUARD_URL",
        default_value = "https://api.xdr.trendmicro.com/beta/aiSecurity/guard"
    )]
    pub guard_url: String,
    #[arg(long, env = "GUARD_API_KEY", hide_env_values = true)]
    pub guard_api_key: String,
    #[arg(long, env = "GUARD_ENABLED", action = ArgAction::Set, default_value_t = false)]
    pub guard_enabled: bool,
    #[arg(long, env = "GUARD_DETAILED", action = ArgAction::Set, default_value_t = true)]
    pub guard_detailed: bool,
    #[arg(long, env = "ENFORCE_SIDE", value_enum, default_value_t = EnforceSide::Both)]
    pub enforce_side: EnforceSide,
}
