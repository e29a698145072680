use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use prdgen_core::config::Config;

/// PRD service configuration loaded from environment variables.
#[derive(Clone, Deserialize)]
pub struct PrdConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3120). Env var: `PRDS_PORT`.
    #[serde(default = "default_port")]
    pub prds_port: u16,
    /// Prompt template with `{{PROJECT_NAME}}`-style placeholders. Env var: `PROMPT_TEMPLATE_PATH`.
    #[serde(default = "default_template_path")]
    pub prompt_template_path: PathBuf,
    /// Anthropic API key. Generation fails with a configuration error when unset.
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default = "default_api_url")]
    pub anthropic_api_url: String,
    #[serde(default = "default_model")]
    pub anthropic_model: String,
    #[serde(default = "default_max_tokens")]
    pub anthropic_max_tokens: u32,
    /// Upper bound for one completion request (default 60).
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,
    /// Upper bound for one store operation (default 5).
    #[serde(default = "default_store_timeout_secs")]
    pub store_timeout_secs: u64,
    /// Svix signing secret (`whsec_…`) for identity-provider webhooks.
    #[serde(default)]
    pub identity_webhook_secret: Option<String>,
}

impl Config for PrdConfig {}

impl PrdConfig {
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// Whole-request budget: one completion plus one store round, with slack.
    pub fn request_timeout(&self) -> Duration {
        self.generation_timeout() + self.store_timeout() + Duration::from_secs(5)
    }
}

fn default_port() -> u16 {
    3120
}

fn default_template_path() -> PathBuf {
    PathBuf::from("prompts/prd.txt")
}

fn default_api_url() -> String {
    "https://api.anthropic.com/v1/messages".to_owned()
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_owned()
}

fn default_max_tokens() -> u32 {
    8192
}

fn default_generation_timeout_secs() -> u64 {
    60
}

fn default_store_timeout_secs() -> u64 {
    5
}
