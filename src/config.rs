use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Deserialize, Clone)]
pub struct Config {
    /// Shared secret expected in the `Authorization: Bearer` header
    pub api_key: String,

    /// Number of items returned by the synthetic `some_model` path
    #[serde(default = "default_k_recs")]
    pub k_recs: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the model server backing `userknn`
    #[serde(default)]
    pub userknn_url: Option<String>,

    /// Base URL of the model server backing `als_ann`
    #[serde(default)]
    pub als_ann_url: Option<String>,

    /// Base URL of the model server backing `lfm_ann`
    #[serde(default)]
    pub lfm_ann_url: Option<String>,

    /// JSON file with precomputed recommendations for the offline models
    #[serde(default)]
    pub offline_recs_path: Option<PathBuf>,

    /// Timeout for a single model server request, in seconds
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Emit logs as JSON lines instead of the compact format
    #[serde(default)]
    pub log_json: bool,
}

fn default_k_recs() -> usize {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_provider_timeout_secs() -> u64 {
    5
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Request-time settings shared by every handler
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.api_key.clone(), self.k_recs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("k_recs", &self.k_recs)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("userknn_url", &self.userknn_url)
            .field("als_ann_url", &self.als_ann_url)
            .field("lfm_ann_url", &self.lfm_ann_url)
            .field("offline_recs_path", &self.offline_recs_path)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("log_json", &self.log_json)
            .finish()
    }
}

/// Immutable per-process settings read by the recommendation handler
#[derive(Clone)]
pub struct ServerConfig {
    token: String,
    pub k_recs: usize,
}

impl ServerConfig {
    pub fn new(token: impl Into<String>, k_recs: usize) -> Self {
        Self {
            token: token.into(),
            k_recs,
        }
    }

    /// Exact byte comparison of a presented credential against the secret
    pub fn token_matches(&self, presented: &str) -> bool {
        self.token.as_bytes() == presented.as_bytes()
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("token", &"<redacted>")
            .field("k_recs", &self.k_recs)
            .finish()
    }
}
