use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Base URL of the remote Makeup API, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Directory holding the per-device storage files.
    pub data_dir: PathBuf,
    /// Artificial latency of the simulated login. Registration adds 200 ms.
    pub auth_delay_ms: u64,
}
