//! API Config

use std::time::Duration;

use clap::Args;

/// Backend API settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the REST API, including the `/api` prefix
    #[arg(long = "api-base-url", env = "POS_API_BASE_URL", default_value = "http://127.0.0.1:5000/api")]
    pub base_url: String,

    /// Timeout applied to every request, in seconds
    #[arg(long, env = "POS_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Request timeout as a duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
