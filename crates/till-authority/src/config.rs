//! Connection settings for the inventory authority.

use std::time::Duration;

/// Default API root of a locally running authority.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the authority lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityConfig {
    /// API root, e.g. `http://localhost:5000/api`. A trailing slash is ignored.
    pub base_url: String,

    /// Whole-request timeout (connect + response).
    pub request_timeout: Duration,
}

impl AuthorityConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        AuthorityConfig {
            base_url: base_url.into(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Joins the base URL and a path with exactly one slash.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        AuthorityConfig::new(DEFAULT_BASE_URL)
    }
}
