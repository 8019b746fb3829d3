use serde::{Deserialize, Serialize};

/// Base URL shipped in the default preferences. Treated as "not configured".
pub const PLACEHOLDER_BASE_URL: &str = "http://houndserver:port";

/// Upper bound for the per-request timeout.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Hound server
    pub hound_base_url: String,
    /// Server bind address for the preview host
    pub bind_addr: String,
    /// Trailing debounce window for keystroke searches
    pub debounce_ms: u64,
    /// Size of the `rng=0:N` result window requested from Hound
    pub max_results: usize,
    /// Branch used when building "open in browser" links
    pub default_branch: String,
    /// Per-request timeout in seconds (capped at 120)
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hound_base_url: PLACEHOLDER_BASE_URL.to_string(),
            bind_addr: "127.0.0.1:9010".to_string(),
            debounce_ms: 200,
            max_results: 5,
            default_branch: "master".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("HOUND_BASE_URL") {
            config.hound_base_url = url;
        }
        if let Ok(addr) = std::env::var("HOUND_PREVIEW_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(val) = std::env::var("HOUND_DEBOUNCE_MS") {
            if let Ok(v) = val.parse() {
                config.debounce_ms = v;
            }
        }
        if let Ok(val) = std::env::var("HOUND_MAX_RESULTS") {
            if let Ok(v) = val.parse() {
                config.max_results = v;
            }
        }
        if let Ok(branch) = std::env::var("HOUND_DEFAULT_BRANCH") {
            config.default_branch = branch;
        }
        if let Ok(val) = std::env::var("HOUND_REQUEST_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.request_timeout_secs = v.min(MAX_REQUEST_TIMEOUT_SECS);
            }
        }

        config
    }

    /// The usable backend URL, or `None` when the URL is blank or still the placeholder.
    pub fn backend_url(&self) -> Option<&str> {
        let url = self.hound_base_url.trim();
        if url.is_empty() || url == PLACEHOLDER_BASE_URL {
            return None;
        }
        Some(url.trim_end_matches('/'))
    }

    pub fn is_configured(&self) -> bool {
        self.backend_url().is_some()
    }

    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs.min(MAX_REQUEST_TIMEOUT_SECS))
    }
}

/// Partial update accepted by `PUT /api/config`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigUpdate {
    pub hound_base_url: Option<String>,
    pub debounce_ms: Option<u64>,
    pub max_results: Option<usize>,
    pub default_branch: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigUpdate {
    /// Apply the set fields on top of `config`. `bind_addr` is fixed for the process lifetime.
    pub fn apply(self, config: &mut Config) {
        if let Some(url) = self.hound_base_url {
            config.hound_base_url = url;
        }
        if let Some(ms) = self.debounce_ms {
            config.debounce_ms = ms;
        }
        if let Some(n) = self.max_results {
            config.max_results = n;
        }
        if let Some(branch) = self.default_branch {
            config.default_branch = branch;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout_secs = secs.min(MAX_REQUEST_TIMEOUT_SECS);
        }
    }
}
