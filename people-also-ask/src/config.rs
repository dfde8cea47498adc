//! Configuration types for fetching, extraction and exploration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{PaaError, Result};

/// Configuration for the HTTP fetch collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Search URL template; `{domain}` is replaced by the search domain.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value sent as the `client` and `sourceid` query parameters.
    #[serde(default = "default_browser")]
    pub browser: String,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// Additional headers to include.
    #[serde(default)]
    pub headers: std::collections::HashMap<String, String>,
}

fn default_base_url() -> String {
    "https://www.google.{domain}/search".to_string()
}

fn default_browser() -> String {
    "chrome".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0 Safari/537.36"
        .to_string()
}

fn default_timeout() -> f64 {
    30.0
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            browser: default_browser(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            headers: std::collections::HashMap::new(),
        }
    }
}

impl FetchConfig {
    /// Creates a new fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL template.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Gets timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }

    /// Builds the search URL for `query` on `domain`.
    pub fn search_url(&self, query: &str, domain: &str) -> Result<url::Url> {
        let base = self.base_url.replace("{domain}", domain);
        url::Url::parse_with_params(
            &base,
            &[
                ("client", self.browser.as_str()),
                ("q", query),
                ("sourceid", self.browser.as_str()),
                ("ie", "UTF-8"),
                ("oe", "UTF-8"),
            ],
        )
        .map_err(|e| PaaError::Config(format!("invalid search url '{base}': {e}")))
    }
}

/// Configuration for answer extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Hosts treated as video hosts; subdomains match too.
    #[serde(default = "default_video_hosts")]
    pub video_hosts: Vec<String>,
}

fn default_video_hosts() -> Vec<String> {
    vec!["youtube.com".to_string(), "youtu.be".to_string()]
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            video_hosts: default_video_hosts(),
        }
    }
}

impl ExtractionConfig {
    /// Creates a new extraction configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a video host.
    #[must_use]
    pub fn with_video_host(mut self, host: impl Into<String>) -> Self {
        self.video_hosts.push(host.into());
        self
    }

    /// Whether `host` is one of the configured video hosts or a subdomain of one.
    #[must_use]
    pub fn is_video_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.video_hosts.iter().any(|known| {
            host == *known
                || host
                    .strip_suffix(known.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

/// What an explorer does when a recognised answer cannot be extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionErrorPolicy {
    /// Yield the error and stop.
    #[default]
    Abort,
    /// Log the error, keep the question's related questions and continue.
    Skip,
}

/// Configuration for question exploration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Maximum number of items an explorer emits.
    #[serde(default)]
    pub max_questions: Option<usize>,
    /// Handling of extraction errors during traversal.
    #[serde(default)]
    pub on_extraction_error: ExtractionErrorPolicy,
}

impl ExplorerConfig {
    /// Creates a new explorer configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of emitted items.
    #[must_use]
    pub fn with_max_questions(mut self, max: usize) -> Self {
        self.max_questions = Some(max);
        self
    }

    /// Sets the extraction error policy.
    #[must_use]
    pub fn with_extraction_error_policy(mut self, policy: ExtractionErrorPolicy) -> Self {
        self.on_extraction_error = policy;
        self
    }
}

/// Combined configuration for the [`PeopleAlsoAsk`](crate::client::PeopleAlsoAsk) client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaaConfig {
    /// Search domain suffix used when none is given, e.g. `com` or `fr`.
    #[serde(default = "default_domain")]
    pub default_domain: String,
    /// Fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Extraction configuration.
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Exploration configuration.
    #[serde(default)]
    pub explorer: ExplorerConfig,
}

fn default_domain() -> String {
    "com".to_string()
}

impl Default for PaaConfig {
    fn default() -> Self {
        Self {
            default_domain: default_domain(),
            fetch: FetchConfig::default(),
            extraction: ExtractionConfig::default(),
            explorer: ExplorerConfig::default(),
        }
    }
}

impl PaaConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default domain.
    #[must_use]
    pub fn with_default_domain(mut self, domain: impl Into<String>) -> Self {
        self.default_domain = domain.into();
        self
    }

    /// Sets the fetch configuration.
    #[must_use]
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Sets the extraction configuration.
    #[must_use]
    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }

    /// Sets the explorer configuration.
    #[must_use]
    pub fn with_explorer(mut self, explorer: ExplorerConfig) -> Self {
        self.explorer = explorer;
        self
    }
}
