use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use super::{DatasetSource, DEFAULT_RIB_FILE, DEFAULT_RULES_FILE};
use crate::error::{AnalyzerError, Result, SourceErrorKind};

/// Default timeout for one dataset request
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Default limit on a dataset response body: 64 MiB
pub const DEFAULT_MAX_BODY_SIZE: u64 = 64 * 1024 * 1024;

/// Polls both datasets from an HTTP data host
///
/// Datasets are fetched from `<base_url>/<endpoint>`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    rib_endpoint: String,
    rules_endpoint: String,
    timeout: Duration,
    max_body_size: u64,
}

impl HttpSource {
    /// Create a new HttpSource with default endpoints
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            rib_endpoint: DEFAULT_RIB_FILE.to_string(),
            rules_endpoint: DEFAULT_RULES_FILE.to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Set RIB endpoint
    pub fn with_rib_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.rib_endpoint = endpoint.into();
        self
    }

    /// Set VRF rules endpoint
    pub fn with_rules_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.rules_endpoint = endpoint.into();
        self
    }

    /// Set timeout for a whole request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set maximum accepted body size
    pub fn with_max_body_size(mut self, size: u64) -> Self {
        self.max_body_size = size;
        self
    }

    /// URL of the RIB dataset
    pub fn rib_url(&self) -> String {
        join_url(&self.base_url, &self.rib_endpoint)
    }

    /// URL of the VRF rules dataset
    pub fn rules_url(&self) -> String {
        join_url(&self.base_url, &self.rules_endpoint)
    }

    fn fetch_json(&self, url: &str) -> Result<Value> {
        if self.base_url.trim().is_empty() {
            return Err(AnalyzerError::source_failure(
                SourceErrorKind::NotConfigured,
                "HTTP base URL not configured",
            ));
        }

        debug!(url, "fetching dataset");

        let config = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build();
        let agent = ureq::Agent::new_with_config(config);

        let mut response = agent.get(url).call().map_err(|e| {
            AnalyzerError::source_failure(
                SourceErrorKind::HttpFailed,
                format!("GET {} failed: {}", url, e),
            )
        })?;

        let body = response
            .body_mut()
            .with_config()
            .limit(self.max_body_size)
            .read_to_string()
            .map_err(|e| {
                AnalyzerError::source_failure(
                    SourceErrorKind::HttpFailed,
                    format!("Reading {} failed: {}", url, e),
                )
            })?;

        serde_json::from_str(&body).map_err(|e| {
            AnalyzerError::source_failure(
                SourceErrorKind::InvalidData,
                format!("Invalid JSON from {}: {}", url, e),
            )
        })
    }
}

impl DatasetSource for HttpSource {
    fn load_rib(&self) -> Result<Value> {
        self.fetch_json(&self.rib_url())
    }

    fn load_rules(&self) -> Result<Value> {
        self.fetch_json(&self.rules_url())
    }
}

fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
