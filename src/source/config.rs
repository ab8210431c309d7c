use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{DatasetSource, FileSource, HttpSource, DEFAULT_RIB_FILE, DEFAULT_RULES_FILE};
use crate::error::{AnalyzerError, Result};

fn default_rib_endpoint() -> String {
    DEFAULT_RIB_FILE.to_string()
}

fn default_rules_endpoint() -> String {
    DEFAULT_RULES_FILE.to_string()
}

fn default_timeout_secs() -> u64 {
    super::DEFAULT_HTTP_TIMEOUT.as_secs()
}

/// Startup configuration of the dataset source
///
/// ```json
/// {"kind": "http", "base_url": "http://192.0.2.10:8000", "timeout_secs": 5}
/// ```
///
/// ```json
/// {"kind": "file", "data_dir": "/var/www/html"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Pre-dumped dataset files
    File {
        #[serde(default)]
        data_dir: Option<PathBuf>,
        #[serde(default)]
        rib_path: Option<PathBuf>,
        #[serde(default)]
        rules_path: Option<PathBuf>,
    },
    /// HTTP data host
    Http {
        base_url: String,
        #[serde(default = "default_rib_endpoint")]
        rib_endpoint: String,
        #[serde(default = "default_rules_endpoint")]
        rules_endpoint: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

impl SourceConfig {
    /// Parse configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| AnalyzerError::ConfigError(e.to_string()))
    }

    /// Read configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            AnalyzerError::ConfigError(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&text)
    }

    /// Build the configured source.
    pub fn build(&self) -> Result<Box<dyn DatasetSource>> {
        match self {
            SourceConfig::File {
                data_dir,
                rib_path,
                rules_path,
            } => {
                let mut source = FileSource::new();
                if let Some(dir) = data_dir {
                    source = source.with_data_dir(dir);
                }
                if let Some(path) = rib_path {
                    source = source.with_rib_path(path);
                }
                if let Some(path) = rules_path {
                    source = source.with_rules_path(path);
                }
                Ok(Box::new(source))
            }
            SourceConfig::Http {
                base_url,
                rib_endpoint,
                rules_endpoint,
                timeout_secs,
            } => {
                if base_url.trim().is_empty() {
                    return Err(AnalyzerError::ConfigError(
                        "http source requires a base_url".to_string(),
                    ));
                }
                if *timeout_secs == 0 {
                    return Err(AnalyzerError::ConfigError(
                        "timeout_secs must be positive".to_string(),
                    ));
                }
                Ok(Box::new(
                    HttpSource::new(base_url.clone())
                        .with_rib_endpoint(rib_endpoint.clone())
                        .with_rules_endpoint(rules_endpoint.clone())
                        .with_timeout(Duration::from_secs(*timeout_secs)),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_http_config_defaults() {
        let config = SourceConfig::from_json_str(
            r#"{"kind": "http", "base_url": "http://192.0.2.10:8000"}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            SourceConfig::Http {
                base_url: "http://192.0.2.10:8000".into(),
                rib_endpoint: "gobgp_rib.json".into(),
                rules_endpoint: "arista_vrf_rules.json".into(),
                timeout_secs: 10,
            }
        );
        assert!(config.build().is_ok());
    }

    #[test]
    fn test_parse_file_config() {
        let config =
            SourceConfig::from_json_str(r#"{"kind": "file", "data_dir": "/var/www/html"}"#)
                .unwrap();
        match &config {
            SourceConfig::File { data_dir, rib_path, .. } => {
                assert_eq!(data_dir.as_deref(), Some(Path::new("/var/www/html")));
                assert!(rib_path.is_none());
            }
            other => panic!("expected file config, got {:?}", other),
        }
        assert!(config.build().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        assert!(SourceConfig::from_json_str(r#"{"kind": "ssh"}"#).is_err());
        assert!(SourceConfig::from_json_str(r#"{"kind": "http"}"#).is_err());

        let config = SourceConfig::from_json_str(r#"{"kind": "http", "base_url": " "}"#).unwrap();
        assert!(matches!(config.build(), Err(AnalyzerError::ConfigError(_))));

        let config = SourceConfig::from_json_str(
            r#"{"kind": "http", "base_url": "http://x", "timeout_secs": 0}"#,
        )
        .unwrap();
        assert!(config.build().is_err());
    }

    #[test]
    fn test_config_file_not_found() {
        let result = SourceConfig::from_file("/nonexistent/analyzer.json");
        assert!(matches!(result, Err(AnalyzerError::ConfigError(_))));
    }
}
