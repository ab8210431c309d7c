use thiserror::Error;

/// Classifies dataset source errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Required path or URL not configured
    NotConfigured,
    /// File open/read failure
    FileError,
    /// HTTP request failed (connect, timeout, non-2xx status)
    HttpFailed,
    /// Payload is not valid JSON
    InvalidData,
    /// Background fetch task panicked or was cancelled
    Aborted,
}

/// Analyzer error types
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Source error: {message}")]
    SourceError {
        kind: SourceErrorKind,
        message: String,
    },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AnalyzerError {
    pub(crate) fn source_failure(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        AnalyzerError::SourceError {
            kind,
            message: message.into(),
        }
    }

    /// Source error kind, if this is a source error.
    pub fn source_kind(&self) -> Option<SourceErrorKind> {
        match self {
            AnalyzerError::SourceError { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
