use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::{DatasetSource, DEFAULT_RIB_FILE, DEFAULT_RULES_FILE};
use crate::error::{AnalyzerError, Result, SourceErrorKind};

/// Reads pre-dumped dataset files
///
/// Paths resolve in this order: explicit path, data directory joined with the
/// default file name, default file name relative to the working directory.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    data_dir: Option<PathBuf>,
    rib_path: Option<PathBuf>,
    rules_path: Option<PathBuf>,
}

impl FileSource {
    /// Create a new FileSource
    pub fn new() -> Self {
        Self::default()
    }

    /// Set data directory
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set the RIB file path
    pub fn with_rib_path(mut self, path: impl AsRef<Path>) -> Self {
        self.rib_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the VRF rules file path
    pub fn with_rules_path(mut self, path: impl AsRef<Path>) -> Self {
        self.rules_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Effective RIB file path
    pub fn rib_path(&self) -> PathBuf {
        self.resolve(self.rib_path.as_ref(), DEFAULT_RIB_FILE)
    }

    /// Effective VRF rules file path
    pub fn rules_path(&self) -> PathBuf {
        self.resolve(self.rules_path.as_ref(), DEFAULT_RULES_FILE)
    }

    fn resolve(&self, explicit: Option<&PathBuf>, filename: &str) -> PathBuf {
        if let Some(path) = explicit {
            return path.clone();
        }
        match self.data_dir {
            Some(ref dir) => dir.join(filename),
            None => PathBuf::from(filename),
        }
    }
}

impl DatasetSource for FileSource {
    fn load_rib(&self) -> Result<Value> {
        read_json(&self.rib_path())
    }

    fn load_rules(&self) -> Result<Value> {
        read_json(&self.rules_path())
    }
}

/// Read and decode a JSON file
pub(crate) fn read_json(path: &Path) -> Result<Value> {
    debug!(path = %path.display(), "reading dataset");

    let text = fs::read_to_string(path).map_err(|e| {
        AnalyzerError::source_failure(
            SourceErrorKind::FileError,
            format!("Failed to read '{}': {}", path.display(), e),
        )
    })?;

    serde_json::from_str(&text).map_err(|e| {
        AnalyzerError::source_failure(
            SourceErrorKind::InvalidData,
            format!("Invalid JSON in '{}': {}", path.display(), e),
        )
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_paths() {
        let source = FileSource::new();
        assert_eq!(source.rib_path(), PathBuf::from(DEFAULT_RIB_FILE));
        assert_eq!(source.rules_path(), PathBuf::from(DEFAULT_RULES_FILE));
    }

    #[test]
    fn test_data_dir_and_explicit_paths() {
        let source = FileSource::new()
            .with_data_dir("/var/www/html")
            .with_rules_path("/etc/analyzer/rules.json");
        assert_eq!(source.rib_path(), PathBuf::from("/var/www/html/gobgp_rib.json"));
        assert_eq!(source.rules_path(), PathBuf::from("/etc/analyzer/rules.json"));
    }

    #[test]
    fn test_missing_file() {
        let source = FileSource::new().with_data_dir("/nonexistent/analyzer");
        let err = source.load_rib().unwrap_err();
        assert_eq!(err.source_kind(), Some(SourceErrorKind::FileError));
    }

    #[test]
    fn test_load_and_invalid_json() {
        let dir = std::env::temp_dir().join("vrf_path_analyzer_file_source");
        let _ = fs::create_dir_all(&dir);

        let mut f = fs::File::create(dir.join(DEFAULT_RIB_FILE)).unwrap();
        writeln!(f, r#"[{{"nlri": {{"prefix": "10.1.0.0/16"}}}}]"#).unwrap();
        drop(f);
        let mut f = fs::File::create(dir.join(DEFAULT_RULES_FILE)).unwrap();
        writeln!(f, "{{ not json").unwrap();
        drop(f);

        let source = FileSource::new().with_data_dir(&dir);
        let rib = source.load_rib().unwrap();
        assert!(rib.is_array());

        let err = source.load_rules().unwrap_err();
        assert_eq!(err.source_kind(), Some(SourceErrorKind::InvalidData));

        let _ = fs::remove_file(dir.join(DEFAULT_RIB_FILE));
        let _ = fs::remove_file(dir.join(DEFAULT_RULES_FILE));
        let _ = fs::remove_dir(&dir);
    }
}
