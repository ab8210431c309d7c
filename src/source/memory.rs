use parking_lot::RwLock;
use serde_json::Value;

use super::DatasetSource;
use crate::error::{AnalyzerError, Result, SourceErrorKind};

/// In-memory dataset snapshots
///
/// Snapshots can be replaced while the source is shared; each load returns a
/// copy of the current snapshot.
#[derive(Debug, Default)]
pub struct MemorySource {
    rib: RwLock<Option<Value>>,
    rules: RwLock<Option<Value>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rib(self, rib: Value) -> Self {
        *self.rib.write() = Some(rib);
        self
    }

    pub fn with_rules(self, rules: Value) -> Self {
        *self.rules.write() = Some(rules);
        self
    }

    /// Replace the RIB snapshot
    pub fn set_rib(&self, rib: Value) {
        *self.rib.write() = Some(rib);
    }

    /// Replace the VRF rules snapshot
    pub fn set_rules(&self, rules: Value) {
        *self.rules.write() = Some(rules);
    }
}

impl DatasetSource for MemorySource {
    fn load_rib(&self) -> Result<Value> {
        self.rib.read().clone().ok_or_else(|| {
            AnalyzerError::source_failure(SourceErrorKind::NotConfigured, "RIB snapshot not set")
        })
    }

    fn load_rules(&self) -> Result<Value> {
        self.rules.read().clone().ok_or_else(|| {
            AnalyzerError::source_failure(
                SourceErrorKind::NotConfigured,
                "VRF rules snapshot not set",
            )
        })
    }
}
