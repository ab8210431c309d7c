//! Analyzer module.
//!
//! Answers source/destination queries against the latest datasets of a
//! [`DatasetSource`]. Both datasets are fetched again for every query; nothing is
//! kept between calls.

mod decision;

pub use decision::{analyze, analyze_raw, decide};

use tracing::info_span;

use crate::error::Result;
use crate::source::{DatasetSource, SourceConfig};
use crate::types::AnalysisResult;

/// Query front for a configured dataset source.
pub struct Analyzer {
    source: Box<dyn DatasetSource>,
}

impl Analyzer {
    /// Create an analyzer over a dataset source.
    pub fn new(source: impl DatasetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Create an analyzer from an already boxed source.
    pub fn from_boxed(source: Box<dyn DatasetSource>) -> Self {
        Self { source }
    }

    /// Create an analyzer from source configuration.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Ok(Self::from_boxed(config.build()?))
    }

    /// Borrow the underlying source.
    pub fn source(&self) -> &dyn DatasetSource {
        self.source.as_ref()
    }

    /// Fetch both datasets and classify traffic from `src` to `dst`.
    ///
    /// Fails only when a dataset cannot be fetched or has the wrong top-level shape.
    pub fn query(&self, src: &str, dst: &str) -> Result<AnalysisResult> {
        let _span = info_span!("query", src, dst).entered();

        let rules = self.source.load_rules()?;
        let rib = self.source.load_rib()?;
        analyze_raw(src, dst, &rules, &rib)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::error::SourceErrorKind;
    use crate::source::MemorySource;
    use crate::types::Disposition;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_rules(json!({
                "PROD": {"rd": "65000:100", "import_rts": ["65000:200"], "export_rts": ["65000:100"]},
                "DMZ": {"rd": "65000:200", "import_rts": ["65000:100"], "export_rts": ["65000:200"]}
            }))
            .with_rib(json!({
                "[rd:65000:100][prefix:10.1.0.0/16]": [{"nlri": {}}],
                "[rd:65000:200][prefix:10.2.0.0/16]": [{"nlri": {}}]
            }))
    }

    #[test]
    fn test_query() {
        let analyzer = Analyzer::new(source());
        let result = analyzer.query("10.1.5.5", "10.2.5.5").unwrap();
        assert_eq!(result.status, Disposition::PermitLeak);
    }

    #[test]
    fn test_query_sees_updated_datasets() {
        let memory = Arc::new(source());
        let analyzer = Analyzer::new(Arc::clone(&memory));
        let result = analyzer.query("10.1.5.5", "10.9.5.5").unwrap();
        assert_eq!(result.status, Disposition::FirewallNoRoute);

        memory.set_rib(json!([
            {"nlri": {"prefix": "10.0.0.0/8", "rd": {"admin": 65000, "assigned": 100}}}
        ]));
        let result = analyzer.query("10.1.5.5", "10.9.5.5").unwrap();
        assert_eq!(result.status, Disposition::PermitDirect);
        assert_eq!(result.source_route, "10.0.0.0/8");
    }

    #[test]
    fn test_query_without_datasets_fails() {
        let analyzer = Analyzer::new(MemorySource::new());
        let err = analyzer.query("10.1.5.5", "10.2.5.5").unwrap_err();
        assert_eq!(err.source_kind(), Some(SourceErrorKind::NotConfigured));
        assert!(analyzer.source().load_rules().is_err());
    }
}
