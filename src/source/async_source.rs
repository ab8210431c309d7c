use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::DatasetSource;
use crate::analyzer::analyze_raw;
use crate::error::{AnalyzerError, Result, SourceErrorKind};
use crate::types::AnalysisResult;

/// Async counterpart of [`DatasetSource`]
#[async_trait]
pub trait AsyncDatasetSource: Send + Sync {
    /// Load the decoded RIB dump
    async fn load_rib(&self) -> Result<Value>;

    /// Load the decoded VRF rules dataset
    async fn load_rules(&self) -> Result<Value>;
}

/// Runs a blocking source on tokio's blocking thread pool
pub struct Blocking<S: ?Sized> {
    inner: Arc<S>,
}

impl<S: DatasetSource + ?Sized + 'static> Blocking<S> {
    pub fn new(inner: Arc<S>) -> Self {
        Self { inner }
    }
}

impl<S: ?Sized> Clone for Blocking<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl<S: DatasetSource + ?Sized + 'static> AsyncDatasetSource for Blocking<S> {
    async fn load_rib(&self) -> Result<Value> {
        let inner = Arc::clone(&self.inner);
        run_blocking(move || inner.load_rib()).await
    }

    async fn load_rules(&self) -> Result<Value> {
        let inner = Arc::clone(&self.inner);
        run_blocking(move || inner.load_rules()).await
    }
}

async fn run_blocking<F>(f: F) -> Result<Value>
where
    F: FnOnce() -> Result<Value> + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        AnalyzerError::source_failure(SourceErrorKind::Aborted, format!("Fetch task failed: {}", e))
    })?
}

/// Fetch both datasets concurrently, then classify traffic from `src` to `dst`.
pub async fn query_async<S>(source: &S, src: &str, dst: &str) -> Result<AnalysisResult>
where
    S: AsyncDatasetSource + ?Sized,
{
    let (rib, rules) = tokio::try_join!(source.load_rib(), source.load_rules())?;
    analyze_raw(src, dst, &rules, &rib)
}
