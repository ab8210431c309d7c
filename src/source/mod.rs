//! Dataset sources.
//!
//! A source hands out the two raw datasets the analysis needs: the RIB dump of
//! the BGP speaker and the per-VRF route-target rules. Sources are configured
//! once at startup and asked again on every query.

#[cfg(feature = "async")]
mod async_source;
mod config;
mod file;
mod http;
mod memory;

#[cfg(feature = "async")]
pub use async_source::{query_async, AsyncDatasetSource, Blocking};
pub use config::SourceConfig;
pub use file::FileSource;
pub use http::{HttpSource, DEFAULT_HTTP_TIMEOUT, DEFAULT_MAX_BODY_SIZE};
pub use memory::MemorySource;

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;

/// Default RIB dataset name (file name or HTTP endpoint)
pub const DEFAULT_RIB_FILE: &str = "gobgp_rib.json";

/// Default VRF rules dataset name (file name or HTTP endpoint)
pub const DEFAULT_RULES_FILE: &str = "arista_vrf_rules.json";

/// Trait for loading the raw datasets
pub trait DatasetSource: Send + Sync {
    /// Load the decoded RIB dump
    fn load_rib(&self) -> Result<Value>;

    /// Load the decoded VRF rules dataset
    fn load_rules(&self) -> Result<Value>;
}

impl<T: DatasetSource + ?Sized> DatasetSource for Arc<T> {
    fn load_rib(&self) -> Result<Value> {
        (**self).load_rib()
    }

    fn load_rules(&self) -> Result<Value> {
        (**self).load_rules()
    }
}

impl<T: DatasetSource + ?Sized> DatasetSource for Box<T> {
    fn load_rib(&self) -> Result<Value> {
        (**self).load_rib()
    }

    fn load_rules(&self) -> Result<Value> {
        (**self).load_rules()
    }
}
