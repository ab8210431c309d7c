//! VRF Path Analyzer - decides whether traffic between two hosts needs a firewall
//!
//! The analysis reconciles two datasets:
//! - a BGP RIB dump, either a list of paths or a map keyed by destination
//! - per-VRF rules: route distinguisher plus import/export route targets
//!
//! Each endpoint is looked up in the RIB by longest prefix match, attributed to a
//! VRF through the route's RD, and the pair is classified by route-target
//! intersection.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use vrf_path_analyzer::{analyze_raw, Disposition};
//!
//! let rules = json!({
//!     "PROD": {"rd": "65000:100", "import_rts": ["65000:200"], "export_rts": ["65000:100"]},
//!     "DMZ":  {"rd": "65000:200", "import_rts": ["65000:100"], "export_rts": ["65000:200"]}
//! });
//! let rib = json!({
//!     "[rd:65000:100][prefix:10.1.0.0/16]": [{"nlri": {}}],
//!     "[rd:65000:200][prefix:10.2.0.0/16]": [{"nlri": {}}]
//! });
//!
//! let result = analyze_raw("10.1.5.5", "10.2.5.5", &rules, &rib).unwrap();
//! assert_eq!(result.status, Disposition::PermitLeak);
//! println!("{}", result.to_json());
//! ```
//!
//! # Dispositions
//!
//! | Status | Meaning |
//! |--------|---------|
//! | `FIREWALL_NO_ROUTE` | An endpoint has no specific route, default gateway applies |
//! | `INDETERMINATE` | A matched route's RD belongs to no known VRF |
//! | `PERMIT_DIRECT` | Both endpoints in the same VRF |
//! | `PERMIT_LEAK` | Source VRF imports a route target the destination VRF exports |
//! | `FIREWALL_ISOLATION` | Different VRFs without an import path |
//!
//! # Queries
//!
//! - `10.1.2.3` - the most specific route containing the address
//! - `10.1.0.0/24` - the most specific route containing the whole subnet; a route
//!   narrower than the subnet never matches

pub mod analyzer;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod resolver;
pub mod rib;
pub mod rules;
pub mod source;
pub mod types;

// Re-export commonly used items
pub use analyzer::{analyze, analyze_raw, decide, Analyzer};
pub use error::{AnalyzerError, Result, SourceErrorKind};
pub use matcher::{longest_match, AddressQuery, Query, RouteMatch, RouteMatcher, SubnetQuery};
pub use parser::{parse_vrf_config, parse_vrf_config_from_file};
pub use resolver::resolve_vrf;
pub use rib::normalize_rib;
pub use rules::{RuleTable, VrfRule};
pub use types::{
    AnalysisResult, Disposition, RouteEntry, VrfRef, DEFAULT_ROUTE, GLOBAL_VRF, UNKNOWN_VRF,
};

// Re-export source types
#[cfg(feature = "async")]
pub use source::{query_async, AsyncDatasetSource, Blocking};
pub use source::{
    DatasetSource, FileSource, HttpSource, MemorySource, SourceConfig, DEFAULT_HTTP_TIMEOUT,
    DEFAULT_RIB_FILE, DEFAULT_RULES_FILE,
};
