use std::fmt;

use ipnet::IpNet;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Matched-subnet marker used when an endpoint has no specific route.
pub const DEFAULT_ROUTE: &str = "0.0.0.0/0 (Default)";

/// VRF marker for a matched route whose RD is unknown.
pub const UNKNOWN_VRF: &str = "Unknown_VRF";

/// VRF marker for an endpoint that has no specific route.
pub const GLOBAL_VRF: &str = "Global/Default";

/// One BGP path from the RIB
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    /// Route network, host bits cleared
    pub prefix: IpNet,
    /// Route distinguisher as "<admin>:<assigned>"
    pub route_distinguisher: Option<String>,
    /// Original path object, not interpreted
    pub raw_attributes: Value,
}

impl RouteEntry {
    pub fn new(prefix: IpNet) -> Self {
        Self {
            prefix: prefix.trunc(),
            route_distinguisher: None,
            raw_attributes: Value::Null,
        }
    }

    pub fn with_rd(mut self, rd: impl Into<String>) -> Self {
        self.route_distinguisher = Some(rd.into());
        self
    }

    pub fn with_raw_attributes(mut self, raw: Value) -> Self {
        self.raw_attributes = raw;
        self
    }
}

/// VRF an endpoint was attributed to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VrfRef {
    /// A VRF from the rule table
    Named(String),
    /// Route matched, but its RD belongs to no known VRF
    Unresolved,
    /// No specific route, traffic rides the default route
    Global,
}

impl VrfRef {
    pub fn as_str(&self) -> &str {
        match self {
            VrfRef::Named(name) => name,
            VrfRef::Unresolved => UNKNOWN_VRF,
            VrfRef::Global => GLOBAL_VRF,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            VrfRef::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for VrfRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VrfRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Traffic disposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disposition {
    /// No specific route on one side, default gateway (firewall) is used
    FirewallNoRoute,
    /// A matched route could not be attributed to a VRF
    Indeterminate,
    /// Both endpoints in the same VRF
    PermitDirect,
    /// Different VRFs, leaked through a shared route target
    PermitLeak,
    /// Different VRFs without an import path
    FirewallIsolation,
}

impl Disposition {
    /// Whether the traffic is steered through the firewall
    pub fn requires_firewall(&self) -> bool {
        matches!(
            self,
            Disposition::FirewallNoRoute | Disposition::FirewallIsolation
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::FirewallNoRoute => "FIREWALL_NO_ROUTE",
            Disposition::Indeterminate => "INDETERMINATE",
            Disposition::PermitDirect => "PERMIT_DIRECT",
            Disposition::PermitLeak => "PERMIT_LEAK",
            Disposition::FirewallIsolation => "FIREWALL_ISOLATION",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one source/destination analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub query_src: String,
    pub query_dst: String,
    /// Matched source subnet, or [`DEFAULT_ROUTE`]
    pub source_route: String,
    /// Matched destination subnet, or [`DEFAULT_ROUTE`]
    pub dest_route: String,
    pub source_vrf: VrfRef,
    pub dest_vrf: VrfRef,
    pub source_rd: Option<String>,
    pub dest_rd: Option<String>,
    pub status: Disposition,
    pub details: String,
    /// Route targets shared by source imports and destination exports
    pub leaked_rts: Vec<String>,
}

impl AnalysisResult {
    /// Serialize as the flat JSON record handed to front ends.
    pub fn to_json(&self) -> Value {
        // Only strings, options and vectors of strings; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_entry_truncates_host_bits() {
        let entry = RouteEntry::new("10.1.2.3/16".parse().unwrap());
        assert_eq!(entry.prefix.to_string(), "10.1.0.0/16");
        assert!(entry.route_distinguisher.is_none());
    }

    #[test]
    fn test_vrf_ref_sentinels() {
        assert_eq!(VrfRef::Named("PROD".into()).as_str(), "PROD");
        assert_eq!(VrfRef::Unresolved.to_string(), UNKNOWN_VRF);
        assert_eq!(VrfRef::Global.to_string(), GLOBAL_VRF);
        assert_eq!(VrfRef::Global.name(), None);
    }

    #[test]
    fn test_disposition_requires_firewall() {
        assert!(Disposition::FirewallNoRoute.requires_firewall());
        assert!(Disposition::FirewallIsolation.requires_firewall());
        assert!(!Disposition::PermitDirect.requires_firewall());
        assert!(!Disposition::PermitLeak.requires_firewall());
        assert!(!Disposition::Indeterminate.requires_firewall());
    }

    #[test]
    fn test_disposition_serializes_as_status_code() {
        let json = serde_json::to_value(Disposition::FirewallNoRoute).unwrap();
        assert_eq!(json, Value::String("FIREWALL_NO_ROUTE".into()));
        assert_eq!(
            serde_json::to_value(Disposition::PermitLeak).unwrap(),
            Value::String(Disposition::PermitLeak.as_str().into())
        );
    }
}
