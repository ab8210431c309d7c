//! Traffic disposition for a source/destination pair.

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::matcher::{longest_match, RouteMatch};
use crate::resolver::resolve_vrf;
use crate::rib::normalize_rib;
use crate::rules::RuleTable;
use crate::types::{AnalysisResult, Disposition, RouteEntry, VrfRef, DEFAULT_ROUTE};

const NO_ROUTE_DETAILS: &str =
    "No specific BGP route. Traffic follows the default gateway (firewall).";
const UNRESOLVED_DETAILS: &str =
    "VRF could not be identified: route distinguisher did not match any known VRF rule.";
const ISOLATION_DETAILS: &str =
    "VRF isolation (no BGP import path). Traffic follows the default gateway (firewall).";

/// One side of the query after route lookup
struct Endpoint {
    route: String,
    vrf: VrfRef,
    rd: Option<String>,
}

impl Endpoint {
    fn from_match(m: Option<RouteMatch<'_>>, rules: &RuleTable) -> Self {
        match m {
            Some(m) => Self {
                route: m.subnet.to_string(),
                vrf: resolve_vrf(m.entry, rules),
                rd: m.entry.route_distinguisher.clone(),
            },
            None => Self {
                route: DEFAULT_ROUTE.to_string(),
                vrf: VrfRef::Global,
                rd: None,
            },
        }
    }
}

/// Classify traffic from `src` to `dst`.
///
/// Never fails: an unparsable query is treated as a lookup without a route.
pub fn decide(src: &str, dst: &str, rules: &RuleTable, routes: &[RouteEntry]) -> AnalysisResult {
    let src_match = longest_match(src, routes);
    let dst_match = longest_match(dst, routes);
    let both_routed = src_match.is_some() && dst_match.is_some();

    let source = Endpoint::from_match(src_match, rules);
    let dest = Endpoint::from_match(dst_match, rules);

    let mut leaked_rts = Vec::new();
    let (status, details) = if !both_routed {
        (Disposition::FirewallNoRoute, NO_ROUTE_DETAILS.to_string())
    } else {
        match (&source.vrf, &dest.vrf) {
            (VrfRef::Named(src_vrf), VrfRef::Named(dst_vrf)) if src_vrf == dst_vrf => (
                Disposition::PermitDirect,
                format!("Intra-VRF. Direct communication inside VRF {src_vrf}."),
            ),
            (VrfRef::Named(src_vrf), VrfRef::Named(dst_vrf)) => {
                // Only source imports against destination exports; the return
                // direction is not evaluated.
                leaked_rts = match (rules.get(src_vrf), rules.get(dst_vrf)) {
                    (Some(s), Some(d)) => s.imports_from(d).into_iter().map(String::from).collect(),
                    _ => Vec::new(),
                };
                if leaked_rts.is_empty() {
                    (Disposition::FirewallIsolation, ISOLATION_DETAILS.to_string())
                } else {
                    (
                        Disposition::PermitLeak,
                        format!(
                            "Inter-VRF permitted. {src_vrf} -> {dst_vrf} (RT: {}).",
                            leaked_rts.join(", ")
                        ),
                    )
                }
            }
            _ => (Disposition::Indeterminate, UNRESOLVED_DETAILS.to_string()),
        }
    };

    debug!(
        src,
        dst,
        source_vrf = %source.vrf,
        dest_vrf = %dest.vrf,
        status = %status,
        "traffic classified"
    );

    AnalysisResult {
        query_src: src.to_string(),
        query_dst: dst.to_string(),
        source_route: source.route,
        dest_route: dest.route,
        source_vrf: source.vrf,
        dest_vrf: dest.vrf,
        source_rd: source.rd,
        dest_rd: dest.rd,
        status,
        details,
        leaked_rts,
    }
}

/// Analyze with typed inputs.
pub fn analyze(src: &str, dst: &str, rules: &RuleTable, routes: &[RouteEntry]) -> AnalysisResult {
    decide(src, dst, rules, routes)
}

/// Analyze with decoded datasets, as fetched.
///
/// Errors only when a dataset has the wrong top-level shape.
pub fn analyze_raw(src: &str, dst: &str, rules: &Value, rib: &Value) -> Result<AnalysisResult> {
    let rules = RuleTable::from_json(rules)?;
    let routes = normalize_rib(rib)?;
    debug!(vrfs = rules.len(), routes = routes.len(), "datasets loaded");
    Ok(decide(src, dst, &rules, &routes))
}
