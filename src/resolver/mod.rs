//! VRF resolver module.
//!
//! Attributes a route to the VRF whose rule claims the route's RD.

use crate::rules::{RuleTable, VrfRule};
use crate::types::{RouteEntry, VrfRef};

/// Find the rule owning `entry`, first RD match in table order.
pub fn owning_rule<'a>(entry: &RouteEntry, rules: &'a RuleTable) -> Option<&'a VrfRule> {
    let rd = entry.route_distinguisher.as_deref()?;
    rules.find_by_rd(rd)
}

/// Resolve the VRF of a route. Routes without an RD, or with an RD no rule
/// claims, are [`VrfRef::Unresolved`].
pub fn resolve_vrf(entry: &RouteEntry, rules: &RuleTable) -> VrfRef {
    match owning_rule(entry, rules) {
        Some(rule) => VrfRef::Named(rule.name.clone()),
        None => VrfRef::Unresolved,
    }
}
