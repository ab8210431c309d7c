//! Longest prefix match over a normalized route list.

use ipnet::IpNet;

use super::{Query, RouteMatcher};
use crate::types::RouteEntry;

/// Best covering route for a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    /// Route network as matched
    pub subnet: IpNet,
}

/// Find the most specific route covering `query`.
///
/// Linear scan. Ties on mask length keep the first route in list order.
/// An unparsable query matches nothing.
pub fn longest_match<'a>(query: &str, routes: &'a [RouteEntry]) -> Option<RouteMatch<'a>> {
    let query = Query::parse(query)?;
    best_match(&query, routes)
}

pub(crate) fn best_match<'a, M: RouteMatcher + ?Sized>(
    matcher: &M,
    routes: &'a [RouteEntry],
) -> Option<RouteMatch<'a>> {
    let mut best: Option<RouteMatch<'a>> = None;

    for entry in routes {
        let network = entry.prefix.trunc();
        if !matcher.matches(&network) {
            continue;
        }
        if best.is_some_and(|b| network.prefix_len() <= b.subnet.prefix_len()) {
            continue;
        }
        best = Some(RouteMatch {
            entry,
            subnet: network,
        });
    }

    best
}
