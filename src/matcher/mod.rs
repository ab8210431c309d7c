mod ip;
mod lpm;

pub use ip::{AddressQuery, SubnetQuery};
pub use lpm::{longest_match, RouteMatch};

use std::net::IpAddr;

use ipnet::IpNet;

/// Trait for route matchers
pub trait RouteMatcher: Send + Sync {
    /// Check if the route network covers this query
    fn matches(&self, route: &IpNet) -> bool;
}

/// Enum wrapper for the query kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Address(AddressQuery),
    Subnet(SubnetQuery),
}

impl Query {
    /// Parse a query string. A `/` selects subnet syntax.
    ///
    /// Returns `None` for anything that is not a valid address or subnet,
    /// surrounding whitespace included.
    pub fn parse(input: &str) -> Option<Self> {
        if input.contains('/') {
            input
                .parse::<IpNet>()
                .ok()
                .map(|net| Query::Subnet(SubnetQuery::new(net)))
        } else {
            input
                .parse::<IpAddr>()
                .ok()
                .map(|ip| Query::Address(AddressQuery::new(ip)))
        }
    }
}

impl RouteMatcher for Query {
    fn matches(&self, route: &IpNet) -> bool {
        match self {
            Query::Address(q) => q.matches(route),
            Query::Subnet(q) => q.matches(route),
        }
    }
}
