use std::net::IpAddr;

use ipnet::IpNet;

use super::RouteMatcher;

/// Address query - matches routes whose network contains the address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressQuery {
    ip: IpAddr,
}

impl AddressQuery {
    pub fn new(ip: IpAddr) -> Self {
        Self { ip }
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }
}

impl RouteMatcher for AddressQuery {
    fn matches(&self, route: &IpNet) -> bool {
        route.contains(&self.ip)
    }
}

/// Subnet query - matches routes that fully contain the subnet
///
/// A route more specific than the queried subnet never matches, even if the
/// two overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetQuery {
    network: IpNet,
}

impl SubnetQuery {
    /// Host bits of `network` are cleared.
    pub fn new(network: IpNet) -> Self {
        Self {
            network: network.trunc(),
        }
    }

    pub fn network(&self) -> IpNet {
        self.network
    }
}

impl RouteMatcher for SubnetQuery {
    fn matches(&self, route: &IpNet) -> bool {
        route.prefix_len() <= self.network.prefix_len()
            && route.contains(&self.network.network())
    }
}
