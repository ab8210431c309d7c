//! RIB normalization.
//!
//! Turns a decoded RIB dump into a flat, ordered list of [`RouteEntry`].
//! Two shapes are accepted:
//!
//! - an array of path objects, each carrying its own NLRI;
//! - an object keyed by destination (e.g. `[rd:65000:100][prefix:10.1.0.0/16]`)
//!   whose values are a path object or an array of path objects.
//!
//! Individual paths that cannot be turned into a route are skipped.

pub mod key;

use std::net::IpAddr;

use ipnet::IpNet;
use log::debug;
use serde_json::{Map, Value};

use crate::error::{AnalyzerError, Result};
use crate::types::RouteEntry;

pub use key::{prefix_from_key, rd_from_key};

/// Normalize a raw RIB value into route entries.
///
/// Fails only if the top-level value is neither an array nor an object.
pub fn normalize_rib(rib: &Value) -> Result<Vec<RouteEntry>> {
    match rib {
        Value::Array(paths) => Ok(paths
            .iter()
            .filter_map(|path| route_from_path(path, None, None))
            .collect()),
        Value::Object(keyed) => Ok(normalize_keyed(keyed)),
        other => Err(AnalyzerError::InvalidDataset(format!(
            "RIB must be an array or an object, got {}",
            json_type(other)
        ))),
    }
}

fn normalize_keyed(keyed: &Map<String, Value>) -> Vec<RouteEntry> {
    let mut routes = Vec::with_capacity(keyed.len());

    for (key, paths) in keyed {
        let key_prefix = prefix_from_key(key);
        let key_rd = rd_from_key(key);

        match paths {
            Value::Array(paths) => {
                routes.extend(
                    paths
                        .iter()
                        .filter_map(|path| route_from_path(path, key_prefix, key_rd)),
                );
            }
            Value::Object(_) => {
                routes.extend(route_from_path(paths, key_prefix, key_rd));
            }
            other => debug!("skipping RIB key {key}: unexpected {}", json_type(other)),
        }
    }

    routes
}

/// Build one entry. A usable prefix taken from the key overrides whatever the
/// path carries; an unparsable key prefix counts as no key prefix.
fn route_from_path(
    path: &Value,
    key_prefix: Option<&str>,
    key_rd: Option<&str>,
) -> Option<RouteEntry> {
    if !path.is_object() {
        debug!("skipping RIB path: expected object, got {}", json_type(path));
        return None;
    }

    let from_key = key_prefix.and_then(|s| {
        let parsed = parse_route_prefix(s);
        if parsed.is_none() {
            debug!("ignoring unparsable key prefix {s:?}");
        }
        parsed
    });

    let prefix = match from_key {
        Some(prefix) => prefix,
        None => {
            let Some(prefix_str) = extract_prefix(path) else {
                debug!("skipping RIB path without prefix");
                return None;
            };
            let Some(prefix) = parse_route_prefix(prefix_str) else {
                debug!("skipping RIB path with unparsable prefix {prefix_str:?}");
                return None;
            };
            prefix
        }
    };

    let entry = RouteEntry::new(prefix).with_raw_attributes(path.clone());
    match extract_rd(path).or_else(|| key_rd.map(str::to_string)) {
        Some(rd) => Some(entry.with_rd(rd)),
        None => Some(entry),
    }
}

/// Find the prefix string of a path.
///
/// Lookup order: `prefix`, `nlri.prefix`, `nlri.value.prefix`, `nlri.value.ip`.
pub fn extract_prefix(path: &Value) -> Option<&str> {
    if let Some(prefix) = path.get("prefix").and_then(Value::as_str) {
        return Some(prefix);
    }

    let nlri = path.get("nlri")?;
    if let Some(prefix) = nlri.get("prefix").and_then(Value::as_str) {
        return Some(prefix);
    }

    let value = nlri.get("value")?;
    value
        .get("prefix")
        .and_then(Value::as_str)
        .or_else(|| value.get("ip").and_then(Value::as_str))
}

/// Find the route distinguisher of a path as `"<admin>:<assigned>"`.
///
/// Looks at `nlri.value.rd`, then `nlri.rd`. Both components must be present.
pub fn extract_rd(path: &Value) -> Option<String> {
    let nlri = path.get("nlri")?;

    let rd = nlri
        .get("value")
        .and_then(|v| v.get("rd"))
        .filter(|rd| is_non_empty_object(rd))
        .or_else(|| nlri.get("rd"))?;

    let admin = rd_component(rd.get("admin")?)?;
    let assigned = rd_component(rd.get("assigned")?)?;
    Some(format!("{admin}:{assigned}"))
}

fn rd_component(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_non_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|o| !o.is_empty())
}

/// Parse a route prefix. A bare address is a host route.
pub fn parse_route_prefix(s: &str) -> Option<IpNet> {
    let s = s.trim();
    if s.contains('/') {
        s.parse::<IpNet>().ok().map(|net| net.trunc())
    } else {
        s.parse::<IpAddr>().ok().and_then(host_route)
    }
}

/// Full-length network for a single address.
pub fn host_route(ip: IpAddr) -> Option<IpNet> {
    let max_len = match ip {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };
    IpNet::new(ip, max_len).ok()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
