//! Structural RIB key parsing.
//!
//! Keyed RIB dumps index paths by a destination key such as
//! `[type:vpn][rd:65000:100][prefix:10.1.0.0/16]`. Only the embedded tokens are
//! of interest; anything else in the key is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

/// `prefix:<ip>[/<mask>]`, either address family
static PREFIX_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"prefix:([0-9A-Fa-f.:]+(?:/\d{1,3})?)")
        .expect("PREFIX_TOKEN: hardcoded regex is invalid")
});

/// `rd:<admin>:<assigned>` opening a key or a bracketed token, admin being an
/// ASN or an IPv4 address
static RD_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[\[\s])rd:(\d+(?:\.\d+){0,3}:\d+)")
        .expect("RD_TOKEN: hardcoded regex is invalid")
});

/// Extract the prefix token from a structural key.
pub fn prefix_from_key(key: &str) -> Option<&str> {
    PREFIX_TOKEN
        .captures(key)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Extract the route distinguisher token from a structural key.
pub fn rd_from_key(key: &str) -> Option<&str> {
    RD_TOKEN.captures(key).and_then(|c| c.get(1)).map(|m| m.as_str())
}
