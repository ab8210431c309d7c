//! VRF section parser for device running configuration.
//!
//! Builds a [`RuleTable`] from the output of `show running-config section vrf`:
//!
//! ```text
//! vrf instance PROD
//!    rd 65000:100
//!    route-target import evpn 65000:200
//!    route-target export evpn 65000:100
//!    route-target both 65000:999
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AnalyzerError, Result};
use crate::rules::{RuleTable, VrfRule};

/// `vrf instance <NAME>` opens a VRF block
static VRF_INSTANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^vrf instance (\S+)").expect("VRF_INSTANCE: hardcoded regex is invalid")
});

/// `rd <value>` inside a VRF block
static RD_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rd (\S+)").expect("RD_LINE: hardcoded regex is invalid"));

/// First `<n>:<n>` token of a route-target line
static RT_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+:\d+)").expect("RT_VALUE: hardcoded regex is invalid"));

/// Parse VRF definitions from running configuration text.
///
/// Lines before the first `vrf instance` are ignored. Repeating a VRF instance
/// starts it over.
pub fn parse_vrf_config(text: &str) -> RuleTable {
    let mut table = RuleTable::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();

        if let Some(captures) = VRF_INSTANCE.captures(line) {
            let name = captures[1].to_string();
            table.insert(VrfRule::new(name.clone()));
            current = Some(name);
            continue;
        }

        let Some(rule) = current.as_deref().and_then(|name| table.get_mut(name)) else {
            continue;
        };

        if let Some(captures) = RD_LINE.captures(line) {
            rule.route_distinguisher = Some(captures[1].to_string());
        }

        if line.contains("route-target") {
            let Some(rt) = RT_VALUE.captures(line).map(|c| c[1].to_string()) else {
                debug!("route-target line without value: {line}");
                continue;
            };

            if line.contains("import") {
                rule.import_rts.insert(rt);
            } else if line.contains("export") {
                rule.export_rts.insert(rt);
            } else if line.contains("both") {
                rule.import_rts.insert(rt.clone());
                rule.export_rts.insert(rt);
            }
        }
    }

    table
}

/// Parse VRF definitions from a saved configuration file.
pub fn parse_vrf_config_from_file(path: impl AsRef<Path>) -> Result<RuleTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        AnalyzerError::ParseError(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(parse_vrf_config(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(VRF_INSTANCE.is_match("vrf instance PROD"));
        assert!(RD_LINE.is_match("rd 65000:1"));
        assert!(RT_VALUE.is_match("route-target both 65000:1"));
    }

    #[test]
    fn test_parse_vrf_config() {
        let text = r#"
vrf instance PROD
   rd 10.32.113.12:100
   route-target import evpn 65000:200
   route-target export evpn 65000:100
!
vrf instance DMZ
   rd 10.32.113.12:200
   route-target both 65000:999
"#;
        let table = parse_vrf_config(text);
        assert_eq!(table.len(), 2);

        let prod = table.get("PROD").unwrap();
        assert_eq!(prod.route_distinguisher.as_deref(), Some("10.32.113.12:100"));
        assert!(prod.import_rts.contains("65000:200"));
        assert!(prod.export_rts.contains("65000:100"));
        assert_eq!(prod.import_rts.len(), 1);

        let dmz = table.get("DMZ").unwrap();
        assert!(dmz.import_rts.contains("65000:999"));
        assert!(dmz.export_rts.contains("65000:999"));
    }

    #[test]
    fn test_lines_before_first_vrf_are_ignored() {
        let text = "rd 1:1\nroute-target both 65000:1\nvrf instance A\n";
        let table = parse_vrf_config(text);
        let a = table.get("A").unwrap();
        assert!(a.route_distinguisher.is_none());
        assert!(a.import_rts.is_empty());
    }

    #[test]
    fn test_rt_without_value_is_skipped() {
        let text = "vrf instance A\n   route-target import evpn auto\n";
        let table = parse_vrf_config(text);
        assert!(table.get("A").unwrap().import_rts.is_empty());
    }

    #[test]
    fn test_repeated_instance_starts_over() {
        let text = "vrf instance A\n rd 1:1\nvrf instance B\nvrf instance A\n rd 2:2\n";
        let table = parse_vrf_config(text);
        let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(table.get("A").unwrap().route_distinguisher.as_deref(), Some("2:2"));
    }

    #[test]
    fn test_parse_from_file_not_found() {
        let result = parse_vrf_config_from_file("/nonexistent/running-config.txt");
        assert!(matches!(result, Err(AnalyzerError::ParseError(_))));
    }
}
