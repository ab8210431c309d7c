//! VRF route-target rules.
//!
//! The rules dataset maps a VRF name to its RD and route targets:
//!
//! ```json
//! {
//!     "PROD": {"rd": "65000:100", "import_rts": ["65000:200"], "export_rts": ["65000:100"]}
//! }
//! ```
//!
//! Table order is the document order of the dataset. RD lookups return the first
//! VRF claiming an RD, so the order matters when two VRFs share one.

use std::collections::BTreeSet;

use log::warn;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{AnalyzerError, Result};

/// One VRF's route-leak policy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VrfRule {
    pub name: String,
    pub route_distinguisher: Option<String>,
    /// Route targets this VRF accepts
    pub import_rts: BTreeSet<String>,
    /// Route targets this VRF tags its own routes with
    pub export_rts: BTreeSet<String>,
}

impl VrfRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_rd(mut self, rd: impl Into<String>) -> Self {
        self.route_distinguisher = Some(rd.into());
        self
    }

    pub fn with_import<I, S>(mut self, rts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.import_rts.extend(rts.into_iter().map(Into::into));
        self
    }

    pub fn with_export<I, S>(mut self, rts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.export_rts.extend(rts.into_iter().map(Into::into));
        self
    }

    /// Route targets exported by `other` that this VRF imports.
    pub fn imports_from<'a>(&'a self, other: &'a VrfRule) -> Vec<&'a str> {
        self.import_rts
            .intersection(&other.export_rts)
            .map(String::as_str)
            .collect()
    }
}

/// Dataset shape of a single rule
#[derive(Debug, Serialize, Deserialize)]
struct RawVrfRule {
    #[serde(default)]
    rd: Option<String>,
    #[serde(default)]
    import_rts: Vec<String>,
    #[serde(default)]
    export_rts: Vec<String>,
}

/// Ordered VRF name to rule mapping
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleTable {
    rules: Vec<VrfRule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a decoded rules dataset.
    ///
    /// Entries that do not have the rule shape are skipped. A dataset that is not
    /// an object is rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            AnalyzerError::InvalidDataset("VRF rules must be an object keyed by VRF name".into())
        })?;

        let mut table = Self::new();
        for (name, raw) in map {
            match RawVrfRule::deserialize(raw) {
                Ok(raw) => table.insert(VrfRule {
                    name: name.clone(),
                    route_distinguisher: raw.rd,
                    import_rts: raw.import_rts.into_iter().collect(),
                    export_rts: raw.export_rts.into_iter().collect(),
                }),
                Err(e) => warn!("skipping VRF rule {name}: {e}"),
            }
        }
        Ok(table)
    }

    /// Parse a rules dataset from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Insert a rule, replacing one with the same name in place.
    pub fn insert(&mut self, rule: VrfRule) {
        match self.rules.iter_mut().find(|r| r.name == rule.name) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn get(&self, name: &str) -> Option<&VrfRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut VrfRule> {
        self.rules.iter_mut().find(|r| r.name == name)
    }

    /// First rule, in table order, claiming `rd`.
    pub fn find_by_rd(&self, rd: &str) -> Option<&VrfRule> {
        self.rules
            .iter()
            .find(|r| r.route_distinguisher.as_deref() == Some(rd))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VrfRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Serialize back into the rules dataset shape.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl FromIterator<VrfRule> for RuleTable {
    fn from_iter<T: IntoIterator<Item = VrfRule>>(iter: T) -> Self {
        let mut table = Self::new();
        for rule in iter {
            table.insert(rule);
        }
        table
    }
}

impl Serialize for RuleTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rules.len()))?;
        for rule in &self.rules {
            let raw = RawVrfRule {
                rd: rule.route_distinguisher.clone(),
                import_rts: rule.import_rts.iter().cloned().collect(),
                export_rts: rule.export_rts.iter().cloned().collect(),
            };
            map.serialize_entry(&rule.name, &raw)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        json!({
            "PROD": {"rd": "65000:100", "import_rts": ["65000:200"], "export_rts": ["65000:100"]},
            "DMZ": {"rd": "65000:200", "import_rts": ["65000:100"], "export_rts": ["65000:200"]},
            "LAB": {"rd": null, "import_rts": [], "export_rts": []}
        })
    }

    #[test]
    fn test_from_json() {
        let table = RuleTable::from_json(&sample()).unwrap();
        assert_eq!(table.len(), 3);

        let prod = table.get("PROD").unwrap();
        assert_eq!(prod.route_distinguisher.as_deref(), Some("65000:100"));
        assert!(prod.import_rts.contains("65000:200"));
        assert!(prod.export_rts.contains("65000:100"));

        let lab = table.get("LAB").unwrap();
        assert!(lab.route_distinguisher.is_none());
        assert!(lab.import_rts.is_empty());
    }

    #[test]
    fn test_from_json_keeps_document_order() {
        let table = RuleTable::from_json(&sample()).unwrap();
        let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["PROD", "DMZ", "LAB"]);
    }

    #[test]
    fn test_from_json_skips_malformed_rules() {
        let value = json!({
            "GOOD": {"rd": "1:1"},
            "BAD": "not a rule",
            "WORSE": {"rd": 17}
        });
        let table = RuleTable::from_json(&value).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("GOOD").is_some());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(RuleTable::from_json(&json!([])).is_err());
        assert!(RuleTable::from_json(&Value::Null).is_err());
    }

    #[test]
    fn test_find_by_rd_first_wins() {
        let table: RuleTable = vec![
            VrfRule::new("A").with_rd("65000:1"),
            VrfRule::new("B").with_rd("65000:1"),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.find_by_rd("65000:1").unwrap().name, "A");
        assert!(table.find_by_rd("65000:2").is_none());
    }

    #[test]
    fn test_imports_from() {
        let a = VrfRule::new("A").with_import(["65000:1", "65000:3"]);
        let b = VrfRule::new("B").with_export(["65000:3", "65000:1", "65000:9"]);
        assert_eq!(a.imports_from(&b), ["65000:1", "65000:3"]);
        assert!(b.imports_from(&a).is_empty());
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut table = RuleTable::new();
        table.insert(VrfRule::new("A").with_rd("1:1"));
        table.insert(VrfRule::new("B").with_rd("2:2"));
        table.insert(VrfRule::new("A").with_rd("3:3"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().next().unwrap().route_distinguisher.as_deref(), Some("3:3"));
    }

    #[test]
    fn test_to_json_round_trips_dataset_shape() {
        let table = RuleTable::from_json(&sample()).unwrap();
        let json = table.to_json();
        assert_eq!(json["DMZ"]["rd"], "65000:200");
        assert_eq!(json["DMZ"]["import_rts"], json!(["65000:100"]));
        assert_eq!(json["LAB"]["rd"], Value::Null);
        assert_eq!(RuleTable::from_json(&json).unwrap(), table);
    }
}
