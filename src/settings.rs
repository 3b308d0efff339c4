//! Add-on configuration import/export.
//!
//! Settings are an opaque bag of named entries as far as the core is
//! concerned; the simulation engine and tooling own their meaning. They
//! travel as JSON through the public import/export surface and, best
//! effort, into failure reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

pub const SETTINGS_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub format: u32,
    #[serde(default)]
    pub entries: BTreeMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: SETTINGS_FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: &str, value: serde_json::Value) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn export_string(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn import_string(raw: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_export_import_round_trip() {
        let mut settings = Settings::default();
        settings.insert("show-dps", json!(true));
        settings.insert("trials", json!(10_000));

        let exported = settings.export_string().expect("Failed to export");
        let imported = Settings::import_string(&exported).expect("Failed to import");

        assert_eq!(imported, settings);
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        assert!(Settings::import_string("{not json").is_err());
    }

    #[test]
    fn test_missing_entries_default_to_empty() {
        let imported = Settings::import_string("{\"format\":1}").expect("Failed to import");
        assert!(imported.entries.is_empty());
    }
}
