//! Capabilities the host game exposes to the add-on.
//!
//! The live game is only ever reached through `HostGame`, injected into the
//! bootstrap process; the add-on never touches ambient globals. Content
//! registration is observed through `RegistrationEvents`, an explicit
//! subscription surface the host calls into as modules register.

use serde::{Deserialize, Serialize};

use crate::error::{HostError, SimError};

/// A named ruleset variant of the host game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gamemode {
    /// Fully qualified id, e.g. `melvorD:Standard`.
    pub id: String,
    pub name: String,
    /// Namespace of the owning module.
    pub namespace: String,
}

/// A content namespace known to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    pub name: String,
    /// Whether the namespace belongs to a third-party content module.
    pub is_modded: bool,
}

/// A combat area and the monsters it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatArea {
    pub id: String,
    pub monster_ids: Vec<String>,
}

/// The live game's area definitions, used to build the simulation model's
/// lookup tables.
#[derive(Debug, Clone, Default)]
pub struct AreaCatalog {
    pub combat_areas: Vec<CombatArea>,
    pub slayer_areas: Vec<CombatArea>,
    pub dungeon_ids: Vec<String>,
    pub stronghold_ids: Vec<String>,
    pub depth_ids: Vec<String>,
    pub task_ids: Vec<String>,
}

/// The running host game, as seen by the bootstrap process.
pub trait HostGame {
    /// Raw version string, e.g. `"v1.3.1"`.
    fn version(&self) -> String;

    fn gamemodes(&self) -> Vec<Gamemode>;

    fn current_gamemode(&self) -> Gamemode;

    /// Switch the live game's current mode. Used only for the temporary
    /// substitution during save projection, and always restored.
    fn set_current_gamemode(&mut self, id: &str) -> Result<(), HostError>;

    /// Serialize the full live game state with the host's own serializer.
    fn generate_save_string(&self) -> Result<String, HostError>;

    fn registered_namespaces(&self) -> Vec<NamespaceInfo>;

    fn area_catalog(&self) -> AreaCatalog;

    /// Names of loaded third-party modules, for failure reports.
    fn loaded_modules(&self) -> Vec<String>;

    /// Enabled optional content entitlements, for failure reports.
    fn enabled_entitlements(&self) -> Vec<String>;
}

/// A data package as handed to the host's registration entry point.
#[derive(Debug, Clone)]
pub struct DataPackageEvent {
    pub namespace: String,
    pub package: serde_json::Value,
}

/// A skill registration as handed to the host's registration entry point.
#[derive(Debug, Clone)]
pub struct SkillEvent {
    pub local_id: String,
    pub namespace: NamespaceInfo,
    pub media: String,
}

pub type DataPackageHandler = Box<dyn FnMut(&DataPackageEvent)>;
pub type SkillHandler = Box<dyn FnMut(&SkillEvent)>;

/// Subscription surface for the host's content-registration entry points.
///
/// Handlers must be installed before the host starts accepting module
/// registrations and are invoked for every registration for the lifetime
/// of the process.
pub trait RegistrationEvents {
    fn on_data_package_registered(&mut self, handler: DataPackageHandler);
    fn on_skill_registered(&mut self, handler: SkillHandler);
}

/// An opaque serialized snapshot of the live game, produced fresh for each
/// bootstrap attempt and consumed exactly once.
#[derive(Debug, Clone)]
pub struct CanonicalSave(String);

impl CanonicalSave {
    pub fn new(save_string: String) -> Self {
        Self(save_string)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parsed view of the host save envelope: `v{tag}:{body}`.
///
/// Only the envelope is understood here; the body stays opaque until the
/// simulation model decodes it. The version tag is threaded through
/// untouched; compatibility across tags is the host serializer's problem.
#[derive(Debug)]
pub struct SaveReader {
    version: u32,
    body: String,
}

impl SaveReader {
    pub fn from_save_string(raw: &str) -> Result<Self, SimError> {
        let (tag, body) = raw.split_once(':').ok_or_else(|| SimError::MalformedSave {
            reason: "missing version tag separator".to_string(),
        })?;

        let version = tag
            .strip_prefix('v')
            .unwrap_or(tag)
            .parse::<u32>()
            .map_err(|_| SimError::MalformedSave {
                reason: format!("unparseable version tag '{tag}'"),
            })?;

        Ok(Self {
            version,
            body: body.to_string(),
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_reader_splits_envelope() {
        let reader = SaveReader::from_save_string("v103:{\"a\":1}").expect("Failed to parse");
        assert_eq!(reader.version(), 103);
        assert_eq!(reader.body(), "{\"a\":1}");
    }

    #[test]
    fn test_save_reader_accepts_untagged_number() {
        let reader = SaveReader::from_save_string("7:payload").expect("Failed to parse");
        assert_eq!(reader.version(), 7);
    }

    #[test]
    fn test_save_reader_keeps_colons_in_body() {
        let reader = SaveReader::from_save_string("v1:a:b:c").expect("Failed to parse");
        assert_eq!(reader.body(), "a:b:c");
    }

    #[test]
    fn test_save_reader_rejects_missing_separator() {
        assert!(SaveReader::from_save_string("no separator").is_err());
    }

    #[test]
    fn test_save_reader_rejects_bad_tag() {
        assert!(SaveReader::from_save_string("vX:body").is_err());
    }
}
