//! Simulation class registry.
//!
//! Maps content-section kinds in a data package to the constructors that
//! build typed model entries from their JSON. Bootstrapping the registry is
//! a prerequisite for instantiating the model: applying any package goes
//! through these constructors.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::SimError;
use crate::host::Gamemode;

/// A skill definition contributed by content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    pub media: String,
}

/// An item definition contributed by content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
}

/// A monster definition contributed by content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterDef {
    pub id: String,
    pub name: String,
    pub hitpoints: u32,
}

/// A typed model entry constructed from package content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentEntry {
    Gamemode(Gamemode),
    Skill(SkillDef),
    Item(ItemDef),
    Monster(MonsterDef),
}

type Constructor = fn(&str, &serde_json::Value) -> Result<Vec<ContentEntry>, SimError>;

/// Registry of content constructors, keyed by package section kind.
pub struct ClassRegistry {
    constructors: BTreeMap<&'static str, Constructor>,
}

impl ClassRegistry {
    /// Register the built-in constructors. Must run before any model is
    /// instantiated.
    pub fn bootstrap() -> Self {
        let mut constructors: BTreeMap<&'static str, Constructor> = BTreeMap::new();
        constructors.insert("gamemodes", construct_gamemodes);
        constructors.insert("skills", construct_skills);
        constructors.insert("items", construct_items);
        constructors.insert("monsters", construct_monsters);

        Self { constructors }
    }

    /// Construct model entries from every recognized section of a package.
    ///
    /// Mod packages routinely carry sections the simulator does not model
    /// (pets, shop purchases, lore); those are skipped, not errors.
    pub fn apply_package(
        &self,
        namespace: &str,
        package: &serde_json::Value,
    ) -> Result<Vec<ContentEntry>, SimError> {
        let mut entries = Vec::new();

        let Some(sections) = package.as_object() else {
            return Ok(entries);
        };

        for (section, value) in sections {
            match self.constructors.get(section.as_str()) {
                Some(constructor) => entries.extend(constructor(namespace, value)?),
                None => {
                    log::debug!("skipping unmodelled section '{section}' from '{namespace}'");
                }
            }
        }

        Ok(entries)
    }
}

fn qualify(namespace: &str, local_id: &str) -> String {
    format!("{namespace}:{local_id}")
}

fn section_error(section: &str, namespace: &str, source: serde_json::Error) -> SimError {
    SimError::Content {
        section: section.to_string(),
        namespace: namespace.to_string(),
        source,
    }
}

#[derive(Deserialize)]
struct GamemodeData {
    #[serde(rename = "localID")]
    local_id: String,
    name: String,
}

fn construct_gamemodes(
    namespace: &str,
    value: &serde_json::Value,
) -> Result<Vec<ContentEntry>, SimError> {
    let data: Vec<GamemodeData> = serde_json::from_value(value.clone())
        .map_err(|e| section_error("gamemodes", namespace, e))?;

    Ok(data
        .into_iter()
        .map(|gamemode| {
            ContentEntry::Gamemode(Gamemode {
                id: qualify(namespace, &gamemode.local_id),
                name: gamemode.name,
                namespace: namespace.to_string(),
            })
        })
        .collect())
}

#[derive(Deserialize)]
struct SkillData {
    #[serde(rename = "localID")]
    local_id: String,
    name: String,
    #[serde(default)]
    media: String,
}

fn construct_skills(
    namespace: &str,
    value: &serde_json::Value,
) -> Result<Vec<ContentEntry>, SimError> {
    let data: Vec<SkillData> =
        serde_json::from_value(value.clone()).map_err(|e| section_error("skills", namespace, e))?;

    Ok(data
        .into_iter()
        .map(|skill| {
            ContentEntry::Skill(SkillDef {
                id: qualify(namespace, &skill.local_id),
                name: skill.name,
                media: skill.media,
            })
        })
        .collect())
}

#[derive(Deserialize)]
struct ItemData {
    #[serde(rename = "localID")]
    local_id: String,
    name: String,
}

fn construct_items(
    namespace: &str,
    value: &serde_json::Value,
) -> Result<Vec<ContentEntry>, SimError> {
    let data: Vec<ItemData> =
        serde_json::from_value(value.clone()).map_err(|e| section_error("items", namespace, e))?;

    Ok(data
        .into_iter()
        .map(|item| {
            ContentEntry::Item(ItemDef {
                id: qualify(namespace, &item.local_id),
                name: item.name,
            })
        })
        .collect())
}

#[derive(Deserialize)]
struct MonsterData {
    #[serde(rename = "localID")]
    local_id: String,
    name: String,
    #[serde(default)]
    hitpoints: u32,
}

fn construct_monsters(
    namespace: &str,
    value: &serde_json::Value,
) -> Result<Vec<ContentEntry>, SimError> {
    let data: Vec<MonsterData> = serde_json::from_value(value.clone())
        .map_err(|e| section_error("monsters", namespace, e))?;

    Ok(data
        .into_iter()
        .map(|monster| {
            ContentEntry::Monster(MonsterDef {
                id: qualify(namespace, &monster.local_id),
                name: monster.name,
                hitpoints: monster.hitpoints,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_package_constructs_typed_entries() {
        let registry = ClassRegistry::bootstrap();
        let package = json!({
            "gamemodes": [{"localID": "Chaos", "name": "Chaos Mode"}],
            "monsters": [{"localID": "Imp", "name": "Imp", "hitpoints": 40}],
        });

        let entries = registry
            .apply_package("someMod", &package)
            .expect("Failed to apply package");

        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&ContentEntry::Gamemode(Gamemode {
            id: "someMod:Chaos".to_string(),
            name: "Chaos Mode".to_string(),
            namespace: "someMod".to_string(),
        })));
        assert!(entries.contains(&ContentEntry::Monster(MonsterDef {
            id: "someMod:Imp".to_string(),
            name: "Imp".to_string(),
            hitpoints: 40,
        })));
    }

    #[test]
    fn test_apply_package_skips_unknown_sections() {
        let registry = ClassRegistry::bootstrap();
        let package = json!({
            "pets": [{"localID": "Cat"}],
            "items": [{"localID": "Sword", "name": "Sword"}],
        });

        let entries = registry
            .apply_package("someMod", &package)
            .expect("Failed to apply package");

        assert_eq!(
            entries,
            vec![ContentEntry::Item(ItemDef {
                id: "someMod:Sword".to_string(),
                name: "Sword".to_string(),
            })]
        );
    }

    #[test]
    fn test_apply_package_rejects_malformed_section() {
        let registry = ClassRegistry::bootstrap();
        let package = json!({"monsters": [{"name": "missing local id"}]});

        let result = registry.apply_package("someMod", &package);
        assert!(matches!(result, Err(SimError::Content { .. })));
    }

    #[test]
    fn test_apply_non_object_package_is_empty() {
        let registry = ClassRegistry::bootstrap();
        let entries = registry
            .apply_package("someMod", &json!(null))
            .expect("Failed to apply package");
        assert!(entries.is_empty());
    }
}
