//! The independent simulation model.
//!
//! `SimGame` is the decoded, simulation-only copy of the live game's
//! combat-relevant state. It is populated exactly once per session by the
//! bootstrap pipeline: setup installs rules and content, decode reads the
//! canonical save body, and the blank-state reset wipes everything
//! in-combat so repeated what-if runs start deterministic.
//!
//! The save body is JSON with the fields of [`SaveBody`]; the envelope
//! version tag is accepted as declared and recorded untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::capture::{DataPackageRecord, SkillRecord};
use crate::error::SimError;
use crate::host::{AreaCatalog, Gamemode, NamespaceInfo, SaveReader};
use crate::model::registry::{ClassRegistry, ContentEntry};
use crate::model::rules::{CombatRules, RuleSet, HITPOINTS_SKILL_ID};

/// Arguments for the model's setup routine.
pub struct SetupArgs {
    /// Captured mod packages, already namespace-filtered.
    pub data_packages: Vec<DataPackageRecord>,
    /// Captured mod skill registrations, already namespace-filtered.
    pub skills: Vec<SkillRecord>,
    /// Namespaces the host reports as belonging to third-party modules.
    pub modded_namespaces: Vec<NamespaceInfo>,
    /// All gamemodes the host currently knows.
    pub gamemodes: Vec<Gamemode>,
    /// The live game's current mode at setup time.
    pub current_gamemode_id: String,
    /// The live game's area definitions.
    pub areas: AreaCatalog,
}

/// Id indices the simulation engine iterates when enumerating targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTables {
    pub monster_ids: Vec<String>,
    pub dungeon_ids: Vec<String>,
    pub stronghold_ids: Vec<String>,
    pub depth_ids: Vec<String>,
    pub task_ids: Vec<String>,
}

impl LookupTables {
    fn from_catalog(areas: &AreaCatalog) -> Self {
        let mut monster_ids = Vec::new();

        for area in areas.combat_areas.iter().chain(areas.slayer_areas.iter()) {
            monster_ids.extend(area.monster_ids.iter().cloned());
        }

        Self {
            monster_ids,
            dungeon_ids: areas.dungeon_ids.clone(),
            stronghold_ids: areas.stronghold_ids.clone(),
            depth_ids: areas.depth_ids.clone(),
            task_ids: areas.task_ids.clone(),
        }
    }
}

/// Progression state of one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillState {
    pub id: String,
    pub level: u32,
    pub xp: f64,
}

/// One occupied equipment slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSlot {
    pub slot: String,
    pub item_id: String,
}

/// In-combat and in-progress fields. Everything here is wiped by the
/// blank-state reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatFields {
    #[serde(default)]
    pub current_hitpoints: u32,
    #[serde(default)]
    pub target_monster_id: Option<String>,
    #[serde(default)]
    pub attack_progress_ms: u32,
    #[serde(default)]
    pub active_dungeon_id: Option<String>,
    #[serde(default)]
    pub pending_loot: Vec<String>,
}

/// Decoded shape of the canonical save body.
#[derive(Deserialize)]
struct SaveBody {
    current_gamemode: String,
    #[serde(default)]
    skills: Vec<SkillState>,
    #[serde(default)]
    equipment: Vec<EquipmentSlot>,
    #[serde(default)]
    combat: CombatFields,
}

/// The simulation-only copy of the game.
pub struct SimGame {
    classes: ClassRegistry,
    rules: CombatRules,
    gamemodes: Vec<Gamemode>,
    skills: Vec<SkillState>,
    equipment: Vec<EquipmentSlot>,
    combat: CombatFields,
    lookup: LookupTables,
    mod_entries: Vec<ContentEntry>,
    mod_skills: Vec<SkillRecord>,
    modded_namespaces: Vec<NamespaceInfo>,
    live_gamemode_id: String,
    current_gamemode: Option<String>,
    save_version: Option<u32>,
    max_hitpoints: u32,
}

impl SimGame {
    /// Instantiate an empty model. The class registry must already be
    /// bootstrapped.
    pub fn new(classes: ClassRegistry) -> Self {
        Self {
            classes,
            rules: CombatRules::default(),
            gamemodes: Vec::new(),
            skills: Vec::new(),
            equipment: Vec::new(),
            combat: CombatFields::default(),
            lookup: LookupTables::default(),
            mod_entries: Vec::new(),
            mod_skills: Vec::new(),
            modded_namespaces: Vec::new(),
            live_gamemode_id: String::new(),
            current_gamemode: None,
            save_version: None,
            max_hitpoints: 0,
        }
    }

    /// Install rules and content, and build the lookup structures.
    ///
    /// Gamemodes known to the model afterwards: the rule set's first-party
    /// modes, any modes contributed by filtered mod packages, and host
    /// modes whose namespace registered a package.
    pub fn setup(&mut self, rules: &RuleSet, args: SetupArgs) -> Result<(), SimError> {
        self.rules = rules.combat.clone();
        self.gamemodes = rules.core_gamemodes.clone();

        self.skills = rules
            .core_skills
            .iter()
            .map(|skill| SkillState {
                id: skill.id.clone(),
                level: 1,
                xp: 0.0,
            })
            .collect();

        let mut package_namespaces = BTreeSet::new();

        for package in &args.data_packages {
            package_namespaces.insert(package.namespace.to_lowercase());

            for entry in self.classes.apply_package(&package.namespace, &package.package)? {
                match entry {
                    ContentEntry::Gamemode(gamemode) => self.register_gamemode(gamemode),
                    ContentEntry::Skill(skill) => {
                        self.skills.push(SkillState {
                            id: skill.id.clone(),
                            level: 1,
                            xp: 0.0,
                        });
                        self.mod_entries.push(ContentEntry::Skill(skill));
                    }
                    other => self.mod_entries.push(other),
                }
            }
        }

        // Host modes owned by a namespace that registered a package are
        // recognized even when the package itself carried no gamemode
        // section.
        for gamemode in args.gamemodes {
            if package_namespaces.contains(&gamemode.namespace.to_lowercase()) {
                self.register_gamemode(gamemode);
            }
        }

        self.mod_skills = args.skills;
        self.modded_namespaces = args.modded_namespaces;
        self.live_gamemode_id = args.current_gamemode_id;
        self.lookup = LookupTables::from_catalog(&args.areas);

        Ok(())
    }

    fn register_gamemode(&mut self, gamemode: Gamemode) {
        if !self.has_gamemode(&gamemode.id) {
            self.gamemodes.push(gamemode);
        }
    }

    pub fn has_gamemode(&self, id: &str) -> bool {
        self.gamemodes.iter().any(|gamemode| gamemode.id == id)
    }

    /// Whether the live game's mode (as recorded at setup) is one this
    /// model registered.
    pub fn is_live_gamemode_recognized(&self) -> bool {
        self.has_gamemode(&self.live_gamemode_id)
    }

    /// Decode the canonical save body into the model.
    ///
    /// Any declared envelope version is accepted; compatibility across save
    /// versions is the host serializer's responsibility.
    pub fn decode(&mut self, reader: &SaveReader) -> Result<(), SimError> {
        let body: SaveBody =
            serde_json::from_str(reader.body()).map_err(|source| SimError::Decode {
                version: reader.version(),
                source,
            })?;

        self.save_version = Some(reader.version());
        self.current_gamemode = Some(body.current_gamemode);
        self.equipment = body.equipment;
        self.combat = body.combat;

        for decoded in body.skills {
            match self.skills.iter_mut().find(|skill| skill.id == decoded.id) {
                Some(skill) => {
                    skill.level = decoded.level;
                    skill.xp = decoded.xp;
                }
                // Content the model did not register; its progress cannot
                // be simulated.
                None => log::debug!("save references unregistered skill '{}'", decoded.id),
            }
        }

        Ok(())
    }

    /// Post-load hook: derive combat fields from decoded progression.
    pub fn on_load(&mut self) {
        for skill in &mut self.skills {
            if skill.level > self.rules.max_skill_level {
                skill.level = self.rules.max_skill_level;
            }
        }

        let hitpoints_level = self
            .skills
            .iter()
            .find(|skill| skill.id == HITPOINTS_SKILL_ID)
            .map(|skill| skill.level)
            .unwrap_or(self.rules.starting_hitpoints_level);

        self.max_hitpoints = hitpoints_level * self.rules.hitpoints_per_level;
    }

    /// Reset all in-combat/in-progress fields to a blank baseline so every
    /// simulation starts from the same deterministic state.
    pub fn reset_to_blank_state(&mut self) {
        self.combat = CombatFields {
            current_hitpoints: self.max_hitpoints,
            ..CombatFields::default()
        };
    }

    pub fn current_gamemode_id(&self) -> Option<&str> {
        self.current_gamemode.as_deref()
    }

    pub fn gamemodes(&self) -> &[Gamemode] {
        &self.gamemodes
    }

    pub fn skills(&self) -> &[SkillState] {
        &self.skills
    }

    pub fn equipment(&self) -> &[EquipmentSlot] {
        &self.equipment
    }

    pub fn combat(&self) -> &CombatFields {
        &self.combat
    }

    pub fn lookup(&self) -> &LookupTables {
        &self.lookup
    }

    pub fn mod_entries(&self) -> &[ContentEntry] {
        &self.mod_entries
    }

    pub fn mod_skills(&self) -> &[SkillRecord] {
        &self.mod_skills
    }

    pub fn modded_namespaces(&self) -> &[NamespaceInfo] {
        &self.modded_namespaces
    }

    pub fn save_version(&self) -> Option<u32> {
        self.save_version
    }

    pub fn max_hitpoints(&self) -> u32 {
        self.max_hitpoints
    }
}
