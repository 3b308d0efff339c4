//! Static rule and core data set.
//!
//! Everything the model needs before it can decode a save: combat rule
//! constants, the first-party gamemodes, and the core skill list. Fetching
//! is asynchronous (a provider may load from disk or a remote data drop)
//! and must complete before the decode step runs.

use async_trait::async_trait;

use crate::error::SimError;
use crate::host::Gamemode;
use crate::model::registry::SkillDef;

/// Core skill id used to derive maximum hitpoints.
pub const HITPOINTS_SKILL_ID: &str = "melvorD:Hitpoints";

/// Combat rule constants the simulation derives state from.
#[derive(Debug, Clone)]
pub struct CombatRules {
    pub base_attack_interval_ms: u32,
    pub hitpoints_per_level: u32,
    pub starting_hitpoints_level: u32,
    pub max_skill_level: u32,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            base_attack_interval_ms: 4000,
            hitpoints_per_level: 10,
            starting_hitpoints_level: 10,
            max_skill_level: 120,
        }
    }
}

/// The static rule/data set installed into the model during setup.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub combat: CombatRules,
    pub core_gamemodes: Vec<Gamemode>,
    pub core_skills: Vec<SkillDef>,
}

impl RuleSet {
    /// The rule set compiled into this crate.
    ///
    /// Always includes the fallback gamemode, so an unrecognized live mode
    /// can safely be projected onto it.
    pub fn bundled() -> Self {
        let core_gamemodes = ["Standard", "Hardcore", "Adventure"]
            .iter()
            .map(|name| Gamemode {
                id: format!("melvorD:{name}"),
                name: (*name).to_string(),
                namespace: "melvorD".to_string(),
            })
            .collect();

        let core_skills = [
            "Attack",
            "Strength",
            "Defence",
            "Hitpoints",
            "Ranged",
            "Magic",
            "Prayer",
            "Slayer",
        ]
        .iter()
        .map(|name| SkillDef {
            id: format!("melvorD:{name}"),
            name: (*name).to_string(),
            media: format!("assets/media/skills/{}.png", name.to_lowercase()),
        })
        .collect();

        Self {
            combat: CombatRules::default(),
            core_gamemodes,
            core_skills,
        }
    }
}

/// Source of the static rule/data set.
#[async_trait(?Send)]
pub trait RulesProvider {
    async fn fetch(&self) -> Result<RuleSet, SimError>;
}

/// Provider serving the rule set compiled into the crate.
pub struct BundledRules;

#[async_trait(?Send)]
impl RulesProvider for BundledRules {
    async fn fetch(&self) -> Result<RuleSet, SimError> {
        Ok(RuleSet::bundled())
    }
}
