//! Crate-wide constants.

/// Preference key holding the last game version the operator accepted
/// despite failing the compatibility check.
pub const PREF_GAME_VERSION: &str = "simbridge-gameVersion";

/// Preference key for the "don't warn me about unregistered gamemodes
/// again" toggle. Stored as the string `"true"` or `"false"`.
pub const PREF_IGNORE_GAMEMODE_WARNING: &str = "simbridge-ignore-gamemode-warning";

/// Gamemode substituted whenever the live game runs a mode the simulation
/// model has not registered. The bundled rule set always provides it.
pub const DEFAULT_GAMEMODE_ID: &str = "melvorD:Standard";

/// Namespace prefix of first-party content. Packages under this prefix are
/// part of the core game data and are never captured as mod content.
pub const FIRST_PARTY_PREFIX: &str = "melvor";
