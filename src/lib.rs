//! Simbridge - Simulation Bootstrap for a Live Idle Game
//!
//! Attaches to a running idle/RPG host game and maintains a parallel,
//! simulation-only copy of its combat-relevant state: gates loading on
//! version compatibility, captures third-party content registrations,
//! projects the live game to a canonical save, and decodes it into an
//! independent model the combat simulation engine consumes.

pub mod api;
pub mod bootstrap;
pub mod build_info;
pub mod capture;
pub mod constants;
pub mod error;
pub mod host;
pub mod model;
pub mod namespace;
pub mod prefs;
pub mod project;
pub mod prompt;
pub mod reconcile;
pub mod report;
pub mod settings;
pub mod version;

pub use api::{Addon, LoadOutcome};
pub use error::{HostError, SimError};
pub use model::SimGame;
pub use settings::Settings;
