//! The simulation model and its static data.

pub mod registry;
pub mod rules;
pub mod sim_game;

pub use registry::{ClassRegistry, ContentEntry};
pub use rules::{BundledRules, RuleSet, RulesProvider};
pub use sim_game::{SetupArgs, SimGame};
