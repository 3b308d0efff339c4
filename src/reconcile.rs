//! Gamemode reconciliation.
//!
//! Decides whether the live game's mode is one the simulation model
//! understands, and drives the one-time advisory when it is not.

use crate::constants::PREF_IGNORE_GAMEMODE_WARNING;
use crate::host::HostGame;
use crate::model::SimGame;
use crate::prefs::Preferences;
use crate::prompt::OperatorPrompt;

/// Whether the live mode is registered in the model.
///
/// When it is not, and the operator has not persisted the "ignore future
/// warnings" preference, an informational prompt names the unrecognized
/// mode; a toggle choice returned by the prompt is persisted for future
/// sessions. The return value reflects only whether the mode was found;
/// callers use it to decide fallback projection, not the prompt outcome.
pub async fn reconcile_gamemode(
    model: &SimGame,
    host: &dyn HostGame,
    prefs: &mut dyn Preferences,
    prompt: &dyn OperatorPrompt,
) -> bool {
    let recognized = model.is_live_gamemode_recognized();

    let ignore = prefs.get(PREF_IGNORE_GAMEMODE_WARNING).as_deref() == Some("true");

    if !recognized && !ignore {
        let ack = prompt
            .notify_unrecognized_gamemode(&host.current_gamemode().name)
            .await;

        if let Some(ignore_future) = ack.ignore_future {
            prefs.set(
                PREF_IGNORE_GAMEMODE_WARNING,
                if ignore_future { "true" } else { "false" },
            );
        }
    }

    recognized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_GAMEMODE_ID;
    use crate::error::HostError;
    use crate::host::{AreaCatalog, Gamemode, NamespaceInfo};
    use crate::model::rules::RuleSet;
    use crate::model::{ClassRegistry, SetupArgs};
    use crate::prefs::MemoryPreferences;
    use crate::prompt::{GamemodeAck, VersionChoice};
    use crate::report::BugReport;
    use crate::version::GameVersion;
    use async_trait::async_trait;
    use std::cell::Cell;

    struct StubHost {
        current: Gamemode,
    }

    impl HostGame for StubHost {
        fn version(&self) -> String {
            "v1.3.1".to_string()
        }

        fn gamemodes(&self) -> Vec<Gamemode> {
            vec![self.current.clone()]
        }

        fn current_gamemode(&self) -> Gamemode {
            self.current.clone()
        }

        fn set_current_gamemode(&mut self, _id: &str) -> Result<(), HostError> {
            Ok(())
        }

        fn generate_save_string(&self) -> Result<String, HostError> {
            Ok("v1:{}".to_string())
        }

        fn registered_namespaces(&self) -> Vec<NamespaceInfo> {
            Vec::new()
        }

        fn area_catalog(&self) -> AreaCatalog {
            AreaCatalog::default()
        }

        fn loaded_modules(&self) -> Vec<String> {
            Vec::new()
        }

        fn enabled_entitlements(&self) -> Vec<String> {
            Vec::new()
        }
    }

    struct CountingPrompt {
        shown: Cell<u32>,
        toggle: Option<bool>,
    }

    #[async_trait(?Send)]
    impl OperatorPrompt for CountingPrompt {
        async fn confirm_incompatible_version(
            &self,
            _current: &GameVersion,
            _baseline: &GameVersion,
        ) -> VersionChoice {
            VersionChoice::Cancel
        }

        async fn notify_unrecognized_gamemode(&self, _mode_name: &str) -> GamemodeAck {
            self.shown.set(self.shown.get() + 1);
            GamemodeAck {
                ignore_future: self.toggle,
            }
        }

        async fn show_bug_report(&self, _report: &BugReport) {}
    }

    fn model_with_live_mode(live_id: &str) -> SimGame {
        let mut model = SimGame::new(ClassRegistry::bootstrap());
        model
            .setup(
                &RuleSet::bundled(),
                SetupArgs {
                    data_packages: Vec::new(),
                    skills: Vec::new(),
                    modded_namespaces: Vec::new(),
                    gamemodes: Vec::new(),
                    current_gamemode_id: live_id.to_string(),
                    areas: AreaCatalog::default(),
                },
            )
            .expect("Failed to set up model");
        model
    }

    fn custom_host() -> StubHost {
        StubHost {
            current: Gamemode {
                id: "strangerMod:CustomX".to_string(),
                name: "CustomX".to_string(),
                namespace: "strangerMod".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_recognized_mode_shows_no_prompt() {
        let model = model_with_live_mode(DEFAULT_GAMEMODE_ID);
        let host = StubHost {
            current: Gamemode {
                id: DEFAULT_GAMEMODE_ID.to_string(),
                name: "Standard".to_string(),
                namespace: "melvorD".to_string(),
            },
        };
        let mut prefs = MemoryPreferences::default();
        let prompt = CountingPrompt {
            shown: Cell::new(0),
            toggle: None,
        };

        assert!(reconcile_gamemode(&model, &host, &mut prefs, &prompt).await);
        assert_eq!(prompt.shown.get(), 0);
    }

    #[tokio::test]
    async fn test_unrecognized_mode_prompts_once_and_persists_toggle() {
        let model = model_with_live_mode("strangerMod:CustomX");
        let host = custom_host();
        let mut prefs = MemoryPreferences::default();
        let prompt = CountingPrompt {
            shown: Cell::new(0),
            toggle: Some(true),
        };

        assert!(!reconcile_gamemode(&model, &host, &mut prefs, &prompt).await);
        assert_eq!(prompt.shown.get(), 1);
        assert_eq!(
            prefs.get(PREF_IGNORE_GAMEMODE_WARNING).as_deref(),
            Some("true")
        );

        // Preference now set: same unrecognized mode, no second prompt,
        // still reported as unrecognized.
        assert!(!reconcile_gamemode(&model, &host, &mut prefs, &prompt).await);
        assert_eq!(prompt.shown.get(), 1);
    }

    #[tokio::test]
    async fn test_toggle_off_is_persisted_as_false() {
        let model = model_with_live_mode("strangerMod:CustomX");
        let host = custom_host();
        let mut prefs = MemoryPreferences::default();
        let prompt = CountingPrompt {
            shown: Cell::new(0),
            toggle: Some(false),
        };

        reconcile_gamemode(&model, &host, &mut prefs, &prompt).await;
        assert_eq!(
            prefs.get(PREF_IGNORE_GAMEMODE_WARNING).as_deref(),
            Some("false")
        );

        // "false" does not suppress the advisory.
        reconcile_gamemode(&model, &host, &mut prefs, &prompt).await;
        assert_eq!(prompt.shown.get(), 2);
    }

    #[tokio::test]
    async fn test_untouched_toggle_leaves_preference_unset() {
        let model = model_with_live_mode("strangerMod:CustomX");
        let host = custom_host();
        let mut prefs = MemoryPreferences::default();
        let prompt = CountingPrompt {
            shown: Cell::new(0),
            toggle: None,
        };

        reconcile_gamemode(&model, &host, &mut prefs, &prompt).await;
        assert_eq!(prefs.get(PREF_IGNORE_GAMEMODE_WARNING), None);
    }
}
