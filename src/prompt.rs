//! Operator-facing confirmation surface.
//!
//! Bootstrap suspends on these calls until the operator responds; the crate
//! never renders dialogs itself. Implementations are expected to block the
//! returned future for as long as the operator takes; there is no timeout.

use async_trait::async_trait;

use crate::report::BugReport;
use crate::version::GameVersion;

/// Operator decision when the host game version fails the compatibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChoice {
    /// Abort loading entirely.
    Cancel,
    /// Load anyway, accepting possibly inaccurate simulation results.
    LoadAnyway,
}

/// Acknowledgement of the unrecognized-gamemode advisory.
#[derive(Debug, Clone, Copy, Default)]
pub struct GamemodeAck {
    /// State of the "ignore future warnings" toggle, if the operator
    /// touched it. `None` leaves the persisted preference unchanged.
    pub ignore_future: Option<bool>,
}

/// Confirmation and notification dialogs shown to the operator.
#[async_trait(?Send)]
pub trait OperatorPrompt {
    /// Blocking choice between aborting and loading with degraded accuracy.
    async fn confirm_incompatible_version(
        &self,
        current: &GameVersion,
        baseline: &GameVersion,
    ) -> VersionChoice;

    /// One-time advisory that the live gamemode is not registered in the
    /// simulation model and will fall back to the default mode.
    async fn notify_unrecognized_gamemode(&self, mode_name: &str) -> GamemodeAck;

    /// Present a failure report with reproduction context.
    async fn show_bug_report(&self, report: &BugReport);
}

/// Headless prompt for embedding without an interactive operator.
///
/// Declines incompatible loads (the safe answer when nobody can consent),
/// leaves the gamemode-warning preference untouched, and routes failure
/// reports to the error log.
pub struct SilentPrompt;

#[async_trait(?Send)]
impl OperatorPrompt for SilentPrompt {
    async fn confirm_incompatible_version(
        &self,
        _current: &GameVersion,
        _baseline: &GameVersion,
    ) -> VersionChoice {
        VersionChoice::Cancel
    }

    async fn notify_unrecognized_gamemode(&self, mode_name: &str) -> GamemodeAck {
        log::warn!("gamemode '{mode_name}' is not registered; simulating as the default mode");
        GamemodeAck::default()
    }

    async fn show_bug_report(&self, report: &BugReport) {
        log::error!("{}", report.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::BASELINE_GAME_VERSION;

    #[tokio::test]
    async fn test_silent_prompt_declines_incompatible_version() {
        let prompt = SilentPrompt;
        let current = GameVersion::new(2, 0, 0);

        let choice = prompt
            .confirm_incompatible_version(&current, &BASELINE_GAME_VERSION)
            .await;

        assert_eq!(choice, VersionChoice::Cancel);
    }

    #[tokio::test]
    async fn test_silent_prompt_leaves_gamemode_toggle_untouched() {
        let ack = SilentPrompt.notify_unrecognized_gamemode("CustomX").await;
        assert_eq!(ack.ignore_future, None);
    }
}
