//! Game version parsing and the compatibility gate.
//!
//! The add-on is validated against one exact host version. Running against
//! a newer host is allowed only with the operator's consent, captured at
//! most once per encountered version via a persisted marker.

use std::fmt;

use crate::constants::PREF_GAME_VERSION;
use crate::prefs::Preferences;
use crate::prompt::{OperatorPrompt, VersionChoice};

/// A host game version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl GameVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The host version this build of the add-on was validated against.
pub const BASELINE_GAME_VERSION: GameVersion = GameVersion::new(1, 3, 1);

/// Parse a host version string such as `"v1.3.1"` or `"1.3"`.
///
/// The leading `v` is optional; missing or unparseable components default
/// to zero.
pub fn parse_game_version(raw: &str) -> GameVersion {
    let mut parts = raw
        .trim()
        .trim_start_matches('v')
        .split('.')
        .map(|part| part.parse::<u32>().unwrap_or(0));

    GameVersion {
        major: parts.next().unwrap_or(0),
        minor: parts.next().unwrap_or(0),
        patch: parts.next().unwrap_or(0),
    }
}

/// Whether `current` is within the supported range for `baseline`.
///
/// Components compare lexicographically, major first: the check fails only
/// when the first differing component exceeds the baseline's.
pub fn is_game_version_supported(current: &GameVersion, baseline: &GameVersion) -> bool {
    if current.major != baseline.major {
        return current.major < baseline.major;
    }

    if current.minor != baseline.minor {
        return current.minor < baseline.minor;
    }

    current.patch <= baseline.patch
}

/// Result of evaluating the version gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOutcome {
    /// Whether loading should proceed at all.
    pub try_load: bool,
    /// Whether the host version failed the compatibility check. Loading may
    /// still proceed (degraded accuracy) if the operator consented.
    pub wrong_version: bool,
}

/// Evaluate the version gate for the given raw host version string.
///
/// When the version is unsupported, the operator is asked whether to load
/// anyway, unless the exact version string matches the persisted
/// "already warned" marker, in which case loading proceeds silently. The
/// marker is written by the caller after a successful degraded load, so
/// the operator is asked at most once per encountered version.
pub async fn evaluate_version_gate(
    current_raw: &str,
    baseline: &GameVersion,
    prefs: &dyn Preferences,
    prompt: &dyn OperatorPrompt,
) -> GateOutcome {
    let current = parse_game_version(current_raw);
    let wrong_version = !is_game_version_supported(&current, baseline);

    if !wrong_version {
        return GateOutcome {
            try_load: true,
            wrong_version: false,
        };
    }

    if prefs.get(PREF_GAME_VERSION).as_deref() == Some(current_raw) {
        return GateOutcome {
            try_load: true,
            wrong_version: true,
        };
    }

    let choice = prompt.confirm_incompatible_version(&current, baseline).await;

    GateOutcome {
        try_load: choice == VersionChoice::LoadAnyway,
        wrong_version: true,
    }
}
