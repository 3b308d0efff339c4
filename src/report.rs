//! Failure report assembly.
//!
//! When bootstrap fails, the operator gets a report with enough context to
//! reproduce: versions, entitlements, loaded modules, the live save string,
//! and the add-on's exported settings. Every section is best effort: when
//! a piece cannot be gathered, its failure is embedded in place, so the
//! report is never silently incomplete.

use std::error::Error;
use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::bootstrap::BootstrapError;
use crate::build_info::{BUILD_COMMIT, BUILD_DATE};
use crate::host::HostGame;
use crate::settings::Settings;

/// Reproduction context for a bootstrap failure (or an operator-initiated
/// "found a bug?" report, when `error` is absent).
#[derive(Debug, Clone)]
pub struct BugReport {
    pub generated_at: DateTime<Utc>,
    pub body: String,
}

impl BugReport {
    pub fn collect(
        host: &dyn HostGame,
        settings: &Settings,
        error: Option<&BootstrapError>,
    ) -> Self {
        let mut body = String::new();

        if let Some(error) = error {
            let _ = writeln!(body, "Message: {error}");

            let mut source = error.source();
            while let Some(cause) = source {
                let _ = writeln!(body, "Caused by: {cause}");
                source = cause.source();
            }

            body.push('\n');
        }

        let _ = writeln!(body, "Game version: {}", host.version());
        let _ = writeln!(
            body,
            "Simulator version: {} ({BUILD_COMMIT} {BUILD_DATE})",
            env!("CARGO_PKG_VERSION")
        );
        body.push('\n');

        let entitlements = host.enabled_entitlements();
        let entitlements = if entitlements.is_empty() {
            "None".to_string()
        } else {
            entitlements.join(", ")
        };
        let _ = writeln!(body, "Entitlements enabled: {entitlements}");
        body.push('\n');

        body.push_str("Module list:\n");
        for module in host.loaded_modules() {
            let _ = writeln!(body, " - {module}");
        }
        body.push('\n');

        body.push_str("Save string:\n");
        match host.generate_save_string() {
            Ok(save) => body.push_str(&save),
            Err(e) => {
                let _ = write!(body, "<save unavailable: {e}>");
            }
        }
        body.push_str("\n\n");

        body.push_str("Simulator settings:\n");
        match settings.export_string() {
            Ok(exported) => body.push_str(&exported),
            Err(e) => {
                let _ = write!(body, "<settings export failed: {e}>");
            }
        }
        body.push('\n');

        Self {
            generated_at: Utc::now(),
            body,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Bug report generated {}\n\n{}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.body
        )
    }
}
