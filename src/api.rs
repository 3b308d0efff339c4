//! Public capability surface of the add-on.
//!
//! `Addon` owns the capture accumulator, the namespace opt-in registry, and
//! (after a successful load) the simulation model. The host wires its
//! registration surface through `attach`, content modules opt in through
//! `register_namespace`, and operator tooling drives `load`.

use std::time::Instant;

use crate::bootstrap::{bootstrap, BootstrapContext, BootstrapError};
use crate::capture::ContentCapture;
use crate::constants::PREF_GAME_VERSION;
use crate::host::{HostGame, RegistrationEvents};
use crate::model::{RulesProvider, SimGame};
use crate::namespace::NamespaceRegistry;
use crate::prefs::Preferences;
use crate::prompt::OperatorPrompt;
use crate::report::BugReport;
use crate::settings::Settings;
use crate::version::{evaluate_version_gate, BASELINE_GAME_VERSION};

/// How a load attempt ended.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Every bootstrap step succeeded; the model is available.
    Loaded,
    /// The operator declined to load an incompatible game version.
    Declined,
    /// A bootstrap step failed; the failure was reported to the operator.
    Failed(BootstrapError),
}

pub struct Addon {
    prefs: Box<dyn Preferences>,
    prompt: Box<dyn OperatorPrompt>,
    rules: Box<dyn RulesProvider>,
    capture: ContentCapture,
    namespaces: NamespaceRegistry,
    settings: Settings,
    model: Option<SimGame>,
    loaded: bool,
}

impl Addon {
    pub fn new(
        prefs: Box<dyn Preferences>,
        prompt: Box<dyn OperatorPrompt>,
        rules: Box<dyn RulesProvider>,
    ) -> Self {
        Self {
            prefs,
            prompt,
            rules,
            capture: ContentCapture::new(),
            namespaces: NamespaceRegistry::default(),
            settings: Settings::default(),
            model: None,
            loaded: false,
        }
    }

    /// Install the capture observers on the host's registration surface.
    /// Must happen before the host starts accepting module registrations.
    pub fn attach(&self, registrar: &mut dyn RegistrationEvents) {
        self.capture.attach(registrar);
    }

    /// True only after every bootstrap step has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Opt a content module's namespace in to capture filtering. Blank
    /// input is silently ignored.
    pub fn register_namespace(&mut self, namespace: &str) {
        self.namespaces.register(namespace);
    }

    /// Defensive copy of the opted-in namespaces.
    pub fn registered_namespaces(&self) -> Vec<String> {
        self.namespaces.snapshot()
    }

    pub fn import(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn export(&self) -> Settings {
        self.settings.clone()
    }

    /// The simulation model, once loaded.
    pub fn model(&self) -> Option<&SimGame> {
        self.model.as_ref()
    }

    /// Gate on version compatibility, then bootstrap the simulation model
    /// from the live game.
    ///
    /// A failed bootstrap is logged and reported to the operator; the
    /// loaded flag stays false and no model is reachable.
    pub async fn load(&mut self, host: &mut dyn HostGame) -> LoadOutcome {
        let current_raw = host.version();

        let gate = evaluate_version_gate(
            &current_raw,
            &BASELINE_GAME_VERSION,
            &*self.prefs,
            &*self.prompt,
        )
        .await;

        if !gate.try_load {
            log::warn!(
                "v{} not loaded: operator declined the incompatible game version {current_raw}",
                env!("CARGO_PKG_VERSION")
            );
            return LoadOutcome::Declined;
        }

        self.loaded = false;
        self.model = None;

        let started = Instant::now();
        self.capture.begin_reload();

        let result = bootstrap(BootstrapContext {
            host: &mut *host,
            prefs: &mut *self.prefs,
            prompt: &*self.prompt,
            rules: &*self.rules,
            capture: &self.capture,
            namespaces: &self.namespaces,
        })
        .await;

        self.capture.end_reload();

        match result {
            Ok(model) => {
                self.model = Some(model);
                self.loaded = true;

                if gate.wrong_version {
                    log::warn!(
                        "loaded against untested game version {current_raw}; simulation results may be inaccurate"
                    );
                    self.prefs.set(PREF_GAME_VERSION, &current_raw);
                }

                log::info!(
                    "initialised in {} ms [v{}]",
                    started.elapsed().as_millis(),
                    env!("CARGO_PKG_VERSION")
                );

                LoadOutcome::Loaded
            }
            Err(error) => {
                log::error!(
                    "v{} was not loaded: {error}",
                    env!("CARGO_PKG_VERSION")
                );

                let report = BugReport::collect(&*host, &self.settings, Some(&error));
                self.prompt.show_bug_report(&report).await;

                LoadOutcome::Failed(error)
            }
        }
    }
}
