//! The one-shot bootstrap pipeline.
//!
//! Builds the simulation model from the live game in strictly sequential
//! steps; every step is a hard dependency of the next, and any failure
//! aborts the whole pipeline with the step recorded in the error. No step
//! mutates the live game's persistent state except the restored gamemode
//! substitution inside save projection.

use std::fmt;

use thiserror::Error;

use crate::capture::ContentCapture;
use crate::error::SimError;
use crate::host::{HostGame, SaveReader};
use crate::model::sim_game::SetupArgs;
use crate::model::{ClassRegistry, RulesProvider, SimGame};
use crate::namespace::{filter_data_packages, filter_skills, NamespaceRegistry};
use crate::prefs::Preferences;
use crate::project::project_save;
use crate::prompt::OperatorPrompt;
use crate::reconcile::reconcile_gamemode;

/// The fallible pipeline steps, for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStep {
    RulesFetch,
    ModelSetup,
    SaveProjection,
    SaveDecode,
}

impl fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RulesFetch => "rules fetch",
            Self::ModelSetup => "model setup",
            Self::SaveProjection => "save projection",
            Self::SaveDecode => "save decode",
        };
        f.write_str(name)
    }
}

/// Aggregate bootstrap failure: the step that failed and why.
#[derive(Debug, Error)]
#[error("bootstrap failed during {step}")]
pub struct BootstrapError {
    pub step: BootstrapStep,
    #[source]
    pub source: SimError,
}

fn at(step: BootstrapStep) -> impl FnOnce(SimError) -> BootstrapError {
    move |source| BootstrapError { step, source }
}

/// Everything the pipeline needs, injected by the caller.
pub struct BootstrapContext<'a> {
    pub host: &'a mut dyn HostGame,
    pub prefs: &'a mut dyn Preferences,
    pub prompt: &'a dyn OperatorPrompt,
    pub rules: &'a dyn RulesProvider,
    pub capture: &'a ContentCapture,
    pub namespaces: &'a NamespaceRegistry,
}

/// Run the pipeline and produce a fully-initialized model.
///
/// On failure no model escapes; the caller decides how to surface the
/// error. The capture accumulator is drained here regardless; records are
/// consumed once per session and never leak into the next attempt.
pub async fn bootstrap(ctx: BootstrapContext<'_>) -> Result<SimGame, BootstrapError> {
    let classes = ClassRegistry::bootstrap();
    let mut model = SimGame::new(classes);

    let rules = ctx
        .rules
        .fetch()
        .await
        .map_err(at(BootstrapStep::RulesFetch))?;

    // Point-in-time snapshot: opt-ins arriving after this line are dropped
    // for the session.
    let allowed = ctx.namespaces.snapshot();
    let log = ctx.capture.take();
    let data_packages = filter_data_packages(log.data_packages, &allowed);
    let skills = filter_skills(log.skills, &allowed);

    let current_gamemode_id = ctx.host.current_gamemode().id;
    let args = SetupArgs {
        data_packages,
        skills,
        modded_namespaces: ctx
            .host
            .registered_namespaces()
            .into_iter()
            .filter(|namespace| namespace.is_modded)
            .collect(),
        gamemodes: ctx.host.gamemodes(),
        current_gamemode_id,
        areas: ctx.host.area_catalog(),
    };
    model
        .setup(&rules, args)
        .map_err(at(BootstrapStep::ModelSetup))?;

    let recognized = reconcile_gamemode(&model, &*ctx.host, ctx.prefs, ctx.prompt).await;

    let save = project_save(ctx.host, recognized).map_err(at(BootstrapStep::SaveProjection))?;

    let reader =
        SaveReader::from_save_string(save.as_str()).map_err(at(BootstrapStep::SaveDecode))?;
    model.decode(&reader).map_err(at(BootstrapStep::SaveDecode))?;

    model.on_load();
    model.reset_to_blank_state();

    Ok(model)
}
