//! Save projection.
//!
//! Produces the canonical save the simulation model decodes. When the live
//! game runs a mode the model does not recognize, the serialization happens
//! under a temporary substitution to the default mode; the live game's own
//! state is restored before this function returns, error or not.

use crate::constants::DEFAULT_GAMEMODE_ID;
use crate::error::SimError;
use crate::host::{CanonicalSave, HostGame};

/// Serialize the live game to a canonical save.
///
/// `gamemode_recognized` is the reconciler's verdict on the live mode. A
/// serialization failure from the host propagates: bootstrap must abort
/// rather than continue with a partial save.
pub fn project_save(
    host: &mut dyn HostGame,
    gamemode_recognized: bool,
) -> Result<CanonicalSave, SimError> {
    if gamemode_recognized {
        return Ok(CanonicalSave::new(host.generate_save_string()?));
    }

    let original = host.current_gamemode().id;

    host.set_current_gamemode(DEFAULT_GAMEMODE_ID)?;
    let projected = host.generate_save_string();
    host.set_current_gamemode(&original)?;

    Ok(CanonicalSave::new(projected?))
}
