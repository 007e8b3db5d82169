//! Read-only snapshot polled by the live-stream overlay.

use veritas_core::{Character, CharacterId};
use veritas_mechanics::RollResult;

use crate::error::TableResult;
use crate::ports::Store;
use crate::roll_log::RollLog;

/// What the overlay shows on one poll.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSnapshot {
    /// The character on screen.
    pub character: Character,
    /// That character's most recent roll.
    pub last_roll: Option<RollResult>,
    /// How long the overlay should wait before polling again.
    pub refresh_ms: u64,
}

/// Build a snapshot for `character`, or for the first stored character when
/// none is given. `Ok(None)` means there is nothing to show yet.
pub fn snapshot<S: Store>(
    store: &S,
    rolls: &RollLog,
    character: Option<CharacterId>,
    refresh_ms: u64,
) -> TableResult<Option<StreamSnapshot>> {
    let character = match character {
        Some(id) => store.get::<Character>(id)?,
        None => match store.get_all::<Character>()?.into_iter().next() {
            Some(first) => first,
            None => return Ok(None),
        },
    };
    let last_roll = rolls.latest_for(character.id, &character.name).cloned();
    Ok(Some(StreamSnapshot {
        character,
        last_roll,
        refresh_ms,
    }))
}
