//! Damage and healing on character resources.

use veritas_core::{Character, LogKind, ResourceKind};

use crate::outcome::LogEvent;

/// The before/after of one resource adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    /// Which resource changed.
    pub resource: ResourceKind,
    /// Value before.
    pub old: i32,
    /// Value after, clamped to `0..=max`.
    pub new: i32,
    /// Audit message for the campaign log.
    pub event: LogEvent,
}

/// Add `delta` to one of the character's resources, clamped to `0..=max`.
///
/// Disabled resources are adjusted like any other; `enabled` only controls
/// whether the sheet shows them.
pub fn adjust_resource(
    character: &mut Character,
    resource: ResourceKind,
    delta: i32,
) -> Adjustment {
    let label = character.resource_label(resource);
    let track = character.resource_mut(resource);
    let old = track.adjust(delta);
    let new = track.current;

    let verb = if delta > 0 { "Recovered" } else { "Lost" };
    let kind = if delta < 0 { LogKind::Damage } else { LogKind::Heal };
    let message = format!("{verb} {} {label} ({old} → {new})", delta.unsigned_abs());
    tracing::debug!(character = %character.id, ?resource, old, new, "resource adjusted");

    Adjustment {
        resource,
        old,
        new,
        event: LogEvent::new(kind, message),
    }
}
