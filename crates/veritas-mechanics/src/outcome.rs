//! What an action produced: rolls for the feed and events for the campaign log.

use serde::{Deserialize, Serialize};
use veritas_core::LogKind;

use crate::dice::RollResult;

/// A campaign-log event raised by an action, before it is attached to a
/// campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Category.
    pub kind: LogKind,
    /// Human-readable text.
    pub message: String,
}

impl LogEvent {
    /// Create an event.
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// One thing an action produced, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A roll for the recent-rolls feed.
    Roll(RollResult),
    /// A message for the campaign log.
    Event(LogEvent),
}

/// The ordered effects of one action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    /// Effects in order.
    pub effects: Vec<Effect>,
}

impl ActionOutcome {
    /// Record a roll.
    pub fn roll(&mut self, roll: RollResult) {
        self.effects.push(Effect::Roll(roll));
    }

    /// Record an event.
    pub fn event(&mut self, event: LogEvent) {
        self.effects.push(Effect::Event(event));
    }

    /// The rolls, in order.
    pub fn rolls(&self) -> impl Iterator<Item = &RollResult> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Roll(r) => Some(r),
            Effect::Event(_) => None,
        })
    }

    /// The events, in order.
    pub fn events(&self) -> impl Iterator<Item = &LogEvent> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Event(ev) => Some(ev),
            Effect::Roll(_) => None,
        })
    }
}
