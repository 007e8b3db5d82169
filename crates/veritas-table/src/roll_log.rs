//! The bounded recent-rolls feed.

use std::collections::VecDeque;

use veritas_core::CharacterId;
use veritas_mechanics::RollResult;

/// Recent rolls, oldest first. Pushing past capacity drops the oldest roll.
#[derive(Debug, Clone)]
pub struct RollLog {
    entries: VecDeque<RollResult>,
    capacity: usize,
}

impl RollLog {
    /// An empty log holding at most `capacity` rolls (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a roll.
    pub fn push(&mut self, roll: RollResult) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(roll);
    }

    /// All rolls, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &RollResult> {
        self.entries.iter()
    }

    /// The most recent roll.
    pub fn latest(&self) -> Option<&RollResult> {
        self.entries.back()
    }

    /// The most recent roll made by a character, matched by id or by actor name.
    pub fn latest_for(&self, character: CharacterId, name: &str) -> Option<&RollResult> {
        self.entries
            .iter()
            .rev()
            .find(|r| r.character_id == Some(character) || r.actor == name)
    }

    /// Maximum number of rolls kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of rolls held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
