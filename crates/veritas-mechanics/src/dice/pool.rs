//! Dice pool construction and rolling.

use serde::{Deserialize, Serialize};

use super::{DiceSource, Die};

/// Which value a pool roll keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keep {
    /// The single highest face.
    Highest,
    /// The single lowest face.
    Lowest,
    /// The sum of every face.
    Sum,
}

/// A collection of dice to be rolled together.
#[derive(Debug, Clone, Default)]
pub struct DicePool {
    /// The dice in this pool.
    pub dice: Vec<Die>,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self { dice: Vec::new() }
    }

    /// Add `count` dice of the given type.
    pub fn add(mut self, die: Die, count: u32) -> Self {
        self.dice.extend(std::iter::repeat_n(die, count as usize));
        self
    }

    /// Returns how many dice are in the pool.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Roll all dice in the pool, in order.
    pub fn roll(&self, source: &mut dyn DiceSource) -> PoolRoll {
        let faces = self
            .dice
            .iter()
            .map(|die| source.roll_die(die.sides()))
            .collect();
        PoolRoll { faces }
    }
}

/// The faces produced by rolling a [`DicePool`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolRoll {
    /// Faces in roll order.
    pub faces: Vec<u32>,
}

impl PoolRoll {
    /// Sum of all faces.
    pub fn total(&self) -> u32 {
        self.faces.iter().sum()
    }

    /// The highest face, or 0 if empty.
    pub fn highest(&self) -> u32 {
        self.faces.iter().copied().max().unwrap_or(0)
    }

    /// The lowest face, or 0 if empty.
    pub fn lowest(&self) -> u32 {
        self.faces.iter().copied().min().unwrap_or(0)
    }

    /// The value selected by `rule`.
    pub fn keep(&self, rule: Keep) -> u32 {
        match rule {
            Keep::Highest => self.highest(),
            Keep::Lowest => self.lowest(),
            Keep::Sum => self.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn empty_pool() {
        let pool = DicePool::new();
        assert_eq!(pool.count(), 0);
        assert!(pool.is_empty());
        assert_eq!(pool.roll(&mut ScriptedDice::new([5])).keep(Keep::Highest), 0);
    }

    #[test]
    fn add_dice() {
        let pool = DicePool::new().add(Die::D20, 2).add(Die::D6, 3);
        assert_eq!(pool.count(), 5);
        assert!(!pool.is_empty());
    }

    #[test]
    fn keep_rules() {
        let pool = DicePool::new().add(Die::D6, 3);
        let roll = pool.roll(&mut ScriptedDice::new([3, 6, 1]));
        assert_eq!(roll.faces, vec![3, 6, 1]);
        assert_eq!(roll.keep(Keep::Highest), 6);
        assert_eq!(roll.keep(Keep::Lowest), 1);
        assert_eq!(roll.keep(Keep::Sum), 10);
    }
}
