//! Dice sources, pools, and rolling.
//!
//! The engine never reaches for a global RNG. Every roll draws from a
//! [`DiceSource`] handed in by the caller: a seeded [`StdRng`] for
//! reproducible sessions, [`ThreadRng`] for casual play, or [`ScriptedDice`]
//! to replay exact faces in tests.

pub mod check;
pub mod pool;
pub mod roll;

pub use check::{attribute_check, formula_roll, modified_roll, notice};
pub use pool::{DicePool, Keep, PoolRoll};
pub use roll::{RollKind, RollResult};

use rand::Rng;
use rand::rngs::{StdRng, ThreadRng};
use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Three-sided die.
    D3,
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D3 => 3,
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// The die with the given number of sides, using a named variant when one exists.
    pub fn from_sides(sides: u32) -> Self {
        match sides {
            3 => Self::D3,
            4 => Self::D4,
            6 => Self::D6,
            8 => Self::D8,
            10 => Self::D10,
            12 => Self::D12,
            20 => Self::D20,
            100 => Self::D100,
            n => Self::Custom(n.max(1)),
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Anything that can produce uniform die faces.
pub trait DiceSource {
    /// Roll one die with `sides` faces, returning a value in `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl DiceSource for StdRng {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }
}

impl DiceSource for ThreadRng {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }
}

/// A deterministic source that replays a fixed sequence of faces, cycling
/// when exhausted. Faces are clamped into `1..=sides` for the die being
/// rolled; an empty script always rolls 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: Vec<u32>,
    cursor: usize,
}

impl ScriptedDice {
    /// Script the given faces.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of faces drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self, sides: u32) -> u32 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face.clamp(1, sides.max(1))
    }
}
