//! Adversaries built by point-buy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::Attributes;
use crate::character::Resource;
use crate::error::CoreError;
use crate::formula::DiceFormula;
use crate::id::{AttackId, ThreatId};

/// A threat's discrete level, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ThreatLevel {
    /// Level 1.
    #[default]
    One,
    /// Level 2.
    Two,
    /// Level 3.
    Three,
    /// Level 4.
    Four,
    /// Level 5.
    Five,
}

impl ThreatLevel {
    /// All levels in ascending order.
    pub const ALL: [Self; 5] = [Self::One, Self::Two, Self::Three, Self::Four, Self::Five];

    /// Numeric level.
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    /// Attribute points available at this level.
    pub fn point_budget(self) -> u32 {
        match self {
            Self::One => 3,
            Self::Two => 5,
            Self::Three => 8,
            Self::Four => 12,
            Self::Five => 16,
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl From<ThreatLevel> for u8 {
    fn from(level: ThreatLevel) -> Self {
        level.number()
    }
}

impl TryFrom<u8> for ThreatLevel {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|l| l.number() == value)
            .ok_or_else(|| CoreError::invalid("threat level", value))
    }
}

/// Flat bonus a threat attack adds to its hit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HitBonus {
    /// +0.
    Zero,
    /// +5.
    #[default]
    Five,
    /// +10.
    Ten,
    /// +15.
    Fifteen,
}

impl HitBonus {
    /// The flat modifier.
    pub fn value(self) -> i32 {
        match self {
            Self::Zero => 0,
            Self::Five => 5,
            Self::Ten => 10,
            Self::Fifteen => 15,
        }
    }
}

impl From<HitBonus> for u8 {
    fn from(bonus: HitBonus) -> Self {
        bonus.value() as u8
    }
}

impl TryFrom<u8> for HitBonus {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            15 => Ok(Self::Fifteen),
            other => Err(CoreError::invalid("hit bonus", other)),
        }
    }
}

/// A free-form threat attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatAttack {
    /// Identifier.
    pub id: AttackId,
    /// Display name.
    pub name: String,
    /// Energy spent per use.
    pub cost: i32,
    /// Hit-check modifier.
    pub hit_bonus: HitBonus,
    /// Damage formula, rolled separately from the hit.
    #[serde(default)]
    pub damage: Option<DiceFormula>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ThreatAttack {
    /// An attack with a name, cost, and hit bonus.
    pub fn new(name: impl Into<String>, cost: i32, hit_bonus: HitBonus) -> Self {
        Self {
            id: AttackId::new(),
            name: name.into(),
            cost,
            hit_bonus,
            damage: None,
            description: None,
        }
    }

    /// Attach a damage formula.
    pub fn with_damage(mut self, damage: DiceFormula) -> Self {
        self.damage = Some(damage);
        self
    }
}

/// An NPC or adversary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threat {
    /// Identifier.
    pub id: ThreatId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Level, fixing the point budget and the derived-stat row.
    pub level: ThreatLevel,
    /// Attributes, each in `1..=5`. INT is stored but unused.
    pub attributes: Attributes,
    /// Hit points.
    pub hp: Resource,
    /// Energy.
    pub pe: Resource,
    /// Defense.
    pub defense: i32,
    /// Attacks.
    #[serde(default)]
    pub attacks: Vec<ThreatAttack>,
}

impl Threat {
    /// Look up an attack.
    pub fn attack(&self, id: AttackId) -> Option<&ThreatAttack> {
        self.attacks.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budgets_by_level() {
        let budgets: Vec<u32> = ThreatLevel::ALL.iter().map(|l| l.point_budget()).collect();
        assert_eq!(budgets, vec![3, 5, 8, 12, 16]);
    }

    #[test]
    fn level_from_number() {
        assert_eq!(ThreatLevel::try_from(3).unwrap(), ThreatLevel::Three);
        assert!(ThreatLevel::try_from(0).is_err());
        assert!(ThreatLevel::try_from(6).is_err());
    }

    #[test]
    fn hit_bonus_serde() {
        assert_eq!(serde_json::to_string(&HitBonus::Ten).unwrap(), "10");
        assert!(serde_json::from_str::<HitBonus>("3").is_err());
    }
}
