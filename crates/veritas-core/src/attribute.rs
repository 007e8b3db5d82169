use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest value any attribute can reach.
pub const ATTRIBUTE_MAX: u32 = 5;

/// One of the six attribute axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeKey {
    /// Dexterity.
    #[serde(rename = "DES")]
    Des,
    /// Constitution.
    #[serde(rename = "CON")]
    Con,
    /// Intellect.
    #[serde(rename = "INT")]
    Int,
    /// Presence.
    #[serde(rename = "PRE")]
    Pre,
    /// Perception.
    #[serde(rename = "PER")]
    Per,
    /// Strength.
    #[serde(rename = "FOR")]
    For,
}

impl AttributeKey {
    /// All six attributes in sheet order.
    pub const ALL: [Self; 6] = [
        Self::Des,
        Self::Con,
        Self::Int,
        Self::Pre,
        Self::Per,
        Self::For,
    ];

    /// The five attributes a threat spends points on. INT is not part of threat point-buy.
    pub const THREAT: [Self; 5] = [Self::Des, Self::Con, Self::Pre, Self::Per, Self::For];

    /// The three-letter tag shown on the sheet.
    pub fn abbrev(self) -> &'static str {
        match self {
            Self::Des => "DES",
            Self::Con => "CON",
            Self::Int => "INT",
            Self::Pre => "PRE",
            Self::Per => "PER",
            Self::For => "FOR",
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// A full set of attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Dexterity (DES).
    #[serde(rename = "DES")]
    pub dexterity: u32,
    /// Constitution (CON).
    #[serde(rename = "CON")]
    pub constitution: u32,
    /// Intellect (INT).
    #[serde(rename = "INT")]
    pub intellect: u32,
    /// Presence (PRE).
    #[serde(rename = "PRE")]
    pub presence: u32,
    /// Perception (PER).
    #[serde(rename = "PER")]
    pub perception: u32,
    /// Strength (FOR).
    #[serde(rename = "FOR")]
    pub strength: u32,
}

impl Attributes {
    /// Every attribute set to the same value.
    pub fn uniform(value: u32) -> Self {
        Self {
            dexterity: value,
            constitution: value,
            intellect: value,
            presence: value,
            perception: value,
            strength: value,
        }
    }

    /// Read one attribute.
    pub fn get(&self, key: AttributeKey) -> u32 {
        match key {
            AttributeKey::Des => self.dexterity,
            AttributeKey::Con => self.constitution,
            AttributeKey::Int => self.intellect,
            AttributeKey::Pre => self.presence,
            AttributeKey::Per => self.perception,
            AttributeKey::For => self.strength,
        }
    }

    /// Mutable access to one attribute.
    pub fn get_mut(&mut self, key: AttributeKey) -> &mut u32 {
        match key {
            AttributeKey::Des => &mut self.dexterity,
            AttributeKey::Con => &mut self.constitution,
            AttributeKey::Int => &mut self.intellect,
            AttributeKey::Pre => &mut self.presence,
            AttributeKey::Per => &mut self.perception,
            AttributeKey::For => &mut self.strength,
        }
    }

    /// Overwrite one attribute.
    pub fn set(&mut self, key: AttributeKey, value: u32) {
        *self.get_mut(key) = value;
    }

    /// Iterate `(key, value)` pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, u32)> + '_ {
        AttributeKey::ALL.into_iter().map(|k| (k, self.get(k)))
    }

    /// Sum of all six values.
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, v)| v).sum()
    }

    /// Returns true if every attribute lies within `min..=max`.
    pub fn within(&self, min: u32, max: u32) -> bool {
        self.iter().all(|(_, v)| (min..=max).contains(&v))
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::uniform(1)
    }
}
