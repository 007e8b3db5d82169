//! The fixed skill catalogue and training tiers.
//!
//! Skills are identified by [`SkillId`] rather than by display name, so job
//! grants and level-up spends can never match the wrong skill.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeKey;
use crate::error::CoreError;

/// A skill in the fixed catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum SkillId {
    Acrobatics,
    Grapple,
    Anthropology,
    Archaeology,
    Arts,
    Athletics,
    Riding,
    Science,
    Knowledge,
    Cryptography,
    Diplomacy,
    Law,
    Driving,
    Disguise,
    Search,
    Engineering,
    Listen,
    Forgery,
    Fortitude,
    Stealth,
    Geography,
    History,
    NativeLanguage,
    OtherLanguages,
    Intimidation,
    Intrusion,
    FastTalk,
    Blades,
    Brawl,
    Medicine,
    Aim,
    Swimming,
    Persuasion,
    Piloting,
    Psychology,
    FirstAid,
    Reflexes,
    Religion,
    Survival,
    Luck,
    Technology,
    Willpower,
}

impl SkillId {
    /// The whole catalogue in sheet order.
    pub const ALL: [Self; 42] = [
        Self::Acrobatics,
        Self::Grapple,
        Self::Anthropology,
        Self::Archaeology,
        Self::Arts,
        Self::Athletics,
        Self::Riding,
        Self::Science,
        Self::Knowledge,
        Self::Cryptography,
        Self::Diplomacy,
        Self::Law,
        Self::Driving,
        Self::Disguise,
        Self::Search,
        Self::Engineering,
        Self::Listen,
        Self::Forgery,
        Self::Fortitude,
        Self::Stealth,
        Self::Geography,
        Self::History,
        Self::NativeLanguage,
        Self::OtherLanguages,
        Self::Intimidation,
        Self::Intrusion,
        Self::FastTalk,
        Self::Blades,
        Self::Brawl,
        Self::Medicine,
        Self::Aim,
        Self::Swimming,
        Self::Persuasion,
        Self::Piloting,
        Self::Psychology,
        Self::FirstAid,
        Self::Reflexes,
        Self::Religion,
        Self::Survival,
        Self::Luck,
        Self::Technology,
        Self::Willpower,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Acrobatics => "Acrobatics",
            Self::Grapple => "Grapple",
            Self::Anthropology => "Anthropology",
            Self::Archaeology => "Archaeology",
            Self::Arts => "Arts",
            Self::Athletics => "Athletics",
            Self::Riding => "Riding",
            Self::Science => "Science",
            Self::Knowledge => "Knowledge",
            Self::Cryptography => "Cryptography",
            Self::Diplomacy => "Diplomacy",
            Self::Law => "Law",
            Self::Driving => "Driving",
            Self::Disguise => "Disguise",
            Self::Search => "Search",
            Self::Engineering => "Engineering",
            Self::Listen => "Listen",
            Self::Forgery => "Forgery",
            Self::Fortitude => "Fortitude",
            Self::Stealth => "Stealth",
            Self::Geography => "Geography",
            Self::History => "History",
            Self::NativeLanguage => "Native Language",
            Self::OtherLanguages => "Other Languages",
            Self::Intimidation => "Intimidation",
            Self::Intrusion => "Intrusion",
            Self::FastTalk => "Fast Talk",
            Self::Blades => "Blades",
            Self::Brawl => "Brawl",
            Self::Medicine => "Medicine",
            Self::Aim => "Aim",
            Self::Swimming => "Swimming",
            Self::Persuasion => "Persuasion",
            Self::Piloting => "Piloting",
            Self::Psychology => "Psychology",
            Self::FirstAid => "First Aid",
            Self::Reflexes => "Reflexes",
            Self::Religion => "Religion",
            Self::Survival => "Survival",
            Self::Luck => "Luck",
            Self::Technology => "Technology",
            Self::Willpower => "Willpower",
        }
    }

    /// Default (primary, secondary) attributes. The primary sizes the dice
    /// pool; the secondary is added to the roll.
    pub fn default_attributes(self) -> (AttributeKey, AttributeKey) {
        use AttributeKey::{Con, Des, For, Int, Per, Pre};
        match self {
            Self::Acrobatics | Self::Swimming => (Des, Con),
            Self::Grapple | Self::Blades | Self::Brawl => (For, Des),
            Self::Anthropology | Self::Forgery => (Int, Per),
            Self::Archaeology
            | Self::Arts
            | Self::Science
            | Self::Knowledge
            | Self::Cryptography
            | Self::Law
            | Self::Engineering
            | Self::Geography
            | Self::History
            | Self::NativeLanguage
            | Self::OtherLanguages
            | Self::Psychology
            | Self::Religion
            | Self::Survival => (Int, Pre),
            Self::Athletics => (Con, Des),
            Self::Riding => (Des, Pre),
            Self::Diplomacy
            | Self::Disguise
            | Self::FastTalk
            | Self::Persuasion
            | Self::Willpower => (Pre, Int),
            Self::Driving | Self::Stealth | Self::Intrusion | Self::FirstAid => (Des, Int),
            Self::Search | Self::Listen => (Per, Pre),
            Self::Fortitude => (Con, Pre),
            Self::Intimidation => (Pre, For),
            Self::Medicine | Self::Piloting | Self::Technology => (Int, Des),
            Self::Aim | Self::Reflexes => (Des, Per),
            Self::Luck => (Pre, Per),
        }
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A skill's discrete proficiency, added to the roll as a flat modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TrainingTier {
    /// +0.
    #[default]
    Untrained,
    /// +5.
    Trained,
    /// +10.
    Expert,
    /// +15.
    Master,
}

impl TrainingTier {
    /// The flat bonus this tier adds.
    pub fn bonus(self) -> i32 {
        match self {
            Self::Untrained => 0,
            Self::Trained => 5,
            Self::Expert => 10,
            Self::Master => 15,
        }
    }

    /// The next tier up, or `None` at the top.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Untrained => Some(Self::Trained),
            Self::Trained => Some(Self::Expert),
            Self::Expert => Some(Self::Master),
            Self::Master => None,
        }
    }
}

impl From<TrainingTier> for u8 {
    fn from(tier: TrainingTier) -> Self {
        tier.bonus() as u8
    }
}

impl TryFrom<u8> for TrainingTier {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Untrained),
            5 => Ok(Self::Trained),
            10 => Ok(Self::Expert),
            15 => Ok(Self::Master),
            other => Err(CoreError::invalid("training tier", other)),
        }
    }
}
