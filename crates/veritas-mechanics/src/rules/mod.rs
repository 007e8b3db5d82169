//! Fixed rule tables: derived stats, threat stats, and level rewards.
//!
//! Everything here is a pure function of its inputs. The job table lives in
//! [`jobs`].

pub mod jobs;

use serde::{Deserialize, Serialize};
use veritas_core::{AttributeKey, Attributes, PowerTier, Resource, Supplement, ThreatLevel};

/// Base courage for Slasher characters, before PRE.
pub const COURAGE_BASE: i32 = 10;

/// Resources and defense computed for a new character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    /// Hit points.
    pub hp: Resource,
    /// Sanity, enabled only for Base.
    pub san: Resource,
    /// Energy, disabled for Slasher.
    pub pe: Resource,
    /// Courage, enabled only for Slasher.
    pub courage: Resource,
    /// Base defense.
    pub defense: i32,
}

impl DerivedStats {
    /// Derive a character's starting resources. All current values start at max.
    pub fn compute(attributes: &Attributes, tier: PowerTier, supplement: Supplement) -> Self {
        let con = attr(attributes, AttributeKey::Con);
        let pre = attr(attributes, AttributeKey::Pre);
        let strength = attr(attributes, AttributeKey::For);

        let (hp, san, pe, defense) = match tier {
            PowerTier::Mortal => (con * 2 + 10, pre * 2 + 18, pre * 2 + 10, strength * 2 + 6),
            PowerTier::Heroic => (con * 2 + 20, pre * 2 + 30, pre * 2 + 20, strength * 2 + 8),
            PowerTier::Epic => (con * 3 + 30, pre * 3 + 50, pre * 3 + 30, strength * 3 + 10),
        };

        Self {
            hp: Resource::full(hp),
            san: toggled(san, supplement == Supplement::Base),
            pe: toggled(pe, supplement != Supplement::Slasher),
            courage: toggled(COURAGE_BASE + pre, supplement == Supplement::Slasher),
            defense,
        }
    }
}

/// Hit points, energy, and defense for a threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatStats {
    /// Hit points.
    pub hp: Resource,
    /// Energy.
    pub pe: Resource,
    /// Defense.
    pub defense: i32,
}

impl ThreatStats {
    /// Look up the level row and apply it to CON and PRE.
    pub fn compute(level: ThreatLevel, attributes: &Attributes) -> Self {
        let con = attr(attributes, AttributeKey::Con);
        let pre = attr(attributes, AttributeKey::Pre);

        let (hp, defense, pe) = match level {
            ThreatLevel::One => (con + 10, 16, pre + 4),
            ThreatLevel::Two => (con * 2 + 16, 14, pre * 2 + 6),
            ThreatLevel::Three => (con * 3 + 25, 12, pre * 3 + 10),
            ThreatLevel::Four => (con * 4 + 50, 10, pre * 4 + 14),
            ThreatLevel::Five => (con * 5 + 80, 8, pre * 5 + 16),
        };

        Self {
            hp: Resource::full(hp),
            pe: Resource::full(pe),
            defense,
        }
    }
}

/// The die sizes and point budgets granted on reaching a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelRewards {
    /// Attribute points to spend.
    pub attribute_points: u32,
    /// Skill points to spend.
    pub skill_points: u32,
    /// Sides of the hit point die, 0 for no roll.
    pub hp_die: u32,
    /// Sides of the sanity/energy die, 0 for no roll.
    pub resource_die: u32,
    /// Dice rolled for the sanity/energy gain.
    pub resource_dice: u32,
}

impl LevelRewards {
    /// Rewards for reaching `level`.
    pub fn for_level(level: u32) -> Self {
        let (attribute_points, skill_points) = match level {
            2 | 6 => (0, 1),
            4 => (1, 0),
            7 => (2, 0),
            9 => (3, 0),
            10 => (2, 2),
            _ => (0, 0),
        };
        let hp_die = match level {
            2 | 3 | 5 => 3,
            8 => 5,
            _ => 0,
        };
        let (resource_dice, resource_die) = match level {
            2 | 3 | 7 => (1, 6),
            9 => (2, 3),
            _ => (0, 0),
        };
        Self {
            attribute_points,
            skill_points,
            hp_die,
            resource_die,
            resource_dice,
        }
    }
}

fn attr(attributes: &Attributes, key: AttributeKey) -> i32 {
    attributes.get(key) as i32
}

fn toggled(max: i32, enabled: bool) -> Resource {
    if enabled {
        Resource::full(max)
    } else {
        Resource::disabled(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_con_pre(con: u32, pre: u32) -> Attributes {
        let mut attrs = Attributes::uniform(1);
        attrs.set(AttributeKey::Con, con);
        attrs.set(AttributeKey::Pre, pre);
        attrs
    }

    #[test]
    fn mortal_hp() {
        let stats = DerivedStats::compute(&with_con_pre(3, 1), PowerTier::Mortal, Supplement::Base);
        assert_eq!(stats.hp.max, 16);
        assert_eq!(stats.hp.current, 16);
    }

    #[test]
    fn heroic_hp() {
        let stats = DerivedStats::compute(&with_con_pre(3, 1), PowerTier::Heroic, Supplement::Base);
        assert_eq!(stats.hp.max, 26);
    }

    #[test]
    fn epic_row() {
        let mut attrs = with_con_pre(2, 4);
        attrs.set(AttributeKey::For, 5);
        let stats = DerivedStats::compute(&attrs, PowerTier::Epic, Supplement::Base);
        assert_eq!(stats.hp.max, 36);
        assert_eq!(stats.san.max, 62);
        assert_eq!(stats.pe.max, 42);
        assert_eq!(stats.defense, 25);
    }

    #[test]
    fn supplement_toggles_resources() {
        let attrs = with_con_pre(2, 3);
        let base = DerivedStats::compute(&attrs, PowerTier::Mortal, Supplement::Base);
        assert!(base.san.enabled && base.pe.enabled && !base.courage.enabled);

        let naruto = DerivedStats::compute(&attrs, PowerTier::Mortal, Supplement::Naruto);
        assert!(!naruto.san.enabled && naruto.pe.enabled);

        let slasher = DerivedStats::compute(&attrs, PowerTier::Mortal, Supplement::Slasher);
        assert!(!slasher.san.enabled && !slasher.pe.enabled && slasher.courage.enabled);
        assert_eq!(slasher.courage.max, 13);
    }

    #[test]
    fn threat_rows() {
        let attrs = with_con_pre(3, 2);
        let one = ThreatStats::compute(ThreatLevel::One, &attrs);
        assert_eq!((one.hp.max, one.defense, one.pe.max), (13, 16, 6));
        let five = ThreatStats::compute(ThreatLevel::Five, &attrs);
        assert_eq!((five.hp.max, five.defense, five.pe.max), (95, 8, 26));
    }

    #[test]
    fn reward_table() {
        let ten = LevelRewards::for_level(10);
        assert_eq!((ten.attribute_points, ten.skill_points), (2, 2));
        assert_eq!(ten.hp_die, 0);

        let nine = LevelRewards::for_level(9);
        assert_eq!((nine.resource_dice, nine.resource_die), (2, 3));

        let eight = LevelRewards::for_level(8);
        assert_eq!(eight.hp_die, 5);

        assert_eq!(LevelRewards::for_level(11), LevelRewards::default());
    }
}
