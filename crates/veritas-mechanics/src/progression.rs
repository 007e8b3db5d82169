//! The level-up state machine.
//!
//! A [`LevelUp`] works on a pending copy of the character and walks
//! `Roll -> Attributes -> Skills -> Committed`, skipping any step whose budget
//! is zero. The live character is only replaced by what [`LevelUp::commit`]
//! returns.

use serde::{Deserialize, Serialize};
use veritas_core::attribute::ATTRIBUTE_MAX;
use veritas_core::{AttributeKey, Character, SkillId, Supplement};

use crate::dice::{DiceSource, RollResult, notice};
use crate::error::{MechError, MechResult};
use crate::rules::LevelRewards;

/// Where a level-up currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelUpStep {
    /// Roll hit point and resource growth.
    Roll,
    /// Spend attribute points.
    Attributes,
    /// Spend skill points.
    Skills,
    /// Done; the pending character has been handed back.
    Committed,
}

/// What the roll step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRolls {
    /// Added to hit point max and current.
    pub hp_gain: i32,
    /// Added to sanity and energy max and current.
    pub resource_gain: i32,
}

/// An in-progress level-up.
#[derive(Debug, Clone)]
pub struct LevelUp {
    original: Character,
    pending: Character,
    rewards: LevelRewards,
    step: LevelUpStep,
    attribute_points: u32,
    skill_points: u32,
    rolls: Option<LevelRolls>,
}

impl LevelUp {
    /// Start levelling `character` up by one level.
    pub fn begin(character: &Character) -> MechResult<Self> {
        if character.supplement == Supplement::Slasher {
            return Err(MechError::validation("Slasher characters do not level up"));
        }
        let mut pending = character.clone();
        pending.level += 1;
        let rewards = LevelRewards::for_level(pending.level);
        tracing::debug!(
            character = %character.id,
            level = pending.level,
            ?rewards,
            "level-up started"
        );

        Ok(Self {
            original: character.clone(),
            pending,
            rewards,
            step: LevelUpStep::Roll,
            attribute_points: rewards.attribute_points,
            skill_points: rewards.skill_points,
            rolls: None,
        })
    }

    /// Current step.
    pub fn step(&self) -> LevelUpStep {
        self.step
    }

    /// The character as it was when the level-up began.
    pub fn original(&self) -> &Character {
        &self.original
    }

    /// The character as it will be after committing.
    pub fn pending(&self) -> &Character {
        &self.pending
    }

    /// Unspent attribute points.
    pub fn attribute_points(&self) -> u32 {
        self.attribute_points
    }

    /// Unspent skill points.
    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    /// The roll step's results, once rolled.
    pub fn rolls(&self) -> Option<LevelRolls> {
        self.rolls
    }

    /// Perform the roll step. Allowed exactly once.
    pub fn roll(&mut self, source: &mut dyn DiceSource) -> MechResult<LevelRolls> {
        self.expect_step(LevelUpStep::Roll)?;
        if self.rolls.is_some() {
            return Err(MechError::validation("level-up dice were already rolled"));
        }

        let hp_gain = die(source, self.rewards.hp_die);
        let resource_gain = (0..self.rewards.resource_dice)
            .map(|_| die(source, self.rewards.resource_die))
            .sum();
        self.pending.hp.grow(hp_gain);
        self.pending.san.grow(resource_gain);
        self.pending.pe.grow(resource_gain);

        let rolls = LevelRolls {
            hp_gain,
            resource_gain,
        };
        self.rolls = Some(rolls);
        Ok(rolls)
    }

    /// Move to the next step with a budget. Returns the new step, or `None`
    /// when nothing is left but [`LevelUp::commit`].
    pub fn advance(&mut self) -> MechResult<Option<LevelUpStep>> {
        let next = match self.step {
            LevelUpStep::Roll => {
                if self.rolls.is_none() {
                    return Err(MechError::validation("roll before continuing"));
                }
                if self.attribute_points > 0 {
                    Some(LevelUpStep::Attributes)
                } else if self.skill_points > 0 {
                    Some(LevelUpStep::Skills)
                } else {
                    None
                }
            }
            LevelUpStep::Attributes => {
                if self.attribute_points > 0 {
                    return Err(MechError::validation(format!(
                        "{} attribute points left to spend",
                        self.attribute_points
                    )));
                }
                (self.skill_points > 0).then_some(LevelUpStep::Skills)
            }
            LevelUpStep::Skills => None,
            LevelUpStep::Committed => return Err(committed()),
        };
        if let Some(step) = next {
            self.step = step;
        }
        Ok(next)
    }

    /// Spend an attribute point on `key`.
    pub fn raise_attribute(&mut self, key: AttributeKey) -> MechResult<()> {
        self.expect_step(LevelUpStep::Attributes)?;
        if self.attribute_points == 0 {
            return Err(MechError::validation("no attribute points left"));
        }
        let value = self.pending.attributes.get_mut(key);
        if *value >= ATTRIBUTE_MAX {
            return Err(MechError::validation(format!(
                "{key} is already at {ATTRIBUTE_MAX}"
            )));
        }
        *value += 1;
        self.attribute_points -= 1;
        Ok(())
    }

    /// Undo a point spent on `key` during this level-up.
    pub fn lower_attribute(&mut self, key: AttributeKey) -> MechResult<()> {
        self.expect_step(LevelUpStep::Attributes)?;
        let floor = self.original.attributes.get(key);
        let value = self.pending.attributes.get_mut(key);
        if *value <= floor {
            return Err(MechError::validation(format!(
                "{key} cannot go below {floor}"
            )));
        }
        *value -= 1;
        self.attribute_points += 1;
        Ok(())
    }

    /// Spend a skill point to raise `skill` one training tier.
    pub fn train_skill(&mut self, skill: SkillId) -> MechResult<()> {
        self.expect_step(LevelUpStep::Skills)?;
        if self.skill_points == 0 {
            return Err(MechError::validation("no skill points left"));
        }
        let entry = self
            .pending
            .skill_mut(skill)
            .ok_or_else(|| MechError::NotFound(format!("skill {skill}")))?;
        let next = entry
            .training
            .next()
            .ok_or_else(|| MechError::validation(format!("{skill} is already mastered")))?;
        entry.training = next;
        self.skill_points -= 1;
        Ok(())
    }

    /// Finish the level-up. Returns the new character and a roll-log notice.
    pub fn commit(&mut self) -> MechResult<(Character, RollResult)> {
        if self.step == LevelUpStep::Committed {
            return Err(committed());
        }
        if self.rolls.is_none() {
            return Err(MechError::validation("roll before committing"));
        }
        if self.attribute_points > 0 || self.skill_points > 0 {
            return Err(MechError::validation(format!(
                "unspent points: {} attribute, {} skill",
                self.attribute_points, self.skill_points
            )));
        }

        self.step = LevelUpStep::Committed;
        let character = self.pending.clone();
        let announcement = notice(
            format!("Reached level {}", character.level),
            character.name.as_str(),
        )
        .by(character.id);
        tracing::info!(character = %character.id, level = character.level, "level-up committed");
        Ok((character, announcement))
    }

    fn expect_step(&self, step: LevelUpStep) -> MechResult<()> {
        if self.step == step {
            Ok(())
        } else {
            Err(MechError::validation(format!(
                "level-up is at {:?}, not {step:?}",
                self.step
            )))
        }
    }
}

fn committed() -> MechError {
    MechError::validation("level-up already committed")
}

fn die(source: &mut dyn DiceSource, sides: u32) -> i32 {
    if sides == 0 {
        0
    } else {
        source.roll_die(sides) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{RollKind, ScriptedDice};
    use crate::sheet::tests::sample_character;
    use proptest::prelude::*;
    use veritas_core::TrainingTier;

    fn at_level(level: u32) -> Character {
        let mut c = sample_character(Supplement::Base);
        c.level = level;
        c
    }

    #[test]
    fn level_two_rolls_and_trains() {
        let c = at_level(1);
        let mut up = LevelUp::begin(&c).unwrap();
        assert_eq!(up.pending().level, 2);
        assert_eq!((up.attribute_points(), up.skill_points()), (0, 1));

        let rolls = up.roll(&mut ScriptedDice::new([2, 5])).unwrap();
        assert_eq!(rolls, LevelRolls { hp_gain: 2, resource_gain: 5 });
        assert_eq!(up.pending().hp.max, c.hp.max + 2);
        assert_eq!(up.pending().san.max, c.san.max + 5);
        assert_eq!(up.pending().pe.current, c.pe.current + 5);

        assert_eq!(up.advance().unwrap(), Some(LevelUpStep::Skills));
        up.train_skill(SkillId::Aim).unwrap();
        assert!(up.train_skill(SkillId::Luck).is_err());

        let (next, announcement) = up.commit().unwrap();
        assert_eq!(next.level, 2);
        assert_eq!(next.skill(SkillId::Aim).unwrap().training, TrainingTier::Expert);
        assert_eq!(announcement.kind, RollKind::Notice);
        insta::assert_snapshot!(announcement.summary(), @"Reached level 2");
        assert_eq!(up.step(), LevelUpStep::Committed);
        assert!(up.commit().is_err());
    }

    #[test]
    fn level_nine_sums_two_d3() {
        let mut up = LevelUp::begin(&at_level(8)).unwrap();
        let rolls = up.roll(&mut ScriptedDice::new([3, 2])).unwrap();
        assert_eq!(rolls.hp_gain, 0);
        assert_eq!(rolls.resource_gain, 5);
    }

    #[test]
    fn roll_is_required_and_happens_once() {
        let mut up = LevelUp::begin(&at_level(3)).unwrap();
        assert!(up.advance().is_err());
        assert!(up.commit().is_err());
        up.roll(&mut ScriptedDice::new([1])).unwrap();
        assert!(up.roll(&mut ScriptedDice::new([1])).is_err());
    }

    #[test]
    fn zero_budget_level_skips_straight_to_commit() {
        let mut up = LevelUp::begin(&at_level(4)).unwrap();
        up.roll(&mut ScriptedDice::new([3])).unwrap();
        assert_eq!(up.advance().unwrap(), None);
        assert_eq!(up.step(), LevelUpStep::Roll);
        up.commit().unwrap();
    }

    #[test]
    fn level_ten_needs_all_points_spent() {
        let mut c = at_level(9);
        c.attributes.set(AttributeKey::Des, 5);
        let mut up = LevelUp::begin(&c).unwrap();
        up.roll(&mut ScriptedDice::default()).unwrap();
        assert_eq!(up.advance().unwrap(), Some(LevelUpStep::Attributes));

        assert!(up.raise_attribute(AttributeKey::Des).is_err());
        up.raise_attribute(AttributeKey::Con).unwrap();
        assert!(up.advance().is_err());
        assert!(up.commit().is_err());
        up.raise_attribute(AttributeKey::Con).unwrap();
        assert!(up.raise_attribute(AttributeKey::Pre).is_err());

        assert_eq!(up.advance().unwrap(), Some(LevelUpStep::Skills));
        up.train_skill(SkillId::Stealth).unwrap();
        assert!(up.commit().is_err());
        up.train_skill(SkillId::Stealth).unwrap();
        assert_eq!(up.advance().unwrap(), None);

        let (next, _) = up.commit().unwrap();
        assert_eq!(next.attributes.get(AttributeKey::Con), 4);
        assert_eq!(next.skill(SkillId::Stealth).unwrap().training, TrainingTier::Expert);
    }

    #[test]
    fn refund_stops_at_previous_value() {
        let mut up = LevelUp::begin(&at_level(3)).unwrap();
        up.roll(&mut ScriptedDice::default()).unwrap();
        up.advance().unwrap();
        assert_eq!(up.step(), LevelUpStep::Attributes);
        up.raise_attribute(AttributeKey::Per).unwrap();
        up.lower_attribute(AttributeKey::Per).unwrap();
        assert_eq!(up.attribute_points(), 1);
        assert!(up.lower_attribute(AttributeKey::Per).is_err());
        assert_eq!(up.pending().attributes.get(AttributeKey::Per), 2);
    }

    #[test]
    fn slasher_cannot_level() {
        let c = sample_character(Supplement::Slasher);
        assert!(matches!(LevelUp::begin(&c), Err(MechError::Validation(_))));
    }

    #[test]
    fn original_character_is_untouched() {
        let c = at_level(1);
        let mut up = LevelUp::begin(&c).unwrap();
        up.roll(&mut ScriptedDice::new([3, 6])).unwrap();
        assert_eq!(c.level, 1);
        assert_ne!(up.pending().hp.max, c.hp.max);
    }

    proptest! {
        #[test]
        fn gains_stay_within_die_sizes(level in 1u32..=12, seed in any::<u64>()) {
            use rand::SeedableRng;
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let mut up = LevelUp::begin(&at_level(level)).unwrap();
            let rewards = LevelRewards::for_level(level + 1);
            let rolls = up.roll(&mut rng).unwrap();
            prop_assert!(rolls.hp_gain >= 0 && rolls.hp_gain <= rewards.hp_die as i32);
            let max_resource = (rewards.resource_dice * rewards.resource_die) as i32;
            prop_assert!(rolls.resource_gain >= 0 && rolls.resource_gain <= max_resource);
        }
    }
}
