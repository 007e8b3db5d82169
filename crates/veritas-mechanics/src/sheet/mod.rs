//! Character creation and everything done to a sheet afterwards.
//!
//! Creation runs once: a [`CreationDraft`] collects point-buy attributes, a
//! [`NewCharacter`] request carries the rest of the choices, and
//! [`create_character`] derives stats and applies job training. The
//! submodules cover resource tracks, inventory and loadout math, and the
//! rolls a sheet can make.

pub mod action;
pub mod loadout;
pub mod track;

pub use action::{attack_with, attribute_test, punch, remap_skill, skill_check, use_ability};
pub use loadout::{
    ENCUMBRANCE_LIMIT, add_ability, add_bloodline, add_item, movement_speed, remove_ability,
    remove_bloodline, remove_item, toggle_equipped, total_defense, total_weight,
};
pub use track::{Adjustment, adjust_resource};

use serde::{Deserialize, Serialize};
use veritas_core::attribute::ATTRIBUTE_MAX;
use veritas_core::{
    AttributeKey, Attributes, Character, CharacterId, Defense, Narrative, PowerTier, Skill,
    Supplement, UserId,
};

use crate::error::{MechError, MechResult};
use crate::rules::DerivedStats;
use crate::rules::jobs::grant_training;

/// Free attribute points at creation.
pub const CREATION_POINTS: u32 = 3;
/// Attribute total of every finished point-buy.
pub const CREATION_TOTAL: u32 = AttributeKey::ALL.len() as u32 + CREATION_POINTS;
/// Bloodline ability slots for Naruto characters.
pub const NARUTO_BLOODLINE_SLOTS: u32 = 3;
/// Job recorded for Slasher characters.
pub const SLASHER_JOB: &str = "Survivor";
/// Variant recorded for Slasher characters.
pub const SLASHER_VARIANT: &str = "N/A";

/// Attribute point-buy during creation. Every attribute starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationDraft {
    attributes: Attributes,
    points: u32,
}

impl Default for CreationDraft {
    fn default() -> Self {
        Self {
            attributes: Attributes::uniform(1),
            points: CREATION_POINTS,
        }
    }
}

impl CreationDraft {
    /// A fresh draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current attribute values.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Unspent points.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Spend a point on `key`.
    pub fn raise(&mut self, key: AttributeKey) -> MechResult<()> {
        if self.points == 0 {
            return Err(MechError::validation("no attribute points left"));
        }
        let value = self.attributes.get_mut(key);
        if *value >= ATTRIBUTE_MAX {
            return Err(MechError::validation(format!(
                "{key} is already at {ATTRIBUTE_MAX}"
            )));
        }
        *value += 1;
        self.points -= 1;
        Ok(())
    }

    /// Lower `key` by one and refund a point.
    pub fn lower(&mut self, key: AttributeKey) -> MechResult<()> {
        let value = self.attributes.get_mut(key);
        if *value == 0 {
            return Err(MechError::validation(format!("{key} is already at 0")));
        }
        *value -= 1;
        self.points += 1;
        Ok(())
    }

    /// Close the point-buy. Every point must be spent, no more and no less.
    pub fn finish(self) -> MechResult<Attributes> {
        match self.points {
            0 => Ok(self.attributes),
            1 => Err(MechError::validation("1 attribute point left to spend")),
            n => Err(MechError::validation(format!(
                "{n} attribute points left to spend"
            ))),
        }
    }
}

/// Everything chosen in the creation wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCharacter {
    /// Owning player.
    pub player_id: UserId,
    /// Supplement.
    pub supplement: Supplement,
    /// Character name.
    pub name: String,
    /// Background.
    pub narrative: Narrative,
    /// Power tier.
    pub power_tier: PowerTier,
    /// Final attributes.
    pub attributes: Attributes,
    /// Job name. Ignored for Slasher.
    pub job: String,
    /// Job variant. Ignored for Slasher.
    pub variant: String,
}

impl NewCharacter {
    /// A request with default attributes, Mortal tier, and no job.
    ///
    /// The default attributes leave the creation points unspent, so the
    /// request only passes [`create_character`] once attributes are set.
    pub fn new(player_id: UserId, supplement: Supplement, name: impl Into<String>) -> Self {
        Self {
            player_id,
            supplement,
            name: name.into(),
            narrative: Narrative::default(),
            power_tier: PowerTier::Mortal,
            attributes: Attributes::default(),
            job: String::new(),
            variant: String::new(),
        }
    }

    /// Set the job and variant.
    pub fn with_job(mut self, job: impl Into<String>, variant: impl Into<String>) -> Self {
        self.job = job.into();
        self.variant = variant.into();
        self
    }

    /// Take the attributes from a finished point-buy.
    pub fn with_draft(mut self, draft: CreationDraft) -> MechResult<Self> {
        self.attributes = draft.finish()?;
        Ok(self)
    }

    /// Set the attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the power tier.
    pub fn with_power_tier(mut self, tier: PowerTier) -> Self {
        self.power_tier = tier;
        self
    }

    /// Set the background.
    pub fn with_narrative(mut self, narrative: Narrative) -> Self {
        self.narrative = narrative;
        self
    }
}

/// A freshly created character plus anything left for the player to decide.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedCharacter {
    /// The new character.
    pub character: Character,
    /// Free skill choices granted by the job that the caller must resolve.
    pub pending_choices: u32,
}

/// Build a level 1 character from a creation request.
pub fn create_character(request: NewCharacter) -> MechResult<CreatedCharacter> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(MechError::validation("character name is required"));
    }
    if !request.attributes.within(0, ATTRIBUTE_MAX) {
        return Err(MechError::validation(format!(
            "attributes must be between 0 and {ATTRIBUTE_MAX}"
        )));
    }
    let total = request.attributes.total();
    if total != CREATION_TOTAL {
        return Err(MechError::validation(format!(
            "attributes must total {CREATION_TOTAL}, got {total}"
        )));
    }

    let mut skills = Skill::catalogue();
    let (job, variant, pending_choices) = if request.supplement == Supplement::Slasher {
        (SLASHER_JOB.to_string(), SLASHER_VARIANT.to_string(), 0)
    } else {
        let grant = grant_training(&mut skills, &request.job, &request.variant)?;
        (request.job, request.variant, grant.pending_choices)
    };

    let stats = DerivedStats::compute(&request.attributes, request.power_tier, request.supplement);
    let bloodline_slots = if request.supplement == Supplement::Naruto {
        NARUTO_BLOODLINE_SLOTS
    } else {
        0
    };

    let character = Character {
        id: CharacterId::new(),
        player_id: request.player_id,
        supplement: request.supplement,
        name: name.to_string(),
        narrative: request.narrative,
        attributes: request.attributes,
        skills,
        level: 1,
        hp: stats.hp,
        san: stats.san,
        pe: stats.pe,
        courage: stats.courage,
        defense: Defense {
            base: stats.defense,
            bonus: 0,
        },
        job,
        variant,
        power_tier: request.power_tier,
        inventory: Vec::new(),
        abilities: Vec::new(),
        bloodline_abilities: Vec::new(),
        bloodline_slots,
    };
    tracing::info!(
        character = %character.id,
        name = %character.name,
        supplement = %character.supplement,
        "character created"
    );

    Ok(CreatedCharacter {
        character,
        pending_choices,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use veritas_core::TrainingTier;

    /// DES 1, PRE 0, everything else 2.
    pub(crate) fn sample_character(supplement: Supplement) -> Character {
        let mut draft = CreationDraft::new();
        draft.lower(AttributeKey::Pre).unwrap();
        for key in [AttributeKey::Con, AttributeKey::Int, AttributeKey::Per, AttributeKey::For] {
            draft.raise(key).unwrap();
        }
        let request = NewCharacter::new(UserId::new(), supplement, "Ana")
            .with_job("Lawman", "Investigator")
            .with_draft(draft)
            .unwrap();
        create_character(request).unwrap().character
    }

    fn spent_draft() -> CreationDraft {
        let mut draft = CreationDraft::new();
        for key in [AttributeKey::Des, AttributeKey::Con, AttributeKey::For] {
            draft.raise(key).unwrap();
        }
        draft
    }

    #[test]
    fn draft_point_buy() {
        let mut draft = CreationDraft::new();
        draft.raise(AttributeKey::Des).unwrap();
        draft.raise(AttributeKey::Des).unwrap();
        draft.raise(AttributeKey::Con).unwrap();
        assert_eq!(draft.points(), 0);
        assert!(draft.raise(AttributeKey::For).is_err());

        draft.lower(AttributeKey::Int).unwrap();
        assert_eq!(draft.attributes().get(AttributeKey::Int), 0);
        assert!(draft.lower(AttributeKey::Int).is_err());
        draft.raise(AttributeKey::Des).unwrap();
        assert_eq!(draft.attributes().get(AttributeKey::Des), 4);
    }

    #[test]
    fn draft_ceiling() {
        let mut draft = CreationDraft::new();
        draft.lower(AttributeKey::Int).unwrap();
        draft.lower(AttributeKey::Per).unwrap();
        for _ in 0..4 {
            draft.raise(AttributeKey::For).unwrap();
        }
        let err = draft.raise(AttributeKey::For).unwrap_err();
        assert!(matches!(err, MechError::Validation(_)));
        assert_eq!(draft.points(), 1);
    }

    #[test]
    fn draft_must_spend_every_point() {
        let mut draft = CreationDraft::new();
        draft.raise(AttributeKey::Des).unwrap();
        let err = draft.finish().unwrap_err();
        insta::assert_snapshot!(err, @"2 attribute points left to spend");

        let request = NewCharacter::new(UserId::new(), Supplement::Base, "Ana")
            .with_job("Hunter", "Fisher")
            .with_draft(draft);
        assert!(matches!(request, Err(MechError::Validation(_))));

        draft.raise(AttributeKey::Des).unwrap();
        draft.raise(AttributeKey::Des).unwrap();
        assert_eq!(draft.finish().unwrap().get(AttributeKey::Des), 4);
    }

    #[test]
    fn lowered_points_must_be_spent_too() {
        let mut draft = spent_draft();
        draft.lower(AttributeKey::Int).unwrap();
        draft.lower(AttributeKey::Per).unwrap();
        assert_eq!(draft.points(), 2);
        assert!(draft.finish().is_err());
    }

    #[test]
    fn creation_checks_the_point_total() {
        let unspent = NewCharacter::new(UserId::new(), Supplement::Base, "Ana")
            .with_job("Hunter", "Fisher");
        let err = create_character(unspent).unwrap_err();
        insta::assert_snapshot!(err, @"attributes must total 9, got 6");

        let mut lavish = Attributes::default();
        lavish.set(AttributeKey::For, 5);
        let overspent = NewCharacter::new(UserId::new(), Supplement::Base, "Ana")
            .with_job("Hunter", "Fisher")
            .with_attributes(lavish);
        assert!(create_character(overspent).is_err());

        let request = NewCharacter::new(UserId::new(), Supplement::Base, "Ana")
            .with_job("Hunter", "Fisher")
            .with_draft(spent_draft())
            .unwrap();
        assert_eq!(create_character(request).unwrap().character.attributes.total(), 9);
    }

    #[test]
    fn base_character() {
        let c = sample_character(Supplement::Base);
        assert_eq!(c.level, 1);
        assert_eq!(c.hp.max, 14);
        assert_eq!(c.defense.base, 10);
        assert!(c.san.enabled);
        assert_eq!(c.bloodline_slots, 0);
        let aim = c.skill(veritas_core::SkillId::Aim).unwrap();
        assert_eq!(aim.training, TrainingTier::Trained);
    }

    #[test]
    fn slasher_has_no_job() {
        let request = NewCharacter::new(UserId::new(), Supplement::Slasher, "Max")
            .with_job("Lawman", "Doctor")
            .with_draft(spent_draft())
            .unwrap();
        let c = create_character(request).unwrap().character;
        assert_eq!(c.job, SLASHER_JOB);
        assert_eq!(c.variant, SLASHER_VARIANT);
        assert!(c.courage.enabled);
        assert_eq!(c.courage.max, 11);
        assert!(c.skills.iter().all(|s| s.training == TrainingTier::Untrained));
    }

    #[test]
    fn naruto_gets_slots() {
        let c = sample_character(Supplement::Naruto);
        assert_eq!(c.bloodline_slots, NARUTO_BLOODLINE_SLOTS);
        assert!(c.bloodline_abilities.is_empty());
    }

    #[test]
    fn rejects_bad_requests() {
        let blank = NewCharacter::new(UserId::new(), Supplement::Base, "  ")
            .with_job("Hunter", "Fisher")
            .with_draft(spent_draft())
            .unwrap();
        assert!(create_character(blank).is_err());

        let strong = NewCharacter::new(UserId::new(), Supplement::Base, "Ana")
            .with_job("Hunter", "Fisher")
            .with_attributes(Attributes::uniform(6));
        assert!(create_character(strong).is_err());

        let jobless = NewCharacter::new(UserId::new(), Supplement::Naruto, "Ana")
            .with_draft(spent_draft())
            .unwrap();
        assert!(create_character(jobless).is_err());
    }

    #[test]
    fn specialist_leaves_a_choice() {
        let request = NewCharacter::new(UserId::new(), Supplement::Base, "Ana")
            .with_job("Military", "Specialist")
            .with_draft(spent_draft())
            .unwrap();
        assert_eq!(create_character(request).unwrap().pending_choices, 1);
    }
}
