//! Threat point-buy and the rolls a threat makes.

use serde::{Deserialize, Serialize};
use veritas_core::attribute::ATTRIBUTE_MAX;
use veritas_core::{
    AttackId, AttributeKey, Attributes, Threat, ThreatAttack, ThreatId, ThreatLevel,
};

use crate::dice::{DiceSource, RollResult, attribute_check, formula_roll};
use crate::error::{MechError, MechResult};
use crate::rules::ThreatStats;

/// Lowest value a threat attribute can take.
pub const THREAT_ATTRIBUTE_MIN: u32 = 1;

/// A threat being built or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatDraft {
    id: ThreatId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    level: ThreatLevel,
    attributes: Attributes,
    attacks: Vec<ThreatAttack>,
    /// Hit points carried over from the threat being edited.
    #[serde(default)]
    current_hp: Option<i32>,
    /// Energy carried over from the threat being edited.
    #[serde(default)]
    current_pe: Option<i32>,
}

impl ThreatDraft {
    /// A new draft with every attribute at 1.
    pub fn new(name: impl Into<String>, level: ThreatLevel) -> Self {
        Self {
            id: ThreatId::new(),
            name: name.into(),
            description: String::new(),
            level,
            attributes: Attributes::uniform(THREAT_ATTRIBUTE_MIN),
            attacks: Vec::new(),
            current_hp: None,
            current_pe: None,
        }
    }

    /// Reopen an existing threat for editing. Damage and spent energy survive
    /// the edit.
    pub fn from_threat(threat: &Threat) -> Self {
        Self {
            id: threat.id,
            name: threat.name.clone(),
            description: threat.description.clone(),
            level: threat.level,
            attributes: threat.attributes,
            attacks: threat.attacks.clone(),
            current_hp: Some(threat.hp.current),
            current_pe: Some(threat.pe.current),
        }
    }

    /// Current level.
    pub fn level(&self) -> ThreatLevel {
        self.level
    }

    /// Current attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Points spent across the five threat attributes.
    pub fn spent(&self) -> u32 {
        AttributeKey::THREAT
            .iter()
            .map(|k| self.attributes.get(*k).saturating_sub(THREAT_ATTRIBUTE_MIN))
            .sum()
    }

    /// Points left in the level's budget.
    pub fn remaining(&self) -> u32 {
        self.level.point_budget().saturating_sub(self.spent())
    }

    /// Change level. Resets every attribute to 1.
    pub fn set_level(&mut self, level: ThreatLevel) {
        self.level = level;
        self.attributes = Attributes::uniform(THREAT_ATTRIBUTE_MIN);
    }

    /// Set `key` to `value`, rejecting the change outright if it leaves the
    /// `1..=5` range or overspends the budget.
    pub fn set(&mut self, key: AttributeKey, value: u32) -> MechResult<()> {
        if key == AttributeKey::Int {
            return Err(MechError::validation("threats do not use INT"));
        }
        if !(THREAT_ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value) {
            return Err(MechError::validation(format!(
                "{key} must be between {THREAT_ATTRIBUTE_MIN} and {ATTRIBUTE_MAX}"
            )));
        }
        let current = self.attributes.get(key);
        let cost = value.saturating_sub(current);
        if cost > self.remaining() {
            return Err(MechError::validation(format!(
                "raising {key} to {value} costs {cost}, only {} left",
                self.remaining()
            )));
        }
        self.attributes.set(key, value);
        Ok(())
    }

    /// Move `key` by `delta`.
    pub fn adjust(&mut self, key: AttributeKey, delta: i32) -> MechResult<()> {
        let value = self.attributes.get(key) as i64 + i64::from(delta);
        let value = u32::try_from(value)
            .map_err(|_| MechError::validation(format!("{key} cannot go below 1")))?;
        self.set(key, value)
    }

    /// Add an attack. Energy costs cannot be negative.
    pub fn add_attack(&mut self, attack: ThreatAttack) -> MechResult<()> {
        if attack.cost < 0 {
            return Err(MechError::validation(format!(
                "attack {} cannot cost {} energy",
                attack.name, attack.cost
            )));
        }
        self.attacks.push(attack);
        Ok(())
    }

    /// Remove an attack.
    pub fn remove_attack(&mut self, id: AttackId) -> MechResult<ThreatAttack> {
        let pos = self
            .attacks
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| MechError::NotFound(format!("attack {id}")))?;
        Ok(self.attacks.remove(pos))
    }

    /// Finish the draft, deriving hit points, energy, and defense.
    pub fn build(self) -> MechResult<Threat> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(MechError::validation("threat name is required"));
        }
        let mut stats = ThreatStats::compute(self.level, &self.attributes);
        if let Some(hp) = self.current_hp {
            stats.hp.current = hp.clamp(0, stats.hp.max);
        }
        if let Some(pe) = self.current_pe {
            stats.pe.current = pe.clamp(0, stats.pe.max);
        }
        Ok(Threat {
            id: self.id,
            name: name.to_string(),
            description: self.description,
            level: self.level,
            attributes: self.attributes,
            hp: stats.hp,
            pe: stats.pe,
            defense: stats.defense,
            attacks: self.attacks,
        })
    }
}

/// Roll a threat attribute check.
pub fn threat_attribute_test(
    threat: &Threat,
    key: AttributeKey,
    source: &mut dyn DiceSource,
) -> RollResult {
    attribute_check(
        threat.attributes.get(key),
        0,
        format!("{key} check (threat)"),
        threat.name.as_str(),
        source,
    )
}

/// Spend an attack's energy and roll to hit with a single d20 plus the hit bonus.
pub fn fire_attack(
    threat: &mut Threat,
    attack: AttackId,
    source: &mut dyn DiceSource,
) -> MechResult<RollResult> {
    let attack = threat
        .attack(attack)
        .cloned()
        .ok_or_else(|| MechError::NotFound(format!("attack {attack}")))?;
    if !threat.pe.can_afford(attack.cost) {
        return Err(MechError::InsufficientResource {
            resource: "Energy".to_string(),
            required: attack.cost,
            available: threat.pe.current,
        });
    }
    threat.pe.adjust(-attack.cost);

    let bonus = attack.hit_bonus.value();
    let label = if bonus == 0 {
        format!("Attack: {} (no modifier)", attack.name)
    } else {
        format!("Attack: {}", attack.name)
    };
    Ok(attribute_check(1, bonus, label, threat.name.as_str(), source))
}

/// Roll an attack's damage, if it has a formula.
pub fn attack_damage(
    threat: &Threat,
    attack: AttackId,
    source: &mut dyn DiceSource,
) -> MechResult<Option<RollResult>> {
    let attack = threat
        .attack(attack)
        .ok_or_else(|| MechError::NotFound(format!("attack {attack}")))?;
    Ok(attack.damage.map(|damage| {
        formula_roll(
            damage,
            format!("Damage: {}", attack.name),
            threat.name.as_str(),
            source,
        )
    }))
}

/// Deal damage to a threat. Returns true when it drops to 0 hit points.
pub fn damage_threat(threat: &mut Threat, amount: i32) -> bool {
    threat.hp.adjust(-amount.max(0));
    threat.hp.current == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use proptest::prelude::*;
    use veritas_core::{DiceFormula, HitBonus};

    #[test]
    fn level_three_budget() {
        let mut draft = ThreatDraft::new("Ghoul", ThreatLevel::Three);
        assert_eq!(draft.remaining(), 8);
        draft.set(AttributeKey::For, 5).unwrap();
        assert_eq!(draft.remaining(), 4);

        let before = draft.clone();
        assert!(draft.adjust(AttributeKey::Des, 5).is_err());
        assert_eq!(draft, before);

        draft.set(AttributeKey::Des, 5).unwrap();
        assert_eq!(draft.remaining(), 0);
        let before = draft.clone();
        assert!(draft.adjust(AttributeKey::Con, 1).is_err());
        assert_eq!(draft, before);
    }

    #[test]
    fn bounds_and_intellect() {
        let mut draft = ThreatDraft::new("Ghoul", ThreatLevel::Five);
        assert!(draft.set(AttributeKey::Con, 6).is_err());
        assert!(draft.adjust(AttributeKey::Con, -1).is_err());
        assert!(draft.set(AttributeKey::Int, 2).is_err());
        draft.set(AttributeKey::Con, 5).unwrap();
        draft.set(AttributeKey::Con, 2).unwrap();
        assert_eq!(draft.spent(), 1);
    }

    #[test]
    fn level_change_resets_attributes() {
        let mut draft = ThreatDraft::new("Ghoul", ThreatLevel::Two);
        draft.set(AttributeKey::Per, 4).unwrap();
        draft.set_level(ThreatLevel::Four);
        assert_eq!(draft.spent(), 0);
        assert_eq!(draft.remaining(), 12);
    }

    #[test]
    fn build_derives_stats() {
        let mut draft = ThreatDraft::new("Ghoul", ThreatLevel::Two);
        draft.set(AttributeKey::Con, 3).unwrap();
        draft.set(AttributeKey::Pre, 2).unwrap();
        let threat = draft.build().unwrap();
        assert_eq!(threat.hp.max, 22);
        assert_eq!(threat.hp.current, 22);
        assert_eq!(threat.pe.max, 10);
        assert_eq!(threat.defense, 14);
        assert_eq!(threat.attributes.get(AttributeKey::Int), 1);
    }

    fn armed(cost: i32, bonus: HitBonus) -> (Threat, AttackId) {
        let mut draft = ThreatDraft::new("Ghoul", ThreatLevel::One);
        let claw = ThreatAttack::new("Claw", cost, bonus).with_damage(DiceFormula::new(1, 6));
        let id = claw.id;
        draft.add_attack(claw).unwrap();
        (draft.build().unwrap(), id)
    }

    #[test]
    fn negative_attack_cost_is_rejected() {
        let mut draft = ThreatDraft::new("Ghoul", ThreatLevel::One);
        let drain = ThreatAttack::new("Drain", -3, HitBonus::Five);
        let err = draft.add_attack(drain).unwrap_err();
        insta::assert_snapshot!(err, @"attack Drain cannot cost -3 energy");
        assert!(draft.build().unwrap().attacks.is_empty());
    }

    #[test]
    fn editing_keeps_damage() {
        let (mut threat, claw) = armed(2, HitBonus::Five);
        damage_threat(&mut threat, 4);
        fire_attack(&mut threat, claw, &mut ScriptedDice::new([10])).unwrap();
        let (hp, pe) = (threat.hp.current, threat.pe.current);

        let mut draft = ThreatDraft::from_threat(&threat);
        draft.description = "Lurks in the sewers".to_string();
        let edited = draft.build().unwrap();
        assert_eq!(edited.hp.current, hp);
        assert_eq!(edited.pe.current, pe);
        assert_eq!(edited.hp.max, threat.hp.max);
    }

    #[test]
    fn edited_threat_is_clamped_to_new_maximum() {
        let mut draft = ThreatDraft::new("Ghoul", ThreatLevel::One);
        draft.set(AttributeKey::Con, 4).unwrap();
        let threat = draft.build().unwrap();
        assert_eq!(threat.hp.current, 14);

        let mut draft = ThreatDraft::from_threat(&threat);
        draft.set(AttributeKey::Con, 1).unwrap();
        let weaker = draft.build().unwrap();
        assert_eq!(weaker.hp.max, 11);
        assert_eq!(weaker.hp.current, 11);
    }

    #[test]
    fn attack_spends_energy_and_rolls_one_die() {
        let (mut threat, claw) = armed(2, HitBonus::Ten);
        let start = threat.pe.current;
        let hit = fire_attack(&mut threat, claw, &mut ScriptedDice::new([12, 19])).unwrap();
        assert_eq!(threat.pe.current, start - 2);
        assert_eq!(hit.dice, vec![12]);
        assert_eq!(hit.total, 22);
        assert_eq!(hit.label, "Attack: Claw");
        assert_eq!(hit.character_id, None);
    }

    #[test]
    fn attack_without_bonus_is_labelled() {
        let (mut threat, claw) = armed(0, HitBonus::Zero);
        let hit = fire_attack(&mut threat, claw, &mut ScriptedDice::new([7])).unwrap();
        assert_eq!(hit.label, "Attack: Claw (no modifier)");
    }

    #[test]
    fn attack_without_energy_is_rejected() {
        let (mut threat, claw) = armed(100, HitBonus::Five);
        let before = threat.clone();
        assert!(matches!(
            fire_attack(&mut threat, claw, &mut ScriptedDice::default()),
            Err(MechError::InsufficientResource { .. })
        ));
        assert_eq!(threat, before);
    }

    #[test]
    fn damage_roll() {
        let (threat, claw) = armed(0, HitBonus::Five);
        let dmg = attack_damage(&threat, claw, &mut ScriptedDice::new([4])).unwrap().unwrap();
        assert_eq!(dmg.label, "Damage: Claw");
        assert_eq!(dmg.total, 4);
    }

    #[test]
    fn threat_test_label() {
        let (threat, _) = armed(0, HitBonus::Five);
        let r = threat_attribute_test(&threat, AttributeKey::Pre, &mut ScriptedDice::new([9]));
        insta::assert_snapshot!(r.label, @"PRE check (threat)");
    }

    #[test]
    fn damage_to_zero_defeats() {
        let (mut threat, _) = armed(0, HitBonus::Five);
        assert!(!damage_threat(&mut threat, 3));
        assert!(damage_threat(&mut threat, 1000));
        assert_eq!(threat.hp.current, 0);
    }

    proptest! {
        #[test]
        fn spend_never_exceeds_budget(
            level in 1u8..=5,
            moves in prop::collection::vec((0usize..5, -3i32..=4), 0..40),
        ) {
            let level = ThreatLevel::try_from(level).unwrap();
            let mut draft = ThreatDraft::new("Ghoul", level);
            for (idx, delta) in moves {
                let _ = draft.adjust(AttributeKey::THREAT[idx], delta);
                prop_assert!(draft.spent() <= level.point_budget());
                prop_assert!(draft.attributes().within(1, 5));
            }
        }
    }
}
