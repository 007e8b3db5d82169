//! Rolls and resource spends a character makes from their sheet.

use veritas_core::{
    AbilityId, AttributeKey, Character, ItemId, LogKind, ResourceKind, Skill, SkillId, Supplement,
};

use crate::dice::{DiceSource, Die, RollResult, attribute_check, formula_roll, modified_roll};
use crate::error::{MechError, MechResult};
use crate::outcome::{ActionOutcome, LogEvent};
use crate::sheet::track::adjust_resource;

/// Roll a bare attribute check.
pub fn attribute_test(
    character: &Character,
    key: AttributeKey,
    source: &mut dyn DiceSource,
) -> RollResult {
    attribute_check(
        character.attributes.get(key),
        0,
        format!("{key} check"),
        character.name.as_str(),
        source,
    )
    .by(character.id)
}

/// Roll a skill: the primary attribute sizes the pool, the secondary
/// attribute plus training is the modifier.
pub fn skill_check(
    character: &Character,
    skill: SkillId,
    source: &mut dyn DiceSource,
) -> MechResult<RollResult> {
    let entry = character
        .skill(skill)
        .ok_or_else(|| MechError::NotFound(format!("skill {skill}")))?;
    Ok(skill_roll(character, entry, format!("Skill: {skill}"), source))
}

fn skill_roll(
    character: &Character,
    skill: &Skill,
    label: String,
    source: &mut dyn DiceSource,
) -> RollResult {
    let pool = character.attributes.get(skill.primary);
    let modifier = character.attributes.get(skill.secondary) as i32 + skill.training.bonus();
    attribute_check(pool, modifier, label, character.name.as_str(), source).by(character.id)
}

/// An unarmed strike: 1d3 plus FOR.
pub fn punch(character: &Character, source: &mut dyn DiceSource) -> RollResult {
    modified_roll(
        Die::D3,
        character.attributes.get(AttributeKey::For) as i32,
        "Punch (1d3 + FOR)",
        character.name.as_str(),
        source,
    )
    .by(character.id)
}

/// Activate an ability.
///
/// When energy is enabled the cost must be affordable and is then spent.
/// An ability with a damage formula rolls it; one without logs its use.
pub fn use_ability(
    character: &mut Character,
    ability: AbilityId,
    source: &mut dyn DiceSource,
) -> MechResult<ActionOutcome> {
    let ability = character
        .ability(ability)
        .cloned()
        .ok_or_else(|| MechError::NotFound(format!("ability {ability}")))?;

    if character.pe.enabled && !character.pe.can_afford(ability.cost) {
        return Err(MechError::InsufficientResource {
            resource: character.resource_label(ResourceKind::Energy).to_string(),
            required: ability.cost,
            available: character.pe.current,
        });
    }

    let label = if character.supplement == Supplement::Naruto {
        "Technique"
    } else {
        "Ability"
    };
    let mut outcome = ActionOutcome::default();
    match ability.damage {
        Some(damage) => outcome.roll(
            formula_roll(
                damage,
                format!("{label}: {}", ability.name),
                character.name.as_str(),
                source,
            )
            .by(character.id),
        ),
        None => outcome.event(LogEvent::new(
            LogKind::Info,
            format!("Used {label}: {}", ability.name),
        )),
    }

    if character.pe.enabled && ability.cost != 0 {
        let spent = adjust_resource(character, ResourceKind::Energy, -ability.cost);
        outcome.event(spent.event);
    }
    Ok(outcome)
}

/// Attack with an inventory weapon.
///
/// Firearms spend ammunition first and roll an Aim check to hit; any weapon
/// with a damage formula then rolls damage.
pub fn attack_with(
    character: &mut Character,
    item: ItemId,
    source: &mut dyn DiceSource,
) -> MechResult<ActionOutcome> {
    let weapon = character
        .item(item)
        .cloned()
        .ok_or_else(|| MechError::NotFound(format!("item {item}")))?;
    let mut outcome = ActionOutcome::default();

    if weapon.is_firearm() {
        let cost = weapon.shot_cost();
        let loaded = weapon.ammo.unwrap_or(0);
        if loaded < cost {
            return Err(MechError::InsufficientResource {
                resource: "ammo".to_string(),
                required: cost as i32,
                available: loaded as i32,
            });
        }
        if let Some(stored) = character.item_mut(item) {
            stored.ammo = Some(loaded - cost);
        }
        outcome.event(LogEvent::new(
            LogKind::Info,
            format!("Fired {} (spent {cost} ammo)", weapon.name),
        ));
        tracing::debug!(item = %weapon.name, remaining = loaded - cost, "ammo spent");

        if let Some(aim) = character.skill(SkillId::Aim).copied() {
            let label = format!("Shot with {} (Aim)", weapon.name);
            outcome.roll(skill_roll(character, &aim, label, source));
        }
    }

    if let Some(damage) = weapon.damage {
        outcome.roll(
            formula_roll(
                damage,
                format!("Damage: {}", weapon.name),
                character.name.as_str(),
                source,
            )
            .by(character.id),
        );
    }
    Ok(outcome)
}

/// Change which attributes a skill rolls with.
pub fn remap_skill(
    character: &mut Character,
    skill: SkillId,
    primary: AttributeKey,
    secondary: AttributeKey,
) -> MechResult<()> {
    let entry = character
        .skill_mut(skill)
        .ok_or_else(|| MechError::NotFound(format!("skill {skill}")))?;
    entry.primary = primary;
    entry.secondary = secondary;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{RollKind, ScriptedDice};
    use crate::outcome::Effect;
    use crate::sheet::loadout::{add_ability, add_item};
    use crate::sheet::tests::sample_character;
    use veritas_core::{Ability, DiceFormula, Item, TrainingTier};

    #[test]
    fn attribute_test_label() {
        let c = sample_character(Supplement::Base);
        let r = attribute_test(&c, AttributeKey::Per, &mut ScriptedDice::new([11, 4]));
        assert_eq!(r.label, "PER check");
        assert_eq!(r.kept, 11);
        assert_eq!(r.character_id, Some(c.id));
        assert_eq!(r.actor, "Ana");
    }

    #[test]
    fn skill_check_uses_both_attributes_and_training() {
        let mut c = sample_character(Supplement::Base);
        c.attributes.set(AttributeKey::Des, 3);
        c.attributes.set(AttributeKey::Per, 4);
        let r = skill_check(&c, SkillId::Aim, &mut ScriptedDice::new([5, 12, 9])).unwrap();
        assert_eq!(r.dice.len(), 3);
        assert_eq!(r.modifier, 4 + TrainingTier::Trained.bonus());
        assert_eq!(r.total, 12 + 9);
        assert_eq!(r.label, "Skill: Aim");
    }

    #[test]
    fn remapped_skill_rolls_new_attributes() {
        let mut c = sample_character(Supplement::Base);
        c.attributes.set(AttributeKey::For, 4);
        remap_skill(&mut c, SkillId::Luck, AttributeKey::For, AttributeKey::Int).unwrap();
        let r = skill_check(&c, SkillId::Luck, &mut ScriptedDice::new([3])).unwrap();
        assert_eq!(r.dice.len(), 4);
        assert_eq!(r.modifier, 2);
    }

    #[test]
    fn punch_adds_strength() {
        let mut c = sample_character(Supplement::Base);
        c.attributes.set(AttributeKey::For, 3);
        let r = punch(&c, &mut ScriptedDice::new([2]));
        assert_eq!(r.dice, vec![2]);
        assert_eq!(r.total, 5);
        insta::assert_snapshot!(r.summary(), @"Rolled Punch (1d3 + FOR): 5 [2] +3");
    }

    #[test]
    fn empty_firearm_is_rejected_untouched() {
        let mut c = sample_character(Supplement::Base);
        let mut pistol = Item::firearm("Pistol", DiceFormula::new(2, 6), 12);
        pistol.ammo = Some(0);
        let id = pistol.id;
        add_item(&mut c, pistol);
        let before = c.clone();

        let err = attack_with(&mut c, id, &mut ScriptedDice::new([10])).unwrap_err();
        assert!(matches!(
            err,
            MechError::InsufficientResource { required: 1, available: 0, .. }
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn firing_spends_ammo_then_rolls_hit_and_damage() {
        let mut c = sample_character(Supplement::Base);
        let mut rifle = Item::firearm("Rifle", DiceFormula::new(2, 8), 6);
        rifle.ammo_cost = Some(2);
        let id = rifle.id;
        add_item(&mut c, rifle);

        let outcome = attack_with(&mut c, id, &mut ScriptedDice::new([14, 3, 5, 7])).unwrap();
        assert_eq!(c.item(id).unwrap().ammo, Some(4));

        let [Effect::Event(fired), Effect::Roll(hit), Effect::Roll(damage)] =
            outcome.effects.as_slice()
        else {
            panic!("unexpected effects: {:?}", outcome.effects);
        };
        insta::assert_snapshot!(fired.message, @"Fired Rifle (spent 2 ammo)");
        assert_eq!(hit.label, "Shot with Rifle (Aim)");
        assert_eq!(hit.kind, RollKind::Check);
        assert_eq!(hit.dice, vec![14, 3]);
        assert_eq!(damage.label, "Damage: Rifle");
        assert_eq!(damage.total, 12);
    }

    #[test]
    fn melee_only_rolls_damage() {
        let mut c = sample_character(Supplement::Base);
        let knife = Item::melee("Knife", DiceFormula::new(1, 4));
        let id = knife.id;
        add_item(&mut c, knife);
        let outcome = attack_with(&mut c, id, &mut ScriptedDice::new([3])).unwrap();
        let rolls: Vec<_> = outcome.rolls().collect();
        assert_eq!(rolls.len(), 1);
        assert_eq!(rolls[0].kind, RollKind::Formula);
        assert_eq!(outcome.events().count(), 0);
    }

    #[test]
    fn ability_needs_energy() {
        let mut c = sample_character(Supplement::Naruto);
        let jutsu = Ability::new("Fireball", c.pe.current + 1);
        let id = jutsu.id;
        add_ability(&mut c, jutsu).unwrap();
        let before = c.clone();

        let err = use_ability(&mut c, id, &mut ScriptedDice::default()).unwrap_err();
        let MechError::InsufficientResource { resource, .. } = err else {
            panic!("expected an insufficient resource error");
        };
        assert_eq!(resource, "Chakra");
        assert_eq!(c, before);
    }

    #[test]
    fn technique_with_damage() {
        let mut c = sample_character(Supplement::Naruto);
        let start = c.pe.current;
        let jutsu = Ability::new("Fireball", 4).with_damage(DiceFormula::new(3, 6));
        let id = jutsu.id;
        add_ability(&mut c, jutsu).unwrap();

        let outcome = use_ability(&mut c, id, &mut ScriptedDice::new([6, 6, 6])).unwrap();
        assert_eq!(c.pe.current, start - 4);
        let roll = outcome.rolls().next().unwrap();
        assert_eq!(roll.label, "Technique: Fireball");
        assert_eq!(roll.total, 18);
        let spent = outcome.events().next().unwrap();
        assert_eq!(spent.kind, LogKind::Damage);
        assert!(spent.message.starts_with("Lost 4 Chakra"));
    }

    #[test]
    fn ability_without_damage_logs_use() {
        let mut c = sample_character(Supplement::Base);
        let ability = Ability::new("Rally", 2);
        let id = ability.id;
        add_ability(&mut c, ability).unwrap();
        let outcome = use_ability(&mut c, id, &mut ScriptedDice::default()).unwrap();
        let messages: Vec<_> = outcome.events().map(|e| e.message.as_str()).collect();
        assert_eq!(messages[0], "Used Ability: Rally");
        assert!(messages[1].starts_with("Lost 2 Energy"));
    }

    #[test]
    fn disabled_energy_is_not_spent() {
        let mut c = sample_character(Supplement::Slasher);
        let ability = Ability::new("Hide", 50);
        let id = ability.id;
        add_ability(&mut c, ability).unwrap();
        let before = c.pe;
        let outcome = use_ability(&mut c, id, &mut ScriptedDice::default()).unwrap();
        assert_eq!(c.pe, before);
        assert_eq!(outcome.events().count(), 1);
    }
}
