//! Inventory, abilities, and the numbers derived from what a character carries.

use veritas_core::{
    Ability, AbilityId, AttributeKey, BloodlineAbility, Character, Item, ItemCategory, ItemId,
};

use crate::error::{MechError, MechResult};

/// Carried weight, in kilograms, above which movement is halved.
pub const ENCUMBRANCE_LIMIT: f64 = 20.0;

/// Base defense plus equipped protection plus the manual bonus.
pub fn total_defense(character: &Character) -> i32 {
    let equipped: i32 = character
        .inventory
        .iter()
        .filter(|i| i.equipped && i.category == ItemCategory::Protection)
        .filter_map(|i| i.defense_bonus)
        .sum();
    character.defense.base + equipped + character.defense.bonus
}

/// Sum of unit weight times quantity over the whole inventory.
pub fn total_weight(character: &Character) -> f64 {
    character.inventory.iter().map(Item::stack_weight).sum()
}

/// Movement speed from DES, halved when over [`ENCUMBRANCE_LIMIT`].
pub fn movement_speed(character: &Character) -> f64 {
    let base = match character.attributes.get(AttributeKey::Des) {
        0..=2 => 7.0,
        3..=4 => 8.0,
        _ => 9.0,
    };
    if total_weight(character) > ENCUMBRANCE_LIMIT {
        base / 2.0
    } else {
        base
    }
}

/// Flip an item's equipped flag. Returns the new state.
pub fn toggle_equipped(character: &mut Character, id: ItemId) -> MechResult<bool> {
    let item = character
        .item_mut(id)
        .ok_or_else(|| MechError::NotFound(format!("item {id}")))?;
    item.equipped = !item.equipped;
    Ok(item.equipped)
}

/// Add an item to the inventory.
pub fn add_item(character: &mut Character, item: Item) {
    character.inventory.push(item);
}

/// Remove an item from the inventory.
pub fn remove_item(character: &mut Character, item: ItemId) -> MechResult<Item> {
    let pos = character
        .inventory
        .iter()
        .position(|i| i.id == item)
        .ok_or_else(|| MechError::NotFound(format!("item {item}")))?;
    Ok(character.inventory.remove(pos))
}

/// Add an ability. Energy costs cannot be negative.
pub fn add_ability(character: &mut Character, ability: Ability) -> MechResult<()> {
    if ability.cost < 0 {
        return Err(MechError::validation(format!(
            "ability {} cannot cost {} energy",
            ability.name, ability.cost
        )));
    }
    character.abilities.push(ability);
    Ok(())
}

/// Remove an ability.
pub fn remove_ability(character: &mut Character, ability: AbilityId) -> MechResult<Ability> {
    let pos = character
        .abilities
        .iter()
        .position(|a| a.id == ability)
        .ok_or_else(|| MechError::NotFound(format!("ability {ability}")))?;
    Ok(character.abilities.remove(pos))
}

/// Add a bloodline ability if a slot is free.
pub fn add_bloodline(character: &mut Character, ability: BloodlineAbility) -> MechResult<()> {
    if character.bloodline_abilities.len() >= character.bloodline_slots as usize {
        return Err(MechError::validation(format!(
            "all {} bloodline slots are in use",
            character.bloodline_slots
        )));
    }
    character.bloodline_abilities.push(ability);
    Ok(())
}

/// Remove a bloodline ability.
pub fn remove_bloodline(
    character: &mut Character,
    ability: AbilityId,
) -> MechResult<BloodlineAbility> {
    let pos = character
        .bloodline_abilities
        .iter()
        .position(|a| a.id == ability)
        .ok_or_else(|| MechError::NotFound(format!("bloodline ability {ability}")))?;
    Ok(character.bloodline_abilities.remove(pos))
}
