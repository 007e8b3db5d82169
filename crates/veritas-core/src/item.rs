//! Inventory items.

use serde::{Deserialize, Serialize};

use crate::formula::DiceFormula;
use crate::id::ItemId;

/// Broad category of an item. Only equipped protection adds to defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Armor, shields, and protective clothing.
    Protection,
    /// Anything used to attack.
    Weapon,
    /// Everything else.
    Gear,
}

/// Finer item kind within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Ranged weapon that spends ammunition.
    Firearm,
    /// Hand-to-hand weapon.
    Melee,
    /// Shield.
    Shield,
    /// Worn clothing or armor.
    Clothing,
    /// Single-use supplies.
    Consumable,
    /// Anything not covered above.
    Other,
}

/// The kind of damage a weapon deals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum DamageType {
    Ballistic,
    Cutting,
    Impact,
    Piercing,
    Energy,
    Mental,
    Other,
}

/// One inventory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier within the owning character.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Broad category.
    pub category: ItemCategory,
    /// Finer kind.
    pub kind: ItemKind,
    /// Damage type for weapons.
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    /// Damage formula for weapons.
    #[serde(default)]
    pub damage: Option<DiceFormula>,
    /// Free-text quality note for melee weapons.
    #[serde(default)]
    pub quality: Option<String>,
    /// Loaded ammunition for firearms.
    #[serde(default)]
    pub ammo: Option<u32>,
    /// Magazine capacity for firearms.
    #[serde(default)]
    pub max_ammo: Option<u32>,
    /// Ammunition spent per shot. Treated as 1 when unset or zero.
    #[serde(default)]
    pub ammo_cost: Option<u32>,
    /// Unit weight in kilograms.
    pub weight: f64,
    /// Number of units carried.
    pub quantity: u32,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Whether the item is currently worn or wielded.
    #[serde(default)]
    pub equipped: bool,
    /// Defense added while equipped, for protection items.
    #[serde(default)]
    pub defense_bonus: Option<i32>,
}

impl Item {
    /// Create a single, unequipped, weightless item.
    pub fn new(name: impl Into<String>, category: ItemCategory, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            category,
            kind,
            damage_type: None,
            damage: None,
            quality: None,
            ammo: None,
            max_ammo: None,
            ammo_cost: None,
            weight: 0.0,
            quantity: 1,
            description: String::new(),
            equipped: false,
            defense_bonus: None,
        }
    }

    /// A firearm loaded with `ammo` rounds.
    pub fn firearm(name: impl Into<String>, damage: DiceFormula, ammo: u32) -> Self {
        Self {
            damage: Some(damage),
            ammo: Some(ammo),
            max_ammo: Some(ammo),
            ammo_cost: Some(1),
            damage_type: Some(DamageType::Ballistic),
            ..Self::new(name, ItemCategory::Weapon, ItemKind::Firearm)
        }
    }

    /// A melee weapon.
    pub fn melee(name: impl Into<String>, damage: DiceFormula) -> Self {
        Self {
            damage: Some(damage),
            ..Self::new(name, ItemCategory::Weapon, ItemKind::Melee)
        }
    }

    /// A protective item granting `bonus` defense while equipped.
    pub fn armor(name: impl Into<String>, bonus: i32) -> Self {
        Self {
            defense_bonus: Some(bonus),
            ..Self::new(name, ItemCategory::Protection, ItemKind::Clothing)
        }
    }

    /// Set the unit weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Returns true for weapons that spend ammunition.
    pub fn is_firearm(&self) -> bool {
        self.kind == ItemKind::Firearm
    }

    /// Ammunition spent per shot. An unset or zero cost counts as 1.
    pub fn shot_cost(&self) -> u32 {
        self.ammo_cost.filter(|c| *c > 0).unwrap_or(1)
    }

    /// Weight of the whole stack.
    pub fn stack_weight(&self) -> f64 {
        self.weight * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firearm_defaults() {
        let pistol = Item::firearm("Pistol", DiceFormula::new(2, 6), 12);
        assert!(pistol.is_firearm());
        assert_eq!(pistol.ammo, Some(12));
        assert_eq!(pistol.shot_cost(), 1);
        assert_eq!(pistol.category, ItemCategory::Weapon);
    }

    #[test]
    fn stack_weight_multiplies_quantity() {
        let rope = Item::new("Rope", ItemCategory::Gear, ItemKind::Other)
            .with_weight(1.5)
            .with_quantity(3);
        assert!((rope.stack_weight() - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let json = serde_json::json!({
            "id": ItemId::new(),
            "name": "Canteen",
            "category": "gear",
            "kind": "consumable",
            "weight": 0.5,
            "quantity": 1
        });
        let item: Item = serde_json::from_value(json).unwrap();
        assert!(!item.equipped);
        assert_eq!(item.defense_bonus, None);
        assert_eq!(item.description, "");
    }
}
