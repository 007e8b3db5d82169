//! Player characters, their resources, and abilities.
//!
//! One shared [`Character`] record covers every supplement. Optional resources
//! (sanity, energy, courage) always exist on the record; their `enabled` flag
//! is the single source of truth for whether the active supplement uses them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeKey, Attributes};
use crate::formula::DiceFormula;
use crate::id::{AbilityId, CharacterId, ItemId, UserId};
use crate::item::Item;
use crate::skill::{SkillId, TrainingTier};

/// A ruleset variant. Variants are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Supplement {
    /// The core rules: sanity and energy.
    #[default]
    Base,
    /// Horror survival: courage replaces sanity and energy, no jobs, no level-ups.
    Slasher,
    /// Ninja setting: energy is called chakra, bloodline abilities are available.
    Naruto,
}

impl fmt::Display for Supplement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "Base"),
            Self::Slasher => write!(f, "Slasher"),
            Self::Naruto => write!(f, "Naruto"),
        }
    }
}

/// Character-wide power setting selecting the derived-stat formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerTier {
    /// Ordinary people.
    #[default]
    Mortal,
    /// Larger-than-life protagonists.
    #[serde(rename = "Heroico")]
    Heroic,
    /// Mythic power level.
    #[serde(rename = "Épico")]
    Epic,
}

/// A current/max resource pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Current value, always within `0..=max`.
    pub current: i32,
    /// Maximum value.
    pub max: i32,
    /// Whether the active supplement uses this resource. Display-only.
    pub enabled: bool,
}

impl Resource {
    /// An enabled resource starting full.
    pub fn full(max: i32) -> Self {
        Self {
            current: max,
            max,
            enabled: true,
        }
    }

    /// A disabled resource starting full.
    pub fn disabled(max: i32) -> Self {
        Self {
            enabled: false,
            ..Self::full(max)
        }
    }

    /// Add `delta` to the current value, clamped to `0..=max`.
    /// Returns the value before the change.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        let old = self.current;
        self.current = self.current.saturating_add(delta).clamp(0, self.max.max(0));
        old
    }

    /// Raise both max and current by `amount`.
    pub fn grow(&mut self, amount: i32) {
        self.max += amount;
        self.current += amount;
    }

    /// Returns true if the current value is at least `cost`.
    pub fn can_afford(&self, cost: i32) -> bool {
        self.current >= cost
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

/// Which resource an adjustment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Hit points.
    Hp,
    /// Sanity.
    Sanity,
    /// Energy (chakra in the Naruto supplement).
    Energy,
    /// Courage (Slasher).
    Courage,
}

/// Base defense plus a free-floating manual bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Defense {
    /// Defense computed at creation.
    pub base: i32,
    /// Manual bonus set by the player.
    pub bonus: i32,
}

/// Free-text background fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Narrative {
    /// Backstory.
    pub history: String,
    /// Beliefs and motivations.
    pub ideology: String,
    /// The character's most important tie.
    pub key_connection: String,
    /// People who matter to the character.
    pub important_people: String,
}

/// A skill entry on a character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Which catalogue skill this is.
    pub id: SkillId,
    /// Attribute sizing the dice pool.
    pub primary: AttributeKey,
    /// Attribute added to the roll.
    pub secondary: AttributeKey,
    /// Training tier.
    pub training: TrainingTier,
}

impl Skill {
    /// An untrained skill using the catalogue's default attributes.
    pub fn untrained(id: SkillId) -> Self {
        let (primary, secondary) = id.default_attributes();
        Self {
            id,
            primary,
            secondary,
            training: TrainingTier::Untrained,
        }
    }

    /// The full catalogue, untrained, in sheet order.
    pub fn catalogue() -> Vec<Self> {
        SkillId::ALL.into_iter().map(Self::untrained).collect()
    }
}

/// A special ability that spends energy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// Identifier.
    pub id: AbilityId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Free-form type tag (e.g. ninjutsu, genjutsu).
    #[serde(default)]
    pub kind: String,
    /// Element, for Naruto techniques.
    #[serde(default)]
    pub element: Option<String>,
    /// Damage rolled on activation.
    #[serde(default)]
    pub damage: Option<DiceFormula>,
    /// Energy spent on activation.
    pub cost: i32,
}

impl Ability {
    /// An ability with a name and cost.
    pub fn new(name: impl Into<String>, cost: i32) -> Self {
        Self {
            id: AbilityId::new(),
            name: name.into(),
            description: String::new(),
            kind: String::new(),
            element: None,
            damage: None,
            cost,
        }
    }

    /// Attach a damage formula.
    pub fn with_damage(mut self, damage: DiceFormula) -> Self {
        self.damage = Some(damage);
        self
    }
}

/// A bloodline (kekkei genkai) ability, Naruto supplement only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodlineAbility {
    /// Identifier.
    pub id: AbilityId,
    /// Display name.
    pub name: String,
    /// Activation cost, free text.
    pub activation_cost: String,
    /// Upkeep cost, free text.
    pub upkeep_cost: String,
    /// Free-text description.
    pub description: String,
}

/// A player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Identifier.
    pub id: CharacterId,
    /// Owning player.
    pub player_id: UserId,
    /// Active supplement.
    pub supplement: Supplement,
    /// Character name.
    pub name: String,
    /// Background fields.
    #[serde(default)]
    pub narrative: Narrative,
    /// Attribute values, each in `0..=5`.
    pub attributes: Attributes,
    /// The full skill catalogue with this character's training.
    pub skills: Vec<Skill>,
    /// Character level, at least 1.
    pub level: u32,
    /// Hit points.
    pub hp: Resource,
    /// Sanity (enabled for Base).
    pub san: Resource,
    /// Energy or chakra (disabled for Slasher).
    pub pe: Resource,
    /// Courage (enabled for Slasher).
    pub courage: Resource,
    /// Defense.
    pub defense: Defense,
    /// Job name.
    pub job: String,
    /// Job variant name.
    pub variant: String,
    /// Power tier.
    pub power_tier: PowerTier,
    /// Inventory.
    #[serde(default)]
    pub inventory: Vec<Item>,
    /// Abilities.
    #[serde(default)]
    pub abilities: Vec<Ability>,
    /// Bloodline abilities (Naruto).
    #[serde(default)]
    pub bloodline_abilities: Vec<BloodlineAbility>,
    /// Bloodline ability slots (Naruto).
    #[serde(default)]
    pub bloodline_slots: u32,
}

impl Character {
    /// Look up a skill entry.
    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }

    /// Mutable skill lookup.
    pub fn skill_mut(&mut self, id: SkillId) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| s.id == id)
    }

    /// Look up an inventory item.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.inventory.iter().find(|i| i.id == id)
    }

    /// Mutable inventory lookup.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.inventory.iter_mut().find(|i| i.id == id)
    }

    /// Look up an ability.
    pub fn ability(&self, id: AbilityId) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.id == id)
    }

    /// Read one resource.
    pub fn resource(&self, kind: ResourceKind) -> &Resource {
        match kind {
            ResourceKind::Hp => &self.hp,
            ResourceKind::Sanity => &self.san,
            ResourceKind::Energy => &self.pe,
            ResourceKind::Courage => &self.courage,
        }
    }

    /// Mutable access to one resource.
    pub fn resource_mut(&mut self, kind: ResourceKind) -> &mut Resource {
        match kind {
            ResourceKind::Hp => &mut self.hp,
            ResourceKind::Sanity => &mut self.san,
            ResourceKind::Energy => &mut self.pe,
            ResourceKind::Courage => &mut self.courage,
        }
    }

    /// Player-facing name of a resource under this character's supplement.
    pub fn resource_label(&self, kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Hp => "Hit Points",
            ResourceKind::Sanity => "Sanity",
            ResourceKind::Energy if self.supplement == Supplement::Naruto => "Chakra",
            ResourceKind::Energy => "Energy",
            ResourceKind::Courage => "Courage",
        }
    }
}
