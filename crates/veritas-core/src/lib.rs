//! Core records for Veritas: characters, threats, campaigns, and accounts.
//!
//! This crate defines the data model the rule engine operates on. It holds no
//! randomness and performs no I/O; every record round-trips through serde so
//! a persistence collaborator can store it as-is.

/// The six attribute axes and the attribute set.
pub mod attribute;
/// Campaign roster and campaign event log.
pub mod campaign;
/// Player characters, their resources, and abilities.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Parsed `NdX` dice formulas.
pub mod formula;
/// Typed identifiers for records and sub-records.
pub mod id;
/// Inventory items.
pub mod item;
/// The fixed skill catalogue and training tiers.
pub mod skill;
/// Adversaries built by point-buy.
pub mod threat;
/// Player accounts.
pub mod user;

/// Re-export attribute types.
pub use attribute::{AttributeKey, Attributes};
/// Re-export campaign types.
pub use campaign::{CAMPAIGN_LOG_LIMIT, Campaign, CampaignLogEntry, LogKind};
/// Re-export character types.
pub use character::{
    Ability, BloodlineAbility, Character, Defense, Narrative, PowerTier, Resource, ResourceKind,
    Skill, Supplement,
};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the dice formula type.
pub use formula::DiceFormula;
/// Re-export identifier types.
pub use id::{
    AbilityId, AttackId, CampaignId, CharacterId, ItemId, LogEntryId, RollId, ThreatId,
    UserId,
};
/// Re-export item types.
pub use item::{DamageType, Item, ItemCategory, ItemKind};
/// Re-export skill types.
pub use skill::{SkillId, TrainingTier};
/// Re-export threat types.
pub use threat::{HitBonus, Threat, ThreatAttack, ThreatLevel};
/// Re-export account types.
pub use user::User;
