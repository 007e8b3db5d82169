//! Rule engine for Veritas.
//!
//! Provides dice sources and pools, attribute checks and formula rolls,
//! derived-stat and reward tables, character creation and sheet actions, the
//! level-up state machine, and threat point-buy. Every function works on a
//! snapshot and an injected [`DiceSource`]; side effects are returned as
//! [`ActionOutcome`]s for the session layer to apply.

pub mod dice;
pub mod error;
pub mod outcome;
pub mod progression;
pub mod rules;
pub mod sheet;
pub mod threat;

pub use dice::{DicePool, DiceSource, Die, Keep, RollKind, RollResult, ScriptedDice};
pub use error::{MechError, MechResult};
pub use outcome::{ActionOutcome, Effect, LogEvent};
pub use progression::{LevelRolls, LevelUp, LevelUpStep};
pub use rules::jobs::{JOBS, Job, JobVariant, SkillGrant, TrainingGrant};
pub use rules::{DerivedStats, LevelRewards, ThreatStats};
pub use sheet::{CreatedCharacter, CreationDraft, NewCharacter, create_character};
pub use threat::ThreatDraft;
