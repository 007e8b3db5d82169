//! Roll records and their campaign-log summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use veritas_core::{CharacterId, DiceFormula, RollId};

/// How a roll was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollKind {
    /// A d20 pool check with crit/fumble detection.
    Check,
    /// A summed `NdX` formula roll.
    Formula,
    /// A roll-log entry with no dice, such as a level-up announcement.
    Notice,
}

/// One resolved roll, as shown in the recent-rolls feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Identifier.
    pub id: RollId,
    /// Resolution kind.
    pub kind: RollKind,
    /// Character that made the roll, if any.
    pub character_id: Option<CharacterId>,
    /// Display name of whoever rolled.
    pub actor: String,
    /// What was rolled for.
    pub label: String,
    /// Every face rolled, in order.
    pub dice: Vec<u32>,
    /// The face (or sum) the keep rule selected.
    pub kept: u32,
    /// Flat modifier added to the kept value.
    pub modifier: i32,
    /// `kept + modifier`.
    pub total: i32,
    /// The kept die showed 20.
    pub crit: bool,
    /// The kept die showed 1.
    pub fumble: bool,
    /// Formula rolled, for formula rolls.
    pub formula: Option<DiceFormula>,
    /// When the roll happened.
    pub timestamp: DateTime<Utc>,
}

impl RollResult {
    pub(crate) fn new(kind: RollKind, label: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            id: RollId::new(),
            kind,
            character_id: None,
            actor: actor.into(),
            label: label.into(),
            dice: Vec::new(),
            kept: 0,
            modifier: 0,
            total: 0,
            crit: false,
            fumble: false,
            formula: None,
            timestamp: Utc::now(),
        }
    }

    /// Bind the roll to a character.
    pub fn by(mut self, character: CharacterId) -> Self {
        self.character_id = Some(character);
        self
    }

    /// One-line campaign-log message for this roll.
    pub fn summary(&self) -> String {
        if self.kind == RollKind::Notice {
            return self.label.clone();
        }

        let mut msg = format!("Rolled {}: {}", self.label, self.total);
        match self.formula {
            Some(formula) => msg.push_str(&format!(" ({formula})")),
            None if !self.dice.is_empty() => {
                let faces: Vec<String> = self.dice.iter().map(u32::to_string).collect();
                msg.push_str(&format!(" [{}]", faces.join(", ")));
                if self.modifier != 0 {
                    msg.push_str(&format!(" {:+}", self.modifier));
                }
            }
            None => {}
        }
        if self.crit {
            msg.push_str(" (CRITICAL!)");
        }
        if self.fumble {
            msg.push_str(" (FUMBLE!)");
        }
        msg
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.dice.iter().map(u32::to_string).collect();
        write!(f, "[{}] = {}", faces.join(", "), self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(dice: &[u32], kept: u32, modifier: i32) -> RollResult {
        let mut r = RollResult::new(RollKind::Check, "DES check", "Ana");
        r.dice = dice.to_vec();
        r.kept = kept;
        r.modifier = modifier;
        r.total = kept as i32 + modifier;
        r.crit = kept == 20;
        r.fumble = kept == 1;
        r
    }

    #[test]
    fn summary_with_positive_modifier() {
        insta::assert_snapshot!(check(&[4, 17], 17, 3).summary(), @"Rolled DES check: 20 [4, 17] +3");
    }

    #[test]
    fn summary_with_negative_modifier() {
        insta::assert_snapshot!(check(&[9], 9, -2).summary(), @"Rolled DES check: 7 [9] -2");
    }

    #[test]
    fn summary_flags() {
        insta::assert_snapshot!(check(&[20, 3], 20, 0).summary(), @"Rolled DES check: 20 [20, 3] (CRITICAL!)");
        insta::assert_snapshot!(check(&[1, 1], 1, 5).summary(), @"Rolled DES check: 6 [1, 1] +5 (FUMBLE!)");
    }

    #[test]
    fn summary_for_formula() {
        let mut r = RollResult::new(RollKind::Formula, "Damage: Pistol", "Ana");
        r.dice = vec![2, 5];
        r.kept = 7;
        r.total = 7;
        r.formula = Some(DiceFormula::new(2, 6));
        insta::assert_snapshot!(r.summary(), @"Rolled Damage: Pistol: 7 (2d6)");
    }

    #[test]
    fn summary_for_notice() {
        let r = RollResult::new(RollKind::Notice, "Reached level 3", "Ana");
        assert_eq!(r.summary(), "Reached level 3");
    }

    #[test]
    fn display() {
        assert_eq!(check(&[3, 5], 5, 0).to_string(), "[3, 5] = 5");
    }
}
