//! The two roll paths: attribute checks and formula rolls.

use veritas_core::DiceFormula;

use super::pool::{DicePool, Keep};
use super::roll::{RollKind, RollResult};
use super::{DiceSource, Die};

/// Pool size used when the governing attribute is 0.
pub const DISADVANTAGE_POOL: u32 = 2;

/// Roll an attribute check.
///
/// The pool holds `attribute` d20s and keeps the highest. An attribute of 0
/// instead rolls [`DISADVANTAGE_POOL`] dice and keeps the lowest. A kept 20
/// is a critical and a kept 1 a fumble, whatever the modifier.
pub fn attribute_check(
    attribute: u32,
    modifier: i32,
    label: impl Into<String>,
    actor: impl Into<String>,
    source: &mut dyn DiceSource,
) -> RollResult {
    let (size, rule) = if attribute > 0 {
        (attribute, Keep::Highest)
    } else {
        (DISADVANTAGE_POOL, Keep::Lowest)
    };
    let roll = DicePool::new().add(Die::D20, size).roll(source);
    let kept = roll.keep(rule);

    let mut result = RollResult::new(RollKind::Check, label, actor);
    result.dice = roll.faces;
    result.kept = kept;
    result.modifier = modifier;
    result.total = kept as i32 + modifier;
    result.crit = kept == 20;
    result.fumble = kept == 1;
    tracing::debug!(
        label = %result.label,
        pool = size,
        kept,
        total = result.total,
        "attribute check"
    );
    result
}

/// Roll a dice formula and sum every face. Never a critical or fumble.
pub fn formula_roll(
    formula: DiceFormula,
    label: impl Into<String>,
    actor: impl Into<String>,
    source: &mut dyn DiceSource,
) -> RollResult {
    let roll = DicePool::new()
        .add(Die::from_sides(formula.sides), formula.count)
        .roll(source);
    let kept = roll.keep(Keep::Sum);

    let mut result = RollResult::new(RollKind::Formula, label, actor);
    result.dice = roll.faces;
    result.kept = kept;
    result.total = kept as i32;
    result.formula = Some(formula);
    tracing::debug!(label = %result.label, %formula, total = result.total, "formula roll");
    result
}

/// Roll a single die and add a flat modifier, with no critical or fumble.
pub fn modified_roll(
    die: Die,
    modifier: i32,
    label: impl Into<String>,
    actor: impl Into<String>,
    source: &mut dyn DiceSource,
) -> RollResult {
    let face = source.roll_die(die.sides());

    let mut result = RollResult::new(RollKind::Check, label, actor);
    result.dice = vec![face];
    result.kept = face;
    result.modifier = modifier;
    result.total = face as i32 + modifier;
    tracing::debug!(label = %result.label, %die, face, total = result.total, "modified roll");
    result
}

/// A roll-log entry carrying only a label.
pub fn notice(label: impl Into<String>, actor: impl Into<String>) -> RollResult {
    RollResult::new(RollKind::Notice, label, actor)
}
