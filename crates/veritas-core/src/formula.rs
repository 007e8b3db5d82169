//! Parsed `NdX` dice formulas.
//!
//! Formulas are entered as free text on items, abilities, and threat attacks.
//! They are parsed once at the boundary into a [`DiceFormula`] and stored in
//! that form; rolling never re-parses text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Count used when a formula's count is missing or unreadable.
pub const DEFAULT_COUNT: u32 = 1;
/// Sides used when a formula's sides are missing or unreadable.
pub const DEFAULT_SIDES: u32 = 6;
/// Upper bound on dice per formula.
pub const MAX_COUNT: u32 = 100;

/// A dice formula of the shape `<count>d<sides>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct DiceFormula {
    /// Number of dice rolled.
    pub count: u32,
    /// Faces on each die.
    pub sides: u32,
}

impl DiceFormula {
    /// Create a formula from explicit parts.
    pub fn new(count: u32, sides: u32) -> Self {
        Self {
            count: count.clamp(1, MAX_COUNT),
            sides: sides.max(1),
        }
    }

    /// Parse leniently: any part that cannot be read falls back to the
    /// default (count 1, sides 6). Trailing text after the digits is ignored,
    /// so `"2d6+3"` reads as `2d6` and `"d8"` as `1d8`.
    pub fn lenient(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        let mut parts = lower.split('d');
        let count = parts
            .next()
            .and_then(leading_number)
            .unwrap_or(DEFAULT_COUNT);
        let sides = parts
            .next()
            .and_then(leading_number)
            .unwrap_or(DEFAULT_SIDES);
        Self::new(count, sides)
    }
}

/// Read the leading run of ASCII digits as a positive number.
fn leading_number(s: &str) -> Option<u32> {
    let digits: String = s
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

impl FromStr for DiceFormula {
    type Err = CoreError;

    /// Strict parse: exactly `<count>d<sides>` (count optional), both positive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CoreError::InvalidFormula(s.to_string());
        let lower = s.trim().to_lowercase();
        let (count, sides) = lower.split_once('d').ok_or_else(err)?;

        let count = if count.is_empty() {
            DEFAULT_COUNT
        } else {
            count.parse::<u32>().map_err(|_| err())?
        };
        let sides = sides.parse::<u32>().map_err(|_| err())?;

        if count == 0 || count > MAX_COUNT || sides == 0 {
            return Err(err());
        }
        Ok(Self { count, sides })
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

impl From<DiceFormula> for String {
    fn from(formula: DiceFormula) -> Self {
        formula.to_string()
    }
}

impl From<String> for DiceFormula {
    fn from(s: String) -> Self {
        Self::lenient(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strict_parse() {
        assert_eq!("2d6".parse::<DiceFormula>().unwrap(), DiceFormula::new(2, 6));
        assert_eq!("D20".parse::<DiceFormula>().unwrap(), DiceFormula::new(1, 20));
        assert_eq!(" 3d8 ".parse::<DiceFormula>().unwrap(), DiceFormula::new(3, 8));
    }

    #[test]
    fn strict_parse_rejects_garbage() {
        assert!("2d".parse::<DiceFormula>().is_err());
        assert!("abc".parse::<DiceFormula>().is_err());
        assert!("0d6".parse::<DiceFormula>().is_err());
        assert!("2d6+3".parse::<DiceFormula>().is_err());
        assert!("2d0".parse::<DiceFormula>().is_err());
    }

    #[test]
    fn lenient_defaults() {
        assert_eq!(DiceFormula::lenient("d8"), DiceFormula::new(1, 8));
        assert_eq!(DiceFormula::lenient("3d"), DiceFormula::new(3, 6));
        assert_eq!(DiceFormula::lenient("nonsense"), DiceFormula::new(1, 6));
        assert_eq!(DiceFormula::lenient("2d6+3"), DiceFormula::new(2, 6));
        assert_eq!(DiceFormula::lenient("0d6"), DiceFormula::new(1, 6));
        assert_eq!(DiceFormula::lenient(""), DiceFormula::new(1, 6));
    }

    #[test]
    fn display() {
        assert_eq!(DiceFormula::new(2, 10).to_string(), "2d10");
    }

    #[test]
    fn serializes_as_text() {
        let json = serde_json::to_string(&DiceFormula::new(4, 6)).unwrap();
        assert_eq!(json, "\"4d6\"");
        let back: DiceFormula = serde_json::from_str("\"1d12\"").unwrap();
        assert_eq!(back, DiceFormula::new(1, 12));
    }

    proptest! {
        #[test]
        fn display_parses_back(count in 1u32..=MAX_COUNT, sides in 1u32..1000) {
            let formula = DiceFormula::new(count, sides);
            prop_assert_eq!(formula.to_string().parse::<DiceFormula>().unwrap(), formula);
        }

        #[test]
        fn lenient_never_yields_zero(s in ".{0,12}") {
            let formula = DiceFormula::lenient(&s);
            prop_assert!(formula.count >= 1);
            prop_assert!(formula.sides >= 1);
        }
    }
}
