//! Symbolic ratings and their numeric scores.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Score for a `+` rating.
pub const PLUS_SCORE: u8 = 10;
/// Score for a `~` rating.
pub const TILDE_SCORE: u8 = 5;
/// Score for a `-` rating, and for anything unrecognised.
pub const MINUS_SCORE: u8 = 0;

/// A draft mastery rating as entered for a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[default]
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "~")]
    Tilde,
    #[serde(rename = "+")]
    Plus,
}

impl Rating {
    /// All ratings in selector order.
    pub const ALL: [Rating; 3] = [Rating::Minus, Rating::Tilde, Rating::Plus];

    pub fn symbol(self) -> char {
        match self {
            Rating::Minus => '-',
            Rating::Tilde => '~',
            Rating::Plus => '+',
        }
    }

    pub fn score(self) -> u8 {
        match self {
            Rating::Minus => MINUS_SCORE,
            Rating::Tilde => TILDE_SCORE,
            Rating::Plus => PLUS_SCORE,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Rating {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Rating::Minus),
            "~" => Ok(Rating::Tilde),
            "+" => Ok(Rating::Plus),
            other => Err(ValidationError::UnknownRating(other.to_string())),
        }
    }
}

/// Map a rating symbol to its score.
///
/// Total over all inputs: `+` is 10, `~` is 5, and everything else
/// (including `-`) is 0.
pub fn encode(symbol: &str) -> u8 {
    symbol.parse::<Rating>().map_or(MINUS_SCORE, Rating::score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encode_known_symbols() {
        assert_eq!(encode("+"), 10);
        assert_eq!(encode("~"), 5);
        assert_eq!(encode("-"), 0);
    }

    #[test]
    fn encode_falls_back_to_zero() {
        assert_eq!(encode(""), 0);
        assert_eq!(encode("++"), 0);
        assert_eq!(encode("A"), 0);
    }

    #[test]
    fn rating_display_and_parse() {
        for rating in Rating::ALL {
            assert_eq!(rating.to_string().parse::<Rating>().unwrap(), rating);
        }
        assert!(matches!(
            "x".parse::<Rating>(),
            Err(ValidationError::UnknownRating(s)) if s == "x"
        ));
        assert_eq!(Rating::default(), Rating::Minus);
    }

    #[test]
    fn serde_uses_symbols() {
        let json = serde_json::to_string(&vec![Rating::Plus, Rating::Tilde]).unwrap();
        assert_eq!(json, r#"["+","~"]"#);
    }

    proptest! {
        #[test]
        fn encode_is_always_a_known_score(s in ".*") {
            let score = encode(&s);
            prop_assert!(score == 0 || score == 5 || score == 10);
            if !matches!(s.as_str(), "+" | "~") {
                prop_assert_eq!(score, 0);
            }
        }
    }
}
