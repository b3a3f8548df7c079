use std::iter::Peekable;
use std::str::Chars;

use crate::core::{PokerError, Suit, Value};

use super::{HoleCards, Range, StartingHand, Suitedness};

#[derive(Debug, PartialEq, Eq)]
enum Modifier {
    Plus,
    Range,
}

impl Modifier {
    fn from_char(c: char) -> Option<Modifier> {
        match c {
            '+' => Some(Modifier::Plus),
            '-' => Some(Modifier::Range),
            _ => None,
        }
    }
}

/// Parser for the usual shorthand for hold'em ranges.
///
/// Items are separated by commas:
///
/// - `AsKs` one exact combo
/// - `QQ` a pocket pair, `TT+` that pair and every better one,
///   `22-55` every pair in between
/// - `AK`, `AKs`, `AKo` any, suited, or off suit
/// - `A9s+` the kicker climbs until just below the first card
/// - `KTs-K7s` every kicker in between, `KQo-T9o` connectors moving
///   together
///
/// Any item can end with `:weight` (default 1).
pub struct RangeParser;

impl RangeParser {
    /// Parse a whole comma separated range.
    ///
    /// ```
    /// use holdem_equity::holdem::RangeParser;
    ///
    /// let range = RangeParser::parse("TT+, A9s+:0.5, KhQh").unwrap();
    /// assert_eq!(5 * 6 + 5 * 4 + 1, range.len());
    /// ```
    pub fn parse(range_str: &str) -> Result<Range, PokerError> {
        let mut range = Range::new();
        for item in range_str.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (hands, weight) = match item.split_once(':') {
                Some((hands, weight)) => (hands.trim(), Self::parse_weight(weight)?),
                None => (item, 1.0),
            };
            for cards in Self::parse_one(hands)? {
                range.insert(cards, weight);
            }
        }
        Ok(range)
    }

    /// Parse a single item with no weight into every combo it covers.
    pub fn parse_one(range_str: &str) -> Result<Vec<HoleCards>, PokerError> {
        if Self::is_exact(range_str) {
            return Ok(vec![HoleCards::try_from(range_str)?]);
        }
        Ok(Self::parse_starting_hands(range_str)?
            .iter()
            .flat_map(StartingHand::possible_hands)
            .collect())
    }

    /// `AsKs` rather than `AKs`
    fn is_exact(range_str: &str) -> bool {
        let chars: Vec<char> = range_str.chars().collect();
        chars.len() == 4
            && Suit::from_char(chars[1]).is_some()
            && Suit::from_char(chars[3]).is_some()
            && Value::from_char(chars[1]).is_none()
    }

    fn parse_weight(weight_str: &str) -> Result<f64, PokerError> {
        let weight: f64 = weight_str
            .trim()
            .parse()
            .map_err(|_| PokerError::InvalidRangeItem(weight_str.to_string()))?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(PokerError::InvalidWeight(weight));
        }
        Ok(weight)
    }

    fn parse_starting_hands(range_str: &str) -> Result<Vec<StartingHand>, PokerError> {
        // Consume the string, turning it into an iterator of chars.
        let mut iter = range_str.chars().peekable();
        let (first, second, suited) = Self::parse_values(&mut iter)?;

        let modifier = match iter.next() {
            None => None,
            Some(c) => Some(
                Modifier::from_char(c)
                    .ok_or_else(|| PokerError::InvalidRangeItem(range_str.to_string()))?,
            ),
        };

        let hands = match modifier {
            None => vec![StartingHand::new(first, second, suited)],
            Some(Modifier::Plus) => {
                if iter.next().is_some() {
                    return Err(PokerError::InvalidPlusModifier);
                }
                Self::plus(first, second, suited)
            }
            Some(Modifier::Range) => {
                let (end_first, end_second, end_suited) = Self::parse_values(&mut iter)?;
                if iter.next().is_some() {
                    return Err(PokerError::UnparsedCharsRemaining);
                }
                if end_suited != suited {
                    return Err(PokerError::InvalidRangeItem(range_str.to_string()));
                }
                Self::span(
                    StartingHand::new(first, second, suited),
                    StartingHand::new(end_first, end_second, suited),
                )?
            }
        };
        Ok(hands)
    }

    /// Read two values and an optional `s` or `o`.
    fn parse_values(
        iter: &mut Peekable<Chars>,
    ) -> Result<(Value, Value, Suitedness), PokerError> {
        let first = Self::parse_value(iter)?;
        let second = Self::parse_value(iter)?;

        let suited = match iter.peek() {
            Some('s') => Suitedness::Suited,
            Some('o') => Suitedness::OffSuit,
            _ => Suitedness::Any,
        };
        if suited != Suitedness::Any {
            iter.next();
        }

        if first == second && suited == Suitedness::Suited {
            return Err(PokerError::InvalidSuitedPairs);
        }
        Ok((first, second, suited))
    }

    fn parse_value(iter: &mut Peekable<Chars>) -> Result<Value, PokerError> {
        iter.next()
            .and_then(Value::from_char)
            .ok_or(PokerError::UnexpectedValueChar)
    }

    fn plus(first: Value, second: Value, suited: Suitedness) -> Vec<StartingHand> {
        let start = StartingHand::new(first, second, suited);
        if start.is_pair() {
            return (start.value_one() as u8..=Value::Ace as u8)
                .map(|v| StartingHand::pair(Value::from_u8(v)))
                .collect();
        }
        // The kicker goes up to just under the top card.
        (start.value_two() as u8..start.value_one() as u8)
            .map(|v| StartingHand::new(start.value_one(), Value::from_u8(v), suited))
            .collect()
    }

    fn span(start: StartingHand, end: StartingHand) -> Result<Vec<StartingHand>, PokerError> {
        let (low, high) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        let suited = start.suited();
        let same_gap =
            low.value_one().gap(low.value_two()) == high.value_one().gap(high.value_two());

        match (low.is_pair(), high.is_pair()) {
            (true, true) => Ok((low.value_one() as u8..=high.value_one() as u8)
                .map(|v| StartingHand::pair(Value::from_u8(v)))
                .collect()),
            (false, false) if low.value_one() == high.value_one() => {
                let (a, b) = (low.value_two() as u8, high.value_two() as u8);
                Ok((a.min(b)..=a.max(b))
                    .map(|v| StartingHand::new(low.value_one(), Value::from_u8(v), suited))
                    .collect())
            }
            (false, false) if same_gap => {
                let steps = low.value_one().gap(high.value_one());
                Ok((0..=steps)
                    .map(|i| {
                        StartingHand::new(
                            Value::from_u8(low.value_one() as u8 + i),
                            Value::from_u8(low.value_two() as u8 + i),
                            suited,
                        )
                    })
                    .collect())
            }
            _ => Err(PokerError::InvalidGap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;

    fn parse_len(s: &str) -> usize {
        RangeParser::parse(s).unwrap().len()
    }

    #[test]
    fn test_easy_parse() {
        assert_eq!(16, parse_len("AK"));
        assert_eq!(4, parse_len("AKs"));
        assert_eq!(12, parse_len("AKo"));
        assert_eq!(16, parse_len("KA"));
    }

    #[test]
    fn test_pairs() {
        assert_eq!(6, parse_len("QQ"));
        assert_eq!(18, parse_len("QQ+"));
        assert_eq!(24, parse_len("22-55"));
        assert_eq!(24, parse_len("55-22"));
    }

    #[test]
    fn test_kicker_plus() {
        // A9s, ATs, AJs, AQs, AKs
        assert_eq!(20, parse_len("A9s+"));
        assert_eq!(4, parse_len("KQs+"));
    }

    #[test]
    fn test_kicker_span() {
        // KTs, K9s, K8s, K7s
        assert_eq!(16, parse_len("KTs-K7s"));
    }

    #[test]
    fn test_connector_span() {
        // KQo, QJo, JTo, T9o
        let range = RangeParser::parse("KQo-T9o").unwrap();
        assert_eq!(48, range.len());
        let t9 = HoleCards::new(
            Card::try_from("Ts").unwrap(),
            Card::try_from("9h").unwrap(),
        )
        .unwrap();
        assert!(range.iter().any(|c| c.cards == t9));
    }

    #[test]
    fn test_exact_combo() {
        let range = RangeParser::parse("AsKs").unwrap();
        assert_eq!(1, range.len());
        assert_eq!(
            HoleCards::try_from("AsKs").unwrap(),
            range.iter().next().unwrap().cards
        );
    }

    #[test]
    fn test_weights() {
        let range = RangeParser::parse("AA:0.5, KK").unwrap();
        assert_eq!(12, range.len());
        assert!((range.total_weight() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_overlap_keeps_last_weight() {
        let range = RangeParser::parse("AKs, AsKs:3").unwrap();
        assert_eq!(4, range.len());
        assert_eq!(6.0, range.total_weight());
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Err(PokerError::InvalidSuitedPairs),
            RangeParser::parse("AAs")
        );
        assert_eq!(
            Err(PokerError::InvalidPlusModifier),
            RangeParser::parse("AK+s")
        );
        assert_eq!(Err(PokerError::InvalidGap), RangeParser::parse("KTs-Q8s"));
        assert_eq!(Err(PokerError::InvalidGap), RangeParser::parse("22-AK"));
        assert_eq!(
            Err(PokerError::UnexpectedValueChar),
            RangeParser::parse("A")
        );
        assert_eq!(
            Err(PokerError::InvalidWeight(-1.0)),
            RangeParser::parse("AK:-1")
        );
        assert!(matches!(
            RangeParser::parse("AK:lots"),
            Err(PokerError::InvalidRangeItem(_))
        ));
        assert!(matches!(
            RangeParser::parse("AK*"),
            Err(PokerError::InvalidRangeItem(_))
        ));
    }

    #[test]
    fn test_empty_items_skipped() {
        assert_eq!(6, parse_len(" ,QQ, "));
        assert!(RangeParser::parse("").unwrap().is_empty());
    }
}
