use std::fmt;
use std::sync::LazyLock;

use super::PokerError;

/// Card rank or value.
/// This is basically the face value - 2
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Take a u8 and convert it to a value. Anything past the ace wraps
    /// around.
    ///
    /// ```
    /// use holdem_equity::core::Value;
    ///
    /// assert_eq!(Value::Two, Value::from_u8(0));
    /// assert_eq!(Value::Ace, Value::from_u8(12));
    /// ```
    pub fn from_u8(v: u8) -> Self {
        VALUES[usize::from(v % 13)]
    }

    /// Get all of the `Value`'s that are possible.
    /// This is used to iterate through all possible
    /// values when creating a new deck, or
    /// generating all possible starting hands.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// The printed face value, 2 for a deuce up to 14 for an ace.
    ///
    /// ```
    /// use holdem_equity::core::Value;
    ///
    /// assert_eq!(11, Value::Jack.face());
    /// assert_eq!(14, Value::Ace.face());
    /// ```
    pub fn face(self) -> u8 {
        self as u8 + 2
    }

    /// Inverse of `face`. `None` outside of 2..=14
    pub fn from_face(face: u8) -> Option<Self> {
        match face {
            2..=14 => Some(VALUES[usize::from(face - 2)]),
            _ => None,
        }
    }

    /// Given a character parse that char into a value.
    /// Case is ignored as long as the char is in the ascii range (It should
    /// be). @returns None if there's no value there.
    ///
    /// ```
    /// use holdem_equity::core::Value;
    ///
    /// assert_eq!(Some(Value::Ace), Value::from_char('A'));
    /// assert_eq!(Some(Value::Ten), Value::from_char('t'));
    /// assert_eq!(None, Value::from_char('x'));
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::Ace),
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'J' => Some(Self::Jack),
            'T' => Some(Self::Ten),
            '9' => Some(Self::Nine),
            '8' => Some(Self::Eight),
            '7' => Some(Self::Seven),
            '6' => Some(Self::Six),
            '5' => Some(Self::Five),
            '4' => Some(Self::Four),
            '3' => Some(Self::Three),
            '2' => Some(Self::Two),
            _ => None,
        }
    }

    /// Convert this Value to a char.
    pub fn to_char(self) -> char {
        match self {
            Self::Ace => 'A',
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Jack => 'J',
            Self::Ten => 'T',
            Self::Nine => '9',
            Self::Eight => '8',
            Self::Seven => '7',
            Self::Six => '6',
            Self::Five => '5',
            Self::Four => '4',
            Self::Three => '3',
            Self::Two => '2',
        }
    }

    /// How card ranks seperate the two values.
    ///
    /// ```
    /// use holdem_equity::core::Value;
    ///
    /// assert_eq!(1, Value::Ace.gap(Value::King));
    /// assert_eq!(1, Value::King.gap(Value::Ace));
    /// ```
    pub fn gap(self, other: Self) -> u8 {
        (self as u8).abs_diff(other as u8)
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    /// Translate a suit from a u8. Anything past diamonds wraps around.
    pub fn from_u8(s: u8) -> Self {
        SUITS[usize::from(s % 4)]
    }

    /// This Suit to the character used in hand strings.
    ///
    /// ```
    /// use holdem_equity::core::Suit;
    ///
    /// assert_eq!(Some(Suit::Heart), Suit::from_char('h'));
    /// assert_eq!(None, Suit::from_char('x'));
    /// ```
    pub fn from_char(s: char) -> Option<Self> {
        match s.to_ascii_lowercase() {
            'd' => Some(Self::Diamond),
            's' => Some(Self::Spade),
            'h' => Some(Self::Heart),
            'c' => Some(Self::Club),
            _ => None,
        }
    }

    /// Convert a suit into a char.
    pub fn to_char(self) -> char {
        match self {
            Self::Diamond => 'd',
            Self::Spade => 's',
            Self::Heart => 'h',
            Self::Club => 'c',
        }
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }
}

/// Every card, created once and never changed.
///
/// Cards are laid out value major so `FULL_DECK[i] == Card::from(i as u8)`.
pub static FULL_DECK: LazyLock<[Card; 52]> = LazyLock::new(|| {
    let mut cards = [Card::new(Value::Two, Suit::Spade); 52];
    for (idx, card) in cards.iter_mut().enumerate() {
        *card = Card::from(idx as u8);
    }
    cards
});

/// The card index is `value * 4 + suit`.
impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.value as u8 * 4 + card.suit as u8
    }
}

impl From<u8> for Card {
    fn from(value: u8) -> Self {
        Self {
            value: Value::from_u8(value / 4),
            suit: Suit::from_u8(value % 4),
        }
    }
}

impl TryFrom<&str> for Card {
    type Error = PokerError;

    /// Parse a two character card like `Ks` or `2d`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        let value = chars
            .next()
            .and_then(Value::from_char)
            .ok_or(PokerError::UnexpectedValueChar)?;
        let suit = chars
            .next()
            .and_then(Suit::from_char)
            .ok_or(PokerError::UnexpectedSuitChar)?;
        if chars.next().is_some() {
            return Err(PokerError::UnparsedCharsRemaining);
        }
        Ok(Self { value, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}
