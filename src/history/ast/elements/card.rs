//! Playing cards as they appear in bracketed card lists
//!
//!     Hand histories write cards as a rank character followed by a suit character: `Ah`, `Td`,
//!     `2c`. Some sites spell the ten as `10`, which is accepted as well. A card list is the text
//!     between square brackets, whitespace separated: `[2c 7d Jh]`.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error produced when a card token cannot be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    InvalidRank(String),
    InvalidSuit(String),
    Malformed(String),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::InvalidRank(s) => write!(f, "Invalid card rank in '{s}'"),
            CardError::InvalidSuit(s) => write!(f, "Invalid card suit in '{s}'"),
            CardError::Malformed(s) => write!(f, "Malformed card '{s}'"),
        }
    }
}

impl std::error::Error for CardError {}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    fn symbol(&self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl FromStr for Rank {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "T" | "10" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            "A" => Ok(Rank::Ace),
            _ => Err(CardError::InvalidRank(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    fn symbol(&self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

impl FromStr for Suit {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" => Ok(Suit::Clubs),
            "d" => Ok(Suit::Diamonds),
            "h" => Ok(Suit::Hearts),
            "s" => Ok(Suit::Spades),
            _ => Err(CardError::InvalidSuit(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let split = token
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .filter(|i| *i > 0)
            .ok_or_else(|| CardError::Malformed(token.to_string()))?;
        let (rank, suit) = token.split_at(split);
        Ok(Self {
            rank: rank.parse()?,
            suit: suit.parse()?,
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse the inside of a bracketed card list (`"2c 7d Jh"`).
///
/// An empty list yields an empty vector; any unreadable card fails the whole list.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, CardError> {
    text.split_whitespace().map(Card::from_str).collect()
}
