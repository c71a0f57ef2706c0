//! Pots and collections
//!
//!     [`Pot`] values are produced by the [settlement](crate::history::settlement) engine from the
//!     finished action list. [`CollectedAction`] is the intermediate form of a "collected" line,
//!     used to reconcile the computed pots against what the site reports as paid out.

use super::action::Amount;
use serde::Serialize;
use std::fmt;

/// Which pot a collection (or a computed pot) refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PotType {
    /// The only pot of a hand without side pots
    Single,
    Main,
    Side,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pot {
    pub amount: Amount,
    /// Winners (collecting players)
    pub players: Vec<String>,
    pub eligible_players: Vec<String>,
    pub pot_type: PotType,
    pub is_side_pot: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_pot_level: Option<usize>,
    pub is_split: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odd_chip_winner: Option<String>,
}

impl Pot {
    pub fn single(amount: Amount, eligible_players: Vec<String>) -> Self {
        Self::with_type(amount, eligible_players, PotType::Single, None)
    }

    pub fn main(amount: Amount, eligible_players: Vec<String>) -> Self {
        Self::with_type(amount, eligible_players, PotType::Main, None)
    }

    pub fn side(level: usize, amount: Amount, eligible_players: Vec<String>) -> Self {
        Self::with_type(amount, eligible_players, PotType::Side, Some(level))
    }

    fn with_type(
        amount: Amount,
        eligible_players: Vec<String>,
        pot_type: PotType,
        side_pot_level: Option<usize>,
    ) -> Self {
        Self {
            amount,
            players: Vec::new(),
            eligible_players,
            pot_type,
            is_side_pot: pot_type == PotType::Side,
            side_pot_level,
            is_split: false,
            odd_chip_winner: None,
        }
    }

    /// Whether a collection is paid out of this pot
    pub fn accepts(&self, collected: &CollectedAction) -> bool {
        match self.pot_type {
            PotType::Single | PotType::Main => {
                matches!(collected.pot_type, PotType::Single | PotType::Main)
            }
            PotType::Side => {
                collected.pot_type == PotType::Side
                    && collected.side_pot_level.unwrap_or(1) == self.side_pot_level.unwrap_or(1)
            }
        }
    }
}

impl fmt::Display for Pot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.pot_type, self.side_pot_level) {
            (PotType::Single, _) => write!(f, "pot"),
            (PotType::Main, _) => write!(f, "main pot"),
            (PotType::Side, Some(level)) => write!(f, "side pot-{level}"),
            (PotType::Side, None) => write!(f, "side pot"),
        }
    }
}

/// A "collected" line reduced to what reconciliation needs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedAction {
    pub player: String,
    pub amount: Amount,
    pub pot_type: PotType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_pot_level: Option<usize>,
}

impl CollectedAction {
    pub fn new(
        player: impl Into<String>,
        amount: Amount,
        pot_type: PotType,
        side_pot_level: Option<usize>,
    ) -> Self {
        Self {
            player: player.into(),
            amount,
            pot_type,
            side_pot_level,
        }
    }
}
