//! Seated players
//!
//!     A [`Player`] is created for every seat line. Its chip and all-in fields are snapshots for
//!     consumers; the running chip state during parsing belongs to the
//!     [tracker](crate::history::tracking).

use super::action::Amount;
use super::card::Card;
use serde::Serialize;

/// Cards dealt face down to each player
pub const HOLE_CARD_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub seat: u8,
    pub name: String,
    /// Starting stack
    pub chips: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_cards: Option<Vec<Card>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub is_hero: bool,
    pub sitting_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_in_amount: Option<Amount>,
}

impl Player {
    pub fn new(seat: u8, name: impl Into<String>, chips: Amount) -> Self {
        Self {
            seat,
            name: name.into(),
            chips,
            hole_cards: None,
            position: None,
            is_hero: false,
            sitting_out: false,
            all_in_amount: None,
        }
    }

    pub fn is_all_in(&self) -> bool {
        self.all_in_amount.is_some()
    }

    /// Record revealed hole cards unless they are already known.
    ///
    /// Returns false, leaving the player untouched, when `cards` is not a full hole hand.
    pub fn reveal_hole_cards(&mut self, cards: &[Card]) -> bool {
        if cards.len() != HOLE_CARD_COUNT {
            return false;
        }
        self.hole_cards.get_or_insert_with(|| cards.to_vec());
        true
    }
}
