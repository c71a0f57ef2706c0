//! Element definitions for the parsed hand record
//!
//!     The record is flat: a [`PokerHand`](hand::PokerHand) owns its [table](table), its
//!     [players](player), the chronological [actions](action), the board [cards](card) and the
//!     settled [pots](pot).

pub mod action;
pub mod card;
pub mod hand;
pub mod player;
pub mod pot;
pub mod table;

pub use action::{
    Action, ActionDetails, ActionLog, ActionType, Amount, BlindKind, Street, TOLERANCE,
};
pub use card::{parse_cards, Card, CardError, Rank, Suit};
pub use hand::PokerHand;
pub use player::{Player, HOLE_CARD_COUNT};
pub use pot::{CollectedAction, Pot, PotType};
pub use table::TableInfo;
