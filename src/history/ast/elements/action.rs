//! Actions: the chronological record of a hand
//!
//!     Every line the parser understands becomes one [`Action`]. Actions carry a 0-based index
//!     that is strictly increasing and gapless across the whole hand, the street they happened
//!     on and a typed [`ActionType`]. Once pushed into the hand's action list an action is never
//!     modified.

use super::card::Card;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Money amounts as written in the hand history. No currency conversion happens anywhere.
pub type Amount = f64;

/// Absolute tolerance used when comparing money amounts
pub const TOLERANCE: Amount = 0.01;

/// A betting phase of the hand, in the order they happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        };
        write!(f, "{name}")
    }
}

/// Which forced bet a posting line describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlindKind {
    Small,
    Big,
    /// Small and big blind posted together; the small blind part is dead money
    Combined,
    Dead,
    Straddle,
}

/// What an action does.
///
/// Serialized as the `type` entry of an action record, with a separate `blindKind` entry for
/// postings, so consumers always see `type` as a plain string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Blind(BlindKind),
    Ante,
    Deal,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    Show,
    Uncalled,
    Collected,
    Muck,
    Timeout,
    Disconnect,
    Reconnect,
    Sitout,
    Return,
}

impl ActionType {
    /// Voluntary or forced chips going into the pot
    pub fn is_contribution(&self) -> bool {
        matches!(
            self,
            ActionType::Blind(_)
                | ActionType::Ante
                | ActionType::Call
                | ActionType::Bet
                | ActionType::Raise
        )
    }

    /// Actions that never carry an amount and only describe a player's presence at the table
    pub fn is_system(&self) -> bool {
        matches!(
            self,
            ActionType::Timeout
                | ActionType::Disconnect
                | ActionType::Reconnect
                | ActionType::Sitout
                | ActionType::Return
        )
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionType::Blind(_) => "blind",
            ActionType::Ante => "ante",
            ActionType::Deal => "deal",
            ActionType::Fold => "fold",
            ActionType::Check => "check",
            ActionType::Call => "call",
            ActionType::Bet => "bet",
            ActionType::Raise => "raise",
            ActionType::Show => "show",
            ActionType::Uncalled => "uncalled",
            ActionType::Collected => "collected",
            ActionType::Muck => "muck",
            ActionType::Timeout => "timeout",
            ActionType::Disconnect => "disconnect",
            ActionType::Reconnect => "reconnect",
            ActionType::Sitout => "sitout",
            ActionType::Return => "return",
        };
        write!(f, "{name}")
    }
}

impl Serialize for ActionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.to_string())?;
        if let ActionType::Blind(kind) = self {
            map.serialize_entry("blindKind", kind)?;
        }
        map.end()
    }
}

/// The parts of an action that a single line determines.
///
/// The grammar produces these; the parser gives them an index and a street when it records them.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDetails {
    pub kind: ActionType,
    pub player: Option<String>,
    pub amount: Option<Amount>,
    pub cards: Option<Vec<Card>>,
    pub is_all_in: bool,
    pub reason: Option<String>,
}

impl ActionDetails {
    pub fn new(kind: ActionType) -> Self {
        Self {
            kind,
            player: None,
            amount: None,
            cards: None,
            is_all_in: false,
            reason: None,
        }
    }

    pub fn player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = Some(cards);
        self
    }

    pub fn all_in(mut self) -> Self {
        self.is_all_in = true;
        self
    }

    pub fn reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub index: usize,
    pub street: Street,
    #[serde(flatten)]
    pub kind: ActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_all_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Action {
    pub fn new(index: usize, street: Street, details: ActionDetails) -> Self {
        Self {
            index,
            street,
            kind: details.kind,
            player: details.player,
            amount: details.amount,
            cards: details.cards,
            is_all_in: details.is_all_in,
            reason: details.reason,
        }
    }

    /// The line-level parts of this action, e.g. for replaying it
    pub fn details(&self) -> ActionDetails {
        ActionDetails {
            kind: self.kind,
            player: self.player.clone(),
            amount: self.amount,
            cards: self.cards.clone(),
            is_all_in: self.is_all_in,
            reason: self.reason.clone(),
        }
    }
}

/// Append-only action list that hands out the gapless indices
#[derive(Debug, Default, Clone)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action, returning the index it was given
    pub fn push(&mut self, street: Street, details: ActionDetails) -> usize {
        let index = self.actions.len();
        self.actions.push(Action::new(index, street, details));
        index
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn into_vec(self) -> Vec<Action> {
        self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_assigns_gapless_indices() {
        let mut log = ActionLog::new();
        assert_eq!(log.push(Street::Preflop, ActionDetails::new(ActionType::Fold)), 0);
        assert_eq!(log.push(Street::Flop, ActionDetails::new(ActionType::Deal)), 1);
        assert_eq!(log.push(Street::Flop, ActionDetails::new(ActionType::Check)), 2);

        let indices: Vec<_> = log.as_slice().iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(log.as_slice()[1].street, Street::Flop);
    }

    #[test]
    fn test_street_order() {
        assert!(Street::Preflop < Street::Flop);
        assert!(Street::River < Street::Showdown);
    }

    #[test]
    fn test_contribution_kinds() {
        assert!(ActionType::Blind(BlindKind::Small).is_contribution());
        assert!(ActionType::Raise.is_contribution());
        assert!(!ActionType::Uncalled.is_contribution());
        assert!(!ActionType::Collected.is_contribution());
        assert!(ActionType::Sitout.is_system());
        assert!(!ActionType::Muck.is_system());
    }

    #[test]
    fn test_serialized_shape() {
        let action = Action::new(
            3,
            Street::Preflop,
            ActionDetails::new(ActionType::Call)
                .player("Player1")
                .amount(200.0)
                .all_in(),
        );
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "call");
        assert_eq!(json["player"], "Player1");
        assert_eq!(json["amount"], 200.0);
        assert_eq!(json["isAllIn"], true);
        assert!(json.get("reason").is_none());
        assert!(json.get("blindKind").is_none());
    }

    #[test]
    fn test_blind_type_is_flat() {
        let action = Action::new(
            0,
            Street::Preflop,
            ActionDetails::new(ActionType::Blind(BlindKind::Small))
                .player("Bob")
                .amount(1.0),
        );
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "blind");
        assert_eq!(json["blindKind"], "small");
        assert_eq!(json["index"], 0);
        assert_eq!(json["street"], "preflop");
    }
}
