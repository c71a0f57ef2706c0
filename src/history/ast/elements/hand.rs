use super::action::{Action, Amount};
use super::card::Card;
use super::player::Player;
use super::pot::Pot;
use super::table::TableInfo;
use crate::history::formats::FormatTag;
use serde::Serialize;

/// A fully parsed and settled poker hand.
///
/// This is the only artifact the parser publishes; consumers treat it as read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PokerHand {
    pub id: String,
    pub format: FormatTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
    pub stakes: String,
    pub date: String,
    pub table: TableInfo,
    pub players: Vec<Player>,
    pub actions: Vec<Action>,
    pub board: Vec<Card>,
    pub pots: Vec<Pot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pot: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rake: Option<Amount>,
}

impl PokerHand {
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn hero(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_hero)
    }

    /// Actions attributed to one player, in order
    pub fn actions_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Action> + 'a {
        self.actions
            .iter()
            .filter(move |a| a.player.as_deref() == Some(name))
    }

    pub fn winners(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for pot in &self.pots {
            for name in &pot.players {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}
