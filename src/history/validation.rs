//! Structural validation of finished hands
//!
//!     The validator checks a [`PokerHand`] on its own, without the parser's state:
//!
//!         structure   action indices are exactly 0..n-1, the table is not over-seated,
//!                     every pot has an eligible player, side-pot levels rise from 1
//!         players     no duplicate seats or names, every action names a seated player
//!         pot totals  the pots add up to the contributions minus the rake
//!
//!     Contributions are recomputed by replaying the actions through a fresh
//!     [tracker](crate::history::tracking::PlayerStateTracker), so raises count by their
//!     increment and returned bets are netted out.
//!
//!     Findings are advisory. Every check runs to the end and all problems are reported
//!     together in one [`ValidationReport`].

use crate::history::ast::{Amount, PokerHand, PotType, TOLERANCE};
use crate::history::parsing::amounts::{approx_eq, blinds_from_stakes};
use crate::history::tracking::PlayerStateTracker;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Combine two reports, keeping every error
    pub fn merge(mut self, other: ValidationReport) -> Self {
        self.errors.extend(other.errors);
        self.is_valid = self.errors.is_empty();
        self
    }
}

/// Index contiguity, seat capacity and pot shape
pub fn validate_hand_structure(hand: &PokerHand) -> ValidationReport {
    let mut errors = Vec::new();

    for (position, action) in hand.actions.iter().enumerate() {
        if action.index != position {
            errors.push(format!(
                "Action at position {position} has index {}",
                action.index
            ));
        }
    }

    if hand.players.len() > hand.table.max_seats as usize {
        errors.push(format!(
            "{} players exceed the table's {} seats",
            hand.players.len(),
            hand.table.max_seats
        ));
    }

    let mut previous_level = 0;
    for pot in &hand.pots {
        if pot.eligible_players.is_empty() {
            errors.push(format!("The {pot} has no eligible players"));
        }
        if pot.pot_type == PotType::Side {
            match pot.side_pot_level {
                Some(level) if level > previous_level => previous_level = level,
                Some(level) => errors.push(format!(
                    "Side pot level {level} does not follow level {previous_level}"
                )),
                None => errors.push("Side pot without a level".to_string()),
            }
        }
    }

    ValidationReport::from_errors(errors)
}

/// Unique seats and names, and no actions by unseated players
pub fn validate_player_consistency(hand: &PokerHand) -> ValidationReport {
    let mut errors = Vec::new();

    let mut seats = HashSet::new();
    let mut names = HashSet::new();
    for player in &hand.players {
        if !seats.insert(player.seat) {
            errors.push(format!("Duplicate seat number {}", player.seat));
        }
        if !names.insert(player.name.as_str()) {
            errors.push(format!("Duplicate player name {}", player.name));
        }
    }

    for action in &hand.actions {
        if let Some(name) = action.player.as_deref() {
            if !names.contains(name) {
                errors.push(format!(
                    "Action {} references unknown player {name}",
                    action.index
                ));
            }
        }
    }

    ValidationReport::from_errors(errors)
}

/// Contributions replayed from the action list, net of returned bets
pub fn replayed_contributions(hand: &PokerHand) -> Amount {
    let big_blind = blinds_from_stakes(&hand.stakes).map(|(_, bb)| bb);
    let mut tracker = PlayerStateTracker::new();
    for player in &hand.players {
        tracker.initialize_player(&player.name, player.chips);
    }

    let mut street = None;
    for action in &hand.actions {
        if street != Some(action.street) {
            tracker.start_street();
            street = Some(action.street);
        }
        tracker.apply(&action.details(), big_blind);
    }
    tracker.total_contributed()
}

pub fn validate_pot_totals(hand: &PokerHand) -> ValidationReport {
    validate_pot_totals_within(hand, TOLERANCE)
}

/// The pots must add up to the replayed contributions minus the rake
pub fn validate_pot_totals_within(hand: &PokerHand, tolerance: Amount) -> ValidationReport {
    let expected = replayed_contributions(hand) - hand.rake.unwrap_or(0.0);
    let total: Amount = hand.pots.iter().map(|p| p.amount).sum();

    let mut errors = Vec::new();
    if !approx_eq(total, expected, tolerance) {
        errors.push(format!(
            "Pots total {total:.2} but contributions less rake are {expected:.2}"
        ));
    }
    ValidationReport::from_errors(errors)
}

/// Run every check
pub fn validate(hand: &PokerHand) -> ValidationReport {
    validate_hand_structure(hand)
        .merge(validate_player_consistency(hand))
        .merge(validate_pot_totals(hand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ast::{
        Action, ActionDetails, ActionType, Player, Pot, Street, TableInfo,
    };
    use crate::history::formats::FormatTag;

    fn hand() -> PokerHand {
        let action = |index, kind, player: &str, amount| {
            Action::new(
                index,
                Street::Preflop,
                ActionDetails::new(kind).player(player).amount(amount),
            )
        };
        PokerHand {
            id: "1".into(),
            format: FormatTag::POKERSTARS,
            tournament_id: None,
            game: None,
            stakes: "$1/$2".into(),
            date: "2024/01/15 20:30:00".into(),
            table: TableInfo::new("Alpha", 6, 1),
            players: vec![Player::new(1, "A", 100.0), Player::new(2, "B", 100.0)],
            actions: vec![
                action(0, ActionType::Bet, "A", 10.0),
                action(1, ActionType::Raise, "B", 30.0),
                action(2, ActionType::Call, "A", 20.0),
            ],
            board: Vec::new(),
            pots: vec![Pot::single(59.0, vec!["A".into(), "B".into()])],
            total_pot: Some(60.0),
            rake: Some(1.0),
        }
    }

    #[test]
    fn test_valid_hand() {
        let report = validate(&hand());
        assert!(report.is_valid, "{:?}", report.errors);
        assert_eq!(replayed_contributions(&hand()), 60.0);
    }

    #[test]
    fn test_index_gaps() {
        let mut hand = hand();
        hand.actions[2].index = 3;
        let report = validate_hand_structure(&hand);
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["Action at position 2 has index 3"]);
    }

    #[test]
    fn test_over_seated_table() {
        let mut hand = hand();
        hand.table.max_seats = 1;
        assert!(!validate_hand_structure(&hand).is_valid);
    }

    #[test]
    fn test_side_pot_levels() {
        let mut hand = hand();
        hand.pots = vec![
            Pot::main(30.0, vec!["A".into()]),
            Pot::side(2, 20.0, vec!["B".into()]),
            Pot::side(1, 9.0, vec!["B".into()]),
        ];
        let report = validate_hand_structure(&hand);
        assert_eq!(report.errors, vec!["Side pot level 1 does not follow level 2"]);

        hand.pots[1].eligible_players.clear();
        assert_eq!(validate_hand_structure(&hand).errors.len(), 2);
    }

    #[test]
    fn test_errors_accumulate() {
        let mut hand = hand();
        hand.players.push(Player::new(2, "A", 50.0));
        hand.actions[1].player = Some("Mallory".into());
        let report = validate_player_consistency(&hand);
        assert_eq!(
            report.errors,
            vec![
                "Duplicate seat number 2",
                "Duplicate player name A",
                "Action 1 references unknown player Mallory",
            ]
        );
    }

    #[test]
    fn test_pot_total_mismatch() {
        let mut hand = hand();
        hand.pots[0].amount = 60.0;
        let report = validate_pot_totals(&hand);
        assert!(!report.is_valid);

        hand.rake = None;
        assert!(validate_pot_totals(&hand).is_valid);
    }

    #[test]
    fn test_merge_keeps_everything() {
        let merged = ValidationReport::from_errors(vec!["a".into()])
            .merge(ValidationReport::from_errors(vec![]))
            .merge(ValidationReport::from_errors(vec!["b".into()]));
        assert!(!merged.is_valid);
        assert_eq!(merged.errors, vec!["a", "b"]);
    }
}
