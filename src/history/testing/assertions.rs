//! Fluent assertions over parsed hands

use crate::history::ast::{ActionType, Amount, PokerHand, Pot, PotType};
use crate::history::parsing::amounts::approx_eq;

pub fn assert_hand(hand: &PokerHand) -> HandAssertion<'_> {
    HandAssertion { hand }
}

pub struct HandAssertion<'a> {
    hand: &'a PokerHand,
}

impl<'a> HandAssertion<'a> {
    pub fn id(self, expected: &str) -> Self {
        assert_eq!(self.hand.id, expected, "hand id");
        self
    }

    pub fn player_count(self, expected: usize) -> Self {
        assert_eq!(self.hand.players.len(), expected, "player count");
        self
    }

    pub fn action_count(self, expected: usize) -> Self {
        assert_eq!(self.hand.actions.len(), expected, "action count");
        self
    }

    /// Action kinds in order, deal actions included
    pub fn action_kinds(self, expected: &[ActionType]) -> Self {
        let kinds: Vec<ActionType> = self.hand.actions.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, expected, "action kinds");
        self
    }

    pub fn board(self, expected: &str) -> Self {
        let board: Vec<String> = self.hand.board.iter().map(|c| c.to_string()).collect();
        assert_eq!(board.join(" "), expected, "board");
        self
    }

    pub fn hero(self, expected: &str) -> Self {
        let hero = self.hand.hero().map(|p| p.name.as_str());
        assert_eq!(hero, Some(expected), "hero");
        self
    }

    pub fn rake(self, expected: Amount) -> Self {
        assert_eq!(self.hand.rake, Some(expected), "rake");
        self
    }

    pub fn pot_count(self, expected: usize) -> Self {
        assert_eq!(self.hand.pots.len(), expected, "pot count");
        self
    }

    pub fn pot<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(PotAssertion<'a>) -> PotAssertion<'a>,
    {
        let pot = self
            .hand
            .pots
            .get(index)
            .unwrap_or_else(|| panic!("no pot at index {index}"));
        check(PotAssertion { pot, index });
        self
    }

    /// Sum of the published pots
    pub fn pot_total(self, expected: Amount) -> Self {
        let total: Amount = self.hand.pots.iter().map(|p| p.amount).sum();
        assert!(
            approx_eq(total, expected, 0.01),
            "pot total {total} != {expected}"
        );
        self
    }
}

pub struct PotAssertion<'a> {
    pot: &'a Pot,
    index: usize,
}

impl<'a> PotAssertion<'a> {
    pub fn amount(self, expected: Amount) -> Self {
        assert!(
            approx_eq(self.pot.amount, expected, 0.01),
            "pot {}: amount {} != {expected}",
            self.index,
            self.pot.amount
        );
        self
    }

    pub fn kind(self, expected: PotType) -> Self {
        assert_eq!(self.pot.pot_type, expected, "pot {} type", self.index);
        self
    }

    pub fn level(self, expected: usize) -> Self {
        assert_eq!(
            self.pot.side_pot_level,
            Some(expected),
            "pot {} level",
            self.index
        );
        self
    }

    pub fn eligible(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.pot.eligible_players, expected,
            "pot {} eligible players",
            self.index
        );
        self
    }

    pub fn winners(self, expected: &[&str]) -> Self {
        assert_eq!(self.pot.players, expected, "pot {} winners", self.index);
        self
    }

    pub fn split(self) -> Self {
        assert!(self.pot.is_split, "pot {} is not split", self.index);
        self
    }

    pub fn not_split(self) -> Self {
        assert!(!self.pot.is_split, "pot {} is split", self.index);
        self
    }

    pub fn odd_chip_winner(self, expected: &str) -> Self {
        assert_eq!(
            self.pot.odd_chip_winner.as_deref(),
            Some(expected),
            "pot {} odd chip",
            self.index
        );
        self
    }
}
