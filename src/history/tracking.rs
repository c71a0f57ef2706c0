//! Player State Tracker
//!
//!     Running chip state for a single forward pass over a hand's actions. Per seated player
//!     the tracker knows the remaining chips, the all-in amount (if any), whether the player is
//!     still active, and how much they have put in: in total and on the current street.
//!
//!     Folded players leave the active set and are never eligible for any pot. All-in players
//!     also leave the active set, since they take no further voluntary action, but they stay
//!     eligible for the pots they contributed to. The distinction is kept by recording the
//!     all-in amount separately from active membership.
//!
//!     Players are kept in seat order, so every query returns names in a deterministic order.
//!
//!     A tracker belongs to one parse. The engine creates a fresh one per call, and [reset]
//!     makes an existing instance reusable without leaking state.
//!
//!     [reset]: PlayerStateTracker::reset

use crate::history::ast::{ActionDetails, ActionType, Amount, BlindKind};

#[derive(Debug, Clone, PartialEq)]
struct PlayerState {
    name: String,
    chips: Amount,
    all_in: Option<Amount>,
    active: bool,
    contributed: Amount,
    committed: Amount,
}

/// How a contribution is settled against the current street
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wager {
    /// Live money: counts toward the street commitment (calls, bets, blinds)
    Live(Amount),
    /// Dead money: goes into the pot without committing to the street (antes, dead blinds)
    Dead(Amount),
    /// A raise to a street total; the increment is the total minus what is already committed
    RaiseTo(Amount),
    /// A posting where only `live` counts toward the commitment
    Mixed { total: Amount, live: Amount },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStateTracker {
    players: Vec<PlayerState>,
}

impl PlayerStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a player's starting stack and add them to the active set.
    ///
    /// Initializing a name twice replaces the earlier state.
    pub fn initialize_player(&mut self, name: &str, chips: Amount) {
        let state = PlayerState {
            name: name.to_string(),
            chips: chips.max(0.0),
            all_in: None,
            active: true,
            contributed: 0.0,
            committed: 0.0,
        };
        match self.state_mut(name) {
            Some(existing) => *existing = state,
            None => self.players.push(state),
        }
    }

    /// Set a player's chip count, never below zero
    pub fn track_player_chips(&mut self, name: &str, amount: Amount) {
        if let Some(state) = self.state_mut(name) {
            state.chips = amount.max(0.0);
        }
    }

    /// Record an all-in and take the player out of the active set
    pub fn mark_player_all_in(&mut self, name: &str, amount: Amount) {
        if let Some(state) = self.state_mut(name) {
            state.all_in = Some(amount);
            state.active = false;
        }
    }

    /// Take a folded player out of the active set
    pub fn remove_active_player(&mut self, name: &str) {
        if let Some(state) = self.state_mut(name) {
            state.active = false;
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state(name).is_some()
    }

    pub fn chips(&self, name: &str) -> Option<Amount> {
        self.state(name).map(|s| s.chips)
    }

    pub fn all_in_amount(&self, name: &str) -> Option<Amount> {
        self.state(name).and_then(|s| s.all_in)
    }

    pub fn is_all_in(&self, name: &str) -> bool {
        self.all_in_amount(name).is_some()
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.state(name).map(|s| s.active).unwrap_or(false)
    }

    /// Every all-in player with their all-in amount, in seat order
    pub fn all_in_players(&self) -> Vec<(String, Amount)> {
        self.players
            .iter()
            .filter_map(|s| s.all_in.map(|amount| (s.name.clone(), amount)))
            .collect()
    }

    /// Names of the active players, in seat order
    pub fn active_players(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|s| s.active)
            .map(|s| s.name.clone())
            .collect()
    }

    /// Total a player has put into the pot so far
    pub fn contributed(&self, name: &str) -> Amount {
        self.state(name).map(|s| s.contributed).unwrap_or(0.0)
    }

    /// What a player has committed on the current street
    pub fn committed(&self, name: &str) -> Amount {
        self.state(name).map(|s| s.committed).unwrap_or(0.0)
    }

    /// Every player's total contribution, in seat order
    pub fn contributions(&self) -> Vec<(String, Amount)> {
        self.players
            .iter()
            .map(|s| (s.name.clone(), s.contributed))
            .collect()
    }

    pub fn total_contributed(&self) -> Amount {
        self.players.iter().map(|s| s.contributed).sum()
    }

    /// Clear per-street commitments
    pub fn start_street(&mut self) {
        for state in &mut self.players {
            state.committed = 0.0;
        }
    }

    /// Move chips from a player's stack into the pot, returning the amount added
    pub fn pay(&mut self, name: &str, wager: Wager) -> Amount {
        let Some(state) = self.state_mut(name) else {
            return 0.0;
        };
        let (paid, live) = match wager {
            Wager::Live(amount) => (amount, amount),
            Wager::Dead(amount) => (amount, 0.0),
            Wager::RaiseTo(total) => {
                let increment = (total - state.committed).max(0.0);
                (increment, increment)
            }
            Wager::Mixed { total, live } => (total, live.min(total)),
        };
        state.contributed += paid;
        state.committed += live;
        state.chips = (state.chips - paid).max(0.0);
        paid
    }

    /// Give back an uncalled bet.
    ///
    /// The refund is taken off the player's contribution, and an all-in amount is capped at
    /// what the player actually has in the pot afterwards.
    pub fn refund(&mut self, name: &str, amount: Amount) {
        if let Some(state) = self.state_mut(name) {
            state.chips += amount;
            state.contributed = (state.contributed - amount).max(0.0);
            state.committed = (state.committed - amount).max(0.0);
            if let Some(all_in) = state.all_in {
                state.all_in = Some(all_in.min(state.contributed));
            }
        }
    }

    /// Credit winnings
    pub fn award(&mut self, name: &str, amount: Amount) {
        if let Some(state) = self.state_mut(name) {
            state.chips += amount;
        }
    }

    /// Apply one recognized action to the running state.
    ///
    /// Contributions are debited (a combined blind counts at most `big_blind` toward the
    /// street), uncalled bets are refunded, collections are credited and folds leave the
    /// active set. A contributing player who declares all-in or runs out of chips is marked
    /// all-in at their total contribution. Returns whether the player is all-in afterwards.
    pub fn apply(&mut self, action: &ActionDetails, big_blind: Option<Amount>) -> bool {
        let Some(name) = action.player.as_deref() else {
            return false;
        };
        let amount = action.amount.unwrap_or(0.0);
        let wager = match action.kind {
            ActionType::Ante | ActionType::Blind(BlindKind::Dead) => Some(Wager::Dead(amount)),
            ActionType::Blind(BlindKind::Combined) => Some(Wager::Mixed {
                total: amount,
                live: big_blind.unwrap_or(amount),
            }),
            ActionType::Blind(_) | ActionType::Call | ActionType::Bet => {
                Some(Wager::Live(amount))
            }
            ActionType::Raise => Some(Wager::RaiseTo(amount)),
            _ => None,
        };

        match (wager, action.kind) {
            (Some(wager), _) => {
                self.pay(name, wager);
                let broke = self.chips(name).map(|c| c <= 0.0).unwrap_or(false);
                if action.is_all_in || broke {
                    let total = self.contributed(name);
                    self.mark_player_all_in(name, total);
                }
            }
            (None, ActionType::Uncalled) => self.refund(name, amount),
            (None, ActionType::Collected) => self.award(name, amount),
            (None, ActionType::Fold) => self.remove_active_player(name),
            _ => {}
        }
        self.is_all_in(name)
    }

    /// Forget every player
    pub fn reset(&mut self) {
        self.players.clear();
    }

    fn state(&self, name: &str) -> Option<&PlayerState> {
        self.players.iter().find(|s| s.name == name)
    }

    fn state_mut(&mut self, name: &str) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> PlayerStateTracker {
        let mut tracker = PlayerStateTracker::new();
        tracker.initialize_player("Alice", 50.0);
        tracker.initialize_player("Bob", 200.0);
        tracker.initialize_player("Carol", 300.0);
        tracker
    }

    #[test]
    fn test_initialize_seeds_active_set() {
        let tracker = tracker();
        assert_eq!(tracker.active_players(), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(tracker.chips("Bob"), Some(200.0));
        assert!(tracker.all_in_players().is_empty());
    }

    #[test]
    fn test_chips_never_negative() {
        let mut tracker = tracker();
        tracker.track_player_chips("Alice", -0.004);
        assert_eq!(tracker.chips("Alice"), Some(0.0));
        tracker.pay("Bob", Wager::Live(250.0));
        assert_eq!(tracker.chips("Bob"), Some(0.0));
    }

    #[test]
    fn test_all_in_differs_from_fold() {
        let mut tracker = tracker();
        tracker.mark_player_all_in("Alice", 50.0);
        tracker.remove_active_player("Carol");

        assert!(tracker.is_all_in("Alice"));
        assert!(!tracker.is_active("Alice"));
        assert!(!tracker.is_all_in("Carol"));
        assert!(!tracker.is_active("Carol"));
        assert_eq!(tracker.all_in_players(), vec![("Alice".to_string(), 50.0)]);
        assert_eq!(tracker.active_players(), vec!["Bob"]);
    }

    #[test]
    fn test_raise_to_pays_increment() {
        let mut tracker = tracker();
        tracker.pay("Bob", Wager::Live(2.0));
        let paid = tracker.pay("Bob", Wager::RaiseTo(10.0));
        assert_eq!(paid, 8.0);
        assert_eq!(tracker.contributed("Bob"), 10.0);

        tracker.start_street();
        assert_eq!(tracker.committed("Bob"), 0.0);
        assert_eq!(tracker.pay("Bob", Wager::RaiseTo(30.0)), 30.0);
    }

    #[test]
    fn test_dead_money_does_not_commit() {
        let mut tracker = tracker();
        tracker.pay("Carol", Wager::Dead(25.0));
        tracker.pay("Carol", Wager::Mixed { total: 3.0, live: 2.0 });
        assert_eq!(tracker.contributed("Carol"), 28.0);
        assert_eq!(tracker.committed("Carol"), 2.0);
    }

    #[test]
    fn test_refund_caps_all_in() {
        let mut tracker = tracker();
        let shove = ActionDetails::new(ActionType::Bet)
            .player("Bob")
            .amount(200.0)
            .all_in();
        assert!(tracker.apply(&shove, None));
        assert_eq!(tracker.all_in_amount("Bob"), Some(200.0));

        tracker.refund("Bob", 150.0);
        assert_eq!(tracker.contributed("Bob"), 50.0);
        assert_eq!(tracker.all_in_amount("Bob"), Some(50.0));
        assert_eq!(tracker.chips("Bob"), Some(150.0));
    }

    #[test]
    fn test_apply_detects_empty_stack() {
        let mut tracker = tracker();
        let call = ActionDetails::new(ActionType::Call).player("Alice").amount(50.0);
        assert!(tracker.apply(&call, None));
        assert_eq!(tracker.all_in_amount("Alice"), Some(50.0));
    }

    #[test]
    fn test_apply_fold_and_collect() {
        let mut tracker = tracker();
        tracker.apply(&ActionDetails::new(ActionType::Fold).player("Carol"), None);
        assert!(!tracker.is_active("Carol"));

        let won = ActionDetails::new(ActionType::Collected).player("Bob").amount(40.0);
        tracker.apply(&won, None);
        assert_eq!(tracker.chips("Bob"), Some(240.0));
        assert_eq!(tracker.contributed("Bob"), 0.0);
    }

    #[test]
    fn test_unknown_player_is_ignored() {
        let mut tracker = tracker();
        let bet = ActionDetails::new(ActionType::Bet).player("Mallory").amount(5.0);
        assert!(!tracker.apply(&bet, None));
        assert_eq!(tracker.total_contributed(), 0.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut tracker = tracker();
        tracker.mark_player_all_in("Alice", 50.0);
        tracker.reset();
        assert!(tracker.active_players().is_empty());
        assert!(tracker.all_in_players().is_empty());
        assert_eq!(tracker, PlayerStateTracker::new());
    }
}
