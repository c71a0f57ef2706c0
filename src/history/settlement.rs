//! Pot settlement
//!
//!     After the lines of a hand are consumed, the settlement engine turns the final player
//!     state into [`Pot`](crate::history::ast::Pot) values and checks them against what the
//!     hand history says was paid out.
//!
//!         structure   pot tiers from all-in amounts, eligibility per tier
//!         reconcile   collected-vs-computed reconciliation, rake, split pots and odd chips
//!
//!     Tiers are cut at every distinct all-in amount, lowest first. The lowest tier is the main
//!     pot; every tier above it is a side pot numbered 1, 2, ... in ascending all-in order.
//!     Chips put in beyond the highest all-in form one last side pot that only the players
//!     still in the hand can win.
//!
//!     A reconciliation mismatch is a hard [`PotError`]: it means either the grammar missed a
//!     line that moved chips or the hand history itself is inconsistent, and neither may be
//!     absorbed silently.

pub mod reconcile;
pub mod structure;

pub use reconcile::{
    apply_rake, enhance_pots, pot_target, validate_pot_math, validate_pot_math_within,
};
pub use structure::{build_pots, calculate_pot_structure, eligible_players, PotCalculation, SidePot};

use crate::history::ast::Amount;
use std::fmt;

/// Computed pots and reported collections disagree
#[derive(Debug, Clone, PartialEq)]
pub enum PotError {
    /// A pot's collections do not add up to its amount (net of rake)
    Mismatch {
        pot: String,
        expected: Amount,
        collected: Amount,
    },
    /// A collection names a pot that was never formed
    UnclaimedCollection { player: String, amount: Amount },
}

impl fmt::Display for PotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PotError::Mismatch {
                pot,
                expected,
                collected,
            } => write!(
                f,
                "{pot} holds {expected:.2} but {collected:.2} was collected"
            ),
            PotError::UnclaimedCollection { player, amount } => {
                write!(f, "{player} collected {amount:.2} from a pot that does not exist")
            }
        }
    }
}

impl std::error::Error for PotError {}
