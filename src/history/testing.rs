//! Testing utilities for parsed hands
//!
//! # Parser Testing Guidelines
//!
//! Two tools are meant to be used together:
//!
//! 1. **[samples]** - curated, internally consistent hand histories
//! 2. **[assert_hand](fn@assert_hand)** - fluent assertions over a parsed
//!    [`PokerHand`](crate::history::ast::PokerHand)
//!
//! ## Rule 1: Prefer the curated samples
//!
//! Hand histories are easy to get subtly wrong: a call amount that does not match the raise,
//! a summary total that misses the ante. Such mistakes surface as reconciliation failures that
//! have nothing to do with the code under test. The samples have been checked by hand, so
//! tests built on them fail only for real reasons. Short inline hands are fine for narrow
//! engine tests.
//!
//! ## Rule 2: Assert shape with assert_hand
//!
//! ```rust-example
//! use crate::history::testing::{assert_hand, samples};
//!
//! let hand = crate::history::parse(samples::SPLIT_POT)?;
//! assert_hand(&hand)
//!     .action_count(18)
//!     .pot_count(1)
//!     .pot(0, |pot| pot.amount(101.0).split().odd_chip_winner("Player2"));
//! ```

pub mod assertions;
pub mod samples;

pub use assertions::{assert_hand, HandAssertion, PotAssertion};
