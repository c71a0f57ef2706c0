//! # handhistory
//!
//! Parses poker hand history logs into structured, settled hands: table, players, the
//! chronological actions, the board and the final pots with side pots, split pots and rake.
//!
//! ## Testing
//!
//! For testing guidelines, see the [testing module](history::testing). Tests should build on
//! the curated samples and the fluent hand assertions.

pub mod history;
