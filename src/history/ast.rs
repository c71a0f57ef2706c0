//! Data model for parsed hand histories
//!
//!     The parser turns text into the types defined here. Data flows strictly forward:
//!
//!         raw text -> lines -> hand parser (grammar + tracker) -> draft hand -> settlement
//!
//!     and what comes out at the end is a [`PokerHand`]. Downstream consumers (replayers,
//!     renderers, statistics) only ever see these types and must treat them as immutable.
//!
//!     Invariants every published hand satisfies:
//!         - action indices are exactly `0..n-1` in creation order
//!         - every `action.player` names a seated player
//!         - the pot amounts add up to the chips contributed minus the rake
//!         - every pot has at least one eligible player
//!         - side pot levels are positive and increase with the all-in amount
//!
//!     The [validation](crate::history::validation) module checks these independently of the
//!     parser.

pub mod elements;

pub use elements::*;
