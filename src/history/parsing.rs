//! Parsing hand histories into [`PokerHand`] records
//!
//!     Parsing is a single forward pass over the tokenized lines, driven by a small state
//!     machine (see [engine]). The stages, in order, are:
//!
//!         Header -> Table -> Seats -> Blinds/Antes -> Hole cards? -> Preflop actions
//!             -> Flop? -> Turn? -> River? -> Showdown? -> Summary
//!
//!     Per-line action recognition is delegated to the priority-ordered [grammar], and chip
//!     bookkeeping to the [tracker](crate::history::tracking). Once the lines are consumed the
//!     draft hand is handed to the [settlement](crate::history::settlement) engine, which builds
//!     and reconciles the pots.
//!
//! Failure
//!
//!     Parsing never panics and never returns a half-built hand: callers receive either a complete
//!     [`PokerHand`] or a [`ParserError`] naming the message, the 1-based line number and the
//!     offending line. Lines the grammar does not recognize are not errors; hand histories are
//!     full of narrative text (chat, table notices) that the structured record does not need.

pub mod amounts;
pub mod engine;
pub mod grammar;
pub mod summary;

pub use engine::{Dialect, HandParser};
pub use grammar::{ActionGrammar, RuleGroup};

use crate::history::ast::PokerHand;
use crate::history::lexing::{Cursor, Line};
use serde::Serialize;
use std::fmt;

/// Outcome of parsing one hand
pub type ParserResult = Result<PokerHand, ParserError>;

/// A fatal, line-located parse failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParserError {
    pub message: String,
    /// 1-based line number in the original input
    pub line: usize,
    /// The offending line, empty when the input ran out
    pub context: String,
}

impl ParserError {
    pub fn new(message: impl Into<String>, line: usize, context: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line,
            context: context.into(),
        }
    }

    /// Error located at a specific line
    pub fn at(message: impl Into<String>, line: &Line) -> Self {
        Self::new(message, line.number, line.text.clone())
    }

    /// Error for input that ended while more was expected
    pub fn end_of_input(message: impl Into<String>, cursor: &Cursor<'_>) -> Self {
        Self::new(message, cursor.end_line_number(), "")
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{} (line {})", self.message, self.line)
        } else {
            write!(f, "{} (line {}: {})", self.message, self.line, self.context)
        }
    }
}

impl std::error::Error for ParserError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_error_display() {
        let line = Line::new(3, "Table without quotes");
        let err = ParserError::at("Missing table information", &line);
        assert_eq!(
            err.to_string(),
            "Missing table information (line 3: Table without quotes)"
        );

        let err = ParserError::new("Unexpected end of input", 9, "");
        assert_eq!(err.to_string(), "Unexpected end of input (line 9)");
    }
}
