//! Cursor over tokenized lines
//!
//!     The parser walks the lines strictly forward. The cursor is owned by a single parse call
//!     and passed by exclusive reference through the parsing stages.

use super::Line;
use crate::history::parsing::ParserError;

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    lines: &'a [Line],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(lines: &'a [Line]) -> Self {
        Self { lines, position: 0 }
    }

    pub fn has_more_lines(&self) -> bool {
        self.position < self.lines.len()
    }

    pub fn current_line(&self) -> Option<&'a Line> {
        self.lines.get(self.position)
    }

    /// The current line, or an end-of-input error naming what was expected
    pub fn expect_line(&self, expected: &str) -> Result<&'a Line, ParserError> {
        self.current_line().ok_or_else(|| {
            ParserError::end_of_input(format!("Unexpected end of input: expected {expected}"), self)
        })
    }

    pub fn advance(&mut self) {
        if self.position < self.lines.len() {
            self.position += 1;
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Line number to report when input ran out
    pub fn end_line_number(&self) -> usize {
        self.lines.last().map(|l| l.number + 1).unwrap_or(1)
    }

    /// The last line, used to locate errors found after the whole input was consumed
    pub fn last_line(&self) -> Option<&'a Line> {
        self.lines.last()
    }
}
