//! GGPoker hand histories
//!
//!     Poker Hand #RC1234567890: Hold'em No Limit ($0.05/$0.10) - 2024/03/02 18:22:10
//!
//! Hand ids carry a letter prefix. Other players' hole cards are hidden (`Dealt to a1b2c3`),
//! the showdown marker is spelled `*** SHOWDOWN ***`, and the total line lists jackpot and
//! similar fees after the rake; those are ignored.

use super::{normalize_text, FormatTag, HandFormat};
use crate::history::config::HandHistoryConfig;
use crate::history::lexing::Line;
use crate::history::parsing::{Dialect, HandParser, ParserResult};
use std::borrow::Cow;

#[derive(Debug, Clone)]
pub struct GgPokerFormat {
    parser: HandParser,
}

impl GgPokerFormat {
    pub fn new() -> Self {
        Self {
            parser: HandParser::new(Dialect::ggpoker()),
        }
    }

    pub fn with_config(config: &HandHistoryConfig) -> Self {
        Self {
            parser: HandParser::new(Dialect::ggpoker()).with_config(config),
        }
    }
}

impl Default for GgPokerFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl HandFormat for GgPokerFormat {
    fn tag(&self) -> FormatTag {
        FormatTag::GGPOKER
    }

    fn validate_format(&self, raw: &str) -> bool {
        self.parser.dialect().recognizes(raw)
    }

    fn preprocess<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        normalize_text(raw)
    }

    fn parse_body(&self, lines: &[Line]) -> ParserResult {
        self.parser.parse_lines(lines)
    }
}
