//! PokerStars hand histories
//!
//!     PokerStars Hand #245678901234:  Hold'em No Limit ($0.50/$1.00 USD) - 2024/01/15 20:30:00 ET
//!     Table 'Alpha III' 6-max Seat #3 is the button
//!
//! Zoom and home-game headers (`PokerStars Zoom Hand #`, `PokerStars Home Game #`) and the older
//! `PokerStars Game #` spelling are accepted too.

use super::{normalize_text, FormatTag, HandFormat};
use crate::history::config::HandHistoryConfig;
use crate::history::lexing::Line;
use crate::history::parsing::{Dialect, HandParser, ParserResult};
use std::borrow::Cow;

#[derive(Debug, Clone)]
pub struct PokerStarsFormat {
    parser: HandParser,
}

impl PokerStarsFormat {
    pub fn new() -> Self {
        Self {
            parser: HandParser::new(Dialect::pokerstars()),
        }
    }

    pub fn with_config(config: &HandHistoryConfig) -> Self {
        Self {
            parser: HandParser::new(Dialect::pokerstars()).with_config(config),
        }
    }
}

impl Default for PokerStarsFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl HandFormat for PokerStarsFormat {
    fn tag(&self) -> FormatTag {
        FormatTag::POKERSTARS
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::formats::parse_with;
    use crate::history::testing::samples;

    #[test]
    fn test_validate_format() {
        let format = PokerStarsFormat::new();
        assert!(format.validate_format(samples::CASH_GAME));
        assert!(format.validate_format("PokerStars Zoom Hand #1: Hold'em"));
        assert!(format.validate_format("PokerStars Game #1: Hold'em"));
        assert!(!format.validate_format(samples::GGPOKER));
    }

    #[test]
    fn test_parse_cash_game() {
        let hand = parse_with(&PokerStarsFormat::new(), samples::CASH_GAME).unwrap();
        assert_eq!(hand.id, "245678901234");
        assert_eq!(hand.format, FormatTag::POKERSTARS);
        assert_eq!(hand.players.len(), 4);
    }

    #[test]
    fn test_windows_line_endings() {
        let raw = samples::CASH_GAME.replace('\n', "\r\n");
        let hand = parse_with(&PokerStarsFormat::new(), &raw).unwrap();
        assert_eq!(hand.table.name, "Alpha III");
    }
}
