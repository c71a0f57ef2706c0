//! Site formats
//!
//!     Every supported site implements [`HandFormat`]: a strategy value that says whether a text
//!     is in its format, how to clean it up, how to parse the cleaned lines and how to report a
//!     failure. [`parse_with`] is the one driver that runs those steps in order; no format
//!     re-implements it.
//!
//!     Formats are looked up by [`FormatTag`] in the [`FormatRegistry`], which is open for new
//!     site grammars without touching existing ones.

pub mod ggpoker;
pub mod pokerstars;
pub mod registry;

pub use ggpoker::GgPokerFormat;
pub use pokerstars::PokerStarsFormat;
pub use registry::FormatRegistry;

use crate::history::lexing::{tokenize, Line};
use crate::history::parsing::{ParserError, ParserResult};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Name of a hand history format. Open-ended: registries may hold tags beyond the constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FormatTag(Cow<'static, str>);

impl FormatTag {
    pub const POKERSTARS: FormatTag = FormatTag(Cow::Borrowed("pokerstars"));
    pub const GGPOKER: FormatTag = FormatTag(Cow::Borrowed("ggpoker"));
    /// Returned by detection when no registered format matches
    pub const GENERIC: FormatTag = FormatTag(Cow::Borrowed("generic"));

    pub fn new(name: impl Into<String>) -> Self {
        FormatTag(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A site grammar, driven by [`parse_with`]
pub trait HandFormat: Send + Sync {
    fn tag(&self) -> FormatTag;

    /// Whether the raw text is in this format
    fn validate_format(&self, raw: &str) -> bool;

    /// Normalize the raw text before tokenizing
    fn preprocess<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(raw)
    }

    /// Parse the tokenized lines of one hand
    fn parse_body(&self, lines: &[Line]) -> ParserResult;

    /// Shape a driver-level failure
    fn build_error(&self, message: &str, line: Option<&Line>) -> ParserError {
        match line {
            Some(line) => ParserError::at(message, line),
            None => ParserError::new(message, 1, ""),
        }
    }
}

/// Parse one hand with a format: check, clean, tokenize, parse
pub fn parse_with(format: &dyn HandFormat, raw: &str) -> ParserResult {
    if !format.validate_format(raw) {
        let first = tokenize(raw).into_iter().next();
        return Err(format.build_error(
            &format!("Not a {} hand history", format.tag()),
            first.as_ref(),
        ));
    }
    let text = format.preprocess(raw);
    let lines = tokenize(&text);
    if lines.is_empty() {
        return Err(format.build_error("Empty hand history", None));
    }
    format.parse_body(&lines)
}

/// Strip a byte order mark and normalize line endings
pub(crate) fn normalize_text(raw: &str) -> Cow<'_, str> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
