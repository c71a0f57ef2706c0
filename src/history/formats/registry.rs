//! Format registry
//!
//! Maps a [`FormatTag`] to a factory for its [`HandFormat`]. Formats are tried in registration
//! order during detection, so earlier registrations win when two formats accept the same text.

use super::{parse_with, FormatTag, GgPokerFormat, HandFormat, PokerStarsFormat};
use crate::history::config::HandHistoryConfig;
use crate::history::lexing::split_hands;
use crate::history::parsing::{ParserError, ParserResult};
use log::debug;

/// Builds a fresh format instance
pub type FormatFactory = Box<dyn Fn() -> Box<dyn HandFormat> + Send + Sync>;

struct Registration {
    tag: FormatTag,
    factory: FormatFactory,
    format: Box<dyn HandFormat>,
}

/// Registry of hand history formats
pub struct FormatRegistry {
    formats: Vec<Registration>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: Vec::new(),
        }
    }

    /// Register a format factory under `tag`.
    ///
    /// If the tag is already registered, its factory is replaced in place.
    pub fn register<F>(&mut self, tag: FormatTag, factory: F)
    where
        F: Fn() -> Box<dyn HandFormat> + Send + Sync + 'static,
    {
        let registration = Registration {
            tag,
            format: factory(),
            factory: Box::new(factory),
        };
        match self.formats.iter_mut().find(|r| r.tag == registration.tag) {
            Some(existing) => *existing = registration,
            None => self.formats.push(registration),
        }
    }

    /// Registered tags, in registration order
    pub fn supported_formats(&self) -> Vec<FormatTag> {
        self.formats.iter().map(|r| r.tag.clone()).collect()
    }

    pub fn has(&self, tag: &FormatTag) -> bool {
        self.formats.iter().any(|r| &r.tag == tag)
    }

    /// The first registered format that accepts the text, or [`FormatTag::GENERIC`]
    pub fn detect_format(&self, raw: &str) -> FormatTag {
        self.formats
            .iter()
            .find(|r| r.format.validate_format(raw))
            .map(|r| r.tag.clone())
            .unwrap_or(FormatTag::GENERIC)
    }

    /// A new instance of the format registered under `tag`
    pub fn create(&self, tag: &FormatTag) -> Option<Box<dyn HandFormat>> {
        self.formats
            .iter()
            .find(|r| &r.tag == tag)
            .map(|r| (r.factory)())
    }

    /// Detect the format and parse one hand
    pub fn parse(&self, raw: &str) -> ParserResult {
        let tag = self.detect_format(raw);
        debug!("detected format {tag}");
        match self.formats.iter().find(|r| r.tag == tag) {
            Some(registration) => parse_with(registration.format.as_ref(), raw),
            None => Err(ParserError::new(
                "Unrecognized hand history format",
                1,
                raw.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or(""),
            )),
        }
    }

    /// Parse a file holding many hands, one result per hand.
    ///
    /// A hand starts at any line that is a header in some registered format.
    pub fn parse_all(&self, raw: &str) -> Vec<ParserResult> {
        let hands = split_hands(raw, |line| {
            self.formats
                .iter()
                .any(|r| r.format.validate_format(line))
        });
        debug!("found {} hands", hands.len());
        hands.into_iter().map(|hand| self.parse(hand)).collect()
    }

    /// Registry with the built-in formats
    pub fn with_defaults() -> Self {
        Self::with_config(&HandHistoryConfig::default())
    }

    /// Registry with the built-in formats, all using `config`
    pub fn with_config(config: &HandHistoryConfig) -> Self {
        let mut registry = Self::new();

        let pokerstars = config.clone();
        registry.register(FormatTag::POKERSTARS, move || {
            Box::new(PokerStarsFormat::with_config(&pokerstars))
        });
        let ggpoker = config.clone();
        registry.register(FormatTag::GGPOKER, move || {
            Box::new(GgPokerFormat::with_config(&ggpoker))
        });

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::lexing::Line;
    use crate::history::testing::samples;

    struct TestFormat;
    impl HandFormat for TestFormat {
        fn tag(&self) -> FormatTag {
            FormatTag::new("test")
        }
        fn validate_format(&self, raw: &str) -> bool {
            raw.starts_with("TEST HAND")
        }
        fn parse_body(&self, lines: &[Line]) -> ParserResult {
            Err(ParserError::at("test format cannot parse", &lines[0]))
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert!(registry.supported_formats().is_empty());
        assert_eq!(registry.detect_format(samples::CASH_GAME), FormatTag::GENERIC);
    }

    #[test]
    fn test_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.supported_formats(),
            vec![FormatTag::POKERSTARS, FormatTag::GGPOKER]
        );
        assert_eq!(registry.detect_format(samples::CASH_GAME), FormatTag::POKERSTARS);
        assert_eq!(registry.detect_format(samples::GGPOKER), FormatTag::GGPOKER);
        assert_eq!(registry.detect_format("no hand here"), FormatTag::GENERIC);
    }

    #[test]
    fn test_register_new_format() {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(FormatTag::new("test"), || Box::new(TestFormat));

        assert!(registry.has(&FormatTag::new("test")));
        assert_eq!(registry.supported_formats().len(), 3);
        assert_eq!(registry.detect_format("TEST HAND 1"), FormatTag::new("test"));

        let err = registry.parse("TEST HAND 1").unwrap_err();
        assert_eq!(err.message, "test format cannot parse");
        assert!(registry.create(&FormatTag::new("test")).is_some());
        assert!(registry.create(&FormatTag::new("missing")).is_none());
    }

    #[test]
    fn test_register_replaces_tag() {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(FormatTag::POKERSTARS, || Box::new(TestFormat));
        assert_eq!(
            registry.supported_formats(),
            vec![FormatTag::POKERSTARS, FormatTag::GGPOKER]
        );
        assert_eq!(registry.detect_format(samples::CASH_GAME), FormatTag::GENERIC);
        assert!(registry.parse(samples::CASH_GAME).is_err());
    }

    #[test]
    fn test_unrecognized_text() {
        let err = FormatRegistry::default().parse("\n  hello there\n").unwrap_err();
        assert_eq!(err.message, "Unrecognized hand history format");
        assert_eq!(err.context, "hello there");
    }

    #[test]
    fn test_parse_all() {
        let raw = format!(
            "{}\n\n\n{}\n\n{}\n",
            samples::CASH_GAME,
            samples::GGPOKER,
            samples::SPLIT_POT
        );
        let results = FormatRegistry::default().parse_all(&raw);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(results[1].as_ref().unwrap().format, FormatTag::GGPOKER);
    }
}
