//! Main module for hand history parsing
//!
//! The free functions here use a shared registry with the built-in formats and default
//! configuration. Build a [`FormatRegistry`](formats::FormatRegistry) yourself for custom
//! formats or settings.

pub mod ast;
pub mod config;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod settlement;
pub mod testing;
pub mod tracking;
pub mod validation;

use formats::{FormatRegistry, FormatTag};
use once_cell::sync::Lazy;
use parsing::ParserResult;

static DEFAULT_REGISTRY: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_defaults);

/// Detect the format and parse one hand. Never panics; failures come back as a `ParserError`.
pub fn parse(raw: &str) -> ParserResult {
    DEFAULT_REGISTRY.parse(raw)
}

/// Parse every hand in a multi-hand file
pub fn parse_all(raw: &str) -> Vec<ParserResult> {
    DEFAULT_REGISTRY.parse_all(raw)
}

pub fn detect_format(raw: &str) -> FormatTag {
    DEFAULT_REGISTRY.detect_format(raw)
}

pub fn supported_formats() -> Vec<FormatTag> {
    DEFAULT_REGISTRY.supported_formats()
}
