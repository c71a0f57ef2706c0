//! Line tokenization for hand history text
//!
//!     Hand histories are line oriented: every meaningful unit (header, seat, posting, action,
//!     street marker, summary entry) occupies exactly one line. Tokenizing is therefore just
//!     splitting the text into trimmed, non-empty lines, keeping the original 1-based line
//!     number of each so errors can point back at the input.
//!
//!     Files exported by poker clients hold many hands back to back, separated by blank lines.
//!     [`split_hands`] cuts such a file at its header lines so each hand can be parsed on its own.

pub mod cursor;

pub use cursor::Cursor;

/// One non-empty input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number in the original text (blank lines counted)
    pub number: usize,
    /// The trimmed line content
    pub text: String,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Split raw text into trimmed, non-empty lines, preserving order.
pub fn tokenize(source: &str) -> Vec<Line> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let text = raw.trim();
            (!text.is_empty()).then(|| Line::new(i + 1, text))
        })
        .collect()
}

/// Split a multi-hand file into one chunk per hand.
///
/// A new chunk starts at every line for which `is_header` holds. Text before the first header
/// (file banners, stray whitespace) is dropped. Chunks keep their internal line breaks.
pub fn split_hands<'a, F>(source: &'a str, is_header: F) -> Vec<&'a str>
where
    F: Fn(&str) -> bool,
{
    let mut starts = Vec::new();
    let mut offset = 0;
    for raw in source.split_inclusive('\n') {
        if is_header(raw.trim()) {
            starts.push(offset);
        }
        offset += raw.len();
    }

    let mut hands = Vec::with_capacity(starts.len());
    for (i, start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(source.len());
        let chunk = source[*start..end].trim();
        if !chunk.is_empty() {
            hands.push(chunk);
        }
    }
    hands
}
