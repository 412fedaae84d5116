//! Line normalization for Markdown summaries.
//!
//! Splits raw text on every universal line boundary, trims each line and
//! drops the ones left empty.

use crate::Result;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Regex matching a single line boundary, `\r\n` taking precedence over `\r`.
static LINE_BOUNDARY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0B\x0C\x1C\x1D\x1E\x{85}\x{2028}\x{2029}]").unwrap()
});

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Whitespace for trimming: Unicode whitespace plus the FS/GS/RS/US
/// separators, which also count as line boundaries.
pub fn is_line_whitespace(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

/// Text normalizer producing the non-blank, trimmed lines of a document.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a new text normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Split text into trimmed, non-empty lines, preserving their order.
    pub fn normalize_to_lines(&self, text: &str) -> Vec<String> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

        LINE_BOUNDARY_REGEX
            .split(text)
            .map(|l| l.trim_matches(is_line_whitespace))
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Read a UTF-8 file and normalize its contents.
    ///
    /// The file is read in one go and closed before normalization starts.
    pub fn read_lines(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let lines = self.normalize_to_lines(&text);
        log::debug!("Read {} non-blank lines from {}", lines.len(), path.display());
        Ok(lines)
    }
}
