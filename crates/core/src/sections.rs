//! Section bucketing for Markdown summaries.
//!
//! Heading markers switch the active bucket; every other line is content
//! for whichever bucket is active. Headings that do not name one of the
//! fixed sections are dropped without changing the active bucket.

use crate::normalize::is_line_whitespace;
use crate::types::{Section, Sections};
use regex::Regex;
use std::sync::LazyLock;

/// Regex capturing the text of a heading marker line (`#`, `##`, ...).
static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#+(.*)$").unwrap());

/// Title-case text: the first letter of each run of letters is upper case,
/// the rest lower case. Any non-letter ends a run.
pub fn title_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                output.extend(c.to_lowercase());
            } else {
                output.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            output.push(c);
            in_word = false;
        }
    }

    output
}

/// Classification of a single normalized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Heading naming one of the fixed sections.
    Heading(Section),
    /// Heading that names no fixed section; carries the title-cased key.
    UnknownHeading(String),
    /// Anything else.
    Content(&'a str),
}

/// Classify a normalized (trimmed, non-empty) line.
pub fn classify(line: &str) -> LineKind<'_> {
    match HEADING_REGEX.captures(line) {
        Some(caps) => {
            let text = caps.get(1).map_or("", |m| m.as_str());
            let key = title_case(text.trim_matches(is_line_whitespace));
            match Section::from_heading(&key) {
                Some(section) => LineKind::Heading(section),
                None => LineKind::UnknownHeading(key),
            }
        }
        None => LineKind::Content(line),
    }
}

/// Buckets normalized lines under the fixed sections.
#[derive(Debug, Clone)]
pub struct SectionBucketer {
    /// Bucket that receives content before the first recognized heading.
    initial: Section,
}

impl Default for SectionBucketer {
    fn default() -> Self {
        Self {
            initial: Section::ALL[0],
        }
    }
}

impl SectionBucketer {
    /// Create a bucketer starting in the first section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket lines in order. Never fails; unknown headings are skipped.
    pub fn bucket<S: AsRef<str>>(&self, lines: &[S]) -> Sections {
        let mut sections = Sections::new();
        let mut current = self.initial;

        for line in lines {
            let line = line.as_ref().trim_matches(is_line_whitespace);
            if line.is_empty() {
                continue;
            }

            match classify(line) {
                LineKind::Heading(section) => {
                    log::debug!("Switching to section {}", section);
                    current = section;
                }
                LineKind::UnknownHeading(key) => {
                    log::debug!("Ignoring unrecognized heading {:?}", key);
                }
                LineKind::Content(text) => sections.push(current, text),
            }
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(lines: &[&str]) -> Sections {
        SectionBucketer::new().bucket(lines)
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("problem"), "Problem");
        assert_eq!(title_case("PROBLEM"), "Problem");
        assert_eq!(title_case("pRoBlEm"), "Problem");
        assert_eq!(title_case("random heading"), "Random Heading");
        assert_eq!(title_case("it's 2nd"), "It'S 2Nd");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("# Problem"), LineKind::Heading(Section::Problem));
        assert_eq!(classify("###solution"), LineKind::Heading(Section::Solution));
        assert_eq!(
            classify("## Random Heading"),
            LineKind::UnknownHeading("Random Heading".to_string())
        );
        assert_eq!(classify("#"), LineKind::UnknownHeading(String::new()));
        assert_eq!(classify("Plain text"), LineKind::Content("Plain text"));
        assert_eq!(classify("- # not a heading"), LineKind::Content("- # not a heading"));
    }

    #[test]
    fn test_three_headings_each_with_content() {
        let sections = bucket(&[
            "# Problem",
            "Tips are slow",
            "# Solution",
            "Instant tips",
            "# Architecture",
            "Rust bot",
        ]);

        assert_eq!(sections.lines(Section::Problem), ["Tips are slow"]);
        assert_eq!(sections.lines(Section::Solution), ["Instant tips"]);
        assert_eq!(sections.lines(Section::Architecture), ["Rust bot"]);
    }

    #[test]
    fn test_no_headings_land_in_first_section() {
        let sections = bucket(&["just some text", "more text"]);

        assert_eq!(sections.lines(Section::Problem), ["just some text", "more text"]);
        assert!(sections.lines(Section::Solution).is_empty());
        assert!(sections.lines(Section::Architecture).is_empty());
    }

    #[test]
    fn test_unknown_heading_keeps_active_bucket() {
        let sections = bucket(&[
            "# Solution",
            "first",
            "## Random Heading",
            "second",
        ]);

        assert_eq!(sections.lines(Section::Solution), ["first", "second"]);
        assert!(sections.lines(Section::Problem).is_empty());
        assert!(sections
            .iter()
            .all(|(_, lines)| !lines.iter().any(|l| l.contains("Random"))));
    }

    #[test]
    fn test_heading_case_insensitive() {
        for heading in ["# problem", "# PROBLEM", "# Problem", "#   pRoBlEm  "] {
            let sections = bucket(&["# Architecture", heading, "content"]);
            assert_eq!(sections.lines(Section::Problem), ["content"], "{heading}");
            assert!(sections.lines(Section::Architecture).is_empty());
        }
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let sections = bucket(&["", "   ", "# Solution", "", "idea", "\t"]);

        assert_eq!(sections.lines(Section::Solution), ["idea"]);
        assert!(sections.lines(Section::Problem).is_empty());
    }

    #[test]
    fn test_separator_only_line_is_blank() {
        let sections = bucket(&["# Solution", "\u{1F}", "real", "#\u{1F}problem\u{1F}", "x"]);

        assert_eq!(sections.lines(Section::Solution), ["real"]);
        assert_eq!(sections.lines(Section::Problem), ["x"]);
    }

    #[test]
    fn test_repeated_heading_appends() {
        let sections = bucket(&["# Problem", "a", "# Solution", "b", "# Problem", "c"]);

        assert_eq!(sections.lines(Section::Problem), ["a", "c"]);
        assert_eq!(sections.lines(Section::Solution), ["b"]);
    }

    #[test]
    fn test_multi_word_heading_does_not_match() {
        let sections = bucket(&["# Solution", "x", "# Problem Statement", "y"]);

        assert_eq!(sections.lines(Section::Solution), ["x", "y"]);
        assert!(sections.lines(Section::Problem).is_empty());
    }
}
