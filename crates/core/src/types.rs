//! Domain types for representing bucketed Markdown and slide content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three fixed pitch deck sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Problem,
    Solution,
    Architecture,
}

impl Section {
    /// All sections in deck order. The first one is the initial bucket.
    pub const ALL: [Section; 3] = [Section::Problem, Section::Solution, Section::Architecture];

    /// Display name, used both as heading key and as slide title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Problem => "Problem",
            Self::Solution => "Solution",
            Self::Architecture => "Architecture",
        }
    }

    /// Map an already title-cased heading to its section.
    ///
    /// Matching is exact; callers are responsible for title-casing.
    pub fn from_heading(heading: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.title() == heading)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Content lines bucketed under the three fixed sections.
///
/// All three buckets always exist, in [`Section::ALL`] order, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    buckets: [Vec<String>; 3],
}

impl Sections {
    /// Create three empty buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a content line to a section's bucket.
    pub fn push(&mut self, section: Section, line: impl Into<String>) {
        self.buckets[section.index()].push(line.into());
    }

    /// Content lines of a section, in input order.
    pub fn lines(&self, section: Section) -> &[String] {
        &self.buckets[section.index()]
    }

    /// Iterate over every section and its lines in deck order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &[String])> + '_ {
        Section::ALL
            .into_iter()
            .map(move |s| (s, self.lines(s)))
    }

    /// True when no bucket holds any content.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

/// Title and bullets of a single slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideContent {
    /// Slide title.
    pub title: String,

    /// Bullet paragraphs, top outline level, in order.
    pub bullets: Vec<String>,
}

impl SlideContent {
    /// Create slide content from an explicit title and bullets.
    pub fn new(title: impl Into<String>, bullets: Vec<String>) -> Self {
        Self {
            title: title.into(),
            bullets,
        }
    }

    /// Build the slide for a section, falling back to a single placeholder
    /// bullet when the bucket is empty.
    pub fn from_section(section: Section, lines: &[String], placeholder: &str) -> Self {
        let bullets = if lines.is_empty() {
            vec![placeholder.to_string()]
        } else {
            lines.to_vec()
        };
        Self::new(section.title(), bullets)
    }
}

/// Ordered slide contents of a deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Slides in presentation order.
    pub slides: Vec<SlideContent>,
}

impl Outline {
    /// Create an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slide to the end of the outline.
    pub fn add_slide(&mut self, slide: SlideContent) {
        self.slides.push(slide);
    }

    /// Slide titles in order.
    pub fn titles(&self) -> Vec<&str> {
        self.slides.iter().map(|s| s.title.as_str()).collect()
    }
}
