//! Core domain types, line normalization, and section bucketing
//! for Markdown pitch decks.

pub mod error;
pub mod normalize;
pub mod sections;
pub mod types;

pub use error::{Error, Result};
pub use normalize::TextNormalizer;
pub use sections::SectionBucketer;
pub use types::{Outline, Section, Sections, SlideContent};
