//! PPTX (Office Open XML) backend for Markdown pitch decks.
//!
//! Writes decks as ZIP archives of PresentationML parts and reads them back.

pub mod parts;
pub mod reader;
pub mod writer;

pub use reader::{DeckInfo, DeckReader};
pub use writer::{DeckBuilder, DeckOptions, DEFAULT_PLACEHOLDER, EMU_PER_INCH};
