//! Error types for pitch deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading Markdown or writing a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read the input or write the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML writing or parsing error (for PPTX).
    #[error("XML error: {0}")]
    Xml(String),

    /// A package was read back but does not look like a deck we can outline.
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),
}
