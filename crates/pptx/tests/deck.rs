//! End-to-end tests: Markdown text in, PPTX file out, read back.

use deck_core::{SectionBucketer, TextNormalizer};
use deck_pptx::{DeckBuilder, DeckInfo, DeckReader, DEFAULT_PLACEHOLDER};
use std::path::Path;

fn generate(markdown: &str, output: &Path) -> DeckInfo {
    let lines = TextNormalizer::new().normalize_to_lines(markdown);
    let sections = SectionBucketer::new().bucket(&lines);
    let builder = DeckBuilder::new();
    builder.save(&builder.build(&sections), output).unwrap();
    DeckReader::new().open(output).unwrap()
}

#[test]
fn three_headings_produce_three_titled_slides() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("deck.pptx");

    let deck = generate(
        "# Problem\nTips are slow\n# Solution\nInstant tips\n# Architecture\nRust bot\n",
        &output,
    );

    let slides = &deck.outline.slides;
    assert_eq!(deck.outline.titles(), vec!["Problem", "Solution", "Architecture"]);
    assert_eq!(slides[0].bullets, vec!["Tips are slow"]);
    assert_eq!(slides[1].bullets, vec!["Instant tips"]);
    assert_eq!(slides[2].bullets, vec!["Rust bot"]);
}

#[test]
fn text_without_headings_fills_first_slide() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("deck.pptx");

    let deck = generate("just some text\nmore text", &output);

    let slides = &deck.outline.slides;
    assert_eq!(slides[0].bullets, vec!["just some text", "more text"]);
    assert_eq!(slides[1].bullets, vec![DEFAULT_PLACEHOLDER]);
    assert_eq!(slides[2].bullets, vec![DEFAULT_PLACEHOLDER]);
    assert_eq!(DEFAULT_PLACEHOLDER, "Add supporting details here.");
}

#[test]
fn unknown_headings_and_blank_lines_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("deck.pptx");

    let deck = generate(
        "# solution\n\n   \nfirst\n## Random Heading\nsecond\n\t\n# ARCHITECTURE\nthird & last",
        &output,
    );

    let slides = &deck.outline.slides;
    assert_eq!(slides[0].bullets, vec![DEFAULT_PLACEHOLDER]);
    assert_eq!(slides[1].bullets, vec!["first", "second"]);
    assert_eq!(slides[2].bullets, vec!["third & last"]);
}

#[test]
fn deck_is_widescreen() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("deck.pptx");

    let deck = generate("# Problem\nx", &output);

    assert_eq!(deck.slide_size, Some((12_188_952, 6_858_000)));
}

#[test]
fn regenerating_overwrites_with_same_content() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("deck.pptx");
    let markdown = "# Problem\nFees\n# Architecture\nWorkers\nQueues";

    std::fs::write(&output, b"stale contents").unwrap();
    let first = generate(markdown, &output);
    let first_bytes = std::fs::read(&output).unwrap();
    let second = generate(markdown, &output);
    let second_bytes = std::fs::read(&output).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn unwritable_output_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("deck.pptx");

    let builder = DeckBuilder::new();
    let outline = builder.build(&SectionBucketer::new().bucket(&["text"]));
    let err = builder.save(&outline, &output).unwrap_err();

    assert!(matches!(err, deck_core::Error::Io(_)));
    assert!(!output.exists());
}

#[test]
fn reader_rejects_non_zip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.pptx");
    std::fs::write(&path, "# Problem\n").unwrap();

    let err = DeckReader::new().open(&path).unwrap_err();
    assert!(matches!(err, deck_core::Error::Zip(_)));
}
