//! CLI tool for turning a Markdown summary into a three-slide pitch deck.

use anyhow::{Context, Result};
use clap::Parser;
use deck_core::{Outline, SectionBucketer, TextNormalizer};
use deck_pptx::DeckBuilder;
use std::path::{Path, PathBuf};

/// Generate a pitch deck from Markdown content.
#[derive(Parser, Debug)]
#[command(name = "pitch-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the Markdown summary file
    markdown: PathBuf,

    /// Output PowerPoint file
    #[arg(short, long, default_value = "justthetip_pitch.pptx")]
    output: PathBuf,

    /// Print the slide outline as JSON instead of writing a deck
    #[arg(short, long)]
    print: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let builder = DeckBuilder::new();
    let outline = build_outline(&args.markdown, &builder)?;

    if args.print {
        let json = serde_json::to_string_pretty(&outline).context("Failed to serialize outline")?;
        println!("{}", json);
        return Ok(());
    }

    builder
        .save(&outline, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("✅ Pitch deck created at {}", args.output.display());
    Ok(())
}

/// Read, normalize, and bucket a Markdown file into slide contents.
fn build_outline(markdown: &Path, builder: &DeckBuilder) -> Result<Outline> {
    log::debug!("Reading {}", markdown.display());

    let lines = TextNormalizer::new()
        .read_lines(markdown)
        .with_context(|| format!("Failed to read {}", markdown.display()))?;
    let sections = SectionBucketer::new().bucket(&lines);

    if sections.is_empty() {
        log::warn!(
            "No content found in {}; every slide gets the placeholder",
            markdown.display()
        );
    }

    let outline = builder.build(&sections);
    for slide in &outline.slides {
        log::debug!("  {}: {} bullets", slide.title, slide.bullets.len());
    }

    Ok(outline)
}
