//! PPTX deck writer.

use crate::parts::{self, part_name};
use deck_core::{Error, Outline, Result, Sections, SlideContent};
use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// Text shown on a slide whose section has no content.
pub const DEFAULT_PLACEHOLDER: &str = "Add supporting details here.";

/// Fixed layout and typography of a generated deck.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckOptions {
    /// Slide width in EMUs.
    slide_width: i64,
    /// Slide height in EMUs.
    slide_height: i64,
    /// Title font size in points.
    title_font_size: u32,
    /// Bullet font size in points.
    bullet_font_size: u32,
    /// Bullet text for empty sections.
    placeholder: String,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            // 13.33in x 7.5in widescreen
            slide_width: 1333 * EMU_PER_INCH / 100,
            slide_height: 75 * EMU_PER_INCH / 10,
            title_font_size: 40,
            bullet_font_size: 20,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl DeckOptions {
    /// Create options with the default widescreen layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slide size in EMUs.
    pub fn with_slide_size(mut self, width: i64, height: i64) -> Self {
        self.slide_width = width;
        self.slide_height = height;
        self
    }

    /// Set the title font size in points.
    pub fn with_title_font_size(mut self, points: u32) -> Self {
        self.title_font_size = points.max(1);
        self
    }

    /// Set the bullet font size in points.
    pub fn with_bullet_font_size(mut self, points: u32) -> Self {
        self.bullet_font_size = points.max(1);
        self
    }

    /// Set the bullet used for empty sections.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    /// Slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Bullet text used for empty sections.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

/// Builds three-slide decks from bucketed sections and serializes them as PPTX.
#[derive(Debug, Clone, Default)]
pub struct DeckBuilder {
    options: DeckOptions,
}

impl DeckBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom options.
    pub fn with_options(options: DeckOptions) -> Self {
        Self { options }
    }

    /// Options this builder writes with.
    pub fn options(&self) -> &DeckOptions {
        &self.options
    }

    /// Turn sections into slide contents: one slide per section, in section
    /// order, with the placeholder bullet for empty sections.
    pub fn build(&self, sections: &Sections) -> Outline {
        let mut outline = Outline::new();
        for (section, lines) in sections.iter() {
            outline.add_slide(SlideContent::from_section(
                section,
                lines,
                &self.options.placeholder,
            ));
        }
        outline
    }

    /// Write a complete PPTX package for the outline to a seekable writer.
    ///
    /// Returns the writer once the archive is finished.
    pub fn write_to<W: Write + Seek>(&self, outline: &Outline, writer: W) -> Result<W> {
        let opts = &self.options;
        let slide_count = outline.slides.len();
        let mut package = PackageWriter::new(writer);

        package.add(part_name::CONTENT_TYPES, &parts::content_types_xml(slide_count))?;
        package.add(part_name::ROOT_RELS, &parts::root_rels_xml())?;
        package.add(part_name::CORE_PROPS, &parts::core_props_xml("Pitch Deck"))?;
        package.add(part_name::APP_PROPS, &parts::app_props_xml(slide_count))?;
        package.add(
            part_name::PRESENTATION,
            &parts::presentation_xml(slide_count, opts.slide_width, opts.slide_height),
        )?;
        package.add(
            part_name::PRESENTATION_RELS,
            &parts::presentation_rels_xml(slide_count),
        )?;
        package.add(
            part_name::SLIDE_MASTER,
            &parts::slide_master_xml(opts.slide_width, opts.slide_height),
        )?;
        package.add(part_name::SLIDE_MASTER_RELS, &parts::slide_master_rels_xml())?;
        package.add(part_name::SLIDE_LAYOUT, &parts::slide_layout_xml())?;
        package.add(part_name::SLIDE_LAYOUT_RELS, &parts::slide_layout_rels_xml())?;
        package.add(part_name::THEME, parts::THEME_XML)?;

        for (idx, slide) in outline.slides.iter().enumerate() {
            let number = idx + 1;
            log::debug!(
                "Writing slide {} ({:?}, {} bullets)",
                number,
                slide.title,
                slide.bullets.len()
            );
            let xml = parts::slide_xml(
                &slide.title,
                &slide.bullets,
                opts.title_font_size * 100,
                opts.bullet_font_size * 100,
                0,
            );
            package.add(&part_name::slide(number), &xml)?;
            package.add(&part_name::slide_rels(number), &parts::slide_rels_xml())?;
        }

        package.finish()
    }

    /// Serialize the outline into an in-memory PPTX file.
    pub fn to_bytes(&self, outline: &Outline) -> Result<Vec<u8>> {
        let cursor = self.write_to(outline, Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    /// Serialize the outline and write it to `path`, replacing any existing file.
    ///
    /// The package is built completely before the file is created.
    pub fn save(&self, outline: &Outline, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(outline)?;

        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        file.flush()?;

        log::info!(
            "Wrote {} slides ({} bytes) to {}",
            outline.slides.len(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}

/// Thin wrapper over [`ZipWriter`] with fixed entry options.
struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: FileOptions,
}

impl<W: Write + Seek> PackageWriter<W> {
    fn new(writer: W) -> Self {
        // A fixed timestamp keeps repeated runs byte-identical.
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());
        Self {
            zip: ZipWriter::new(writer),
            options,
        }
    }

    fn add(&mut self, name: &str, content: &str) -> Result<()> {
        self.zip
            .start_file(name, self.options)
            .map_err(|e| Error::Zip(format!("Failed to start '{}': {}", name, e)))?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn finish(mut self) -> Result<W> {
        self.zip
            .finish()
            .map_err(|e| Error::Zip(format!("Failed to finish archive: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::Section;

    #[test]
    fn test_default_options() {
        let options = DeckOptions::new();
        assert_eq!(options.slide_width(), 12_188_952);
        assert_eq!(options.slide_height(), 6_858_000);
        assert_eq!(options.placeholder(), "Add supporting details here.");
    }

    #[test]
    fn test_font_size_floor() {
        let options = DeckOptions::new()
            .with_title_font_size(0)
            .with_bullet_font_size(0);
        assert_eq!(options.title_font_size, 1);
        assert_eq!(options.bullet_font_size, 1);
    }

    #[test]
    fn test_build_uses_fixed_order_and_placeholder() {
        let mut sections = Sections::new();
        sections.push(Section::Architecture, "Rust core");
        sections.push(Section::Problem, "Manual tipping");

        let outline = DeckBuilder::new().build(&sections);

        assert_eq!(outline.titles(), vec!["Problem", "Solution", "Architecture"]);
        assert_eq!(outline.slides[0].bullets, vec!["Manual tipping"]);
        assert_eq!(outline.slides[1].bullets, vec![DEFAULT_PLACEHOLDER]);
        assert_eq!(outline.slides[2].bullets, vec!["Rust core"]);
    }

    #[test]
    fn test_custom_placeholder() {
        let builder = DeckBuilder::with_options(DeckOptions::new().with_placeholder("TBD"));
        let outline = builder.build(&Sections::new());

        assert_eq!(outline.slides.len(), 3);
        assert!(outline.slides.iter().all(|s| s.bullets == vec!["TBD"]));
    }

    #[test]
    fn test_to_bytes_is_zip() {
        let builder = DeckBuilder::new();
        let outline = builder.build(&Sections::new());
        let bytes = builder.to_bytes(&outline).unwrap();

        assert!(bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
    }

    #[test]
    fn test_custom_slide_size_is_written() {
        let builder = DeckBuilder::with_options(
            DeckOptions::new().with_slide_size(10 * EMU_PER_INCH, 75 * EMU_PER_INCH / 10),
        );
        assert_eq!(builder.options().slide_width(), 9_144_000);
        assert_eq!(builder.options().slide_height(), 6_858_000);

        let outline = builder.build(&Sections::new());
        let bytes = builder.to_bytes(&outline).unwrap();
        let deck = crate::DeckReader::new()
            .read(Cursor::new(bytes))
            .unwrap();

        assert_eq!(deck.slide_size, Some((9_144_000, 6_858_000)));
        assert_eq!(deck.outline, outline);
    }

    #[test]
    fn test_to_bytes_is_deterministic() {
        let builder = DeckBuilder::new();
        let mut sections = Sections::new();
        sections.push(Section::Solution, "Same every time");
        let outline = builder.build(&sections);

        assert_eq!(
            builder.to_bytes(&outline).unwrap(),
            builder.to_bytes(&outline).unwrap()
        );
    }
}
