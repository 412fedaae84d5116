//! PPTX deck reader.
//!
//! Reads a package back into slide titles and bullet paragraphs. Used to
//! verify generated decks.

use deck_core::{Error, Outline, Result, SlideContent};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// A deck read back from a PPTX package.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckInfo {
    /// Slide titles and bullets in presentation order.
    pub outline: Outline,

    /// Slide width and height in EMUs, from `p:sldSz`.
    pub slide_size: Option<(i64, i64)>,
}

/// Reader for PPTX (Office Open XML) decks.
pub struct DeckReader;

impl DeckReader {
    /// Create a new deck reader.
    pub fn new() -> Self {
        Self
    }

    /// Open and read a PPTX file.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<DeckInfo> {
        let file = File::open(path.as_ref())?;
        self.read(BufReader::new(file))
    }

    /// Read a PPTX package from a reader.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<DeckInfo> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::Zip(format!("Failed to open ZIP: {}", e)))?;

        let presentation = self.read_file_from_archive(&mut archive, "ppt/presentation.xml")?;
        let slide_size = parse_slide_size(&presentation)?;

        let mut outline = Outline::new();
        for slide_path in self.get_slide_order(&mut archive)? {
            let content = self.read_file_from_archive(&mut archive, &slide_path)?;
            outline.add_slide(parse_slide(&content, &slide_path)?);
        }

        Ok(DeckInfo {
            outline,
            slide_size,
        })
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content =
            self.read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let rel_type = attribute(e, b"Type").unwrap_or_default();
                    let target = attribute(e, b"Target").unwrap_or_default();
                    let id = attribute(e, b"Id").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        let order = extract_slide_number(&id).or_else(|| extract_slide_number(&target));
                        let full_path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((full_path, order));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!("Error parsing relationships: {}", e)));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::Zip(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Zip(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for DeckReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Text collected from one shape.
#[derive(Debug, Default)]
struct ShapeText {
    is_title: bool,
    paragraphs: Vec<String>,
}

/// Extract the title placeholder text and body paragraphs of a slide.
fn parse_slide(xml: &str, slide_path: &str) -> Result<SlideContent> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut shapes: Vec<ShapeText> = Vec::new();
    let mut current: Option<ShapeText> = None;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => current = Some(ShapeText::default()),
                b"ph" => mark_title(&mut current, e),
                b"p" => {
                    if let Some(ref mut shape) = current {
                        shape.paragraphs.push(String::new());
                    }
                }
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if local_name(e.name().as_ref()) == b"ph" {
                    mark_title(&mut current, e);
                }
            }
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::Xml(format!("Bad text in {}: {}", slide_path, err)))?;
                if let Some(paragraph) = current.as_mut().and_then(|s| s.paragraphs.last_mut()) {
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => shapes.extend(current.take()),
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("Error parsing {}: {}", slide_path, e)));
            }
            _ => {}
        }
    }

    let mut title = None;
    let mut bullets = Vec::new();
    for shape in shapes {
        let paragraphs = shape.paragraphs.into_iter().filter(|p| !p.trim().is_empty());
        if shape.is_title && title.is_none() {
            title = Some(paragraphs.collect::<Vec<_>>().join(" "));
        } else {
            bullets.extend(paragraphs);
        }
    }

    let title = title.ok_or_else(|| Error::InvalidDeck(format!("{} has no title", slide_path)))?;
    Ok(SlideContent::new(title, bullets))
}

fn mark_title(current: &mut Option<ShapeText>, ph: &BytesStart<'_>) {
    if let Some(ref mut shape) = current {
        if matches!(attribute(ph, b"type").as_deref(), Some("title" | "ctrTitle")) {
            shape.is_title = true;
        }
    }
}

/// Read `p:sldSz` from `presentation.xml`.
fn parse_slide_size(xml: &str) -> Result<Option<(i64, i64)>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldSz" =>
            {
                let cx = attribute(e, b"cx").and_then(|v| v.parse().ok());
                let cy = attribute(e, b"cy").and_then(|v| v.parse().ok());
                return Ok(cx.zip(cy));
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(Error::Xml(format!("Error parsing presentation: {}", e))),
            _ => {}
        }
    }
}

/// Value of an unqualified attribute, if present.
fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("rId1"), Some(1));
        assert_eq!(extract_slide_number("rId12"), Some(12));
        assert_eq!(extract_slide_number("slide123.xml"), Some(123));
        assert_eq!(extract_slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_parse_slide_title_and_bullets() {
        let xml = crate::parts::slide_xml(
            "Solution",
            &["Tip in one command".to_string(), "Fees <1%".to_string()],
            4000,
            2000,
            0,
        );
        let slide = parse_slide(&xml, "slide1.xml").unwrap();

        assert_eq!(slide.title, "Solution");
        assert_eq!(slide.bullets, vec!["Tip in one command", "Fees <1%"]);
    }

    #[test]
    fn test_parse_slide_without_title() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>x</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;
        let err = parse_slide(xml, "slide9.xml").unwrap_err();

        assert!(matches!(err, Error::InvalidDeck(_)));
    }

    #[test]
    fn test_parse_slide_size() {
        let xml = crate::parts::presentation_xml(3, 12_188_952, 6_858_000);
        assert_eq!(parse_slide_size(&xml).unwrap(), Some((12_188_952, 6_858_000)));
        assert_eq!(parse_slide_size("<p:presentation/>").unwrap(), None);
    }
}
