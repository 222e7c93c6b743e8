// PowerPoint (.pptx) text extraction.
//
// A .pptx file is a ZIP archive of Office Open XML parts. Slide order is not
// the order of entries in the archive: it comes from the slide id list in
// ppt/presentation.xml, whose relationship ids resolve to slide parts through
// ppt/_rels/presentation.xml.rels.
//
// Within a slide, every top-level shape (`p:sp` directly under the slide's
// shape tree) contributes one entry, even when it holds no text. Group
// shapes, pictures, connectors and graphic frames contribute nothing.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use super::traits::TextExtractor;
use crate::error::ExtractionError;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

/// Reads text straight out of the OOXML parts, no Office install needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PptxExtractor;

impl TextExtractor for PptxExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let file = File::open(path).map_err(|source| ExtractionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        extract_from_reader(file)
    }
}

/// Extract the text of a presentation from any seekable reader.
///
/// Shape texts are joined with newlines in slide order, then shape order.
pub fn extract_from_reader<R: Read + Seek>(reader: R) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(reader)?;
    let slides = slide_parts(&mut archive)?;

    let mut entries = Vec::new();
    for part in &slides {
        let xml = read_part(&mut archive, part)?;
        let shapes = shape_texts(part, &xml)?;
        debug!(part = %part, shapes = shapes.len(), "Read slide");
        entries.extend(shapes);
    }

    Ok(entries.join("\n"))
}

/// Slide part names (e.g. `ppt/slides/slide3.xml`) in presentation order.
fn slide_parts<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>, ExtractionError> {
    let presentation = read_part(archive, PRESENTATION_PART)?;
    let rel_ids = slide_rel_ids(&presentation)?;
    if rel_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rels = read_part(archive, PRESENTATION_RELS)?;
    let targets = relationship_targets(&rels)?;

    rel_ids
        .iter()
        .map(|id| {
            targets
                .get(id)
                .map(|target| resolve_target("ppt", target))
                .ok_or_else(|| ExtractionError::MissingPart(format!("{PRESENTATION_RELS}#{id}")))
        })
        .collect()
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, ExtractionError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Err(ExtractionError::MissingPart(name.to_string())),
        Err(e) => return Err(e.into()),
    };

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|source| ExtractionError::Io {
            path: PathBuf::from(name),
            source,
        })?;
    Ok(xml)
}

/// The `r:id` of every `p:sldId`, in document order.
fn slide_rel_ids(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader
            .read_event()
            .map_err(|e| ExtractionError::xml(PRESENTATION_PART, e))?
        {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldId" => {
                if let Some(id) =
                    relationship_id(&e).map_err(|err| ExtractionError::xml(PRESENTATION_PART, err))?
                {
                    ids.push(id);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}

/// The namespaced `id` attribute (`r:id`). The bare `id` is the numeric slide id.
fn relationship_id(element: &BytesStart<'_>) -> Result<Option<String>, quick_xml::Error> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id" {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Relationship id -> target, from a `.rels` part.
fn relationship_targets(xml: &str) -> Result<HashMap<String, String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader
            .read_event()
            .map_err(|e| ExtractionError::xml(PRESENTATION_RELS, e))?
        {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(|err| ExtractionError::xml(PRESENTATION_RELS, err))?;
                    let value = attr
                        .unescape_value()
                        .map_err(|err| ExtractionError::xml(PRESENTATION_RELS, err))?
                        .into_owned();
                    match attr.key.as_ref() {
                        b"Id" => id = Some(value),
                        b"Target" => target = Some(value),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(targets)
}

/// Resolve a relationship target against the directory of its source part.
///
/// Absolute targets (`/ppt/slides/slide1.xml`) are archive-rooted; relative
/// ones may climb with `..`.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Text collected for the shape currently being read.
struct ShapeText {
    /// Element depth at which the `p:sp` opened
    depth: usize,
    paragraphs: Vec<String>,
    /// The `a:p` being read, if any
    current: Option<String>,
}

/// One entry per top-level shape, each the shape's paragraphs joined by `\n`.
fn shape_texts(part: &str, xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut shape: Option<ShapeText> = None;
    let mut entries = Vec::new();

    loop {
        match reader.read_event().map_err(|e| ExtractionError::xml(part, e))? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                open_element(&name, &stack, &mut shape);
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name();
                open_element(name.as_ref(), &stack, &mut shape);
                close_element(name.as_ref(), stack.len(), &mut shape, &mut entries);
            }
            Event::End(_) => {
                if let Some(name) = stack.pop() {
                    close_element(&name, stack.len(), &mut shape, &mut entries);
                }
            }
            Event::Text(t) => {
                if in_text_run(&stack) {
                    if let Some(current) = shape.as_mut().and_then(|s| s.current.as_mut()) {
                        current.push_str(&t.unescape().map_err(|e| ExtractionError::xml(part, e))?);
                    }
                }
            }
            Event::CData(c) => {
                if in_text_run(&stack) {
                    if let Some(current) = shape.as_mut().and_then(|s| s.current.as_mut()) {
                        current.push_str(&String::from_utf8_lossy(&c));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}

fn in_text_run(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|name| name == b"t")
}

fn open_element(name: &[u8], stack: &[Vec<u8>], shape: &mut Option<ShapeText>) {
    match shape {
        None => {
            let top_level = matches!(
                stack,
                [.., tree_parent, tree] if tree_parent == b"cSld" && tree == b"spTree"
            );
            if name == b"sp" && top_level {
                *shape = Some(ShapeText {
                    depth: stack.len(),
                    paragraphs: Vec::new(),
                    current: None,
                });
            }
        }
        Some(shape) => {
            if name == b"p" && stack.last().is_some_and(|parent| parent == b"txBody") {
                shape.current = Some(String::new());
            } else if name == b"br" {
                if let Some(current) = shape.current.as_mut() {
                    current.push('\n');
                }
            }
        }
    }
}

fn close_element(
    name: &[u8],
    depth: usize,
    shape: &mut Option<ShapeText>,
    entries: &mut Vec<String>,
) {
    let Some(open) = shape.as_mut() else {
        return;
    };

    if name == b"p" {
        if let Some(paragraph) = open.current.take() {
            open.paragraphs.push(paragraph);
        }
    } else if name == b"sp" && depth == open.depth {
        entries.push(open.paragraphs.join("\n"));
        *shape = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const PRESENTATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:sldIdLst>
    <p:sldId id="256" r:id="rId3"/>
    <p:sldId id="257" r:id="rId2"/>
  </p:sldIdLst>
</p:presentation>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="/ppt/slides/slide2.xml"/>
</Relationships>"#;

    fn slide(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/>{body}</p:spTree></p:cSld>
</p:sld>"#
        )
    }

    fn text_shape(paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<a:p><a:r><a:t>{p}</a:t></a:r></a:p>"))
            .collect();
        format!("<p:sp><p:nvSpPr/><p:spPr/><p:txBody><a:bodyPr/>{body}</p:txBody></p:sp>")
    }

    fn archive(parts: &[(&str, String)]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_slide_order_follows_presentation_xml() {
        let deck = archive(&[
            (PRESENTATION_PART, PRESENTATION.to_string()),
            (PRESENTATION_RELS, RELS.to_string()),
            ("ppt/slides/slide1.xml", slide(&text_shape(&["second slide"]))),
            ("ppt/slides/slide2.xml", slide(&text_shape(&["first slide"]))),
        ]);

        let text = extract_from_reader(deck).unwrap();
        assert_eq!(text, "first slide\nsecond slide");
    }

    #[test]
    fn test_paragraphs_breaks_and_entities() {
        let body = "<p:sp><p:txBody><a:p><a:r><a:t>Fish &amp; chips</a:t></a:r>\
                    <a:br/><a:r><a:t>line two</a:t></a:r></a:p>\
                    <a:p><a:fld><a:t>7</a:t></a:fld></a:p></p:txBody></p:sp>";
        let deck = archive(&[
            (PRESENTATION_PART, PRESENTATION.to_string()),
            (PRESENTATION_RELS, RELS.to_string()),
            ("ppt/slides/slide1.xml", slide("")),
            ("ppt/slides/slide2.xml", slide(body)),
        ]);

        let text = extract_from_reader(deck).unwrap();
        assert_eq!(text, "Fish & chips\nline two\n7");
    }

    #[test]
    fn test_group_shapes_and_pictures_are_skipped() {
        let body = format!(
            "{}<p:grpSp>{}</p:grpSp><p:pic/><p:sp><p:spPr/></p:sp>{}",
            text_shape(&["title"]),
            text_shape(&["grouped"]),
            text_shape(&["footer"]),
        );
        let deck = archive(&[
            (PRESENTATION_PART, PRESENTATION.to_string()),
            (PRESENTATION_RELS, RELS.to_string()),
            ("ppt/slides/slide1.xml", slide("")),
            ("ppt/slides/slide2.xml", slide(&body)),
        ]);

        // The text-less top-level shape still yields an (empty) entry
        let text = extract_from_reader(deck).unwrap();
        assert_eq!(text, "title\n\nfooter");
    }

    #[test]
    fn test_missing_slide_part_is_an_error() {
        let deck = archive(&[
            (PRESENTATION_PART, PRESENTATION.to_string()),
            (PRESENTATION_RELS, RELS.to_string()),
        ]);
        let err = extract_from_reader(deck).unwrap_err();
        assert!(matches!(err, ExtractionError::MissingPart(_)), "got {err:?}");
    }

    #[test]
    fn test_not_a_zip() {
        let err = extract_from_reader(Cursor::new(b"plain text".to_vec())).unwrap_err();
        assert!(matches!(err, ExtractionError::Archive(_)), "got {err:?}");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("ppt", "slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("ppt", "/ppt/slides/slide9.xml"), "ppt/slides/slide9.xml");
        assert_eq!(resolve_target("ppt/slides", "../media/image1.png"), "ppt/media/image1.png");
    }
}
