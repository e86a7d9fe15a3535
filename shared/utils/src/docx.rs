//! Word document reader
//!
//! Extracts paragraph text from an uploaded .docx file. A .docx is a zip
//! archive; the body lives in `word/document.xml` where each `w:p` element is
//! a paragraph and `w:t` elements carry the literal run text.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::error::{MatchError, MatchResult};

const DOCUMENT_XML: &str = "word/document.xml";

/// Paragraph texts in document order. Runs within a paragraph concatenate
/// with no separator; empty paragraphs are kept as empty strings.
pub fn paragraphs(data: &[u8]) -> MatchResult<Vec<String>> {
    let cursor = Cursor::new(data);
    let mut archive = ZipArchive::new(cursor)
        .map_err(|e| MatchError::document_parse(format!("failed to open docx archive: {}", e)))?;

    let mut file = archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| MatchError::document_parse(format!("docx missing document.xml: {}", e)))?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| MatchError::document_parse(format!("failed to read document.xml: {}", e)))?;

    extract_paragraphs(&xml)
}

/// The document reduced to a single search corpus: paragraph texts joined
/// with one space.
pub fn document_text(data: &[u8]) -> MatchResult<String> {
    Ok(paragraphs(data)?.join(" "))
}

fn extract_paragraphs(xml: &str) -> MatchResult<Vec<String>> {
    let mut reader = Reader::from_reader(xml.as_bytes());

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => current = Some(String::new()),
                b"w:t" => in_text = current.is_some(),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"w:p" {
                    paragraphs.push(String::new());
                }
            }
            Ok(Event::Text(t)) => {
                if in_text {
                    let content = t.unescape().map_err(|e| {
                        MatchError::document_parse(format!("invalid document.xml text: {}", e))
                    })?;
                    if let Some(ref mut paragraph) = current {
                        paragraph.push_str(&content);
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(MatchError::document_parse(format!(
                    "invalid document.xml: {}",
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
