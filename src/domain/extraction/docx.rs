use super::error::ExtractionError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract paragraph text from a DOCX package, one line per paragraph in
/// document order.
pub fn extract_docx_text(docx_bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(docx_bytes)).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("{}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)?;

    let paragraphs = parse_paragraphs(&xml)?;
    tracing::debug!(paragraph_count = paragraphs.len(), "DOCX paragraphs extracted");

    Ok(paragraphs.join("\n"))
}

/// A paragraph being collected. Paragraphs nested inside it (text boxes)
/// are held back and emitted right after their host paragraph.
#[derive(Default)]
struct ParagraphFrame {
    text: String,
    nested: Vec<String>,
}

fn close_paragraph(frame: ParagraphFrame, open: &mut [ParagraphFrame], paragraphs: &mut Vec<String>) {
    let lines = std::iter::once(frame.text).chain(frame.nested);
    match open.last_mut() {
        Some(host) => host.nested.extend(lines),
        None => paragraphs.extend(lines),
    }
}

fn parse_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<ParagraphFrame> = Vec::new();
    let mut run_depth = 0usize;
    let mut in_text_run = false;
    // mc:Fallback repeats the mc:Choice content for older readers
    let mut fallback_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                if fallback_depth > 0 {
                    if name.as_ref() == b"Fallback" {
                        fallback_depth += 1;
                    }
                    continue;
                }
                match name.as_ref() {
                    b"Fallback" => fallback_depth = 1,
                    b"p" => open.push(ParagraphFrame::default()),
                    b"r" => run_depth += 1,
                    b"t" => in_text_run = true,
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) if fallback_depth == 0 => {
                let inline = match e.local_name().as_ref() {
                    b"p" => {
                        close_paragraph(ParagraphFrame::default(), &mut open, &mut paragraphs);
                        None
                    }
                    // Tab stops in paragraph properties share the name; only runs count.
                    b"tab" if run_depth > 0 => Some('\t'),
                    b"br" | b"cr" if run_depth > 0 => Some('\n'),
                    _ => None,
                };
                if let (Some(c), Some(frame)) = (inline, open.last_mut()) {
                    frame.text.push(c);
                }
            }
            Ok(Event::Text(t)) if in_text_run && fallback_depth == 0 => {
                let text = t.unescape().map_err(|e| ExtractionError::Docx(e.to_string()))?;
                if let Some(frame) = open.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                if fallback_depth > 0 {
                    if name.as_ref() == b"Fallback" {
                        fallback_depth -= 1;
                    }
                    continue;
                }
                match name.as_ref() {
                    b"p" => {
                        if let Some(frame) = open.pop() {
                            close_paragraph(frame, &mut open, &mut paragraphs);
                        }
                    }
                    b"r" => run_depth = run_depth.saturating_sub(1),
                    b"t" => in_text_run = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Docx(format!(
                    "malformed XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}
