use super::error::ExtractionError;
use lopdf::Document;

/// Extract the text of every page, in page order, joined with `\n`.
///
/// Pages are extracted independently: a page that fails contributes an empty
/// string so one bad page does not lose the rest of the document.
pub fn extract_pdf_text(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    let document = Document::load_mem(pdf_bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let pages: Vec<String> = document
        .get_pages()
        .keys()
        .map(|&page_number| {
            document.extract_text(&[page_number]).unwrap_or_else(|e| {
                tracing::warn!(
                    page_number = page_number,
                    error = %e,
                    "Failed to extract text from PDF page, using empty text"
                );
                String::new()
            })
        })
        .collect();

    tracing::debug!(page_count = pages.len(), "PDF pages extracted");

    Ok(pages.join("\n"))
}
