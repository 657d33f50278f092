use super::docx::extract_docx_text;
use super::error::ExtractionError;
use super::format::DocumentFormat;
use super::pdf::extract_pdf_text;
use std::path::{Path, PathBuf};

/// Turns an uploaded document into normalized plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract normalized text from the file at `path`.
    ///
    /// Line endings are normalized to `\n` and the result is trimmed. A
    /// document that yields no text is reported as [`ExtractionError::Empty`].
    pub fn extract(&self, path: &Path, format: DocumentFormat) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(path)?;

        let raw = match format {
            DocumentFormat::Pdf => extract_pdf_text(&bytes)?,
            DocumentFormat::Docx => extract_docx_text(&bytes)?,
            DocumentFormat::Text | DocumentFormat::Markdown => decode_lossy(&bytes),
        };

        let text = raw.replace("\r\n", "\n").trim().to_string();
        if text.is_empty() {
            return Err(ExtractionError::Empty);
        }

        tracing::info!(
            format = %format,
            bytes = bytes.len(),
            text_length = text.len(),
            "Text extracted"
        );

        Ok(text)
    }

    /// Run [`TextExtractor::extract`] on the blocking thread pool.
    pub async fn extract_file(&self, path: PathBuf, format: DocumentFormat) -> Result<String, ExtractionError> {
        let extractor = *self;
        tokio::task::spawn_blocking(move || extractor.extract(&path, format))
            .await
            .map_err(|e| ExtractionError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
    }
}

/// Decode UTF-8, dropping invalid byte sequences instead of replacing them.
fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
