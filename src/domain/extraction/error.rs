#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}'. Please upload a PDF, DOCX, TXT or MD file.")]
    UnsupportedFormat(String),
    #[error("Could not extract text from the file.")]
    Empty,
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse PDF: {0}")]
    Pdf(String),
    #[error("failed to parse DOCX: {0}")]
    Docx(String),
}
