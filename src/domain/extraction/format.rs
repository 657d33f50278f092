use super::error::ExtractionError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Document formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
    Markdown,
}

impl DocumentFormat {
    /// Resolve the format from a filename's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Text),
            "md" => Ok(DocumentFormat::Markdown),
            _ => Err(ExtractionError::UnsupportedFormat(format!(".{}", extension))),
        }
    }

    /// Canonical extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Text => "txt",
            DocumentFormat::Markdown => "md",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
