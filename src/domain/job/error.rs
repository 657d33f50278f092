use crate::domain::extraction::ExtractionError;
use crate::domain::speech::SpeechServiceError;
use crate::domain::translation::TranslationServiceError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Unsupported file type '{0}'. Please upload a PDF, DOCX, TXT or MD file.")]
    UnsupportedFormat(String),
    #[error("Could not extract text from the file.")]
    ExtractionEmpty,
    #[error("{0}")]
    Extraction(ExtractionError),
    #[error(transparent)]
    Translation(#[from] TranslationServiceError),
    #[error(transparent)]
    Synthesis(#[from] SpeechServiceError),
    #[error("artifact storage failed: {0}")]
    Storage(#[from] std::io::Error),
    #[error("failed to persist job: {0}")]
    Persistence(AppError),
}

impl From<ExtractionError> for PipelineError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat(ext) => PipelineError::UnsupportedFormat(ext),
            ExtractionError::Empty => PipelineError::ExtractionEmpty,
            other => PipelineError::Extraction(other),
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::UnsupportedFormat(_) | PipelineError::ExtractionEmpty => {
                AppError::BadRequest(err.to_string())
            }
            other => AppError::ProcessingFailed(other.to_string()),
        }
    }
}
