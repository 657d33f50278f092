#[derive(Debug, thiserror::Error)]
pub enum TranslationServiceError {
    #[error("translation of chunk {chunk_index} into '{target}' failed: {message}")]
    Dependency {
        target: String,
        chunk_index: usize,
        message: String,
    },
}
