#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("speech synthesis for '{language}' failed: {message}")]
    Dependency { language: String, message: String },
    #[error("failed to write audio file: {0}")]
    Io(#[from] std::io::Error),
}
