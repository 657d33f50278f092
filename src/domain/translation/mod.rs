pub mod chunker;
pub mod error;
pub mod language;
pub mod service;

pub use chunker::{chunk_text, DEFAULT_MAX_CHUNK_CHARS};
pub use error::TranslationServiceError;
pub use language::TargetLanguage;
pub use service::{TranslationService, TranslationServiceApi};
