pub mod batching;
pub mod google_translate_repository;
pub mod google_tts_repository;
pub mod job_repository;
pub mod openai_tts_repository;
pub mod polly_tts_repository;
pub mod translation_repository;
pub mod tts_repository;

pub use google_translate_repository::GoogleTranslateRepository;
pub use google_tts_repository::GoogleTtsRepository;
pub use job_repository::{JobRepository, PostgresJobRepository};
pub use openai_tts_repository::OpenAiTtsRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use translation_repository::TranslationRepository;
pub use tts_repository::TtsRepository;
