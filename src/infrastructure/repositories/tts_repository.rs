use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google Translate TTS, AWS Polly, OpenAI)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single audio stream
/// - Provider-specific voice selection
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech for a given language
    ///
    /// Returns merged audio data ready for playback (MP3 format)
    ///
    /// # Arguments
    /// * `text` - The translated text to synthesize
    /// * `language` - ISO 639-1 code of the text's language
    ///
    /// # Errors
    /// Returns error if synthesis fails, the language has no voice, or the
    /// provider is unavailable
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String>;
}
