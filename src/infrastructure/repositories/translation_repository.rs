use async_trait::async_trait;

/// Repository for machine translation calls.
/// Abstracts the underlying translation provider.
///
/// Implementations translate exactly the text they are given; size limits are
/// honoured by the caller, which chunks documents before calling.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Translate `text` from `source` into `target` (ISO 639-1 codes)
    ///
    /// # Errors
    /// Returns error if the provider rejects the request or is unavailable
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, String>;
}
