use super::error::SpeechServiceError;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub struct SpeechService {
    tts_repo: Arc<dyn TtsRepository>,
}

impl SpeechService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>) -> Self {
        Self { tts_repo }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Synthesize `text` spoken in `language` and write the MP3 to `output_path`.
    ///
    /// Empty text is rejected before any provider call. If writing fails the
    /// partial file is removed.
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        output_path: &Path,
    ) -> Result<(), SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        output_path: &Path,
    ) -> Result<(), SpeechServiceError> {
        if text.trim().is_empty() {
            return Err(SpeechServiceError::Invalid(
                "No text to convert to speech".to_string(),
            ));
        }

        let start_time = std::time::Instant::now();

        let audio = self
            .tts_repo
            .synthesize(text, language)
            .await
            .map_err(|message| SpeechServiceError::Dependency {
                language: language.to_string(),
                message,
            })?;

        if let Err(e) = tokio::fs::write(output_path, &audio).await {
            tracing::error!(
                error = %e,
                path = %output_path.display(),
                "Failed to write audio file"
            );
            if let Err(remove_err) = tokio::fs::remove_file(output_path).await {
                tracing::debug!(error = %remove_err, "No partial audio file to remove");
            }
            return Err(e.into());
        }

        tracing::info!(
            language = language,
            path = %output_path.display(),
            audio_size_bytes = audio.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Audio written"
        );

        Ok(())
    }
}
