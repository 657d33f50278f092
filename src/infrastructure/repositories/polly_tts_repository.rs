use super::batching::split_into_batches;
use super::tts_repository::TtsRepository;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, LanguageCode as PollyLanguageCode, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// Polly voice settings for one language
#[derive(Debug, Clone, PartialEq)]
struct PollyVoice {
    voice: &'static str,
    language_code: Option<PollyLanguageCode>,
}

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Select the appropriate neural Polly voice for a language.
    /// Polly has no Telugu or Kannada voices; those languages are rejected.
    fn get_voice_for_language(language: &str) -> Option<PollyVoice> {
        match language {
            // Kajal is bilingual (en-IN/hi-IN) and must be told which one to speak
            "hi" => Some(PollyVoice {
                voice: "Kajal",
                language_code: Some(PollyLanguageCode::HiIn),
            }),
            "en" => Some(PollyVoice {
                voice: "Joanna",
                language_code: None,
            }),
            _ => None,
        }
    }

    /// Call AWS Polly to synthesize a single text batch
    async fn call_polly(&self, text: &str, voice: &PollyVoice) -> Result<Vec<u8>, String> {
        let voice_id = VoiceId::from(voice.voice);
        let engine = Engine::Neural;

        tracing::info!(
            voice = voice.voice,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .set_language_code(voice.language_code.clone())
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    voice = voice.voice,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();
        tracing::debug!(audio_size = audio_bytes.len(), "Audio stream collected successfully");

        Ok(audio_bytes)
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let voice = Self::get_voice_for_language(language)
            .ok_or_else(|| format!("AWS Polly has no voice for language '{}'", language))?;

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        if batches.is_empty() {
            return Err("No text to synthesize".to_string());
        }
        tracing::info!(
            batch_count = batches.len(),
            text_length = text.len(),
            "Text split into batches"
        );

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            tracing::info!(batch_index = index, batch_size = batch.len(), "Synthesizing batch");
            merged_audio.extend(self.call_polly(batch, &voice).await?);
        }

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "polly",
            language = language,
            latency_ms = duration.as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}
