use super::batching::split_into_batches;
use super::tts_repository::TtsRepository;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_BATCH_SIZE: usize = 4096;

/// OpenAI TTS implementation of TTS repository.
/// The speech models are multilingual, so one voice serves every language.
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    voice: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, voice: String) -> Self {
        Self { client, model, voice }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    fn speech_voice(&self) -> Voice {
        match self.voice.to_lowercase().as_str() {
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy,
        }
    }

    /// Call OpenAI TTS API to synthesize a single text batch
    async fn call_openai(&self, text: &str) -> Result<Vec<u8>, String> {
        tracing::info!(
            model = %self.model,
            voice = %self.voice,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice: self.speech_voice(),
            response_format: None, // Defaults to MP3
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        Ok(response.bytes.to_vec())
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        if batches.is_empty() {
            return Err("No text to synthesize".to_string());
        }
        tracing::info!(
            language = language,
            batch_count = batches.len(),
            text_length = text.len(),
            "Starting OpenAI TTS synthesis"
        );

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            tracing::info!(batch_index = index, batch_size = batch.len(), "Synthesizing batch");
            merged_audio.extend(self.call_openai(batch).await?);
        }

        tracing::info!(
            provider = "openai",
            model = %self.model,
            language = language,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}
