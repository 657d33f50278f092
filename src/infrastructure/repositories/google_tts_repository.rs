use super::batching::split_into_batches;
use super::tts_repository::TtsRepository;
use async_trait::async_trait;

/// Google Translate TTS accepts at most 100 characters per request
const MAX_BATCH_SIZE: usize = 100;

const DEFAULT_BASE_URL: &str = "https://translate.google.com/translate_tts";

/// Google Translate TTS implementation of TTS repository
pub struct GoogleTtsRepository {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTtsRepository {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Fetch the MP3 rendering of a single batch
    async fn call_google(
        &self,
        text: &str,
        language: &str,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, String> {
        let text_length = text.chars().count().to_string();
        let index = index.to_string();
        let total = total.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", text),
                ("idx", index.as_str()),
                ("total", total.as_str()),
                ("textlen", text_length.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, language = language, "Google TTS request failed");
                format!("Google TTS request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status = %status,
                language = language,
                text_length = text.len(),
                "Google TTS returned an error status"
            );
            return Err(format!(
                "Google TTS returned status {} for language '{}'",
                status, language
            ));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read Google TTS audio: {}", e))?;

        Ok(audio.to_vec())
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        if batches.is_empty() {
            return Err("No text to synthesize".to_string());
        }
        tracing::info!(
            batch_count = batches.len(),
            text_length = text.len(),
            language = language,
            "Text split into batches"
        );

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self.call_google(batch, language, index, batches.len()).await?;
            merged_audio.extend(audio_data);
        }

        tracing::info!(
            provider = "google",
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
