use super::chunker::chunk_text;
use super::error::TranslationServiceError;
use crate::infrastructure::repositories::TranslationRepository;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

pub struct TranslationService {
    translation_repo: Arc<dyn TranslationRepository>,
    source_language: String,
    max_chunk_chars: usize,
    cache: Option<Cache<(String, String), String>>,
}

impl TranslationService {
    pub fn new(
        translation_repo: Arc<dyn TranslationRepository>,
        source_language: String,
        max_chunk_chars: usize,
        cache_enabled: bool,
    ) -> Self {
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(1000)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self {
            translation_repo,
            source_language,
            max_chunk_chars,
            cache,
        }
    }
}

#[async_trait]
pub trait TranslationServiceApi: Send + Sync {
    /// Translate a whole document into `target`.
    ///
    /// The text is chunked to stay under the provider's per-call limit, each
    /// chunk is translated in order and the results are rejoined with `\n`.
    /// Any failing chunk fails the whole call.
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationServiceError>;
}

#[async_trait]
impl TranslationServiceApi for TranslationService {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationServiceError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let start_time = std::time::Instant::now();
        let chunks = chunk_text(text, self.max_chunk_chars);

        tracing::info!(
            source = %self.source_language,
            target = target,
            text_length = text.len(),
            chunk_count = chunks.len(),
            "Translating document"
        );

        let mut translated_chunks = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.into_iter().enumerate() {
            let translated = self.translate_chunk(index, chunk, target).await?;
            translated_chunks.push(translated);
        }

        tracing::info!(
            target = target,
            chunk_count = translated_chunks.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Document translated"
        );

        Ok(translated_chunks.join("\n"))
    }
}

impl TranslationService {
    async fn translate_chunk(
        &self,
        index: usize,
        chunk: String,
        target: &str,
    ) -> Result<String, TranslationServiceError> {
        // Blank paragraphs carry no content for the provider to translate.
        if chunk.trim().is_empty() {
            return Ok(chunk);
        }

        let key = (target.to_string(), chunk);
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&key).await {
                tracing::debug!(chunk_index = index, target = target, "Translation cache hit");
                return Ok(cached);
            }
        }

        tracing::debug!(
            chunk_index = index,
            chunk_size = key.1.len(),
            target = target,
            "Translating chunk"
        );

        let translated = self
            .translation_repo
            .translate(&key.1, &self.source_language, target)
            .await
            .map_err(|message| {
                tracing::error!(
                    chunk_index = index,
                    target = target,
                    error = %message,
                    "Chunk translation failed"
                );
                TranslationServiceError::Dependency {
                    target: target.to_string(),
                    chunk_index: index,
                    message,
                }
            })?;

        if let Some(cache) = &self.cache {
            cache.insert(key, translated.clone()).await;
        }

        Ok(translated)
    }
}
