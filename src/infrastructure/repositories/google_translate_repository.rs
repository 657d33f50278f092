use super::translation_repository::TranslationRepository;
use async_trait::async_trait;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Google Translate implementation of the translation repository
pub struct GoogleTranslateRepository {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateRepository {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl TranslationRepository for GoogleTranslateRepository {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            source = source,
            target = target,
            text_length = text.len(),
            "Calling Google Translate"
        );

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t")])
            .form(&[("q", text)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, target = target, "Google Translate request failed");
                format!("Google Translate request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                target = target,
                body_preview = %body.chars().take(200).collect::<String>(),
                "Google Translate returned an error status"
            );
            return Err(format!("Google Translate returned status {}", status));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| format!("Invalid Google Translate response: {}", e))?;
        let translated = parse_translation(&body)?;

        tracing::info!(
            provider = "google",
            target = target,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            "Chunk translated"
        );

        Ok(translated)
    }
}

/// Concatenate the translated segments of a `translate_a/single` response.
///
/// The first element is a list of `[translated, original, ...]` segments.
fn parse_translation(body: &Value) -> Result<String, String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| "Google Translate response has no translation segments".to_string())?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err("Google Translate returned an empty translation".to_string());
    }

    Ok(translated)
}
