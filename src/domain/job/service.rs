use super::error::PipelineError;
use super::model::{
    truncate_chars, ProcessedJob, TranslationJob, TranslationJobRecord, TranslationOutput, Upload,
    STORED_TEXT_MAX_CHARS,
};
use crate::domain::extraction::{DocumentFormat, TextExtractor};
use crate::domain::speech::SpeechServiceApi;
use crate::domain::translation::{TargetLanguage, TranslationServiceApi};
use crate::error::AppResult;
use crate::infrastructure::repositories::JobRepository;
use crate::infrastructure::storage::ArtifactStorage;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_LIST_LIMIT: i64 = 10;
pub const MAX_LIST_LIMIT: i64 = 100;

/// Pipeline settings fixed at startup
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source_language: String,
    pub target_languages: Vec<TargetLanguage>,
}

pub struct JobService {
    extractor: TextExtractor,
    translation_service: Arc<dyn TranslationServiceApi>,
    speech_service: Arc<dyn SpeechServiceApi>,
    job_repo: Arc<dyn JobRepository>,
    storage: Arc<ArtifactStorage>,
    config: PipelineConfig,
}

impl JobService {
    pub fn new(
        translation_service: Arc<dyn TranslationServiceApi>,
        speech_service: Arc<dyn SpeechServiceApi>,
        job_repo: Arc<dyn JobRepository>,
        storage: Arc<ArtifactStorage>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            extractor: TextExtractor::new(),
            translation_service,
            speech_service,
            job_repo,
            storage,
            config,
        }
    }

    /// Extract, translate and voice one upload. Any failure aborts the run
    /// and discards the outputs gathered so far.
    async fn run_pipeline(
        &self,
        upload_id: &str,
        upload: &Upload,
        format: DocumentFormat,
    ) -> Result<Vec<TranslationOutput>, PipelineError> {
        let staged = self
            .storage
            .stage_upload(upload_id, format.extension(), &upload.bytes)
            .await?;

        tracing::info!(upload_id = upload_id, stage = "extracting", format = %format);
        let text = self
            .extractor
            .extract_file(staged.path().to_path_buf(), format)
            .await?;

        let mut outputs = Vec::with_capacity(self.config.target_languages.len());
        for language in &self.config.target_languages {
            tracing::info!(
                upload_id = upload_id,
                stage = "translating",
                language = %language.code,
                text_length = text.chars().count()
            );
            let translated = self
                .translation_service
                .translate(&text, &language.code)
                .await?;

            self.storage
                .write_text(upload_id, &language.code, &translated)
                .await?;

            tracing::info!(upload_id = upload_id, stage = "synthesizing", language = %language.code);
            let audio_file = self.storage.audio_file(upload_id, &language.code);
            self.speech_service
                .synthesize(&translated, &language.code, &audio_file)
                .await?;

            outputs.push(TranslationOutput {
                language: language.name.clone(),
                language_code: language.code.clone(),
                translated_text: truncate_chars(&translated, STORED_TEXT_MAX_CHARS),
                audio_path: self.storage.audio_url(upload_id, &language.code),
                text_path: self.storage.text_url(upload_id, &language.code),
            });
        }

        Ok(outputs)
    }
}

#[async_trait]
pub trait JobServiceApi: Send + Sync {
    /// Run the full pipeline for an uploaded document and persist one job
    /// record describing the outcome.
    ///
    /// Unsupported formats are rejected before any work and leave no record.
    /// Every other failure is stored as an errored job with no outputs and
    /// then returned.
    async fn process_upload(
        &self,
        upload: Upload,
        job_name: Option<String>,
    ) -> Result<ProcessedJob, PipelineError>;

    /// Most recent jobs first. `limit` defaults to 10 and is clamped to 1..=100.
    async fn list_jobs(&self, limit: Option<i64>) -> AppResult<Vec<TranslationJobRecord>>;
}

#[async_trait]
impl JobServiceApi for JobService {
    async fn process_upload(
        &self,
        upload: Upload,
        job_name: Option<String>,
    ) -> Result<ProcessedJob, PipelineError> {
        let format = DocumentFormat::from_filename(&upload.filename)?;

        let start_time = std::time::Instant::now();
        let upload_id = Uuid::new_v4().to_string();
        tracing::info!(
            upload_id = %upload_id,
            filename = %upload.filename,
            bytes = upload.bytes.len(),
            target_count = self.config.target_languages.len(),
            "Processing upload"
        );

        match self.run_pipeline(&upload_id, &upload, format).await {
            Ok(outputs) => {
                let job = TranslationJob::completed(
                    job_name,
                    upload.filename,
                    self.config.source_language.clone(),
                    outputs,
                );
                let job_id = self
                    .job_repo
                    .create(&job)
                    .await
                    .map_err(PipelineError::Persistence)?;

                tracing::info!(
                    upload_id = %upload_id,
                    job_id = %job_id,
                    stage = "completed",
                    output_count = job.outputs.len(),
                    latency_ms = start_time.elapsed().as_millis(),
                    "Upload processed"
                );

                Ok(ProcessedJob { job_id, job })
            }
            Err(err) => {
                tracing::error!(
                    upload_id = %upload_id,
                    stage = "errored",
                    error = %err,
                    latency_ms = start_time.elapsed().as_millis(),
                    "Upload processing failed"
                );

                let job = TranslationJob::failed(
                    job_name,
                    upload.filename,
                    self.config.source_language.clone(),
                    &err.to_string(),
                );
                let codes: Vec<&str> = self
                    .config
                    .target_languages
                    .iter()
                    .map(|l| l.code.as_str())
                    .collect();
                self.storage.remove_artifacts(&upload_id, &codes).await;

                if let Err(persist_err) = self.job_repo.create(&job).await {
                    tracing::error!(
                        upload_id = %upload_id,
                        error = %persist_err,
                        "Failed to persist errored job"
                    );
                }

                Err(err)
            }
        }
    }

    async fn list_jobs(&self, limit: Option<i64>) -> AppResult<Vec<TranslationJobRecord>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
        self.job_repo.list_recent(limit).await
    }
}
