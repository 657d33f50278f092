use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use polyglot_audio_backend::{
    domain::job::{TranslationJob, TranslationJobRecord},
    error::{AppError, AppResult},
    infrastructure::repositories::{JobRepository, TranslationRepository, TtsRepository},
};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

pub const FAKE_MP3_HEADER: &[u8] = b"ID3";

/// Tags each chunk with its target language
pub struct MockTranslator;

#[async_trait]
impl TranslationRepository for MockTranslator {
    async fn translate(&self, text: &str, _source: &str, target: &str) -> Result<String, String> {
        Ok(format!("[{}] {}", target, text))
    }
}

/// Returns a fake MP3 payload, optionally failing for one language
#[derive(Default)]
pub struct MockTts {
    pub fail_language: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl TtsRepository for MockTts {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String> {
        self.calls.lock().push(language.to_string());
        if self.fail_language.as_deref() == Some(language) {
            return Err(format!("no voice available for '{}'", language));
        }
        let mut audio = FAKE_MP3_HEADER.to_vec();
        audio.extend_from_slice(text.as_bytes());
        Ok(audio)
    }
}

/// Job store kept in memory, newest record last
pub struct InMemoryJobRepository {
    records: Mutex<Vec<TranslationJobRecord>>,
    available: AtomicBool,
}

impl Default for InMemoryJobRepository {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }
}

#[allow(dead_code)]
impl InMemoryJobRepository {
    pub fn records(&self) -> Vec<TranslationJobRecord> {
        self.records.lock().clone()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::Internal("job store unavailable".to_string()))
        }
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self, job: &TranslationJob) -> AppResult<String> {
        self.check_available()?;
        let id = Uuid::new_v4().to_string();
        self.records.lock().push(TranslationJobRecord {
            id: id.clone(),
            job: job.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_recent(&self, limit: i64) -> AppResult<Vec<TranslationJobRecord>> {
        self.check_available()?;
        let records = self.records.lock();
        Ok(records.iter().rev().take(limit as usize).cloned().collect())
    }

    async fn ping(&self) -> AppResult<()> {
        self.check_available()
    }
}
