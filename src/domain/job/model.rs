use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Messages stored on failed jobs are cut to this many characters.
pub const ERROR_MESSAGE_MAX_CHARS: usize = 500;
/// Translated text stored on a job output is cut to this many characters;
/// the full translation lives in the text artifact.
pub const STORED_TEXT_MAX_CHARS: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Completed,
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(JobStatus::Completed),
            "error" => Ok(JobStatus::Error),
            other => Err(format!("Unknown job status: {}", other)),
        }
    }
}

/// One language's artifacts for a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationOutput {
    pub language: String,
    pub language_code: String,
    pub translated_text: String,
    pub audio_path: String,
    pub text_path: String,
}

/// Outcome of processing one uploaded document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationJob {
    pub job_name: Option<String>,
    pub source_filename: String,
    pub source_language: String,
    pub status: JobStatus,
    pub outputs: Vec<TranslationOutput>,
    pub error: Option<String>,
}

impl TranslationJob {
    pub fn completed(
        job_name: Option<String>,
        source_filename: String,
        source_language: String,
        outputs: Vec<TranslationOutput>,
    ) -> Self {
        Self {
            job_name,
            source_filename,
            source_language,
            status: JobStatus::Completed,
            outputs,
            error: None,
        }
    }

    pub fn failed(
        job_name: Option<String>,
        source_filename: String,
        source_language: String,
        message: &str,
    ) -> Self {
        Self {
            job_name,
            source_filename,
            source_language,
            status: JobStatus::Error,
            outputs: Vec::new(),
            error: Some(truncate_chars(message, ERROR_MESSAGE_MAX_CHARS)),
        }
    }
}

/// A persisted job as returned by listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationJobRecord {
    pub id: String,
    #[serde(flatten)]
    pub job: TranslationJob,
    pub created_at: DateTime<Utc>,
}

/// A document received for processing
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful pipeline run, as returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedJob {
    pub job_id: String,
    pub job: TranslationJob,
}

/// Truncate to at most `max_chars` characters without splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
