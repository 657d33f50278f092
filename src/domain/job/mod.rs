pub mod error;
pub mod model;
pub mod service;

pub use error::PipelineError;
pub use model::{
    JobStatus, ProcessedJob, TranslationJob, TranslationJobRecord, TranslationOutput, Upload,
    ERROR_MESSAGE_MAX_CHARS, STORED_TEXT_MAX_CHARS,
};
pub use service::{JobService, JobServiceApi, PipelineConfig};
