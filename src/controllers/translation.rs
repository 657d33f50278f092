use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::job::{JobServiceApi, ProcessedJob, TranslationJobRecord, Upload},
    error::{AppError, AppResult},
};

/// Query for GET /api/jobs
#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<TranslationJobRecord>,
}

pub struct TranslationController {
    job_service: Arc<dyn JobServiceApi>,
}

impl TranslationController {
    pub fn new(job_service: Arc<dyn JobServiceApi>) -> Self {
        Self { job_service }
    }

    /// POST /api/translate-upload - Translate and voice an uploaded document
    pub async fn translate_upload(
        State(controller): State<Arc<TranslationController>>,
        mut multipart: Multipart,
    ) -> AppResult<Json<ProcessedJob>> {
        let mut upload: Option<Upload> = None;
        let mut job_name: Option<String> = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    upload = Some(Upload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
                Some("job_name") => {
                    let value = field.text().await?;
                    let value = value.trim();
                    if !value.is_empty() {
                        job_name = Some(value.to_string());
                    }
                }
                _ => {}
            }
        }

        let upload = upload
            .filter(|upload| !upload.filename.is_empty())
            .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

        let processed = controller
            .job_service
            .process_upload(upload, job_name)
            .await?;

        Ok(Json(processed))
    }

    /// GET /api/jobs - Most recent jobs first
    pub async fn list_jobs(
        State(controller): State<Arc<TranslationController>>,
        Query(query): Query<ListJobsQuery>,
    ) -> AppResult<Json<JobListResponse>> {
        let items = controller.job_service.list_jobs(query.limit).await?;
        Ok(Json(JobListResponse { items }))
    }
}
