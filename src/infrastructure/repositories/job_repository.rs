use crate::infrastructure::db::DbPool;
use crate::{
    domain::job::{JobStatus, TranslationJob, TranslationJobRecord, TranslationOutput},
    error::{AppError, AppResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use std::sync::Arc;
use uuid::Uuid;

/// Persistence for translation job records
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Store a job and return its generated id
    async fn create(&self, job: &TranslationJob) -> AppResult<String>;

    /// Most recent jobs first
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<TranslationJobRecord>>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

#[derive(Debug, sqlx::FromRow)]
struct TranslationJobRow {
    id: Uuid,
    job_name: Option<String>,
    source_filename: String,
    source_language: String,
    status: String,
    outputs: Json<Vec<TranslationOutput>>,
    error: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TranslationJobRow> for TranslationJobRecord {
    type Error = AppError;

    fn try_from(row: TranslationJobRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<JobStatus>()
            .map_err(AppError::Internal)?;

        Ok(TranslationJobRecord {
            id: row.id.to_string(),
            job: TranslationJob {
                job_name: row.job_name,
                source_filename: row.source_filename,
                source_language: row.source_language,
                status,
                outputs: row.outputs.0,
                error: row.error,
            },
            created_at: row.created_at,
        })
    }
}

pub struct PostgresJobRepository {
    pool: Arc<DbPool>,
}

impl PostgresJobRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn create(&self, job: &TranslationJob) -> AppResult<String> {
        let pool = self.pool.as_ref();
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO translation_jobs
                (id, job_name, source_filename, source_language, status, outputs, error, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(&job.job_name)
        .bind(&job.source_filename)
        .bind(&job.source_language)
        .bind(job.status.as_str())
        .bind(Json(&job.outputs))
        .bind(&job.error)
        .bind(now)
        .execute(pool)
        .await?;

        tracing::debug!(job_id = %id, status = %job.status, "Translation job stored");

        Ok(id.to_string())
    }

    async fn list_recent(&self, limit: i64) -> AppResult<Vec<TranslationJobRecord>> {
        let pool = self.pool.as_ref();
        let rows = sqlx::query_as::<_, TranslationJobRow>(
            r#"
            SELECT id, job_name, source_filename, source_language, status, outputs, error, created_at
            FROM translation_jobs
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(TranslationJobRecord::try_from).collect()
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
