use std::io;
use std::path::{Path, PathBuf};

/// URL prefix under which the output directory is served
pub const OUTPUTS_URL_PREFIX: &str = "/outputs";

const AUDIO_DIR: &str = "audio";
const TEXTS_DIR: &str = "texts";

/// Filesystem layout for staged uploads and generated artifacts.
///
/// Artifacts live in `{output_dir}/audio` and `{output_dir}/texts` and are
/// named `{upload_id}_{language_code}` so concurrent uploads never collide.
#[derive(Debug, Clone)]
pub struct ArtifactStorage {
    output_dir: PathBuf,
    upload_dir: PathBuf,
}

impl ArtifactStorage {
    pub fn new(output_dir: impl Into<PathBuf>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            upload_dir: upload_dir.into(),
        }
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.output_dir.join(AUDIO_DIR)
    }

    pub fn texts_dir(&self) -> PathBuf {
        self.output_dir.join(TEXTS_DIR)
    }

    /// Create the artifact and staging directories if missing
    pub async fn ensure_dirs(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(self.audio_dir()).await?;
        tokio::fs::create_dir_all(self.texts_dir()).await?;
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        Ok(())
    }

    /// Write upload bytes to the staging dir. The file lives as long as the
    /// returned guard.
    pub async fn stage_upload(
        &self,
        upload_id: &str,
        extension: &str,
        bytes: &[u8],
    ) -> io::Result<StagedUpload> {
        let path = self
            .upload_dir
            .join(format!("upload_{}.{}", upload_id, extension));
        let staged = StagedUpload { path };
        tokio::fs::write(&staged.path, bytes).await?;

        tracing::debug!(
            path = %staged.path.display(),
            bytes = bytes.len(),
            "Upload staged"
        );

        Ok(staged)
    }

    pub fn audio_file(&self, upload_id: &str, language_code: &str) -> PathBuf {
        self.audio_dir()
            .join(format!("{}_{}.mp3", upload_id, language_code))
    }

    pub fn text_file(&self, upload_id: &str, language_code: &str) -> PathBuf {
        self.texts_dir()
            .join(format!("{}_{}.txt", upload_id, language_code))
    }

    pub fn audio_url(&self, upload_id: &str, language_code: &str) -> String {
        format!(
            "{}/{}/{}_{}.mp3",
            OUTPUTS_URL_PREFIX, AUDIO_DIR, upload_id, language_code
        )
    }

    pub fn text_url(&self, upload_id: &str, language_code: &str) -> String {
        format!(
            "{}/{}/{}_{}.txt",
            OUTPUTS_URL_PREFIX, TEXTS_DIR, upload_id, language_code
        )
    }

    /// Save a translation as UTF-8 text and return where it was written
    pub async fn write_text(
        &self,
        upload_id: &str,
        language_code: &str,
        text: &str,
    ) -> io::Result<PathBuf> {
        let path = self.text_file(upload_id, language_code);
        tokio::fs::write(&path, text).await?;
        Ok(path)
    }

    /// Best-effort removal of the text and audio artifacts of an aborted run.
    /// Missing files are skipped and other failures are only logged.
    pub async fn remove_artifacts(&self, upload_id: &str, language_codes: &[&str]) {
        for code in language_codes {
            for path in [self.text_file(upload_id, code), self.audio_file(upload_id, code)] {
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => tracing::debug!(path = %path.display(), "Artifact removed"),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => tracing::warn!(
                        error = %e,
                        path = %path.display(),
                        "Failed to remove artifact"
                    ),
                }
            }
        }
    }
}

/// A staged upload file, removed when dropped
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedUpload {
    // Blocking unlink on purpose: the file must be gone before the run returns.
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Staged upload removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                error = %e,
                path = %self.path.display(),
                "Failed to remove staged upload"
            ),
        }
    }
}
