//! Image file storage for product uploads

use std::path::{Path, PathBuf};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::ImageUpload;

/// Strip spaces, colons and backslashes from a file name.
pub fn sanitize(file_name: &str) -> String {
    file_name
        .chars()
        .filter(|c| !matches!(c, ' ' | ':' | '\\'))
        .collect()
}

/// Unique file name: a random UUID, a dash, then the original name, sanitized.
pub fn generate_name(original: &str) -> String {
    sanitize(&format!("{}-{}", Uuid::new_v4(), original))
}

/// Writes uploaded images into a single directory
#[derive(Debug, Clone)]
pub struct ImageStorage {
    upload_dir: PathBuf,
}

impl ImageStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Write `upload` under a generated name and return that name.
    ///
    /// The directory is created on first use.
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, size = upload.bytes.len()))]
    pub async fn store(&self, upload: &ImageUpload) -> ProductResult<String> {
        let name = generate_name(&upload.file_name);

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    dir = %self.upload_dir.display(),
                    error = %e,
                    "Failed to create upload directory"
                )
            })?;
        tokio::fs::write(self.upload_dir.join(&name), &upload.bytes)
            .await
            .inspect_err(|e| tracing::error!(file = %name, error = %e, "Failed to write image"))?;

        tracing::info!(file = %name, "Image stored");
        Ok(name)
    }
}
