use crate::{env_or_default, env_parse, ConfigError, FromEnv};
use std::path::PathBuf;

/// Default multipart body limit (10 MiB).
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Where uploaded files land and how large a multipart body may be.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub path: PathBuf,
    pub max_bytes: usize,
}

impl UploadConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }
}

impl FromEnv for UploadConfig {
    /// - UPLOAD_PATH: defaults to ./uploads
    /// - UPLOAD_MAX_BYTES: defaults to 10 MiB
    fn from_env() -> Result<Self, ConfigError> {
        let path = PathBuf::from(env_or_default("UPLOAD_PATH", "./uploads"));
        let max_bytes = env_parse("UPLOAD_MAX_BYTES", DEFAULT_UPLOAD_MAX_BYTES)?;

        Ok(Self { path, max_bytes })
    }
}
