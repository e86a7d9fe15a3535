//! Transient upload storage
//!
//! Uploaded files are written under the configured uploads directory before
//! being read back for processing, so a failed request leaves the inputs on
//! disk for inspection. Retention and cleanup are operational concerns.

use std::path::{Path, PathBuf};
use uuid::Uuid;

use wersmatch_utils::{sanitize_filename, MatchError, MatchResult};

pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist one upload and return its path. Filenames are prefixed with a
    /// fresh UUID so concurrent requests never collide.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> MatchResult<PathBuf> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| MatchError::storage(format!("creating uploads dir: {}", e)))?;

        let name = format!("{}-{}", Uuid::new_v4(), sanitize_filename(original_name));
        let path = self.dir.join(name);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| MatchError::storage(format!("writing {}: {}", path.display(), e)))?;

        Ok(path)
    }

    /// Read a previously saved upload back for processing.
    pub async fn read(&self, path: &Path) -> MatchResult<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|e| MatchError::storage(format!("reading {}: {}", path.display(), e)))
    }
}
