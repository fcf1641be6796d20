use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{ScratchStore, ScratchStoreError};
use crate::domain::ScratchPath;

/// Scratch files under a single upload directory on local disk.
pub struct LocalScratchStore {
    base_path: PathBuf,
}

impl LocalScratchStore {
    /// Creates `base_path` if it does not exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, ScratchStoreError> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path).map_err(ScratchStoreError::Directory)?;
        tracing::debug!(path = %base_path.display(), "Upload directory ready");
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn resolve(&self, path: &ScratchPath) -> PathBuf {
        self.base_path.join(path.as_str())
    }
}

#[async_trait]
impl ScratchStore for LocalScratchStore {
    async fn persist(&self, path: &ScratchPath, data: &[u8]) -> Result<(), ScratchStoreError> {
        let target = self.resolve(path);
        tokio::fs::write(&target, data)
            .await
            .map_err(|source| ScratchStoreError::Write {
                path: target.display().to_string(),
                source,
            })
    }

    async fn load(&self, path: &ScratchPath) -> Result<Vec<u8>, ScratchStoreError> {
        let target = self.resolve(path);
        tokio::fs::read(&target)
            .await
            .map_err(|source| ScratchStoreError::Read {
                path: target.display().to_string(),
                source,
            })
    }

    fn discard(&self, path: &ScratchPath) -> Result<(), ScratchStoreError> {
        let target = self.resolve(path);
        std::fs::remove_file(&target).map_err(|source| ScratchStoreError::Delete {
            path: target.display().to_string(),
            source,
        })
    }
}
