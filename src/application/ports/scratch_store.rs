use std::io;

use async_trait::async_trait;

use crate::domain::ScratchPath;

/// Short-lived storage for an in-flight upload.
#[async_trait]
pub trait ScratchStore: Send + Sync {
    async fn persist(&self, path: &ScratchPath, data: &[u8]) -> Result<(), ScratchStoreError>;

    async fn load(&self, path: &ScratchPath) -> Result<Vec<u8>, ScratchStoreError>;

    /// Synchronous so it can run from `Drop`.
    fn discard(&self, path: &ScratchPath) -> Result<(), ScratchStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ScratchStoreError {
    #[error("failed to write scratch file {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("failed to read scratch file {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to delete scratch file {path}: {source}")]
    Delete { path: String, source: io::Error },
    #[error("scratch directory unavailable: {0}")]
    Directory(io::Error),
}
