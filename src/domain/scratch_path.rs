use std::fmt;

use super::upload::UploadId;

const SCRATCH_EXTENSION: &str = "wav";

/// Location of a request's scratch file, relative to the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchPath(String);

impl ScratchPath {
    pub fn new(upload_id: &UploadId) -> Self {
        Self(format!("{}.{}", upload_id.as_uuid(), SCRATCH_EXTENSION))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScratchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
