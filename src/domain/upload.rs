use std::fmt;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadId(Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Audio bytes received under the `audio` form field of a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedAudio {
    pub id: UploadId,
    pub filename: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedAudio {
    pub fn new(filename: Option<String>, data: Vec<u8>) -> Self {
        Self {
            id: UploadId::new(),
            filename,
            data,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
