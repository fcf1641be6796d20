use crate::domain::AudioFormat;

pub trait AudioInspector: Send + Sync {
    /// Parses the container header, rejecting anything that is not uncompressed integer PCM.
    fn inspect(&self, data: &[u8]) -> Result<AudioFormat, AudioFormatError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioFormatError {
    #[error("malformed container: {0}")]
    Malformed(String),
    #[error("unsupported encoding: {0}")]
    Unsupported(String),
}
