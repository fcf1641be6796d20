use async_trait::async_trait;

/// A speech-to-text capability, hosted or local.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Recognizes speech in a complete RIFF/WAVE payload.
    async fn recognize(&self, audio_data: &[u8]) -> Result<String, RecognitionFailure>;

    /// Short provider label used in logs.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionFailure {
    /// The engine ran to completion but produced no usable text.
    #[error("no speech could be recognized")]
    Ambiguous,
    #[error("{0}")]
    ServiceFailure(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineInitError {
    #[error("missing setting for {provider} engine: {setting}")]
    MissingSetting {
        provider: &'static str,
        setting: &'static str,
    },
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
}
