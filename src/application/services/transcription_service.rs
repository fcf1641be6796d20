use std::sync::Arc;

use crate::application::ports::{
    AudioFormatError, AudioInspector, RecognitionFailure, ScratchStore, ScratchStoreError,
    TranscriptionEngine,
};
use crate::domain::{ScratchPath, Transcript, TranscriptSource, UploadedAudio};

/// Runs one upload through validation, primary recognition and the offline fallback.
pub struct TranscriptionService {
    primary: Arc<dyn TranscriptionEngine>,
    fallback: Option<Arc<dyn TranscriptionEngine>>,
    inspector: Arc<dyn AudioInspector>,
    scratch_store: Arc<dyn ScratchStore>,
}

impl TranscriptionService {
    pub fn new(
        primary: Arc<dyn TranscriptionEngine>,
        fallback: Option<Arc<dyn TranscriptionEngine>>,
        inspector: Arc<dyn AudioInspector>,
        scratch_store: Arc<dyn ScratchStore>,
    ) -> Self {
        Self {
            primary,
            fallback,
            inspector,
            scratch_store,
        }
    }

    pub fn primary_engine(&self) -> &str {
        self.primary.name()
    }

    pub fn fallback_engine(&self) -> Option<&str> {
        self.fallback.as_deref().map(|engine| engine.name())
    }

    #[tracing::instrument(
        skip(self, upload),
        fields(upload_id = %upload.id, bytes = upload.size_bytes())
    )]
    pub async fn transcribe(
        &self,
        upload: UploadedAudio,
    ) -> Result<Transcript, TranscriptionServiceError> {
        let path = ScratchPath::new(&upload.id);
        // Created before the write so a partial file is removed as well.
        let _scratch = ScratchGuard::new(Arc::clone(&self.scratch_store), path.clone());

        self.scratch_store
            .persist(&path, &upload.data)
            .await
            .map_err(TranscriptionServiceError::from_scratch)?;
        drop(upload);

        let audio = self
            .scratch_store
            .load(&path)
            .await
            .map_err(TranscriptionServiceError::from_scratch)?;

        let format = self.inspector.inspect(&audio).map_err(|e| {
            tracing::warn!(error = %e, "Wave file validation failed");
            TranscriptionServiceError::InvalidFormat(e)
        })?;

        tracing::info!(
            channels = format.channels,
            sample_width = format.sample_width,
            frame_rate = format.frame_rate,
            duration_secs = format.duration_secs(),
            "Audio file details"
        );

        self.recognize(&audio).await
    }

    async fn recognize(&self, audio: &[u8]) -> Result<Transcript, TranscriptionServiceError> {
        let engine = self.primary.name();

        match self.primary.recognize(audio).await {
            Ok(text) => {
                tracing::info!(engine, chars = text.len(), "Primary engine recognized audio");
                Ok(Transcript::new(text, engine, TranscriptSource::Primary))
            }
            Err(RecognitionFailure::Ambiguous) => {
                tracing::info!(engine, "Primary engine could not understand audio");
                self.recognize_fallback(audio).await
            }
            Err(RecognitionFailure::ServiceFailure(message)) => {
                tracing::error!(engine, error = %message, "Primary engine failed");
                Err(TranscriptionServiceError::Processing(message))
            }
        }
    }

    async fn recognize_fallback(
        &self,
        audio: &[u8],
    ) -> Result<Transcript, TranscriptionServiceError> {
        let Some(fallback) = &self.fallback else {
            tracing::warn!("No fallback engine configured");
            return Err(TranscriptionServiceError::RecognitionExhausted(
                RecognitionFailure::Ambiguous.to_string(),
            ));
        };

        let engine = fallback.name();
        match fallback.recognize(audio).await {
            Ok(text) => {
                tracing::info!(engine, chars = text.len(), "Fallback engine recognized audio");
                Ok(Transcript::new(text, engine, TranscriptSource::Fallback))
            }
            Err(e) => {
                tracing::error!(engine, error = %e, "Fallback engine failed");
                Err(TranscriptionServiceError::RecognitionExhausted(e.to_string()))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("Invalid audio file format")]
    InvalidFormat(#[source] AudioFormatError),
    #[error("Audio processing error: {0}")]
    Processing(String),
    #[error("Speech recognition failed: {0}")]
    RecognitionExhausted(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl TranscriptionServiceError {
    fn from_scratch(error: ScratchStoreError) -> Self {
        tracing::error!(error = %error, "Scratch storage failure");
        Self::Unexpected(error.to_string())
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidFormat(_))
    }
}

/// Discards the scratch file on every exit path, including cancellation.
struct ScratchGuard {
    store: Arc<dyn ScratchStore>,
    path: ScratchPath,
}

impl ScratchGuard {
    fn new(store: Arc<dyn ScratchStore>, path: ScratchPath) -> Self {
        Self { store, path }
    }
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        if let Err(e) = self.store.discard(&self.path) {
            tracing::debug!(path = %self.path, error = %e, "Scratch cleanup skipped");
        }
    }
}
