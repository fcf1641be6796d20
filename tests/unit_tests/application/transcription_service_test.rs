use std::sync::Arc;

use echoscribe::application::ports::{ScratchStore, TranscriptionEngine};
use echoscribe::application::services::{TranscriptionService, TranscriptionServiceError};
use echoscribe::domain::{TranscriptSource, UploadedAudio};
use echoscribe::infrastructure::audio::WavInspector;
use echoscribe::infrastructure::storage::LocalScratchStore;

use crate::helpers::{FailingScratchStore, ScriptedEngine, scratch_entries, silent_wav};

fn create_service(
    primary: Arc<ScriptedEngine>,
    fallback: Option<Arc<ScriptedEngine>>,
) -> (tempfile::TempDir, TranscriptionService) {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn ScratchStore> = Arc::new(LocalScratchStore::new(dir.path()).unwrap());
    let fallback = fallback.map(|f| f as Arc<dyn TranscriptionEngine>);
    let service = TranscriptionService::new(primary, fallback, Arc::new(WavInspector), store);
    (dir, service)
}

fn wav_upload() -> UploadedAudio {
    UploadedAudio::new(Some("recording.wav".to_string()), silent_wav())
}

#[tokio::test]
async fn given_primary_success_when_transcribing_then_returns_primary_text_without_fallback() {
    let primary = ScriptedEngine::succeeding("primary", "hello world");
    let fallback = ScriptedEngine::succeeding("fallback", "unused");
    let (_dir, service) = create_service(primary.clone(), Some(fallback.clone()));

    let transcript = service.transcribe(wav_upload()).await.unwrap();

    assert_eq!(transcript.text, "hello world");
    assert_eq!(transcript.engine, "primary");
    assert_eq!(transcript.source, TranscriptSource::Primary);
    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test]
async fn given_ambiguous_primary_when_transcribing_then_returns_fallback_text() {
    let primary = ScriptedEngine::ambiguous("primary");
    let fallback = ScriptedEngine::succeeding("fallback", "offline words");
    let (_dir, service) = create_service(primary.clone(), Some(fallback.clone()));

    let transcript = service.transcribe(wav_upload()).await.unwrap();

    assert_eq!(transcript.text, "offline words");
    assert_eq!(transcript.source, TranscriptSource::Fallback);
    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 1);
}

#[tokio::test]
async fn given_both_engines_failing_when_transcribing_then_recognition_is_exhausted() {
    let primary = ScriptedEngine::ambiguous("primary");
    let fallback = ScriptedEngine::failing("fallback", "model crashed");
    let (_dir, service) = create_service(primary, Some(fallback));

    let err = service.transcribe(wav_upload()).await.unwrap_err();

    assert!(matches!(err, TranscriptionServiceError::RecognitionExhausted(_)));
    assert_eq!(err.to_string(), "Speech recognition failed: model crashed");
}

#[tokio::test]
async fn given_both_engines_ambiguous_when_transcribing_then_message_names_missing_speech() {
    let (_dir, service) = create_service(
        ScriptedEngine::ambiguous("primary"),
        Some(ScriptedEngine::ambiguous("fallback")),
    );

    let err = service.transcribe(wav_upload()).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Speech recognition failed: no speech could be recognized"
    );
}

#[tokio::test]
async fn given_primary_service_failure_when_transcribing_then_fallback_is_not_attempted() {
    let primary = ScriptedEngine::failing("primary", "status 503: unavailable");
    let fallback = ScriptedEngine::succeeding("fallback", "unused");
    let (_dir, service) = create_service(primary, Some(fallback.clone()));

    let err = service.transcribe(wav_upload()).await.unwrap_err();

    assert!(matches!(err, TranscriptionServiceError::Processing(_)));
    assert_eq!(
        err.to_string(),
        "Audio processing error: status 503: unavailable"
    );
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test]
async fn given_no_fallback_configured_when_primary_is_ambiguous_then_recognition_is_exhausted() {
    let (_dir, service) = create_service(ScriptedEngine::ambiguous("primary"), None);

    let err = service.transcribe(wav_upload()).await.unwrap_err();

    assert!(matches!(err, TranscriptionServiceError::RecognitionExhausted(_)));
    assert_eq!(service.fallback_engine(), None);
}

#[tokio::test]
async fn given_non_wav_payload_when_transcribing_then_rejected_before_recognition() {
    let primary = ScriptedEngine::succeeding("primary", "unused");
    let (_dir, service) = create_service(primary.clone(), None);
    let upload = UploadedAudio::new(Some("notes.wav".to_string()), b"just some text".to_vec());

    let err = service.transcribe(upload).await.unwrap_err();

    assert!(matches!(err, TranscriptionServiceError::InvalidFormat(_)));
    assert!(err.is_client_error());
    assert_eq!(err.to_string(), "Invalid audio file format");
    assert_eq!(primary.calls(), 0);
}

#[tokio::test]
async fn given_any_outcome_when_transcribing_then_scratch_directory_is_left_empty() {
    let outcomes = [
        ScriptedEngine::succeeding("primary", "ok"),
        ScriptedEngine::ambiguous("primary"),
        ScriptedEngine::failing("primary", "boom"),
    ];

    for primary in outcomes {
        let (dir, service) = create_service(primary, Some(ScriptedEngine::ambiguous("fallback")));
        let _ = service.transcribe(wav_upload()).await;
        assert_eq!(scratch_entries(dir.path()), 0);
    }

    let (dir, service) = create_service(ScriptedEngine::succeeding("primary", "ok"), None);
    let invalid = UploadedAudio::new(None, Vec::new());
    let _ = service.transcribe(invalid).await;
    assert_eq!(scratch_entries(dir.path()), 0);
}

#[tokio::test]
async fn given_scratch_write_failure_when_transcribing_then_reports_unexpected_error() {
    let primary = ScriptedEngine::succeeding("primary", "unused");
    let service = TranscriptionService::new(
        primary.clone(),
        None,
        Arc::new(WavInspector),
        Arc::new(FailingScratchStore),
    );

    let err = service.transcribe(wav_upload()).await.unwrap_err();

    assert!(matches!(err, TranscriptionServiceError::Unexpected(_)));
    assert!(err.to_string().starts_with("Unexpected error: "));
    assert_eq!(primary.calls(), 0);
}

#[test]
fn given_service_when_querying_engines_then_reports_configured_names() {
    let (_dir, service) = create_service(
        ScriptedEngine::succeeding("openai", "x"),
        Some(ScriptedEngine::succeeding("candle-whisper", "y")),
    );

    assert_eq!(service.primary_engine(), "openai");
    assert_eq!(service.fallback_engine(), Some("candle-whisper"));
}
