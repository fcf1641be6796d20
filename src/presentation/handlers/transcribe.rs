use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::TranscriptionServiceError;
use crate::domain::UploadedAudio;
use crate::presentation::state::AppState;

pub const AUDIO_FIELD: &str = "audio";
pub const NO_AUDIO_MESSAGE: &str = "No audio file uploaded";

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcription: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

/// A broken or oversized multipart stream means no audio arrived intact.
fn read_error(e: MultipartError) -> Response {
    tracing::warn!(error = %e, status = %e.status(), "Failed to read multipart upload");
    error_response(StatusCode::BAD_REQUEST, NO_AUDIO_MESSAGE.to_string())
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Transcribe request is not a multipart upload");
            return error_response(StatusCode::BAD_REQUEST, NO_AUDIO_MESSAGE.to_string());
        }
    };

    let upload = loop {
        match multipart.next_field().await {
            Ok(Some(field))
                if field.name() == Some(AUDIO_FIELD) && field.file_name().is_some() =>
            {
                let filename = field.file_name().map(str::to_string);
                match field.bytes().await {
                    Ok(data) => break UploadedAudio::new(filename, data.to_vec()),
                    Err(e) => return read_error(e),
                }
            }
            Ok(Some(field)) => {
                tracing::debug!(field = ?field.name(), "Ignoring unrelated form field");
            }
            Ok(None) => {
                tracing::warn!("Transcribe request with no audio field");
                return error_response(StatusCode::BAD_REQUEST, NO_AUDIO_MESSAGE.to_string());
            }
            Err(e) => return read_error(e),
        }
    };

    tracing::debug!(
        upload_id = %upload.id,
        filename = ?upload.filename,
        bytes = upload.size_bytes(),
        "Audio upload received"
    );

    match state.transcription_service.transcribe(upload).await {
        Ok(transcript) => {
            tracing::info!(
                engine = %transcript.engine,
                source = %transcript.source,
                chars = transcript.text.len(),
                "Transcription completed"
            );
            (
                StatusCode::OK,
                Json(TranscribeResponse {
                    transcription: transcript.text,
                }),
            )
                .into_response()
        }
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "Transcription failed");
            } else {
                tracing::warn!(error = %e, "Transcription rejected");
            }
            error_response(status, e.to_string())
        }
    }
}

pub fn status_for(error: &TranscriptionServiceError) -> StatusCode {
    if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
