use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{RecognitionFailure, TranscriptionEngine};

pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "whisper-1";

/// Hosted recognizer speaking the OpenAI `/audio/transcriptions` protocol.
pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    language: Option<String>,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| OPENAI_DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
            language: None,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn recognize(&self, audio_data: &[u8]) -> Result<String, RecognitionFailure> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(audio_data.to_vec())
            .file_name("recording.wav")
            .mime_str("audio/wav")
            .map_err(|e| RecognitionFailure::ServiceFailure(format!("mime: {}", e)))?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        tracing::debug!(model = %self.model, url = %url, "Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RecognitionFailure::ServiceFailure(format!("request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RecognitionFailure::ServiceFailure(format!(
                "status {}: {}",
                status,
                body.trim()
            )));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| RecognitionFailure::ServiceFailure(format!("body: {}", e)))?;

        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(RecognitionFailure::Ambiguous);
        }

        tracing::info!(chars = transcript.len(), "OpenAI Whisper transcription completed");

        Ok(transcript.to_string())
    }

    fn name(&self) -> &str {
        "openai"
    }
}
