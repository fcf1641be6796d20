use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{RecognitionFailure, TranscriptionEngine};

pub const AZURE_DEFAULT_API_VERSION: &str = "2024-06-01";

pub struct AzureWhisperEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: Option<String>,
}

impl AzureWhisperEngine {
    pub fn new(base_url: &str, deployment: &str, api_key: &str, api_version: &str) -> Self {
        let endpoint = format!(
            "{}/openai/deployments/{}/audio/transcriptions?api-version={}",
            base_url.trim_end_matches('/'),
            deployment,
            api_version,
        );
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.to_string(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }
}

#[derive(Deserialize)]
struct AzureTranscriptionResponse {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl TranscriptionEngine for AzureWhisperEngine {
    async fn recognize(&self, audio_data: &[u8]) -> Result<String, RecognitionFailure> {
        let file_part = multipart::Part::bytes(audio_data.to_vec())
            .file_name("recording.wav")
            .mime_str("audio/wav")
            .map_err(|e| RecognitionFailure::ServiceFailure(format!("mime: {}", e)))?;

        let mut form = multipart::Form::new().part("file", file_part);
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        tracing::debug!(endpoint = %self.endpoint, "Sending audio to Azure OpenAI Whisper");

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
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

        let result: AzureTranscriptionResponse = response.json().await.map_err(|e| {
            RecognitionFailure::ServiceFailure(format!("parse response: {}", e))
        })?;

        let text = result.text.trim();
        if text.is_empty() {
            return Err(RecognitionFailure::Ambiguous);
        }

        tracing::info!(chars = text.len(), "Azure OpenAI Whisper transcription completed");

        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "azure"
    }
}
