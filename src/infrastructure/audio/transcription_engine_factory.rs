use std::sync::Arc;

use crate::application::ports::{EngineInitError, TranscriptionEngine};
use crate::presentation::config::{EngineProvider, EngineSettings};

use super::azure_whisper_engine::{AZURE_DEFAULT_API_VERSION, AzureWhisperEngine};
use super::candle_whisper_engine::{CandleWhisperEngine, LOCAL_DEFAULT_MODEL};
use super::openai_whisper_engine::OpenAiWhisperEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(settings: &EngineSettings) -> Result<Arc<dyn TranscriptionEngine>, EngineInitError> {
        match settings.provider {
            EngineProvider::OpenAi => {
                let key = required(settings.api_key.as_deref(), "openai", "api_key")?;
                let engine = OpenAiWhisperEngine::new(
                    key.to_string(),
                    settings.base_url.clone(),
                    settings.model.clone(),
                )
                .with_language(settings.language.clone());
                Ok(Arc::new(engine))
            }
            EngineProvider::Azure => {
                let key = required(settings.api_key.as_deref(), "azure", "api_key")?;
                let base_url = required(settings.base_url.as_deref(), "azure", "base_url")?;
                let deployment = required(settings.deployment.as_deref(), "azure", "deployment")?;
                let api_version = settings
                    .api_version
                    .as_deref()
                    .unwrap_or(AZURE_DEFAULT_API_VERSION);
                let engine = AzureWhisperEngine::new(base_url, deployment, key, api_version)
                    .with_language(settings.language.clone());
                Ok(Arc::new(engine))
            }
            EngineProvider::Local => {
                let model = settings.model.as_deref().unwrap_or(LOCAL_DEFAULT_MODEL);
                Ok(Arc::new(CandleWhisperEngine::new(model)?))
            }
        }
    }
}

fn required<'a>(
    value: Option<&'a str>,
    provider: &'static str,
    setting: &'static str,
) -> Result<&'a str, EngineInitError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(EngineInitError::MissingSetting { provider, setting })
}
