use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Deserializer};

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub recognition: RecognitionSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `APP__SECTION__KEY` environment variables over the optional
    /// `appsettings.<env>` file, over built-in defaults.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub upload_dir: PathBuf,
    pub max_upload_mb: usize,
}

impl StorageSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            max_upload_mb: 25,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    pub primary: EngineSettings,
    #[serde(default = "EngineSettings::offline", deserialize_with = "offline_by_default")]
    pub fallback: EngineSettings,
}

/// Fallback sections that omit `provider` stay on the local engine.
fn offline_by_default<'de, D>(deserializer: D) -> Result<EngineSettings, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct FallbackSection {
        provider: Option<EngineProvider>,
        #[serde(flatten)]
        rest: EngineSettings,
    }

    let section = FallbackSection::deserialize(deserializer)?;
    Ok(EngineSettings {
        provider: section.provider.unwrap_or(EngineProvider::Local),
        ..section.rest
    })
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            primary: EngineSettings::default(),
            fallback: EngineSettings::offline(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
    Local,
}

/// One recognition slot. Unused fields are ignored by providers that don't need them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub enabled: bool,
    pub provider: EngineProvider,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub language: Option<String>,
    pub deployment: Option<String>,
    pub api_version: Option<String>,
}

impl EngineSettings {
    pub fn offline() -> Self {
        Self {
            provider: EngineProvider::Local,
            ..Self::default()
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: EngineProvider::OpenAi,
            model: None,
            api_key: None,
            base_url: None,
            language: None,
            deployment: None,
            api_version: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub json: bool,
}
