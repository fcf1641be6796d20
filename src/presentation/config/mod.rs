mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    EngineProvider, EngineSettings, LoggingSettings, RecognitionSettings, ServerSettings,
    Settings, StorageSettings,
};
