use echoscribe::application::ports::{EngineInitError, TranscriptionEngine};
use echoscribe::infrastructure::audio::TranscriptionEngineFactory;
use echoscribe::presentation::{EngineProvider, EngineSettings};

#[test]
fn given_openai_with_key_when_creating_then_builds_openai_engine() {
    let settings = EngineSettings {
        api_key: Some("sk-test".to_string()),
        ..EngineSettings::default()
    };

    let engine = TranscriptionEngineFactory::create(&settings).unwrap();

    assert_eq!(engine.name(), "openai");
}

#[test]
fn given_openai_without_key_when_creating_then_reports_missing_setting() {
    let settings = EngineSettings::default();

    let result = TranscriptionEngineFactory::create(&settings);

    assert!(matches!(
        result,
        Err(EngineInitError::MissingSetting {
            provider: "openai",
            setting: "api_key"
        })
    ));
}

#[test]
fn given_openai_with_blank_key_when_creating_then_reports_missing_setting() {
    let settings = EngineSettings {
        api_key: Some("   ".to_string()),
        ..EngineSettings::default()
    };

    assert!(TranscriptionEngineFactory::create(&settings).is_err());
}

#[test]
fn given_azure_without_deployment_when_creating_then_reports_missing_setting() {
    let settings = EngineSettings {
        provider: EngineProvider::Azure,
        api_key: Some("key".to_string()),
        base_url: Some("https://example.openai.azure.com".to_string()),
        ..EngineSettings::default()
    };

    let result = TranscriptionEngineFactory::create(&settings);

    assert!(matches!(
        result,
        Err(EngineInitError::MissingSetting {
            setting: "deployment",
            ..
        })
    ));
}

#[test]
fn given_complete_azure_settings_when_creating_then_builds_azure_engine() {
    let settings = EngineSettings {
        provider: EngineProvider::Azure,
        api_key: Some("key".to_string()),
        base_url: Some("https://example.openai.azure.com".to_string()),
        deployment: Some("whisper".to_string()),
        ..EngineSettings::default()
    };

    let engine = TranscriptionEngineFactory::create(&settings).unwrap();

    assert_eq!(engine.name(), "azure");
}
