mod azure_whisper_engine;
mod candle_whisper_engine;
mod openai_whisper_engine;
pub mod pcm_decoder;
mod transcription_engine_factory;
mod wav_inspector;

pub use azure_whisper_engine::AzureWhisperEngine;
pub use candle_whisper_engine::{CandleWhisperEngine, parse_mel_filters};
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use transcription_engine_factory::TranscriptionEngineFactory;
pub use wav_inspector::WavInspector;
