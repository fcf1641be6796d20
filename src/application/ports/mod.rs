mod audio_inspector;
mod scratch_store;
mod transcription_engine;

pub use audio_inspector::{AudioFormatError, AudioInspector};
pub use scratch_store::{ScratchStore, ScratchStoreError};
pub use transcription_engine::{EngineInitError, RecognitionFailure, TranscriptionEngine};
