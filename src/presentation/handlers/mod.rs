mod health;
mod index;
mod transcribe;

pub use health::health_handler;
pub use index::index_handler;
pub use transcribe::{
    AUDIO_FIELD, ErrorResponse, NO_AUDIO_MESSAGE, TranscribeResponse, status_for,
    transcribe_handler,
};
