mod audio_format;
mod scratch_path;
mod transcript;
mod upload;

pub use audio_format::AudioFormat;
pub use scratch_path::ScratchPath;
pub use transcript::{Transcript, TranscriptSource};
pub use upload::{UploadId, UploadedAudio};
