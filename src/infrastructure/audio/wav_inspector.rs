use std::io::Cursor;

use hound::{SampleFormat, WavReader};

use crate::application::ports::{AudioFormatError, AudioInspector};
use crate::domain::AudioFormat;

/// Accepts RIFF/WAVE files carrying integer PCM samples.
pub struct WavInspector;

impl AudioInspector for WavInspector {
    fn inspect(&self, data: &[u8]) -> Result<AudioFormat, AudioFormatError> {
        let reader = WavReader::new(Cursor::new(data)).map_err(|e| match e {
            hound::Error::Unsupported => {
                AudioFormatError::Unsupported("unsupported wave encoding".to_string())
            }
            other => AudioFormatError::Malformed(other.to_string()),
        })?;

        let spec = reader.spec();
        if spec.sample_format != SampleFormat::Int {
            return Err(AudioFormatError::Unsupported(
                "floating point samples".to_string(),
            ));
        }
        if spec.channels == 0 || spec.sample_rate == 0 {
            return Err(AudioFormatError::Malformed(format!(
                "channels={} frame_rate={}",
                spec.channels, spec.sample_rate
            )));
        }

        Ok(AudioFormat {
            channels: spec.channels,
            sample_width: spec.bits_per_sample.div_ceil(8),
            frame_rate: spec.sample_rate,
            frames: reader.duration(),
        })
    }
}
