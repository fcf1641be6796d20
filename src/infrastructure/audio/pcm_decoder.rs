use std::io::Cursor;

use hound::{SampleFormat, WavReader};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

pub const TARGET_SAMPLE_RATE: u32 = 16_000;

const RESAMPLE_CHUNK: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum PcmDecodeError {
    #[error("no audio samples decoded")]
    Empty,
    #[error("decoding failed: {0}")]
    Failed(String),
}

/// Decodes a WAV payload into 16 kHz mono f32 samples in [-1.0, 1.0].
pub fn decode_wav_to_mono_16k(data: &[u8]) -> Result<Vec<f32>, PcmDecodeError> {
    let mut reader = WavReader::new(Cursor::new(data))
        .map_err(|e| PcmDecodeError::Failed(format!("header: {}", e)))?;

    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            read_lenient(reader.samples::<i32>())
                .into_iter()
                .map(|s| s as f32 / scale)
                .collect()
        }
        SampleFormat::Float => read_lenient(reader.samples::<f32>()),
    };

    let mono = downmix(&interleaved, channels);
    if mono.is_empty() {
        return Err(PcmDecodeError::Empty);
    }

    let pcm = if spec.sample_rate != TARGET_SAMPLE_RATE {
        resample(&mono, spec.sample_rate, TARGET_SAMPLE_RATE)?
    } else {
        mono
    };

    tracing::debug!(
        samples = pcm.len(),
        duration_secs = pcm.len() as f32 / TARGET_SAMPLE_RATE as f32,
        "Audio decoded to 16kHz mono PCM"
    );

    Ok(pcm)
}

// A data chunk shorter than its declared length yields the samples that are present.
fn read_lenient<T, I>(samples: I) -> Vec<T>
where
    I: Iterator<Item = hound::Result<T>>,
{
    let mut out = Vec::new();
    for sample in samples {
        match sample {
            Ok(s) => out.push(s),
            Err(e) => {
                tracing::warn!(error = %e, decoded = out.len(), "Truncated audio data");
                break;
            }
        }
    }
    out
}

fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, PcmDecodeError> {
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = f64::from(to_rate) / f64::from(from_rate);
    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, RESAMPLE_CHUNK, 1)
        .map_err(|e| PcmDecodeError::Failed(format!("resampler init: {}", e)))?;

    let expected_len = (samples.len() as f64 * ratio) as usize;
    let mut output = Vec::with_capacity(expected_len + RESAMPLE_CHUNK);

    for chunk in samples.chunks(RESAMPLE_CHUNK) {
        let mut input = chunk.to_vec();
        input.resize(RESAMPLE_CHUNK, 0.0);

        let result = resampler
            .process(&[input], None)
            .map_err(|e| PcmDecodeError::Failed(format!("resample: {}", e)))?;

        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    output.truncate(expected_len);
    Ok(output)
}
