use echoscribe::infrastructure::audio::pcm_decoder::{PcmDecodeError, decode_wav_to_mono_16k};

use crate::helpers::build_wav;

#[test]
fn given_16khz_mono_wav_when_decoding_then_sample_count_is_preserved() {
    let wav = build_wav(16_000, 1, &[0i16; 1600]);

    let pcm = decode_wav_to_mono_16k(&wav).unwrap();

    assert_eq!(pcm.len(), 1600);
}

#[test]
fn given_half_scale_samples_when_decoding_then_values_are_normalized() {
    let wav = build_wav(16_000, 1, &[16_384i16; 8]);

    let pcm = decode_wav_to_mono_16k(&wav).unwrap();

    assert!(pcm.iter().all(|s| (s - 0.5).abs() < 1e-6));
}

#[test]
fn given_stereo_wav_when_decoding_then_channels_are_downmixed() {
    let mut samples = Vec::new();
    for _ in 0..100 {
        samples.push(16_384i16);
        samples.push(0i16);
    }
    let wav = build_wav(16_000, 2, &samples);

    let pcm = decode_wav_to_mono_16k(&wav).unwrap();

    assert_eq!(pcm.len(), 100);
    assert!(pcm.iter().all(|s| (s - 0.25).abs() < 1e-6));
}

#[test]
fn given_44100hz_wav_when_decoding_then_resamples_to_16khz() {
    let wav = build_wav(44_100, 1, &[0i16; 4410]);

    let pcm = decode_wav_to_mono_16k(&wav).unwrap();

    assert!(!pcm.is_empty());
    assert!(
        pcm.len() <= 1600,
        "0.1s at 16kHz should be at most 1600 samples, got {}",
        pcm.len()
    );
}

#[test]
fn given_wav_without_frames_when_decoding_then_returns_empty() {
    let wav = build_wav(16_000, 1, &[]);

    let result = decode_wav_to_mono_16k(&wav);

    assert!(matches!(result, Err(PcmDecodeError::Empty)));
}

#[test]
fn given_corrupted_bytes_when_decoding_then_returns_failure() {
    let garbage = vec![0xFFu8; 128];

    let result = decode_wav_to_mono_16k(&garbage);

    assert!(matches!(result, Err(PcmDecodeError::Failed(_))));
}

#[test]
fn given_data_chunk_shorter_than_declared_when_decoding_then_keeps_present_samples() {
    let wav = build_wav(16_000, 1, &[0i16; 100]);
    let truncated = &wav[..wav.len() - 100];

    let pcm = decode_wav_to_mono_16k(truncated).unwrap();

    assert_eq!(pcm.len(), 50);
}
