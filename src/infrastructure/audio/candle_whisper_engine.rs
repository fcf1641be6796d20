use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{EngineInitError, RecognitionFailure, TranscriptionEngine};

use super::pcm_decoder::{PcmDecodeError, decode_wav_to_mono_16k};

pub const LOCAL_DEFAULT_MODEL: &str = "openai/whisper-tiny.en";

const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";
const MAX_DECODE_TOKENS: usize = 224;
const BLANK_AUDIO_MARKER: &str = "[BLANK_AUDIO]";

/// Offline Whisper recognizer running on CPU through candle.
pub struct CandleWhisperEngine {
    model: Arc<Mutex<m::model::Whisper>>,
    tokenizer: Arc<Tokenizer>,
    config: Arc<Config>,
    mel_filters: Arc<Vec<f32>>,
    device: Device,
}

impl CandleWhisperEngine {
    /// Downloads (or reuses the cached copy of) `model_id` from the Hugging Face hub.
    pub fn new(model_id: &str) -> Result<Self, EngineInitError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle Whisper engine"
        );

        let api = Api::new().map_err(|e| EngineInitError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let fetch = |repo: &hf_hub::api::sync::ApiRepo, file: &str| {
            repo.get(file)
                .map_err(|e| EngineInitError::ModelLoadFailed(format!("{}: {}", file, e)))
        };

        let config_path = fetch(&repo, "config.json")?;
        let tokenizer_path = fetch(&repo, "tokenizer.json")?;
        let weights_path = fetch(&repo, "model.safetensors")?;
        let mel_repo = api.repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model));
        let mel_path = fetch(&mel_repo, "melfilters.bytes")?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| EngineInitError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| EngineInitError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| EngineInitError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_path)
            .map_err(|e| EngineInitError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = parse_mel_filters(&mel_bytes, config.num_mel_bins)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| EngineInitError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| EngineInitError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!(model = model_id, "Candle Whisper engine loaded");

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            tokenizer: Arc::new(tokenizer),
            config: Arc::new(config),
            mel_filters: Arc::new(mel_filters),
            device,
        })
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn recognize(&self, audio_data: &[u8]) -> Result<String, RecognitionFailure> {
        let pcm = decode_wav_to_mono_16k(audio_data).map_err(|e| match e {
            PcmDecodeError::Empty => RecognitionFailure::Ambiguous,
            PcmDecodeError::Failed(msg) => RecognitionFailure::ServiceFailure(msg),
        })?;

        let model = Arc::clone(&self.model);
        let tokenizer = Arc::clone(&self.tokenizer);
        let config = Arc::clone(&self.config);
        let mel_filters = Arc::clone(&self.mel_filters);
        let device = self.device.clone();

        let transcript = tokio::task::spawn_blocking(move || {
            let mut model = model.blocking_lock();
            run_inference(&mut model, &tokenizer, &config, &mel_filters, &device, &pcm)
        })
        .await
        .map_err(|e| RecognitionFailure::ServiceFailure(format!("task join error: {}", e)))??;

        if transcript.is_empty() || transcript == BLANK_AUDIO_MARKER {
            return Err(RecognitionFailure::Ambiguous);
        }

        tracing::info!(chars = transcript.len(), "Candle Whisper transcription completed");

        Ok(transcript)
    }

    fn name(&self) -> &str {
        "candle-whisper"
    }
}

fn inference_err(stage: &'static str) -> impl Fn(candle_core::Error) -> RecognitionFailure {
    move |e| RecognitionFailure::ServiceFailure(format!("{}: {}", stage, e))
}

fn run_inference(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    config: &Config,
    mel_filters: &[f32],
    device: &Device,
    pcm: &[f32],
) -> Result<String, RecognitionFailure> {
    let mut segments: Vec<String> = Vec::new();

    for (i, chunk) in pcm.chunks(m::N_SAMPLES).enumerate() {
        let mut samples = chunk.to_vec();
        samples.resize(m::N_SAMPLES, 0.0);

        let mel = m::audio::pcm_to_mel(config, &samples, mel_filters);
        let n_mel = config.num_mel_bins;
        let n_frames = mel.len() / n_mel;
        let mel = Tensor::from_vec(mel, (1, n_mel, n_frames), device)
            .map_err(inference_err("mel tensor"))?;

        tracing::debug!(segment = i, "Transcribing audio segment");
        let text = decode_segment(model, tokenizer, device, &mel)?;
        if !text.is_empty() {
            segments.push(text);
        }
    }

    Ok(segments.join(" "))
}

fn decode_segment(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    mel: &Tensor,
) -> Result<String, RecognitionFailure> {
    let prompt = [
        token_id(tokenizer, m::SOT_TOKEN)?,
        token_id(tokenizer, m::TRANSCRIBE_TOKEN)?,
        token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?,
    ];
    let eot_token = token_id(tokenizer, m::EOT_TOKEN)?;

    let audio_features = model
        .encoder
        .forward(mel, true)
        .map_err(inference_err("encoder"))?;

    let mut tokens = prompt.to_vec();

    for _ in 0..MAX_DECODE_TOKENS {
        let token_tensor = Tensor::new(tokens.as_slice(), device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(inference_err("tokens"))?;

        let hidden = model
            .decoder
            .forward(&token_tensor, &audio_features, tokens.len() == prompt.len())
            .map_err(inference_err("decoder"))?;

        let logits = hidden
            .squeeze(0)
            .and_then(|h| model.decoder.final_linear(&h))
            .map_err(inference_err("linear"))?;

        let next_token = logits
            .dim(0)
            .and_then(|len| logits.get(len - 1))
            .and_then(|last| last.argmax(0))
            .and_then(|t| t.to_scalar::<u32>())
            .map_err(inference_err("argmax"))?;

        if next_token == eot_token {
            break;
        }
        tokens.push(next_token);
    }

    model.reset_kv_cache();

    let text = tokenizer
        .decode(&tokens[prompt.len()..], true)
        .map_err(|e| RecognitionFailure::ServiceFailure(format!("detokenize: {}", e)))?;

    Ok(text.trim().to_string())
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, RecognitionFailure> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        RecognitionFailure::ServiceFailure(format!("token not found: {}", token))
    })
}

/// Reads little-endian f32 mel filter weights for `num_mel_bins` bins.
pub fn parse_mel_filters(bytes: &[u8], num_mel_bins: usize) -> Result<Vec<f32>, EngineInitError> {
    let expected_len = num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(EngineInitError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
