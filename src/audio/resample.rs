//! Channel downmix and sample-rate conversion.
//!
//! Whisper consumes **16 kHz mono `f32`** audio, while browsed files arrive
//! at whatever rate and channel count they were recorded with. Decoded
//! samples pass through [`downmix_to_mono`] and then [`resample_to_16k`]
//! before inference. The resampler is plain linear interpolation — entirely
//! adequate for speech that is about to be mel-binned anyway.

/// Target sample rate required by the Whisper engine.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

// ---------------------------------------------------------------------------
// downmix_to_mono
// ---------------------------------------------------------------------------

/// Mix interleaved multi-channel audio down to mono by averaging each frame.
///
/// The output length is `samples.len() / channels`. Mono input is returned
/// as an owned copy without averaging; `channels == 0` yields an empty
/// vector.
///
/// # Example
///
/// ```rust
/// use model_desk::audio::downmix_to_mono;
///
/// let stereo = vec![1.0_f32, 0.0, -0.5, 0.5]; // L R L R
/// let mono = downmix_to_mono(&stereo, 2);
/// assert_eq!(mono.len(), 2);
/// assert!((mono[0] - 0.5).abs() < 1e-6);
/// assert!((mono[1] - 0.0).abs() < 1e-6);
/// ```
pub fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.to_vec(),
        n => {
            let n = n as usize;
            samples
                .chunks_exact(n)
                .map(|frame| frame.iter().sum::<f32>() / n as f32)
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// resample_to_16k
// ---------------------------------------------------------------------------

/// Resample `samples` from `source_rate` Hz to 16 000 Hz by linear
/// interpolation.
///
/// Input already at 16 kHz is copied through unchanged. The output length is
/// approximately `samples.len() * 16_000 / source_rate`.
///
/// # Example
///
/// ```rust
/// use model_desk::audio::resample_to_16k;
///
/// // 480 samples @ 48 kHz (10 ms) become 160 samples @ 16 kHz
/// let hi = vec![0.25_f32; 480];
/// assert_eq!(resample_to_16k(&hi, 48_000).len(), 160);
/// ```
pub fn resample_to_16k(samples: &[f32], source_rate: u32) -> Vec<f32> {
    if source_rate == WHISPER_SAMPLE_RATE || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = WHISPER_SAMPLE_RATE as f64 / source_rate as f64;
    let output_len = (samples.len() as f64 * ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let src_pos = i as f64 / ratio;
            let idx = src_pos as usize;
            let frac = (src_pos - idx as f64) as f32;

            match (samples.get(idx), samples.get(idx + 1)) {
                (Some(&a), Some(&b)) => a * (1.0 - frac) + b * frac,
                (Some(&a), None) => a,
                _ => 0.0,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
