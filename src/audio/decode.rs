//! Audio file decoding via `symphonia`.
//!
//! [`load_audio`] turns a browsed `.wav`/`.mp3` file into the 16 kHz mono
//! `f32` buffer the Whisper engine expects: probe the container, decode the
//! first audio track packet by packet, then downmix and resample.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

use crate::audio::resample::{downmix_to_mono, resample_to_16k};

// ---------------------------------------------------------------------------
// AudioError
// ---------------------------------------------------------------------------

/// All errors that can arise while loading an audio file.
#[derive(Debug, Clone, Error)]
pub enum AudioError {
    /// The file could not be opened.
    #[error("failed to open audio file {path}: {reason}")]
    Open { path: String, reason: String },

    /// The container or codec is not supported (or the file is not audio).
    #[error("unsupported audio format: {0}")]
    Unsupported(String),

    /// The container holds no decodable audio track.
    #[error("no audio track found in file")]
    NoAudioTrack,

    /// Decoding failed partway through the stream.
    #[error("audio decode error: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// load_audio
// ---------------------------------------------------------------------------

/// Decode `path` and return its samples as 16 kHz mono f32 PCM.
///
/// The file extension is passed to symphonia as a probe hint only; the
/// actual format is detected from the content.
///
/// # Errors
///
/// - [`AudioError::Open`] — the file does not exist or is unreadable.
/// - [`AudioError::Unsupported`] — probe or codec instantiation failed.
/// - [`AudioError::NoAudioTrack`] — container has no audio track.
/// - [`AudioError::Decode`] — the stream decoded to zero samples or broke
///   mid-way.
pub fn load_audio(path: &Path) -> Result<Vec<f32>, AudioError> {
    let file = File::open(path).map_err(|e| AudioError::Open {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioError::Unsupported(e.to_string()))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(AudioError::NoAudioTrack)?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::Unsupported(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut channels: u16 = 1;
    let mut sample_rate: u32 = crate::audio::resample::WHISPER_SAMPLE_RATE;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream — both variants signal a normal finish.
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(AudioError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // A corrupt packet is skippable; anything else is fatal.
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(AudioError::Decode(e.to_string())),
        };

        let buf = sample_buf.get_or_insert_with(|| {
            let spec = *decoded.spec();
            channels = spec.channels.count() as u16;
            sample_rate = spec.rate;
            SampleBuffer::<f32>::new(decoded.capacity() as u64, spec)
        });

        buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(buf.samples());
    }

    if samples.is_empty() {
        return Err(AudioError::Decode("stream contained no samples".into()));
    }

    let mono = downmix_to_mono(&samples, channels);
    Ok(resample_to_16k(&mono, sample_rate))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    /// Write a PCM-i16 WAV file with `frames` frames of a constant value.
    fn write_wav(path: &Path, sample_rate: u32, channels: u16, frames: usize, value: i16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
        for _ in 0..frames * channels as usize {
            writer.write_sample(value).expect("write sample");
        }
        writer.finalize().expect("finalize wav");
    }

    #[test]
    fn load_mono_16k_wav_keeps_length() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("mono16k.wav");
        write_wav(&path, 16_000, 1, 16_000, 8_192);

        let samples = load_audio(&path).expect("decode");
        assert_eq!(samples.len(), 16_000);
        // 8192 / 32768 = 0.25
        assert!((samples[0] - 0.25).abs() < 1e-3, "got {}", samples[0]);
    }

    #[test]
    fn load_stereo_48k_wav_downmixes_and_resamples() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("stereo48k.wav");
        // 4800 frames @ 48 kHz = 100 ms → ~1600 samples @ 16 kHz
        write_wav(&path, 48_000, 2, 4_800, 16_384);

        let samples = load_audio(&path).expect("decode");
        assert!(
            samples.len().abs_diff(1_600) <= 2,
            "expected ~1600, got {}",
            samples.len()
        );
        // both channels carry 0.5, so the downmix average stays 0.5
        assert!((samples[10] - 0.5).abs() < 1e-2, "got {}", samples[10]);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_audio(Path::new("/nonexistent/clip.wav")).unwrap_err();
        assert!(matches!(err, AudioError::Open { .. }), "got: {err:?}");
    }

    #[test]
    fn non_audio_bytes_are_unsupported() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("not-audio.wav");
        let mut f = std::fs::File::create(&path).expect("create");
        f.write_all(b"this is definitely not a wav file").expect("write");
        drop(f);

        let err = load_audio(&path).unwrap_err();
        assert!(matches!(err, AudioError::Unsupported(_)), "got: {err:?}");
    }

    #[test]
    fn error_display_mentions_the_path() {
        let err = load_audio(Path::new("/nonexistent/clip.wav")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/clip.wav"));
    }
}
