//! Audio loading — browsed file → decoded samples → Whisper-ready PCM.
//!
//! ```text
//! file path → symphonia probe/decode → downmix_to_mono → resample_to_16k
//! ```

pub mod decode;
pub mod resample;

pub use decode::{load_audio, AudioError};
pub use resample::{downmix_to_mono, resample_to_16k, WHISPER_SAMPLE_RATE};
