//! Converts backend PCM payloads into a self-contained WAV container.
//!
//! The 44-byte header layout is a compatibility contract: field order
//! and byte width are fixed so the produced bytes play in any standard
//! audio decoder without further context.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use fitcoach_core::{Error, Result};

/// WAV header length in bytes.
const HEADER_LEN: usize = 44;
/// Uncompressed PCM format tag.
const FORMAT_PCM: u16 = 1;
/// Mono output.
const CHANNELS: u16 = 1;
/// Signed 16-bit samples.
const BITS_PER_SAMPLE: u16 = 16;

/// A decoded, playable audio clip.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Declared sample rate in Hz.
    sample_rate: u32,
    /// Signed 16-bit mono samples.
    samples: Vec<i16>,
}

impl AudioClip {
    /// Creates a clip from decoded samples at the declared rate.
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Decodes a base64 PCM payload whose MIME string declares the
    /// sample rate (e.g. `audio/L16;codec=pcm;rate=24000`).
    ///
    /// # Errors
    /// Returns an error if the payload is not valid base64 or the MIME
    /// string carries no parsable rate.
    pub fn from_base64_pcm(data: &str, mime: &str) -> Result<Self> {
        let sample_rate = sample_rate_from_mime(mime)?;
        let bytes = decode_base64(data)?;
        Ok(Self::new(pcm_samples(&bytes), sample_rate))
    }

    /// Declared sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples in the clip.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the clip contains no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Encodes the clip as a complete WAV byte sequence.
    pub fn wav_bytes(&self) -> Vec<u8> {
        encode_wav(&self.samples, self.sample_rate)
    }
}

/// Decodes a standard base64 payload into raw bytes.
///
/// # Errors
/// Returns [`Error::InvalidResponse`] for malformed base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(data)
        .map_err(|err| Error::InvalidResponse(format!("invalid base64 payload: {err}")))
}

/// Parses the `rate=<n>` parameter out of a MIME-type-like string.
///
/// # Errors
/// Returns [`Error::InvalidResponse`] when the string does not declare
/// an audio payload or a numeric rate.
pub fn sample_rate_from_mime(mime: &str) -> Result<u32> {
    if !mime.starts_with("audio/") {
        return Err(Error::InvalidResponse(format!(
            "unexpected audio MIME type: {mime}"
        )));
    }

    let digits = mime
        .split_once("rate=")
        .map(|(_, rest)| rest)
        .map(|rest| {
            rest.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
        })
        .ok_or_else(|| Error::InvalidResponse(format!("no rate parameter in MIME: {mime}")))?;

    digits
        .parse()
        .map_err(|_| Error::InvalidResponse(format!("unparsable rate in MIME: {mime}")))
}

/// Reinterprets raw bytes as signed 16-bit little-endian samples. A
/// trailing odd byte is dropped.
pub fn pcm_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Wraps signed 16-bit mono samples in an uncompressed WAV container:
/// the fixed 44-byte header followed by the little-endian sample data.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let byte_rate = sample_rate * u32::from(CHANNELS) * u32::from(BITS_PER_SAMPLE) / 8;
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;

    let mut wav = Vec::with_capacity(HEADER_LEN + samples.len() * 2);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16_u32.to_le_bytes());
    wav.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    wav.extend_from_slice(&CHANNELS.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}
