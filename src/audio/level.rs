//! Signal math: dB conversion and PCM frame decoding.

use super::SAMPLE_BYTES;
use crate::error::RecorderError;

/// Convert a decibel value to a linear fraction of full scale: `10^(db/20)`.
pub fn db_to_linear(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

/// Decode one little-endian signed 16-bit sample to a float in [-1.0, 1.0].
pub fn sample_to_float(bytes: &[u8]) -> Result<f32, RecorderError> {
    let pair: [u8; SAMPLE_BYTES] = bytes
        .get(..SAMPLE_BYTES)
        .and_then(|b| b.try_into().ok())
        .ok_or(RecorderError::InvalidFrameLength { len: bytes.len() })?;
    Ok(f32::from(i16::from_le_bytes(pair)) / 32_768.0)
}

/// How much of a frame's byte range the squelch decode scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeSpan {
    /// Step 2-byte samples over only the first half of the byte range. This is
    /// the reference recorder's behavior and the default.
    FirstHalf,
    /// Decode every sample in the frame.
    Full,
}

/// Decode a frame of interleaved 16-bit LE PCM into normalized floats.
///
/// Odd-length frames are rejected; the pipeline's frame invariant is a whole
/// number of 2-byte samples.
pub fn frame_to_samples(frame: &[u8], span: DecodeSpan) -> Result<Vec<f32>, RecorderError> {
    if frame.len() % SAMPLE_BYTES != 0 {
        return Err(RecorderError::InvalidFrameLength { len: frame.len() });
    }
    let limit = match span {
        DecodeSpan::FirstHalf => frame.len() / 2,
        DecodeSpan::Full => frame.len(),
    };
    let mut samples = Vec::with_capacity(limit.div_ceil(SAMPLE_BYTES));
    let mut start = 0;
    while start < limit {
        samples.push(sample_to_float(&frame[start..start + SAMPLE_BYTES])?);
        start += SAMPLE_BYTES;
    }
    Ok(samples)
}
