//! Squelch detection: does a frame's peak clear the threshold?

use super::level::{frame_to_samples, DecodeSpan};
use crate::error::RecorderError;

/// Return true when the frame's maximum sample value reaches
/// `linear_threshold` (inclusive).
///
/// The comparison uses the signed maximum, not the peak absolute value, so
/// only positive-going excursions open the squelch. That matches the
/// reference recorder and is kept deliberately.
pub fn is_open(
    frame: &[u8],
    linear_threshold: f32,
    span: DecodeSpan,
) -> Result<bool, RecorderError> {
    let samples = frame_to_samples(frame, span)?;
    let peak = samples
        .iter()
        .copied()
        .fold(None, |acc: Option<f32>, sample| match acc {
            Some(max) if max >= sample => Some(max),
            _ => Some(sample),
        });
    match peak {
        Some(peak) => Ok(peak >= linear_threshold),
        None => Err(RecorderError::EmptyFrame),
    }
}
