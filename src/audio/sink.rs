//! WAV container sink backed by hound.

use super::capture::FrameSink;
use super::{BITS_PER_SAMPLE, SAMPLE_BYTES};
use crate::error::RecorderError;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Append-only 16-bit PCM WAV writer. The format is fixed when the file is
/// created and every frame must match it.
pub struct WavSink {
    writer: Option<WavWriter<BufWriter<File>>>,
}

impl WavSink {
    pub fn create(
        path: &Path,
        sample_rate: u32,
        channels: u16,
    ) -> Result<Self, RecorderError> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: BITS_PER_SAMPLE,
            sample_format: SampleFormat::Int,
        };
        let writer =
            WavWriter::create(path, spec).map_err(|err| RecorderError::Sink(err.to_string()))?;
        Ok(Self {
            writer: Some(writer),
        })
    }
}

impl FrameSink for WavSink {
    fn write(&mut self, frame: &[u8]) -> Result<(), RecorderError> {
        if frame.len() % SAMPLE_BYTES != 0 {
            return Err(RecorderError::InvalidFrameLength { len: frame.len() });
        }
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| RecorderError::Sink("write after finalize".to_string()))?;
        for pair in frame.chunks_exact(SAMPLE_BYTES) {
            let sample = i16::from_le_bytes([pair[0], pair[1]]);
            writer
                .write_sample(sample)
                .map_err(|err| RecorderError::Sink(err.to_string()))?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), RecorderError> {
        match self.writer.take() {
            Some(writer) => writer
                .finalize()
                .map_err(|err| RecorderError::Sink(err.to_string())),
            None => Ok(()),
        }
    }
}

impl Drop for WavSink {
    fn drop(&mut self) {
        // Backstop for early-return paths; explicit finalize reports errors.
        if let Some(writer) = self.writer.take() {
            let _ = writer.finalize();
        }
    }
}
