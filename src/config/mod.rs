//! Command-line parsing and validation helpers.

mod defaults;
#[cfg(test)]
mod tests;
mod validation;

use crate::audio::{db_to_linear, Aggressiveness, DecodeSpan, SAMPLE_BYTES};
use crate::error::RecorderError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub use defaults::{
    DEFAULT_CHANNELS, DEFAULT_FRAME_MS, DEFAULT_HANG_MS, DEFAULT_SAMPLE_RATE,
    DEFAULT_THRESHOLD_DB, DEFAULT_VAD_AGGRESSIVENESS, FRAME_CHANNEL_CAPACITY,
    SUPPORTED_SAMPLE_RATES,
};

/// CLI options for the squelch recorder. Validated values parameterize the
/// whole session; nothing is reconfigurable while running.
#[derive(Debug, Parser, Clone)]
#[command(about = "Squelch-gated, voice-activity-aware WAV recorder", author, version)]
pub struct AppConfig {
    /// Output WAV file
    #[arg(
        short = 'f',
        long = "file",
        required_unless_present = "list_devices",
        value_name = "PATH"
    )]
    pub file: Option<PathBuf>,

    /// Preferred audio input device name
    #[arg(short = 'i', long = "input-device")]
    pub input_device: Option<String>,

    /// Print detected audio input devices and exit
    #[arg(long = "list-devices", default_value_t = false)]
    pub list_devices: bool,

    /// Sample frequency (Hz): 8000, 16000, 32000, or 48000
    #[arg(short = 'r', long = "rate", default_value_t = DEFAULT_SAMPLE_RATE)]
    pub rate: u32,

    /// Number of input channels
    #[arg(short = 'c', long = "channels", default_value_t = DEFAULT_CHANNELS)]
    pub channels: u16,

    /// Frame duration (milliseconds)
    #[arg(long = "frame-ms", default_value_t = DEFAULT_FRAME_MS)]
    pub frame_ms: u64,

    /// Hang time: how long the gate stays open after the signal drops (ms)
    #[arg(long = "squelch-hang-ms", default_value_t = DEFAULT_HANG_MS)]
    pub squelch_hang_ms: u64,

    /// Squelch threshold (dB relative to full scale; values above 0 clamp to 0)
    #[arg(short = 'q', long = "squelch-threshold-db", default_value_t = DEFAULT_THRESHOLD_DB, allow_negative_numbers = true)]
    pub squelch_threshold_db: f32,

    /// Gate recording on detected speech in addition to the squelch
    #[arg(long = "vad", default_value_t = false)]
    pub vad: bool,

    /// Voice detector aggressiveness (0 = permissive, 3 = strictest)
    #[arg(long = "vad-aggressiveness", default_value_t = DEFAULT_VAD_AGGRESSIVENESS, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub vad_aggressiveness: u8,

    /// How much of each frame the squelch decode scans
    #[arg(long = "squelch-scan", value_enum, default_value_t = SquelchScan::Half)]
    pub squelch_scan: SquelchScan,

    /// Print the final capture metrics as JSON on stdout
    #[arg(long = "json-summary", default_value_t = false)]
    pub json_summary: bool,

    /// Emit JSON-formatted logs
    #[arg(long = "log-json", env = "SQUELCHREC_LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

/// Decode-span selection for the squelch scan. `Half` preserves the reference
/// recorder's behavior of only scanning the first half of each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SquelchScan {
    Half,
    Full,
}

impl SquelchScan {
    fn decode_span(self) -> DecodeSpan {
        match self {
            SquelchScan::Half => DecodeSpan::FirstHalf,
            SquelchScan::Full => DecodeSpan::Full,
        }
    }
}

/// Immutable snapshot handed to the audio layer for the session's lifetime.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub sample_rate: u32,
    pub channels: u16,
    pub frame_ms: u64,
    pub hang_ms: u64,
    pub threshold_db: f32,
    pub use_voice_gate: bool,
    pub aggressiveness: Aggressiveness,
    pub decode_span: DecodeSpan,
}

impl SessionConfig {
    /// Interleaved samples per frame: `channels * rate * frame_ms / 1000`.
    pub fn chunk_samples(&self) -> Result<usize, RecorderError> {
        let samples = usize::from(self.channels)
            * self.sample_rate as usize
            * self.frame_ms as usize
            / 1000;
        if samples == 0 {
            return Err(RecorderError::Config(format!(
                "chunk size is zero for rate {} Hz, {} channel(s), {} ms frames",
                self.sample_rate, self.channels, self.frame_ms
            )));
        }
        Ok(samples)
    }

    pub fn chunk_bytes(&self) -> Result<usize, RecorderError> {
        Ok(self.chunk_samples()? * SAMPLE_BYTES)
    }

    /// Linear squelch threshold. Thresholds above 0 dB are meaningless as a
    /// fraction of full scale and clamp to 0 dB.
    pub fn linear_threshold(&self) -> f32 {
        db_to_linear(self.threshold_db.min(0.0))
    }
}
