use super::defaults::{
    MAX_CHANNELS, MAX_FRAME_MS, MAX_HANG_MS, MIN_FRAME_MS, SUPPORTED_SAMPLE_RATES, VAD_FRAME_MS,
};
use super::{AppConfig, SessionConfig};
use crate::audio::Aggressiveness;
use anyhow::{bail, Result};
use clap::Parser;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values against the session's invariants.
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_SAMPLE_RATES.contains(&self.rate) {
            bail!(
                "--rate must be one of {SUPPORTED_SAMPLE_RATES:?} Hz, got {}",
                self.rate
            );
        }
        if self.channels == 0 || self.channels > MAX_CHANNELS {
            bail!(
                "--channels must be between 1 and {MAX_CHANNELS}, got {}",
                self.channels
            );
        }
        if !(MIN_FRAME_MS..=MAX_FRAME_MS).contains(&self.frame_ms) {
            bail!(
                "--frame-ms must be between {MIN_FRAME_MS} and {MAX_FRAME_MS}, got {}",
                self.frame_ms
            );
        }
        if self.squelch_hang_ms < self.frame_ms || self.squelch_hang_ms > MAX_HANG_MS {
            bail!(
                "--squelch-hang-ms must be between --frame-ms ({}) and {MAX_HANG_MS}, got {}",
                self.frame_ms,
                self.squelch_hang_ms
            );
        }
        if !self.squelch_threshold_db.is_finite() {
            bail!("--squelch-threshold-db must be a finite value");
        }

        if self.vad {
            // The WebRTC-family detector only accepts mono 10/20/30 ms frames.
            if !VAD_FRAME_MS.contains(&self.frame_ms) {
                bail!(
                    "--vad requires --frame-ms of {VAD_FRAME_MS:?}, got {}",
                    self.frame_ms
                );
            }
            if self.channels != 1 {
                bail!("--vad requires --channels 1, got {}", self.channels);
            }
            #[cfg(not(feature = "vad_earshot"))]
            bail!("--vad requires building with the 'vad_earshot' feature");
        }

        if !self.list_devices && self.file.is_none() {
            bail!("--file is required unless --list-devices is set");
        }

        Ok(())
    }

    /// Snapshot the validated CLI values for the audio layer.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            sample_rate: self.rate,
            channels: self.channels,
            frame_ms: self.frame_ms,
            hang_ms: self.squelch_hang_ms,
            threshold_db: self.squelch_threshold_db,
            use_voice_gate: self.vad,
            aggressiveness: Aggressiveness::from_level(self.vad_aggressiveness)
                .unwrap_or(Aggressiveness::VeryAggressive),
            decode_span: self.squelch_scan.decode_span(),
        }
    }
}
