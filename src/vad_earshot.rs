//! Earshot-powered voice gate implementing `VoiceGate`.

use crate::audio::{Aggressiveness, VoiceGate, SAMPLE_BYTES};
use earshot::{VoiceActivityDetector, VoiceActivityProfile};

/// Thin wrapper that adapts `earshot` to the crate's `VoiceGate` trait.
pub struct EarshotVoiceGate {
    detector: VoiceActivityDetector,
    scratch: Vec<i16>,
}

impl EarshotVoiceGate {
    pub fn new(aggressiveness: Aggressiveness) -> Self {
        let profile = match aggressiveness {
            Aggressiveness::Quality => VoiceActivityProfile::QUALITY,
            Aggressiveness::LowBitrate => VoiceActivityProfile::LBR,
            Aggressiveness::Aggressive => VoiceActivityProfile::AGGRESSIVE,
            Aggressiveness::VeryAggressive => VoiceActivityProfile::VERY_AGGRESSIVE,
        };
        Self {
            detector: VoiceActivityDetector::new(profile),
            scratch: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.detector.reset();
    }
}

impl VoiceGate for EarshotVoiceGate {
    fn is_speech(&mut self, frame: &[u8], sample_rate: u32) -> bool {
        if frame.len() < SAMPLE_BYTES {
            return false;
        }
        self.scratch.clear();
        self.scratch.reserve(frame.len() / SAMPLE_BYTES);
        for pair in frame.chunks_exact(SAMPLE_BYTES) {
            self.scratch.push(i16::from_le_bytes([pair[0], pair[1]]));
        }
        let prediction = match sample_rate {
            8_000 => self.detector.predict_8khz(&self.scratch),
            16_000 => self.detector.predict_16khz(&self.scratch),
            32_000 => self.detector.predict_32khz(&self.scratch),
            48_000 => self.detector.predict_48khz(&self.scratch),
            _ => return false,
        };
        prediction.unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "earshot_voice_gate"
    }
}
