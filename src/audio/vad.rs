//! Voice-gate boundary: an opaque speech/non-speech classifier.

/// Classifier consulted while the squelch is open but voice is not yet
/// confirmed. Frames are interleaved 16-bit LE PCM at `sample_rate`.
///
/// Implementations may require specific frame durations (the WebRTC family
/// accepts 10/20/30 ms); configuration validation enforces that when voice
/// gating is enabled.
pub trait VoiceGate {
    fn is_speech(&mut self, frame: &[u8], sample_rate: u32) -> bool;
    fn name(&self) -> &'static str {
        "unknown_voice_gate"
    }
}

/// Classifier aggressiveness, fixed at construction. Higher levels reject
/// more non-speech at the cost of clipping quiet speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggressiveness {
    Quality,
    LowBitrate,
    Aggressive,
    VeryAggressive,
}

impl Aggressiveness {
    /// Map the CLI's numeric level (0-3) onto a profile.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Quality),
            1 => Some(Self::LowBitrate),
            2 => Some(Self::Aggressive),
            3 => Some(Self::VeryAggressive),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::LowBitrate => "low_bitrate",
            Self::Aggressive => "aggressive",
            Self::VeryAggressive => "very_aggressive",
        }
    }
}

/// Stand-in used when voice gating is disabled. The gate never consults it in
/// that mode; answering "not speech" keeps the behavior sane if it ever is.
pub struct NullVoiceGate;

impl VoiceGate for NullVoiceGate {
    fn is_speech(&mut self, _frame: &[u8], _sample_rate: u32) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "null_voice_gate"
    }
}
