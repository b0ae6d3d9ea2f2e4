//! The recording gate state machine.
//!
//! Tracks squelch-open and voice-confirmed state plus a hang timer, and
//! decides per frame whether audio reaches the sink. Decoder and squelch
//! failures propagate unchanged; the machine itself never fails.

use super::level::DecodeSpan;
use super::squelch;
use super::vad::VoiceGate;
use crate::config::SessionConfig;
use crate::error::RecorderError;

/// Observable gate transitions, logged with timestamps by the capture loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    SquelchOpened,
    VoiceDetected,
    SquelchClosed,
}

impl GateEvent {
    pub fn label(self) -> &'static str {
        match self {
            GateEvent::SquelchOpened => "squelch_open",
            GateEvent::VoiceDetected => "voice_detected",
            GateEvent::SquelchClosed => "squelch_closed",
        }
    }
}

/// Result of stepping the gate over one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether this frame should be forwarded to the sink.
    pub emit: bool,
    /// Transitions that fired during this step, in order.
    pub events: Vec<GateEvent>,
}

/// Per-session gate state. Created closed and unconfirmed; owned by the
/// capture loop for the session's lifetime.
pub struct Gate {
    linear_threshold: f32,
    span: DecodeSpan,
    sample_rate: u32,
    frame_ms: u64,
    hang_ms: u64,
    use_voice_gate: bool,
    sql_open: bool,
    has_voice: bool,
    open_elapsed_ms: u64,
}

impl Gate {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            linear_threshold: cfg.linear_threshold(),
            span: cfg.decode_span,
            sample_rate: cfg.sample_rate,
            frame_ms: cfg.frame_ms,
            hang_ms: cfg.hang_ms,
            use_voice_gate: cfg.use_voice_gate,
            sql_open: false,
            has_voice: false,
            open_elapsed_ms: 0,
        }
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    pub fn is_open(&self) -> bool {
        self.sql_open
    }

    pub fn has_voice(&self) -> bool {
        self.has_voice
    }

    /// Advance the gate by one frame.
    ///
    /// A frame that satisfies the squelch condition resets the hang timer to
    /// zero, so continuous qualifying signal holds the gate open
    /// indefinitely; the timer accumulates only while the gate coasts on the
    /// hang window. Opening takes precedence over closing within a single
    /// frame: the reset happens before the expiry check. The expiry check
    /// runs before the emit decision, so the recorded tail after the last
    /// qualifying frame is exactly the hang window.
    pub fn step(
        &mut self,
        frame: &[u8],
        voice: &mut dyn VoiceGate,
    ) -> Result<StepOutcome, RecorderError> {
        let mut events = Vec::new();

        if squelch::is_open(frame, self.linear_threshold, self.span)? {
            if !self.sql_open {
                events.push(GateEvent::SquelchOpened);
            }
            self.sql_open = true;
            self.open_elapsed_ms = 0;
        }

        if !self.sql_open {
            return Ok(StepOutcome {
                emit: false,
                events,
            });
        }

        if self.open_elapsed_ms >= self.hang_ms {
            self.sql_open = false;
            self.has_voice = false;
            events.push(GateEvent::SquelchClosed);
            return Ok(StepOutcome {
                emit: false,
                events,
            });
        }

        if self.use_voice_gate && !self.has_voice && voice.is_speech(frame, self.sample_rate) {
            self.has_voice = true;
            events.push(GateEvent::VoiceDetected);
        }

        let emit = !self.use_voice_gate || self.has_voice;
        self.open_elapsed_ms = self.open_elapsed_ms.saturating_add(self.frame_ms);

        Ok(StepOutcome { emit, events })
    }
}
