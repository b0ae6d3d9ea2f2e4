//! Squelch-gated audio capture pipeline.
//!
//! Fixed-size PCM frames are pulled from the input device, scored by the
//! squelch detector, run through the gate state machine, and written to the
//! WAV sink while the gate is open (and, optionally, voice-confirmed).

/// Bytes per 16-bit PCM sample. The whole pipeline is fixed to signed 16-bit
/// little-endian interleaved PCM.
pub const SAMPLE_BYTES: usize = 2;

/// Bit depth written to the container.
pub const BITS_PER_SAMPLE: u16 = 16;

mod capture;
mod dispatch;
mod gate;
mod level;
mod recorder;
mod sink;
mod squelch;
mod vad;

pub use capture::{run, CaptureMetrics, FrameRead, FrameSink, FrameSource, StopReason};
pub use gate::{Gate, GateEvent, StepOutcome};
pub use level::{db_to_linear, frame_to_samples, sample_to_float, DecodeSpan};
pub use recorder::{DeviceInfo, InputStream, Recorder};
pub use sink::WavSink;
pub use squelch::is_open;
pub use vad::{Aggressiveness, NullVoiceGate, VoiceGate};
