//! The capture loop: pull frames, step the gate, write emitted audio.
//!
//! Single-threaded blocking pull model. Ordering is strictly frame-arrival
//! order, which is what makes the gate's hang timer track wall-clock time.

use super::gate::{Gate, GateEvent};
use super::vad::VoiceGate;
use crate::error::RecorderError;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::info;

/// One read attempt from a frame source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameRead {
    /// A complete fixed-size frame.
    Frame(Vec<u8>),
    /// No frame arrived within the timeout; the caller re-checks cancellation.
    TimedOut,
    /// The source ended cleanly and will produce no more frames.
    Closed,
}

/// Blocking source of fixed-size PCM frames.
pub trait FrameSource {
    fn read(&mut self, timeout: Duration) -> Result<FrameRead, RecorderError>;

    /// Frames the source had to discard (e.g. backpressure); reported in the
    /// final metrics.
    fn dropped_frames(&self) -> u64 {
        0
    }
}

/// Append-only sink accepting the session's fixed PCM format.
pub trait FrameSink {
    fn write(&mut self, frame: &[u8]) -> Result<(), RecorderError>;
    fn finalize(&mut self) -> Result<(), RecorderError>;
}

/// Why the capture loop stopped (errors surface as `Err` instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Cancelled,
    SourceClosed,
}

impl StopReason {
    pub fn label(self) -> &'static str {
        match self {
            StopReason::Cancelled => "cancelled",
            StopReason::SourceClosed => "source_closed",
        }
    }
}

/// Session totals for observability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureMetrics {
    pub frames_processed: u64,
    pub frames_emitted: u64,
    pub frames_dropped: u64,
    pub squelch_opens: u64,
    pub voice_detections: u64,
    pub capture_ms: u64,
    pub stop_reason: StopReason,
}

impl Default for CaptureMetrics {
    fn default() -> Self {
        Self {
            frames_processed: 0,
            frames_emitted: 0,
            frames_dropped: 0,
            squelch_opens: 0,
            voice_detections: 0,
            capture_ms: 0,
            stop_reason: StopReason::Cancelled,
        }
    }
}

/// Run the gate over the source until cancelled or the source closes.
///
/// The stop flag is checked once per iteration, so cancellation lands between
/// frames and no frame is torn down mid-processing. Source, sink, and gate
/// errors terminate the loop and surface to the caller, who remains
/// responsible for finalizing the sink on every exit path.
pub fn run(
    source: &mut dyn FrameSource,
    sink: &mut dyn FrameSink,
    gate: &mut Gate,
    voice: &mut dyn VoiceGate,
    stop: &AtomicBool,
) -> Result<CaptureMetrics, RecorderError> {
    let wait = Duration::from_millis(gate.frame_ms().max(1));
    let mut metrics = CaptureMetrics::default();

    loop {
        if stop.load(Ordering::Relaxed) {
            metrics.stop_reason = StopReason::Cancelled;
            break;
        }
        match source.read(wait)? {
            FrameRead::Frame(frame) => {
                let outcome = gate.step(&frame, voice)?;
                for event in &outcome.events {
                    match event {
                        GateEvent::SquelchOpened => metrics.squelch_opens += 1,
                        GateEvent::VoiceDetected => metrics.voice_detections += 1,
                        GateEvent::SquelchClosed => {}
                    }
                    info!(event = event.label(), "gate transition");
                }
                if outcome.emit {
                    sink.write(&frame)?;
                    metrics.frames_emitted += 1;
                }
                metrics.frames_processed += 1;
                metrics.capture_ms = metrics.capture_ms.saturating_add(gate.frame_ms());
            }
            FrameRead::TimedOut => continue,
            FrameRead::Closed => {
                metrics.stop_reason = StopReason::SourceClosed;
                break;
            }
        }
    }

    metrics.frames_dropped = source.dropped_frames();
    Ok(metrics)
}
