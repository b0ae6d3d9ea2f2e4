//! Error taxonomy for the capture pipeline.
//!
//! Signal-math and squelch errors are fatal to the session and propagate
//! through the gate state machine unchanged; device and sink errors terminate
//! the capture loop, which still releases its resources before surfacing them.

use thiserror::Error;

/// Errors surfaced by the recording pipeline.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// A frame (or sample slice) is not a whole number of 16-bit samples.
    #[error("invalid frame length: {len} bytes is not a whole number of 16-bit samples")]
    InvalidFrameLength { len: usize },

    /// The squelch detector was asked to judge a frame with no decodable samples.
    #[error("squelch check on a frame with no decodable samples")]
    EmptyFrame,

    /// The input device or capture stream failed.
    #[error("audio device error: {0}")]
    Device(String),

    /// The output sink failed to accept or finalize audio.
    #[error("sink error: {0}")]
    Sink(String),

    /// The session configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}
