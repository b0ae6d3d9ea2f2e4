pub mod audio;
pub mod config;
pub mod error;
pub mod telemetry;
#[cfg(feature = "vad_earshot")]
pub mod vad_earshot;

pub use audio::{Gate, GateEvent, Recorder, WavSink};
pub use error::RecorderError;
