//! Default values and bounds for the CLI surface.

/// Sample rates the WebRTC-family voice detectors (and the reference
/// recorder) support.
pub const SUPPORTED_SAMPLE_RATES: [u32; 4] = [8_000, 16_000, 32_000, 48_000];

pub const DEFAULT_SAMPLE_RATE: u32 = 8_000;
pub const DEFAULT_CHANNELS: u16 = 1;
pub const DEFAULT_FRAME_MS: u64 = 30;
pub const DEFAULT_HANG_MS: u64 = 300;
pub const DEFAULT_THRESHOLD_DB: f32 = -120.0;
pub const DEFAULT_VAD_AGGRESSIVENESS: u8 = 3;

pub const MAX_CHANNELS: u16 = 16;
pub const MIN_FRAME_MS: u64 = 5;
pub const MAX_FRAME_MS: u64 = 120;
pub const MAX_HANG_MS: u64 = 60_000;

/// Frame durations the voice gate accepts.
pub const VAD_FRAME_MS: [u64; 3] = [10, 20, 30];

/// Bounded-channel depth between the audio callback and the capture loop.
pub const FRAME_CHANNEL_CAPACITY: usize = 64;
