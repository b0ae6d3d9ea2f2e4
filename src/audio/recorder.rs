//! Input device handling via CPAL.
//!
//! Opens the capture stream in the session's rate/channel layout and
//! normalizes the device's native sample format to 16-bit LE PCM at the
//! callback edge, so the rest of the pipeline only ever sees one format.

use super::capture::{FrameRead, FrameSource};
use super::dispatch::FrameDispatcher;
use crate::config::{SessionConfig, FRAME_CHANNEL_CAPACITY};
use crate::error::RecorderError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleFormat, SampleRate, StreamConfig};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// One row of the `--list-devices` table.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub channels: u16,
    pub default_sample_rate: u32,
}

/// Audio input device wrapper.
pub struct Recorder {
    device: cpal::Device,
}

impl Recorder {
    /// Enumerate input devices with their default capture layout.
    pub fn list_devices() -> Result<Vec<DeviceInfo>, RecorderError> {
        let host = cpal::default_host();
        let devices = host
            .input_devices()
            .map_err(|err| RecorderError::Device(err.to_string()))?;
        let mut infos = Vec::new();
        for device in devices {
            let Ok(name) = device.name() else { continue };
            let Ok(config) = device.default_input_config() else {
                continue;
            };
            infos.push(DeviceInfo {
                name,
                channels: config.channels(),
                default_sample_rate: config.sample_rate().0,
            });
        }
        Ok(infos)
    }

    /// Open the default input device, or a named one so users can pick the
    /// right microphone when a machine exposes several.
    pub fn new(preferred_device: Option<&str>) -> Result<Self, RecorderError> {
        let host = cpal::default_host();
        let device = match preferred_device {
            Some(name) => {
                let mut devices = host
                    .input_devices()
                    .map_err(|err| RecorderError::Device(err.to_string()))?;
                devices
                    .find(|d| d.name().map(|n| n == name).unwrap_or(false))
                    .ok_or_else(|| {
                        RecorderError::Device(format!("input device '{name}' not found"))
                    })?
            }
            None => host.default_input_device().ok_or_else(|| {
                RecorderError::Device("no default input device available".to_string())
            })?,
        };
        Ok(Self { device })
    }

    pub fn device_name(&self) -> String {
        self.device
            .name()
            .unwrap_or_else(|_| "Unknown Device".to_string())
    }

    /// Start a capture stream in the session's configuration.
    ///
    /// Frames arrive on the cpal callback thread and are re-framed to
    /// `chunk_bytes` before crossing the bounded channel to the capture loop.
    pub fn open_stream(&self, session: &SessionConfig) -> Result<InputStream, RecorderError> {
        let chunk_bytes = session.chunk_bytes()?;
        let format = self
            .device
            .default_input_config()
            .map_err(|err| RecorderError::Device(err.to_string()))?
            .sample_format();
        let stream_config = StreamConfig {
            channels: session.channels,
            sample_rate: SampleRate(session.sample_rate),
            buffer_size: BufferSize::Default,
        };

        let (sender, receiver) = bounded::<Vec<u8>>(FRAME_CHANNEL_CAPACITY);
        let dropped = Arc::new(AtomicU64::new(0));
        let dispatcher = Arc::new(Mutex::new(FrameDispatcher::new(
            chunk_bytes,
            sender,
            dropped.clone(),
        )));

        let err_fn = |err| debug!(error = %err, "audio stream error");
        let stream = match format {
            SampleFormat::I16 => {
                let dispatcher = dispatcher.clone();
                let dropped = dropped.clone();
                self.device
                    .build_input_stream(
                        &stream_config,
                        move |data: &[i16], _| {
                            if let Ok(mut pump) = dispatcher.try_lock() {
                                pump.push(data, |sample| sample);
                            } else {
                                dropped.fetch_add(1, Ordering::Relaxed);
                            }
                        },
                        err_fn,
                        None,
                    )
                    .map_err(|err| RecorderError::Device(err.to_string()))?
            }
            SampleFormat::F32 => {
                let dispatcher = dispatcher.clone();
                let dropped = dropped.clone();
                self.device
                    .build_input_stream(
                        &stream_config,
                        move |data: &[f32], _| {
                            if let Ok(mut pump) = dispatcher.try_lock() {
                                pump.push(data, |sample| {
                                    (sample.clamp(-1.0, 1.0) * 32_767.0) as i16
                                });
                            } else {
                                dropped.fetch_add(1, Ordering::Relaxed);
                            }
                        },
                        err_fn,
                        None,
                    )
                    .map_err(|err| RecorderError::Device(err.to_string()))?
            }
            SampleFormat::U16 => {
                let dispatcher = dispatcher.clone();
                let dropped = dropped.clone();
                self.device
                    .build_input_stream(
                        &stream_config,
                        move |data: &[u16], _| {
                            if let Ok(mut pump) = dispatcher.try_lock() {
                                pump.push(data, |sample| (i32::from(sample) - 32_768) as i16);
                            } else {
                                dropped.fetch_add(1, Ordering::Relaxed);
                            }
                        },
                        err_fn,
                        None,
                    )
                    .map_err(|err| RecorderError::Device(err.to_string()))?
            }
            other => {
                return Err(RecorderError::Device(format!(
                    "unsupported sample format: {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|err| RecorderError::Device(err.to_string()))?;

        Ok(InputStream {
            _stream: stream,
            receiver,
            dropped,
        })
    }
}

/// A live capture stream; dropping it stops the device.
pub struct InputStream {
    _stream: cpal::Stream,
    receiver: Receiver<Vec<u8>>,
    dropped: Arc<AtomicU64>,
}

impl FrameSource for InputStream {
    fn read(&mut self, timeout: Duration) -> Result<FrameRead, RecorderError> {
        match self.receiver.recv_timeout(timeout) {
            Ok(frame) => Ok(FrameRead::Frame(frame)),
            Err(RecvTimeoutError::Timeout) => Ok(FrameRead::TimedOut),
            Err(RecvTimeoutError::Disconnected) => Err(RecorderError::Device(
                "audio stream disconnected".to_string(),
            )),
        }
    }

    fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
