use super::SAMPLE_BYTES;
use crossbeam_channel::{Sender, TrySendError};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Slices the cpal callback's sample stream into fixed-size byte frames and
/// hands them to the capture loop over a bounded channel. Runs on the audio
/// callback thread, so a full channel drops the frame instead of blocking.
pub(super) struct FrameDispatcher {
    frame_bytes: usize,
    pending: Vec<u8>,
    sender: Sender<Vec<u8>>,
    dropped: Arc<AtomicU64>,
}

impl FrameDispatcher {
    pub(super) fn new(frame_bytes: usize, sender: Sender<Vec<u8>>, dropped: Arc<AtomicU64>) -> Self {
        Self {
            frame_bytes: frame_bytes.max(SAMPLE_BYTES),
            pending: Vec::with_capacity(frame_bytes.max(SAMPLE_BYTES)),
            sender,
            dropped,
        }
    }

    /// Convert native samples to 16-bit LE PCM, append them, and flush every
    /// complete frame.
    pub(super) fn push<T, F>(&mut self, data: &[T], mut convert: F)
    where
        T: Copy,
        F: FnMut(T) -> i16,
    {
        for sample in data.iter().copied() {
            self.pending
                .extend_from_slice(&convert(sample).to_le_bytes());
        }

        while self.pending.len() >= self.frame_bytes {
            let frame: Vec<u8> = self.pending.drain(..self.frame_bytes).collect();
            match self.sender.try_send(frame) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                }
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
    }
}
