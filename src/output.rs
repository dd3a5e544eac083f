//! Where mixed frames leave the engine.
//!
//! The output loop (see [`Player`](crate::Player)) delivers one filled
//! buffer per cycle to an [`OutputSink`]. Two implementations ship behind
//! features: [`WavSink`] (`wav_output`) renders to a WAV file, and
//! [`speakers`] (`playback`) plays through the system's output device.
//! Anything else — a network peer, a test probe — is one small trait impl
//! away.

use std::num::NonZeroUsize;

use crate::{Frame, SampleRate};

#[cfg(feature = "playback")]
pub mod speakers;
#[cfg(feature = "wav_output")]
mod wav;

#[cfg(feature = "wav_output")]
pub use wav::WavSink;

/// Consumes the mixed signal, one buffer per output cycle.
///
/// `write` is expected to block while the sink's downstream buffer is full;
/// that blocking is the only backpressure pacing the playback thread. A
/// sink that never blocks (like a file) lets the loop run as fast as the
/// mixer can produce.
pub trait OutputSink: Send {
    /// Delivers one buffer of mixed frames.
    fn write(&mut self, frames: &[Frame]);
}

/// Timing parameters of the output loop.
#[derive(Clone, Copy, Debug)]
pub struct OutputConfig {
    /// Frame rate of the mixed signal.
    pub sample_rate: SampleRate,
    /// Frames pulled from the mixer per cycle.
    ///
    /// Sets both the output latency and the loop period
    /// (`buffer_size / sample_rate`): smaller buffers react faster to
    /// control changes, larger ones are cheaper and more robust against
    /// scheduling hiccups.
    pub buffer_size: NonZeroUsize,
}

impl Default for OutputConfig {
    /// 44.1 kHz with 2048 frames (~46 ms) per cycle.
    fn default() -> Self {
        OutputConfig {
            sample_rate: SampleRate::new(44100).unwrap(),
            buffer_size: NonZeroUsize::new(2048).unwrap(),
        }
    }
}
