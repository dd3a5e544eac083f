//! Interface to external audio decoders.
//!
//! Container and codec work (reading MP3/WAV/FLAC bytes into frames) is out
//! of this crate's scope. A decoder plugs into the engine by exposing its
//! decoded output as a seekable source plus static metadata; everything in
//! [`source`](crate::source) then composes over it.
//!
//! Resource release is ownership: a transform chain exclusively owns its
//! children, so dropping the outermost wrapper tears the whole chain down,
//! decoder included. A decoder that holds files or devices releases them in
//! its `Drop` impl.
//!
//! [`FramesBuffer`](crate::FramesBuffer) implements this trait and is the
//! in-memory stand-in when no real decoder is involved.

use crate::source::SeekableSource;
use crate::SampleRate;

/// A decoded audio stream handed over by an external decoder.
///
/// The engine treats the channel layout as stereo throughout; a decoder for
/// mono material duplicates its channel into both sides of each
/// [`Frame`](crate::Frame).
pub trait Decoder: SeekableSource + Send {
    /// The frame rate of the decoded stream.
    ///
    /// Feed this to [`Source::resample`](crate::Source::resample) when the
    /// output runs at a different rate.
    fn sample_rate(&self) -> SampleRate;
}
