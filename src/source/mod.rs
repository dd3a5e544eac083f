//! Sources of sound and the transforms that compose them.
//!
//! # The pull model
//!
//! Everything that produces audio in this crate implements [`Source`]: a
//! stateful, single-pass producer of [`Frame`]s. A source does not push data
//! anywhere; whoever needs audio hands it a buffer and the source fills a
//! prefix of it:
//!
//! ```text
//! fn stream(&mut self, frames: &mut [Frame]) -> (filled, more)
//! ```
//!
//! The two return values carry the whole protocol:
//!
//! - `filled` is how many frames were written, starting at `frames[0]`.
//!   A partial fill is normal; the frames past `filled` are untouched and
//!   must be ignored.
//! - `more == false` means the source is *drained*: nothing will ever come
//!   after the frames just written. A final partial fill
//!   (`filled < frames.len()`, `more == false`) is valid and its frames
//!   count.
//! - `more == true` means a later call *may* produce further frames. It is
//!   not a promise: the next call can still return `(0, false)`, and callers
//!   treat that as ordinary exhaustion. Likewise `(0, true)` is a transient
//!   stall, not an error.
//!
//! There is no error channel. Exhaustion is a normal terminal state, and any
//! unrecoverable fault inside a source degrades to it. The only fallible
//! operations are explicit repositioning ([`SeekableSource::try_seek`]) and
//! construction of the external boundaries.
//!
//! # Composition
//!
//! Transforms are sources that wrap another source one level at a time and
//! pull from it only what one unit of their own output requires:
//! [`sequence`] concatenates, [`Repeat`] replays, [`Resample`] converts the
//! frame rate, [`Pausable`] gates, [`Amplify`] scales. Each wrapper
//! exclusively owns its child; dropping the outermost transform releases the
//! whole chain.
//!
//! A wrapped chain reads bottom-up:
//!
//! ```
//! use rill::{nz, Frame, FramesBuffer, SeekableSource, Source};
//!
//! let beep = FramesBuffer::new(nz!(44100), vec![Frame::new(0.5, 0.5); 100]);
//! let mut chain = beep
//!     .repeat(2)          // play it twice
//!     .pausable(false)    // allow pausing later
//!     .amplify(2.0);      // volume control, base 2
//!
//! let mut buf = [Frame::ZERO; 64];
//! let mut total = 0;
//! loop {
//!     let (filled, more) = chain.stream(&mut buf);
//!     total += filled;
//!     if !more {
//!         break;
//!     }
//! }
//! assert_eq!(total, 200);
//! ```
//!
//! Once a chain is handed to a [`Player`](crate::Player), its mutable
//! controls (`set_paused`, `set_level`, `set_ratio`, seeking) may only be
//! touched while holding the player's lock; see
//! [`Player::lock`](crate::Player::lock).

use std::num::NonZeroUsize;

use crate::common::{Frame, SampleRate};

pub use self::amplify::Amplify;
pub use self::empty::Empty;
pub use self::empty_callback::EmptyCallback;
pub use self::pausable::Pausable;
pub use self::repeat::Repeat;
pub use self::resample::Resample;
pub use self::sequence::{sequence, Sequence};

mod amplify;
mod empty;
mod empty_callback;
mod pausable;
mod repeat;
mod resample;
mod sequence;

/// A source of audio frames.
///
/// See the [module documentation](self) for the full pull contract.
pub trait Source {
    /// Fills a prefix of `frames` with the next frames of this source.
    ///
    /// Returns the number of frames written and whether more may follow;
    /// `false` means the source is drained and the frames just written are
    /// its last. Advances internal state by exactly the returned count.
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool);

    /// Applies logarithmic volume control to this source.
    ///
    /// The returned wrapper starts at level 0, which is the identity for any
    /// base; see [`Amplify`].
    fn amplify(self, base: f32) -> Amplify<Self>
    where
        Self: Sized,
    {
        amplify::amplify(self, base)
    }

    /// Makes this source pausable.
    ///
    /// While paused the wrapper emits silence and this source is not
    /// advanced; see [`Pausable`].
    fn pausable(self, paused: bool) -> Pausable<Self>
    where
        Self: Sized,
    {
        pausable::pausable(self, paused)
    }

    /// Converts this source from `source_rate` to `target_rate`.
    ///
    /// `quality` is the interpolation half-window: `1` selects linear
    /// interpolation, larger values a windowed-sinc kernel over
    /// `2 * quality` neighboring frames. The rate ratio stays mutable on
    /// the returned wrapper; see [`Resample`].
    fn resample(
        self,
        quality: NonZeroUsize,
        source_rate: SampleRate,
        target_rate: SampleRate,
    ) -> Resample<Self>
    where
        Self: Sized,
    {
        resample::resample(self, quality, source_rate, target_rate)
    }
}

/// A source with a known total length and a current read position.
///
/// Invariant: `position() <= len()` at all times, and `position() == len()`
/// implies the source is drained. Seeking is the only way to rewind a
/// drained source.
pub trait SeekableSource: Source {
    /// Total number of frames, fixed for the lifetime of the source.
    fn len(&self) -> usize;

    /// Frames consumed so far.
    fn position(&self) -> usize;

    /// Repositions so that the next [`stream`](Source::stream) call resumes
    /// from frame `pos`.
    ///
    /// Fails without changing the position when `pos > len()` or the
    /// underlying data cannot be repositioned. The result must be checked:
    /// ignoring it silently leaves the position where it was.
    fn try_seek(&mut self, pos: usize) -> Result<(), SeekError>;

    /// Whether this source holds no frames at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replays this source `times` times by rewinding it on exhaustion.
    ///
    /// See [`Repeat`].
    fn repeat(self, times: usize) -> Repeat<Self>
    where
        Self: Sized,
    {
        repeat::repeat(self, times)
    }

    /// Replays this source forever; see [`Repeat`].
    fn repeat_infinite(self) -> Repeat<Self>
    where
        Self: Sized,
    {
        repeat::repeat_infinite(self)
    }
}

/// Error returned when a seekable source cannot honor a reposition request.
#[derive(Debug, thiserror::Error)]
pub enum SeekError {
    /// The requested position lies past the end of the source.
    #[error("seek to frame {pos} is out of range for a source of {len} frames")]
    OutOfRange {
        /// The requested frame index.
        pos: usize,
        /// The source's total frame count.
        len: usize,
    },
    /// The underlying data source failed to reposition.
    #[error("the underlying data source could not reposition")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl<S> Source for Box<S>
where
    S: Source + ?Sized,
{
    #[inline]
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        (**self).stream(frames)
    }
}

impl<S> Source for &mut S
where
    S: Source + ?Sized,
{
    #[inline]
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        (**self).stream(frames)
    }
}

impl<S> SeekableSource for Box<S>
where
    S: SeekableSource + ?Sized,
{
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn position(&self) -> usize {
        (**self).position()
    }

    #[inline]
    fn try_seek(&mut self, pos: usize) -> Result<(), SeekError> {
        (**self).try_seek(pos)
    }
}
