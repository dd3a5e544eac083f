use crate::source::{SeekError, SeekableSource, Source};
use crate::Frame;

/// Internal function that builds a `Pausable` object.
pub fn pausable<I>(source: I, paused: bool) -> Pausable<I>
where
    I: Source,
{
    Pausable {
        input: source,
        paused,
    }
}

/// Gate that substitutes silence for the wrapped source while paused.
///
/// A paused gate fills every requested buffer with silence, never reports
/// exhaustion, and never calls into the wrapped source: pausing costs the
/// source no progress at all. Unpausing resumes exactly where it left off.
#[derive(Clone, Debug)]
pub struct Pausable<I> {
    input: I,
    paused: bool,
}

impl<I> Pausable<I>
where
    I: Source,
{
    /// Whether the gate currently emits silence.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pauses or resumes the wrapped source.
    #[inline]
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Returns a reference to the inner source.
    #[inline]
    pub fn inner(&self) -> &I {
        &self.input
    }

    /// Returns a mutable reference to the inner source.
    #[inline]
    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Returns the inner source.
    #[inline]
    pub fn into_inner(self) -> I {
        self.input
    }
}

impl<I> Source for Pausable<I>
where
    I: Source,
{
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        if self.paused {
            frames.fill(Frame::ZERO);
            return (frames.len(), true);
        }
        self.input.stream(frames)
    }
}

impl<I> SeekableSource for Pausable<I>
where
    I: SeekableSource,
{
    #[inline]
    fn len(&self) -> usize {
        self.input.len()
    }

    #[inline]
    fn position(&self) -> usize {
        self.input.position()
    }

    #[inline]
    fn try_seek(&mut self, pos: usize) -> Result<(), SeekError> {
        self.input.try_seek(pos)
    }
}
