use crate::source::{SeekError, SeekableSource, Source};
use crate::Frame;

/// Internal function that builds an `Amplify` object.
pub fn amplify<I>(input: I, base: f32) -> Amplify<I>
where
    I: Source,
{
    Amplify {
        input,
        base,
        level: 0.0,
        factor: 1.0,
        silent: false,
    }
}

/// Volume control on a logarithmic scale.
///
/// Every frame of the wrapped source is multiplied by `base ^ level`. A
/// level of 0 is the exact identity for any base, so a freshly built
/// `Amplify` passes frames through untouched. No clamping is applied;
/// boosted frames may exceed `±1.0`.
///
/// Setting `silent` hard-mutes the output while the wrapped source keeps
/// advancing, like a muted TV. Wrap in [`Pausable`](super::Pausable) instead
/// if the source's position should freeze while inaudible.
#[derive(Clone, Debug)]
pub struct Amplify<I> {
    input: I,
    base: f32,
    level: f32,
    factor: f32,
    silent: bool,
}

impl<I> Amplify<I>
where
    I: Source,
{
    /// The amplification base this wrapper was built with.
    #[inline]
    pub fn base(&self) -> f32 {
        self.base
    }

    /// The current volume level.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Sets the volume level, the exponent applied to the base.
    ///
    /// Negative levels attenuate, positive levels boost, 0 is the identity.
    #[inline]
    pub fn set_level(&mut self, level: f32) {
        self.level = level;
        self.factor = self.base.powf(level);
    }

    /// Whether the output is hard-muted.
    #[inline]
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Mutes or unmutes the output. The wrapped source advances either way.
    #[inline]
    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
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

impl<I> Source for Amplify<I>
where
    I: Source,
{
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        let (filled, more) = self.input.stream(frames);
        if self.silent {
            frames[..filled].fill(Frame::ZERO);
        } else if self.factor != 1.0 {
            for frame in &mut frames[..filled] {
                *frame *= self.factor;
            }
        }
        (filled, more)
    }
}

impl<I> SeekableSource for Amplify<I>
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
