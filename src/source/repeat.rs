use crate::source::{SeekableSource, Source};
use crate::Frame;

/// Internal function that builds a `Repeat` object.
pub fn repeat<I>(input: I, times: usize) -> Repeat<I>
where
    I: SeekableSource,
{
    Repeat {
        done: times == 0,
        remaining: Some(times),
        input,
    }
}

/// Internal function that builds an unbounded `Repeat` object.
pub fn repeat_infinite<I>(input: I) -> Repeat<I>
where
    I: SeekableSource,
{
    Repeat {
        done: false,
        remaining: None,
        input,
    }
}

/// Replays a seekable source a fixed or unbounded number of times.
///
/// The source is rewound with `try_seek(0)` each time it drains, so no
/// frame data is buffered; the replay resumes within the same call that
/// observed the exhaustion. `repeat(source, n)` plays the source exactly
/// `n` times (`n == 0` is immediately drained), `repeat_infinite` never
/// exhausts on its own.
///
/// A failed rewind — or a source with no frames at all — drains the
/// wrapper instead of raising.
#[derive(Clone, Debug)]
pub struct Repeat<I> {
    input: I,
    /// Plays left to finish, `None` when unbounded.
    remaining: Option<usize>,
    done: bool,
}

impl<I> Repeat<I>
where
    I: SeekableSource,
{
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

impl<I> Source for Repeat<I>
where
    I: SeekableSource,
{
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        if self.done {
            return (0, false);
        }

        let mut filled = 0;
        while filled < frames.len() {
            let (n, more) = self.input.stream(&mut frames[filled..]);
            filled += n;
            if more {
                if n == 0 {
                    // Input stalled; pick it back up on a later call.
                    break;
                }
                continue;
            }

            // One pass over the input is complete.
            if let Some(remaining) = &mut self.remaining {
                *remaining -= 1;
                if *remaining == 0 {
                    self.done = true;
                    return (filled, false);
                }
            }
            if self.input.try_seek(0).is_err() || self.input.is_empty() {
                self.done = true;
                return (filled, false);
            }
        }
        (filled, true)
    }
}
