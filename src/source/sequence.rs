use std::collections::VecDeque;

use crate::source::Source;
use crate::Frame;

/// Plays a list of sources one after the other.
///
/// Frames come exclusively from the first source that still has any; when
/// it drains it is dropped and the remainder of the caller's buffer is
/// filled from the next one, within the same call. The sequence reports
/// exhaustion only once every child has drained.
///
/// A zero-length child (such as an [`EmptyCallback`](super::EmptyCallback)
/// marking the end of the material before it) is dropped after a single
/// pull, in which it fires whatever side effect it carries.
///
/// ```
/// use rill::source::{sequence, Source};
/// use rill::{nz, Frame, FramesBuffer};
///
/// let intro = FramesBuffer::new(nz!(44100), vec![Frame::new(0.1, 0.1); 30]);
/// let outro = FramesBuffer::new(nz!(44100), vec![Frame::new(0.2, 0.2); 20]);
/// let mut both = sequence(vec![
///     Box::new(intro) as Box<dyn Source + Send>,
///     Box::new(outro),
/// ]);
///
/// let mut buf = [Frame::ZERO; 64];
/// // One call draws from both children.
/// assert_eq!(both.stream(&mut buf), (50, false));
/// assert_eq!(buf[29], Frame::new(0.1, 0.1));
/// assert_eq!(buf[30], Frame::new(0.2, 0.2));
/// ```
pub fn sequence<I>(sources: I) -> Sequence
where
    I: IntoIterator<Item = Box<dyn Source + Send>>,
{
    Sequence {
        sources: sources.into_iter().collect(),
    }
}

/// Source that concatenates other sources end-to-end; see [`sequence`].
pub struct Sequence {
    sources: VecDeque<Box<dyn Source + Send>>,
}

impl Sequence {
    /// Appends another source to the end of the sequence.
    pub fn push(&mut self, source: Box<dyn Source + Send>) {
        self.sources.push_back(source);
    }
}

impl Source for Sequence {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        let mut filled = 0;
        while filled < frames.len() {
            let Some(current) = self.sources.front_mut() else {
                return (filled, false);
            };
            let (n, more) = current.stream(&mut frames[filled..]);
            filled += n;
            if !more {
                self.sources.pop_front();
            } else if n == 0 {
                // Stalled child; let the caller come back to it.
                return (filled, true);
            }
        }
        (filled, !self.sources.is_empty())
    }
}
