use crate::source::Source;
use crate::Frame;

/// A source that produces no frames at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct Empty(());

impl Empty {
    /// Builds a new `Empty`.
    #[inline]
    pub fn new() -> Empty {
        Empty(())
    }
}

impl Source for Empty {
    #[inline]
    fn stream(&mut self, _frames: &mut [Frame]) -> (usize, bool) {
        (0, false)
    }
}
