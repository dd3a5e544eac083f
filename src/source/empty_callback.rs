use std::fmt;

use crate::source::Source;
use crate::Frame;

/// A zero-frame source that signals when the playhead reaches it.
///
/// The first pull invokes the callback; every pull, including the first,
/// reports immediate exhaustion. Placed at the tail of a
/// [`sequence`](super::sequence) it notifies external code exactly once,
/// right after the preceding sources deliver their last frame. The callback
/// is `FnOnce`, so a second invocation is unrepresentable.
pub struct EmptyCallback {
    callback: Option<Box<dyn FnOnce() + Send>>,
}

impl EmptyCallback {
    /// Builds a source that calls `callback` the first time it is pulled.
    pub fn new(callback: impl FnOnce() + Send + 'static) -> EmptyCallback {
        EmptyCallback {
            callback: Some(Box::new(callback)),
        }
    }
}

impl Source for EmptyCallback {
    fn stream(&mut self, _frames: &mut [Frame]) -> (usize, bool) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
        (0, false)
    }
}

impl fmt::Debug for EmptyCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmptyCallback")
            .field("fired", &self.callback.is_none())
            .finish()
    }
}
