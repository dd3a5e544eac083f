//! Mixer that plays multiple sources at the same time.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use crate::source::Source;
use crate::Frame;

/// Sums any number of sources into one signal.
///
/// Sources enter the set through [`add`](Mixer::add) and leave it the
/// moment they report exhaustion, or all at once through
/// [`clear`](Mixer::clear). Mixing is sample-wise addition at the same
/// output position; sources that joined later simply start at the current
/// position. As a [`Source`] the mixer never exhausts — an empty set mixes
/// to silence — which is what keeps an output device fed between sounds.
///
/// The mixer is single-threaded by itself. [`Player`](crate::Player) wraps
/// one in the mutex that makes up the engine's locking contract; standalone
/// it doubles as an offline mixing bus.
pub struct Mixer {
    sources: Vec<(u64, Box<dyn MixedSource>)>,
    scratch: Vec<Frame>,
    next_id: u64,
}

/// Keyed access to a source registered with a [`Mixer`].
///
/// Returned by [`Mixer::add`] and typed with the registered source, so
/// [`Mixer::get_mut`] hands back `&mut S` with the full wrapper chain
/// intact. Once the source drains and is evicted the handle dangles and
/// `get_mut` returns `None`; ids are never reused.
pub struct SourceHandle<S> {
    id: u64,
    marker: PhantomData<fn() -> S>,
}

impl<S> Clone for SourceHandle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SourceHandle<S> {}

impl<S> fmt::Debug for SourceHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceHandle({})", self.id)
    }
}

/// Object-safe bundle of the bounds a mixed source needs.
trait MixedSource: Source + Send {
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<S> MixedSource for S
where
    S: Source + Send + 'static,
{
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Mixer {
    /// Builds a mixer with an empty set.
    pub fn new() -> Mixer {
        Mixer {
            sources: Vec::new(),
            scratch: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a source; it joins the mix on the next pull.
    pub fn add<S>(&mut self, source: S) -> SourceHandle<S>
    where
        S: Source + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.sources.push((id, Box::new(source)));
        SourceHandle {
            id,
            marker: PhantomData,
        }
    }

    /// Exclusive access to a registered source.
    ///
    /// Returns `None` once the source has drained and been evicted (or
    /// after [`clear`](Mixer::clear)).
    pub fn get_mut<S>(&mut self, handle: SourceHandle<S>) -> Option<&mut S>
    where
        S: Source + Send + 'static,
    {
        self.sources
            .iter_mut()
            .find(|(id, _)| *id == handle.id)
            .and_then(|(_, source)| source.as_any_mut().downcast_mut())
    }

    /// Removes every registered source.
    pub fn clear(&mut self) {
        self.sources.clear();
    }

    /// Number of currently registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no source is currently registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Zero-fills `frames` and adds every registered source's contribution.
    ///
    /// Sources that report exhaustion are evicted in the same pull, after
    /// their final frames were mixed in.
    pub fn mix(&mut self, frames: &mut [Frame]) {
        frames.fill(Frame::ZERO);
        self.scratch.resize(frames.len(), Frame::ZERO);
        let scratch = &mut self.scratch[..frames.len()];

        self.sources.retain_mut(|(_, source)| {
            let (filled, more) = source.stream(scratch);
            for (out, contribution) in frames[..filled].iter_mut().zip(&scratch[..filled]) {
                *out += *contribution;
            }
            more
        });
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Mixer::new()
    }
}

impl Source for Mixer {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        self.mix(frames);
        (frames.len(), true)
    }
}
