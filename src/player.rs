//! The background output loop.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use crate::mixer::{Mixer, SourceHandle};
use crate::output::{OutputConfig, OutputSink};
use crate::source::Source;
use crate::Frame;

/// Plays the mixed signal on a dedicated background thread.
///
/// The thread repeats one cycle for the player's whole lifetime: take the
/// mixer lock, pull `buffer_size` frames from the mixer, release the lock,
/// hand the buffer to the sink. The sink's `write` blocking while its
/// downstream is full is the only pacing — one cycle per
/// `buffer_size / sample_rate` seconds once the pipeline is primed.
///
/// Dropping the player stops the thread. Sounds that were still playing are
/// dropped with the mixer.
///
/// # The lock
///
/// Registered sources are owned by the mixer and shared with the output
/// thread, so every touch of their mutable state — pausing a
/// [`Pausable`](crate::source::Pausable), changing an
/// [`Amplify`](crate::source::Amplify) level, a
/// [`Resample`](crate::source::Resample) ratio, seeking — must happen while
/// holding [`lock`](Player::lock). The borrow checker enforces this: the
/// only path to a registered source is through the guard.
///
/// Hold the guard briefly. The output thread takes the same mutex once per
/// cycle, and a foreground thread that keeps it for longer than the cycle
/// period starves the sink — the result is an audible gap. Flip the flags,
/// drop the guard; never decode, allocate big, or block on I/O under it.
///
/// ```no_run
/// use rill::output::WavSink;
/// use rill::{nz, Frame, FramesBuffer, OutputConfig, Player, SeekableSource, Source};
///
/// let config = OutputConfig {
///     sample_rate: nz!(44100),
///     buffer_size: nz!(1024),
/// };
/// let sink = WavSink::create("out.wav", config.sample_rate)?;
/// let player = Player::start(config, sink);
///
/// let music = FramesBuffer::new(nz!(44100), vec![Frame::ZERO; 44100]);
/// let handle = player.play(music.repeat(3).pausable(false).amplify(2.0));
///
/// // Later, from any thread:
/// {
///     let mut mixer = player.lock();
///     if let Some(chain) = mixer.get_mut(handle) {
///         chain.set_level(-1.0);              // half volume
///         chain.inner_mut().set_paused(true); // freeze without losing position
///     }
/// } // guard dropped, output thread continues
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Player {
    mixer: Arc<Mutex<Mixer>>,
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Player {
    /// Spawns the output thread and begins pulling the (still empty) mix.
    ///
    /// The device behind `sink` should be opened once per process: tearing
    /// one player down and starting another resets the sink's queue and can
    /// truncate whatever was still playing.
    pub fn start<O>(config: OutputConfig, mut sink: O) -> Player
    where
        O: OutputSink + 'static,
    {
        let mixer = Arc::new(Mutex::new(Mixer::new()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let thread = {
            let mixer = Arc::clone(&mixer);
            let shutdown = Arc::clone(&shutdown);
            thread::Builder::new()
                .name("audio-output".into())
                .spawn(move || {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        buffer_size = config.buffer_size.get(),
                        sample_rate = config.sample_rate.get(),
                        "output loop started"
                    );
                    let mut buffer = vec![Frame::ZERO; config.buffer_size.get()];
                    while !shutdown.load(Ordering::Acquire) {
                        {
                            let mut mixer = mixer.lock().unwrap();
                            mixer.mix(&mut buffer);
                        }
                        // Fed outside the lock, so sink backpressure never
                        // stalls foreground control.
                        sink.write(&buffer);
                    }
                    #[cfg(feature = "tracing")]
                    tracing::debug!("output loop stopped");
                })
                .expect("failed to spawn the audio output thread")
        };

        Player {
            mixer,
            shutdown,
            thread: Some(thread),
        }
    }

    /// Starts playing a source on top of whatever else is playing.
    ///
    /// Takes the lock briefly; the source joins the mix on the next cycle.
    /// The returned handle reaches the source later through
    /// [`lock`](Player::lock), until the source drains and is evicted.
    pub fn play<S>(&self, source: S) -> SourceHandle<S>
    where
        S: Source + Send + 'static,
    {
        self.mixer.lock().unwrap().add(source)
    }

    /// Acquires the mixer lock for foreground control.
    ///
    /// See the [type docs](Player) for the locking contract. Calling
    /// [`play`](Player::play) or [`clear`](Player::clear) while holding the
    /// guard deadlocks (single, non-reentrant mutex); use the guard's own
    /// [`Mixer::add`] and [`Mixer::clear`] instead.
    pub fn lock(&self) -> MixerGuard<'_> {
        MixerGuard(self.mixer.lock().unwrap())
    }

    /// Drops every playing source immediately.
    ///
    /// Takes the lock internally. A source mid-cycle is simply never pulled
    /// again; the mix continues as silence until the next
    /// [`play`](Player::play).
    pub fn clear(&self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("clearing all playing sources");
        self.mixer.lock().unwrap().clear();
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Exclusive access to a [`Player`]'s mixer; releases the lock on drop.
pub struct MixerGuard<'a>(MutexGuard<'a, Mixer>);

impl Deref for MixerGuard<'_> {
    type Target = Mixer;

    fn deref(&self) -> &Mixer {
        &self.0
    }
}

impl DerefMut for MixerGuard<'_> {
    fn deref_mut(&mut self) -> &mut Mixer {
        &mut self.0
    }
}
