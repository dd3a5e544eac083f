//! Composable audio streaming, mixing and playback.
//!
//! Audio in this crate is a pull: a [`Source`] fills caller-provided
//! buffers of stereo [`Frame`]s until it reports exhaustion. Transforms
//! wrap sources and are sources themselves — [`sequence`](source::sequence)
//! concatenates, [`Repeat`](source::Repeat) replays,
//! [`Resample`](source::Resample) converts frame rates,
//! [`Pausable`](source::Pausable) gates, [`Amplify`](source::Amplify)
//! controls volume — so a playback chain is built by stacking exactly the
//! behavior a sound needs. A [`Mixer`] sums any number of chains, and a
//! [`Player`] pulls the mix on a dedicated thread while foreground code
//! reconfigures live chains under the player's lock.
//!
//! ```
//! use rill::source::{sequence, EmptyCallback, Source};
//! use rill::{nz, Frame, FramesBuffer, SeekableSource};
//!
//! // Two beeps: the second is the first replayed twice, and a callback
//! // fires when everything has been streamed.
//! let beep = vec![Frame::new(0.5, 0.5); 100];
//! let once = FramesBuffer::new(nz!(44100), beep.clone());
//! let twice = FramesBuffer::new(nz!(44100), beep).repeat(2);
//!
//! let mut chain = sequence(vec![
//!     Box::new(once) as Box<dyn Source + Send>,
//!     Box::new(twice),
//!     Box::new(EmptyCallback::new(|| println!("done"))),
//! ]);
//!
//! let mut total = 0;
//! let mut buf = [Frame::ZERO; 64];
//! loop {
//!     let (filled, more) = chain.stream(&mut buf);
//!     total += filled;
//!     if !more {
//!         break;
//!     }
//! }
//! assert_eq!(total, 300);
//! ```
//!
//! Decoding bytes into frames and the output device itself live outside
//! this crate, behind the [`Decoder`] and [`OutputSink`] boundary traits;
//! the `wav_output` and `playback` features ship ready-made sinks for a
//! WAV file and the system speakers.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod buffer;
mod common;
pub mod decoder;
mod math;
pub mod mixer;
pub mod output;
pub mod player;
pub mod source;

pub use crate::buffer::FramesBuffer;
pub use crate::common::{Frame, SampleRate};
pub use crate::decoder::Decoder;
pub use crate::mixer::{Mixer, SourceHandle};
pub use crate::output::{OutputConfig, OutputSink};
pub use crate::player::Player;
pub use crate::source::{SeekError, SeekableSource, Source};
