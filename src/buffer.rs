//! A simple source of frames coming from memory.
//!
//! The [`FramesBuffer`] struct treats a vector of frames as a seekable
//! source. Decoded audio held in memory enters the engine through it, and
//! most of this crate's tests are built on it.
//!
//! # Example
//!
//! ```
//! use rill::{nz, Frame, FramesBuffer};
//! let _ = FramesBuffer::new(nz!(44100), vec![Frame::ZERO; 128]);
//! ```

use dasp_sample::{Sample, ToSample};

use crate::decoder::Decoder;
use crate::source::{SeekError, SeekableSource, Source};
use crate::{Frame, SampleRate};

/// A buffer of frames treated as a seekable source.
#[derive(Clone, Debug)]
pub struct FramesBuffer {
    data: Vec<Frame>,
    pos: usize,
    sample_rate: SampleRate,
}

impl FramesBuffer {
    /// Builds a new `FramesBuffer`.
    pub fn new<D>(sample_rate: SampleRate, data: D) -> FramesBuffer
    where
        D: Into<Vec<Frame>>,
    {
        FramesBuffer {
            data: data.into(),
            pos: 0,
            sample_rate,
        }
    }

    /// Builds a buffer from interleaved stereo samples in any format.
    ///
    /// Decoders commonly hand over `i16` or `f32` samples with the left and
    /// right channels interleaved; amplitudes are converted to float frames.
    ///
    /// # Panics
    ///
    /// Panics if the number of samples is odd.
    pub fn from_interleaved<S>(sample_rate: SampleRate, samples: &[S]) -> FramesBuffer
    where
        S: Sample + ToSample<f32>,
    {
        assert!(
            samples.len() % 2 == 0,
            "interleaved stereo data must hold an even number of samples"
        );
        let data = samples
            .chunks_exact(2)
            .map(|pair| Frame::new(pair[0].to_sample(), pair[1].to_sample()))
            .collect::<Vec<_>>();
        FramesBuffer::new(sample_rate, data)
    }

    /// The frame rate this buffer is meant to be played at.
    #[inline]
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }
}

impl Source for FramesBuffer {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        let remaining = &self.data[self.pos..];
        let n = remaining.len().min(frames.len());
        frames[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        (n, self.pos < self.data.len())
    }
}

impl SeekableSource for FramesBuffer {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn try_seek(&mut self, pos: usize) -> Result<(), SeekError> {
        if pos > self.data.len() {
            return Err(SeekError::OutOfRange {
                pos,
                len: self.data.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }
}

impl Decoder for FramesBuffer {
    #[inline]
    fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }
}
