use std::collections::VecDeque;
use std::num::NonZeroUsize;

use num_rational::Ratio;

use crate::math;
use crate::source::Source;
use crate::{Frame, SampleRate};

/// Frames pulled from the input per refill round.
const CHUNK: usize = 256;

/// Internal function that builds a `Resample` object.
pub fn resample<I>(
    input: I,
    quality: NonZeroUsize,
    source_rate: SampleRate,
    target_rate: SampleRate,
) -> Resample<I>
where
    I: Source,
{
    Resample {
        input,
        quality: quality.get(),
        step: Ratio::new(source_rate.get() as i64, target_rate.get() as i64),
        cursor: Ratio::from_integer(0),
        window: VecDeque::new(),
        scratch: vec![Frame::ZERO; CHUNK].into_boxed_slice(),
        input_done: false,
    }
}

/// Converts a source from one frame rate to another.
///
/// A fractional read cursor walks over the input at `1 / ratio` input
/// frames per output frame, where `ratio = target_rate / source_rate`.
/// Each output frame interpolates the input frames surrounding the cursor:
/// with `quality` 1 a straight line between the two neighbors, with larger
/// qualities a normalized windowed-sinc kernel over `2 * quality` frames —
/// more neighbors buy fidelity at CPU cost. Input frames beyond either end
/// of the stream read as silence for windowing purposes.
///
/// The cursor is kept as an exact rational, so no drift accumulates no
/// matter how long the stream runs. The ratio is mutable mid-stream via
/// [`set_ratio`](Resample::set_ratio); the buffered input window is kept
/// across the change, so there is no discontinuity. An identity ratio
/// passes frames through untouched.
///
/// Doubling the ratio halves the pitch-corrected duration, which makes this
/// the speed control of a playback chain as much as a format adapter.
#[derive(Clone, Debug)]
pub struct Resample<I> {
    input: I,
    /// Interpolation half-window; 1 = linear.
    quality: usize,
    /// Input frames consumed per output frame, `source_rate / target_rate`.
    step: Ratio<i64>,
    /// Fractional read position, relative to `window[0]`.
    cursor: Ratio<i64>,
    /// Buffered input frames surrounding the cursor.
    window: VecDeque<Frame>,
    scratch: Box<[Frame]>,
    input_done: bool,
}

impl<I> Resample<I>
where
    I: Source,
{
    /// The current rate ratio (output frames per input frame).
    pub fn ratio(&self) -> f64 {
        *self.step.denom() as f64 / *self.step.numer() as f64
    }

    /// Changes the rate ratio mid-stream.
    ///
    /// Takes effect on the next output frame. The buffered input window is
    /// kept, so already-gathered material plays on without discontinuity;
    /// the cursor is re-quantized to the new ratio's denominator (an error
    /// of at most one part in the target rate, once per change).
    ///
    /// # Panics
    ///
    /// Panics if `ratio` is not finite and positive, or is too extreme to
    /// represent.
    pub fn set_ratio(&mut self, ratio: f64) {
        assert!(
            ratio.is_finite() && ratio > 0.0,
            "resampling ratio must be finite and positive"
        );
        let step: Ratio<i64> =
            Ratio::approximate_float(ratio.recip()).expect("ratio is representable");
        assert!(*step.numer() > 0, "resampling ratio is too extreme");

        let denom = *step.denom();
        let scaled = (self.cursor * Ratio::from_integer(denom)).round().to_integer();
        self.cursor = Ratio::new(scaled, denom);
        self.step = step;
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

    /// Drops buffered frames the interpolation window has moved past.
    fn trim_history(&mut self) {
        let keep_from = (self.cursor.to_integer() as usize).saturating_sub(self.quality - 1);
        let keep_from = keep_from.min(self.window.len());
        if keep_from > 0 {
            self.window.drain(..keep_from);
            self.cursor -= Ratio::from_integer(keep_from as i64);
        }
    }

    /// Buffers input frames until the window covers the cursor, the input
    /// stalls, or the input drains.
    fn ensure_window(&mut self) {
        loop {
            self.trim_history();
            if self.input_done {
                return;
            }
            let needed = self.cursor.to_integer() as usize + self.quality + 1;
            if self.window.len() >= needed {
                return;
            }
            let want = (needed - self.window.len()).min(self.scratch.len());
            let (n, more) = self.input.stream(&mut self.scratch[..want]);
            self.window.extend(self.scratch[..n].iter().copied());
            if !more {
                self.input_done = true;
            } else if n == 0 {
                // Input stalled; resume on a later call.
                return;
            }
        }
    }

    fn interpolate(&self, center: usize) -> Frame {
        let frac = self.cursor - Ratio::from_integer(center as i64);
        let frac = *frac.numer() as f32 / *frac.denom() as f32;

        if self.quality == 1 {
            let a = self.frame_at(center as isize);
            let b = self.frame_at(center as isize + 1);
            return Frame::new(
                math::lerp(a.left, b.left, frac),
                math::lerp(a.right, b.right, frac),
            );
        }

        let half = self.quality as isize;
        let mut acc = Frame::ZERO;
        let mut weight_sum = 0.0;
        for i in (center as isize - half + 1)..=(center as isize + half) {
            let x = frac + (center as isize - i) as f32;
            let weight = lanczos(x, self.quality as f32);
            acc += self.frame_at(i) * weight;
            weight_sum += weight;
        }
        if weight_sum != 0.0 {
            acc * (1.0 / weight_sum)
        } else {
            Frame::ZERO
        }
    }

    fn frame_at(&self, i: isize) -> Frame {
        if i < 0 {
            return Frame::ZERO;
        }
        self.window.get(i as usize).copied().unwrap_or(Frame::ZERO)
    }
}

impl<I> Source for Resample<I>
where
    I: Source,
{
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        // An identity ratio with no buffered state passes straight through.
        if self.step == Ratio::from_integer(1)
            && self.window.is_empty()
            && self.cursor == Ratio::from_integer(0)
        {
            return self.input.stream(frames);
        }

        let mut produced = 0;
        loop {
            if produced == frames.len() {
                return (produced, true);
            }
            self.ensure_window();

            if self.input_done
                && self.cursor >= Ratio::from_integer(self.window.len() as i64)
            {
                return (produced, false);
            }
            let center = self.cursor.to_integer() as usize;
            if !self.input_done && self.window.len() < center + self.quality + 1 {
                return (produced, true);
            }

            frames[produced] = self.interpolate(center);
            produced += 1;
            self.cursor += self.step;
        }
    }
}

/// Lanczos kernel: `sinc(x) * sinc(x / a)` within `|x| < a`, zero outside.
fn lanczos(x: f32, a: f32) -> f32 {
    if x.abs() >= a {
        return 0.0;
    }
    if x.abs() < 1e-6 {
        return 1.0;
    }
    let px = std::f32::consts::PI * x;
    a * (px.sin() * (px / a).sin()) / (px * px)
}
