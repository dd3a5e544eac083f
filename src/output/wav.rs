use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use dasp_sample::Sample;

use crate::output::OutputSink;
use crate::{Frame, SampleRate};

/// Writes the mixed signal to a 16-bit PCM WAV file.
///
/// Intended for offline rendering, tests and diagnostics: hearing (or
/// asserting on) the engine's output without opening a real device. It
/// never applies backpressure, so a [`Player`](crate::Player) fed by it
/// runs as fast as the mixer produces — render a finite chain and stop.
pub struct WavSink {
    writer: hound::WavWriter<BufWriter<File>>,
}

impl WavSink {
    /// Creates (or overwrites) a stereo WAV file at `path`.
    pub fn create(path: impl AsRef<Path>, sample_rate: SampleRate) -> Result<WavSink, hound::Error> {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: sample_rate.get(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        Ok(WavSink {
            writer: hound::WavWriter::create(path, spec)?,
        })
    }

    /// Updates the WAV header and closes the file.
    ///
    /// Dropping the sink finalizes as well, but only this method surfaces
    /// write errors.
    pub fn finalize(self) -> Result<(), hound::Error> {
        self.writer.finalize()
    }
}

impl OutputSink for WavSink {
    fn write(&mut self, frames: &[Frame]) {
        for frame in frames {
            // Write errors surface on finalize.
            let _ = self.writer.write_sample(frame.left.to_sample::<i16>());
            let _ = self.writer.write_sample(frame.right.to_sample::<i16>());
        }
    }
}
