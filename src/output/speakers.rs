//! Plays the mixed signal through the system's default output device.
//!
//! [`open`] builds the device stream and hands back two halves: a
//! [`Speakers`] handle that owns the device stream and must be kept alive
//! on the opening thread, and a [`SpeakersSink`] to pass to
//! [`Player::start`](crate::Player::start). The two communicate over a
//! lock-free ring buffer; the device callback drains it, and the sink's
//! `write` blocks while it is full — which is exactly the backpressure that
//! paces the output loop.

use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::output::{OutputConfig, OutputSink};
use crate::Frame;

/// Error opening the output device.
#[derive(Debug, thiserror::Error)]
pub enum SpeakersError {
    /// No output device is available.
    #[error("no output device available")]
    NoDevice,
    /// The device rejected the stream configuration.
    #[error("could not build the output stream")]
    BuildStream(#[from] cpal::BuildStreamError),
    /// The stream could not be started.
    #[error("could not start the output stream")]
    Play(#[from] cpal::PlayStreamError),
}

/// Keeps the device stream alive.
///
/// Playback stops when this is dropped. It is not `Send`; keep it on the
/// thread that opened it.
pub struct Speakers {
    _stream: cpal::Stream,
}

/// The sending half handed to [`Player::start`](crate::Player::start).
pub struct SpeakersSink {
    producer: rtrb::Producer<f32>,
}

/// Opens the default output device for the given configuration.
///
/// Open the device once per process lifetime: dropping the returned
/// [`Speakers`] and opening again resets the ring buffer and can truncate
/// whatever was still queued for playback.
pub fn open(config: &OutputConfig) -> Result<(Speakers, SpeakersSink), SpeakersError> {
    let device = cpal::default_host()
        .default_output_device()
        .ok_or(SpeakersError::NoDevice)?;

    let stream_config = cpal::StreamConfig {
        channels: 2,
        sample_rate: cpal::SampleRate(config.sample_rate.get()),
        buffer_size: cpal::BufferSize::Default,
    };

    // Two cycles of slack between the output loop and the device callback.
    let capacity = config.buffer_size.get() * 2 * 2;
    let (producer, mut consumer) = rtrb::RingBuffer::new(capacity);

    let stream = device.build_output_stream::<f32, _, _>(
        &stream_config,
        move |data: &mut [f32], _| {
            for sample in data {
                // Underruns play out as silence.
                *sample = consumer.pop().unwrap_or(0.0);
            }
        },
        |err| {
            #[cfg(feature = "tracing")]
            tracing::error!("audio stream error: {err}");
            #[cfg(not(feature = "tracing"))]
            eprintln!("audio stream error: {err}");
        },
        None,
    )?;
    stream.play()?;

    Ok((Speakers { _stream: stream }, SpeakersSink { producer }))
}

impl SpeakersSink {
    fn push(&mut self, sample: f32) {
        let mut sample = sample;
        loop {
            match self.producer.push(sample) {
                Ok(()) => return,
                Err(rtrb::PushError::Full(rejected)) => {
                    sample = rejected;
                    std::thread::sleep(Duration::from_micros(500));
                }
            }
        }
    }
}

impl OutputSink for SpeakersSink {
    fn write(&mut self, frames: &[Frame]) {
        for frame in frames {
            self.push(frame.left);
            self.push(frame.right);
        }
    }
}
