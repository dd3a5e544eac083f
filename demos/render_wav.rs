//! Renders a short three-note phrase to `render.wav`, no audio device
//! needed.
//!
//! ```text
//! cargo run --example render_wav
//! ```

use rill::output::WavSink;
use rill::source::{sequence, Source};
use rill::{nz, Frame, FramesBuffer, OutputSink, SampleRate, SeekableSource};

fn tone(rate: SampleRate, freq: f32, seconds: f32) -> FramesBuffer {
    let len = (rate.get() as f32 * seconds) as usize;
    let data: Vec<Frame> = (0..len)
        .map(|i| {
            let t = i as f32 / rate.get() as f32;
            // A touch of decay keeps the notes from clicking into each other.
            let s = (t * freq * std::f32::consts::TAU).sin() * 0.4 * (1.0 - t / seconds);
            Frame::new(s, s)
        })
        .collect();
    FramesBuffer::new(rate, data)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rate = nz!(44100);
    let mut sink = WavSink::create("render.wav", rate)?;

    let mut chain = sequence(vec![
        Box::new(tone(rate, 440.0, 0.4)) as Box<dyn Source + Send>,
        Box::new(tone(rate, 554.37, 0.4)),
        Box::new(tone(rate, 659.25, 0.4).repeat(2)),
    ]);

    let mut buf = [Frame::ZERO; 1024];
    loop {
        let (filled, more) = chain.stream(&mut buf);
        sink.write(&buf[..filled]);
        if !more {
            break;
        }
    }
    sink.finalize()?;

    println!("wrote render.wav");
    Ok(())
}
