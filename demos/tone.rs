//! Plays a tone through the default output device, then pauses, resumes
//! quieter, and clears.
//!
//! ```text
//! cargo run --example tone --features playback
//! ```

use std::time::Duration;

use rill::output::speakers;
use rill::{nz, Frame, FramesBuffer, OutputConfig, Player, SeekableSource, Source};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = OutputConfig {
        sample_rate: nz!(44100),
        buffer_size: nz!(1024),
    };
    let (_speakers, sink) = speakers::open(&config)?;
    let player = Player::start(config, sink);

    let beep: Vec<Frame> = (0..44100)
        .map(|i| {
            let t = i as f32 / 44100.0;
            let s = (t * 440.0 * std::f32::consts::TAU).sin() * 0.3;
            Frame::new(s, s)
        })
        .collect();
    let source = FramesBuffer::new(config.sample_rate, beep);
    let handle = player.play(source.repeat_infinite().pausable(false).amplify(2.0));

    std::thread::sleep(Duration::from_secs(1));

    {
        let mut mixer = player.lock();
        if let Some(chain) = mixer.get_mut(handle) {
            chain.inner_mut().set_paused(true);
        }
    }
    std::thread::sleep(Duration::from_millis(500));

    {
        let mut mixer = player.lock();
        if let Some(chain) = mixer.get_mut(handle) {
            chain.set_level(-1.0); // half volume
            chain.inner_mut().set_paused(false);
        }
    }
    std::thread::sleep(Duration::from_secs(1));

    player.clear();
    Ok(())
}
