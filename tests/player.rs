//! Threaded playback: the output loop, the lock, clear and eviction.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rill::{nz, Frame, FramesBuffer, OutputConfig, OutputSink, Player, SeekableSource, Source};

const BUFFER: usize = 64;

fn config() -> OutputConfig {
    OutputConfig {
        sample_rate: nz!(44100),
        buffer_size: NonZeroUsize::new(BUFFER).unwrap(),
    }
}

/// Sink that collects everything it is handed.
///
/// The short sleep stands in for device backpressure so the loop does not
/// spin flat out.
struct CollectSink {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl OutputSink for CollectSink {
    fn write(&mut self, frames: &[Frame]) {
        self.frames.lock().unwrap().extend_from_slice(frames);
        std::thread::sleep(Duration::from_millis(1));
    }
}

fn wait_for(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !condition() {
        assert!(Instant::now() < deadline, "condition not met in time");
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn ramp(len: usize) -> Vec<Frame> {
    (0..len).map(|i| Frame::new((i + 1) as f32, 0.0)).collect()
}

#[test]
fn played_frames_arrive_contiguous_and_in_order() {
    let collected = Arc::new(Mutex::new(Vec::new()));
    let player = Player::start(
        config(),
        CollectSink {
            frames: Arc::clone(&collected),
        },
    );

    let data = ramp(4 * BUFFER);
    player.play(FramesBuffer::new(nz!(44100), data.clone()));

    wait_for(|| {
        let frames = collected.lock().unwrap();
        frames.iter().filter(|f| f.left != 0.0).count() >= data.len()
    });

    let frames = collected.lock().unwrap().clone();
    // The source joined at a cycle boundary and played through unbroken.
    let start = frames.iter().position(|f| f.left != 0.0).unwrap();
    assert_eq!(start % BUFFER, 0);
    assert_eq!(&frames[start..start + data.len()], &data[..]);
}

#[test]
fn two_sources_mix_sample_wise() {
    let collected = Arc::new(Mutex::new(Vec::new()));
    let player = Player::start(
        config(),
        CollectSink {
            frames: Arc::clone(&collected),
        },
    );

    {
        // Adding both under one guard makes them join the same cycle.
        let mut mixer = player.lock();
        mixer.add(FramesBuffer::new(
            nz!(44100),
            vec![Frame::new(0.25, 0.0); 2 * BUFFER],
        ));
        mixer.add(FramesBuffer::new(
            nz!(44100),
            vec![Frame::new(0.5, 0.0); 2 * BUFFER],
        ));
    }

    wait_for(|| {
        let frames = collected.lock().unwrap();
        frames.iter().filter(|f| f.left != 0.0).count() >= 2 * BUFFER
    });

    let frames = collected.lock().unwrap().clone();
    let start = frames.iter().position(|f| f.left != 0.0).unwrap();
    for frame in &frames[start..start + 2 * BUFFER] {
        assert!((frame.left - 0.75).abs() < 1e-6);
    }
}

#[test]
fn clear_silences_the_output() {
    let collected = Arc::new(Mutex::new(Vec::new()));
    let player = Player::start(
        config(),
        CollectSink {
            frames: Arc::clone(&collected),
        },
    );

    let data = vec![Frame::new(1.0, 0.0); 16];
    player.play(FramesBuffer::new(nz!(44100), data).repeat_infinite());
    wait_for(|| collected.lock().unwrap().iter().any(|f| f.left != 0.0));

    player.clear();
    // One already-mixed buffer may still trickle out after the clear.
    let boundary = collected.lock().unwrap().len() + BUFFER;

    wait_for(|| collected.lock().unwrap().len() >= boundary + 2 * BUFFER);
    let frames = collected.lock().unwrap().clone();
    assert!(frames[boundary..].iter().all(|f| *f == Frame::ZERO));
}

#[test]
fn control_changes_under_the_lock_reach_the_output() {
    let collected = Arc::new(Mutex::new(Vec::new()));
    let player = Player::start(
        config(),
        CollectSink {
            frames: Arc::clone(&collected),
        },
    );

    let data = vec![Frame::new(0.25, 0.0); 16];
    let handle = player.play(
        FramesBuffer::new(nz!(44100), data)
            .repeat_infinite()
            .amplify(2.0),
    );
    wait_for(|| collected.lock().unwrap().iter().any(|f| f.left != 0.0));

    {
        let mut mixer = player.lock();
        let chain = mixer.get_mut(handle).expect("still playing");
        chain.set_level(2.0); // 2^2 = 4x
    }

    wait_for(|| {
        let frames = collected.lock().unwrap();
        frames.iter().any(|f| (f.left - 1.0).abs() < 1e-4)
    });
}

#[test]
fn drained_sources_are_evicted_and_handles_dangle() {
    let collected = Arc::new(Mutex::new(Vec::new()));
    let player = Player::start(
        config(),
        CollectSink {
            frames: Arc::clone(&collected),
        },
    );

    let handle = player.play(FramesBuffer::new(
        nz!(44100),
        vec![Frame::new(1.0, 0.0); BUFFER],
    ));

    wait_for(|| collected.lock().unwrap().iter().any(|f| f.left != 0.0));
    wait_for(|| player.lock().is_empty());
    assert!(player.lock().get_mut(handle).is_none());
}
