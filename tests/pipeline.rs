//! End-to-end scenarios over composed chains.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rill::source::{sequence, EmptyCallback, Source};
use rill::{nz, Frame, FramesBuffer, SeekableSource};

fn ramp(len: usize) -> FramesBuffer {
    let data: Vec<Frame> = (0..len)
        .map(|i| Frame::new((i % 1000) as f32 / 1000.0, 0.0))
        .collect();
    FramesBuffer::new(nz!(44100), data)
}

#[test]
fn three_seconds_looped_twice_then_completion_signal() {
    // 3 seconds at 44.1 kHz, played twice, with a completion signal at the
    // tail of the sequence.
    let fired = Arc::new(AtomicUsize::new(0));
    let on_done = {
        let fired = Arc::clone(&fired);
        move || {
            fired.fetch_add(1, Ordering::SeqCst);
        }
    };

    let mut chain = sequence(vec![
        Box::new(ramp(132_300).repeat(2)) as Box<dyn Source + Send>,
        Box::new(EmptyCallback::new(on_done)),
    ]);

    let mut total = 0;
    let mut buf = [Frame::ZERO; 1024];
    loop {
        let (filled, more) = chain.stream(&mut buf);
        total += filled;
        if !more {
            break;
        }
        assert_eq!(
            fired.load(Ordering::SeqCst),
            0,
            "the signal must not fire before the last frame"
        );
    }

    assert_eq!(total, 264_600);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn gate_and_gain_compose_over_a_looped_source() {
    let mut chain = ramp(50).repeat(2).pausable(false).amplify(2.0);

    let mut buf = [Frame::ZERO; 30];
    chain.stream(&mut buf);

    // Pause mid-loop: silence comes out, the loop does not advance.
    chain.inner_mut().set_paused(true);
    let before = chain.inner().inner().inner().position();
    for _ in 0..5 {
        let (filled, more) = chain.stream(&mut buf);
        assert_eq!((filled, more), (30, true));
        assert!(buf.iter().all(|f| *f == Frame::ZERO));
    }
    assert_eq!(chain.inner().inner().inner().position(), before);

    // Resume and drain; the total comes out to both passes.
    chain.inner_mut().set_paused(false);
    let mut total = 30;
    loop {
        let (filled, more) = chain.stream(&mut buf);
        total += filled;
        if !more {
            break;
        }
    }
    assert_eq!(total, 100);
}

#[test]
fn resample_slots_into_a_chain() {
    // Halving the rate halves the frame count, within rounding.
    let mut chain = ramp(1000)
        .repeat(2)
        .resample(nz!(2), nz!(44100), nz!(22050))
        .amplify(2.0);

    let mut total = 0;
    let mut buf = [Frame::ZERO; 256];
    loop {
        let (filled, more) = chain.stream(&mut buf);
        total += filled;
        if !more {
            break;
        }
    }
    assert!((total as f64 - 1000.0).abs() <= 1.0, "{total} frames");
}

#[test]
fn silent_gain_keeps_consuming_the_sequence() {
    let fired = Arc::new(AtomicUsize::new(0));
    let on_done = {
        let fired = Arc::clone(&fired);
        move || {
            fired.fetch_add(1, Ordering::SeqCst);
        }
    };
    let inner = sequence(vec![
        Box::new(ramp(100)) as Box<dyn Source + Send>,
        Box::new(EmptyCallback::new(on_done)),
    ]);

    let mut muted = inner.amplify(2.0);
    muted.set_silent(true);

    let mut buf = [Frame::ZERO; 64];
    let mut total = 0;
    loop {
        let (filled, more) = muted.stream(&mut buf);
        assert!(buf[..filled].iter().all(|f| *f == Frame::ZERO));
        total += filled;
        if !more {
            break;
        }
    }

    // Muted playback still ran the material to its end.
    assert_eq!(total, 100);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}
