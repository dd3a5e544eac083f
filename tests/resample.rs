//! Rate-conversion properties over realistic rate pairs.

use approx::assert_relative_eq;
use rill::{nz, Frame, FramesBuffer, SampleRate, Source};
use rstest::rstest;

fn sine(len: usize, rate: SampleRate) -> FramesBuffer {
    let data: Vec<Frame> = (0..len)
        .map(|i| {
            let t = i as f32 / rate.get() as f32;
            let s = (t * 440.0 * std::f32::consts::TAU).sin() * 0.5;
            Frame::new(s, s)
        })
        .collect();
    FramesBuffer::new(rate, data)
}

fn count_frames(source: &mut impl Source) -> usize {
    let mut total = 0;
    let mut buf = [Frame::ZERO; 512];
    loop {
        let (filled, more) = source.stream(&mut buf);
        total += filled;
        if !more {
            return total;
        }
    }
}

#[rstest]
#[case(44100, 22050)]
#[case(22050, 44100)]
#[case(44100, 48000)]
#[case(48000, 44100)]
#[case(8000, 192000)]
fn output_length_matches_the_rate_ratio(#[case] from: u32, #[case] to: u32) {
    for quality in [1usize, 2, 4] {
        let mut converter =
            sine(1000, nz!(from)).resample(nz!(quality), nz!(from), nz!(to));
        let produced = count_frames(&mut converter) as f64;
        let expected = 1000.0 * to as f64 / from as f64;
        assert!(
            (produced - expected).abs() <= 1.0,
            "{from} -> {to} at quality {quality}: {produced} frames for an expected {expected}"
        );
    }
}

#[test]
fn waveform_survives_an_up_down_round_trip() {
    // 44.1k -> 48k -> 44.1k should come back close to the original away
    // from the stream edges.
    let original = sine(2000, nz!(44100));
    let reference = original.clone();

    let mut chain = original
        .resample(nz!(4), nz!(44100), nz!(48000))
        .resample(nz!(4), nz!(48000), nz!(44100));

    let mut out = Vec::new();
    let mut buf = [Frame::ZERO; 256];
    loop {
        let (filled, more) = chain.stream(&mut buf);
        out.extend_from_slice(&buf[..filled]);
        if !more {
            break;
        }
    }

    let mut expected = Vec::new();
    let mut reference = reference;
    let mut buf = [Frame::ZERO; 256];
    loop {
        let (filled, more) = reference.stream(&mut buf);
        expected.extend_from_slice(&buf[..filled]);
        if !more {
            break;
        }
    }

    for i in 50..1950 {
        assert_relative_eq!(out[i].left, expected[i].left, epsilon = 0.02);
    }
}

#[test]
fn ratio_is_mutable_while_streaming() {
    let mut converter = sine(4000, nz!(44100)).resample(nz!(2), nz!(44100), nz!(44100));
    assert_relative_eq!(converter.ratio(), 1.0);

    let mut buf = [Frame::ZERO; 1000];
    let (filled, _) = converter.stream(&mut buf);
    assert_eq!(filled, 1000);

    // Speed the stream up by a fifth: the remaining 3000 input frames
    // shrink to ~2500 output frames.
    converter.set_ratio(1.0 / 1.2);
    let remaining = count_frames(&mut converter) as f64;
    assert!(
        (remaining - 2500.0).abs() <= 2.0,
        "{remaining} frames after the ratio change"
    );
}
