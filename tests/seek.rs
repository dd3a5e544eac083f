//! The seek contract, through bare buffers and through wrapper chains.

use rill::{nz, Frame, FramesBuffer, SeekError, SeekableSource, Source};
use rstest::rstest;

fn ramp(len: usize) -> FramesBuffer {
    let data: Vec<Frame> = (0..len).map(|i| Frame::new(i as f32, 0.0)).collect();
    FramesBuffer::new(nz!(44100), data)
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(50)]
#[case(99)]
#[case(100)]
fn seek_then_position_reports_the_target(#[case] pos: usize) {
    let mut source = ramp(100);
    source.try_seek(pos).unwrap();
    assert_eq!(source.position(), pos);
}

#[rstest]
#[case(101)]
#[case(1000)]
#[case(usize::MAX)]
fn out_of_range_seek_fails_and_changes_nothing(#[case] pos: usize) {
    let mut source = ramp(100);
    let mut buf = [Frame::ZERO; 10];
    source.stream(&mut buf);

    assert!(matches!(
        source.try_seek(pos),
        Err(SeekError::OutOfRange { len: 100, .. })
    ));
    assert_eq!(source.position(), 10);
}

#[test]
fn streaming_resumes_from_the_seek_target() {
    let mut source = ramp(100);
    let mut buf = [Frame::ZERO; 4];

    source.try_seek(40).unwrap();
    source.stream(&mut buf);
    assert_eq!(buf[0].left, 40.0);
    assert_eq!(buf[3].left, 43.0);

    // Seeking backwards replays frames; the only way frames repeat.
    source.try_seek(40).unwrap();
    source.stream(&mut buf);
    assert_eq!(buf[0].left, 40.0);
}

#[test]
fn seeks_pass_through_wrapper_chains() {
    let mut chain = ramp(100).pausable(false).amplify(3.0);
    assert_eq!(chain.len(), 100);

    chain.try_seek(70).unwrap();
    assert_eq!(chain.position(), 70);

    let mut buf = [Frame::ZERO; 4];
    let (filled, more) = chain.stream(&mut buf);
    assert_eq!((filled, more), (4, true));
    assert_eq!(buf[0].left, 70.0);
}

#[test]
fn position_tracks_consumption_exactly() {
    let mut source = ramp(10);
    let mut buf = [Frame::ZERO; 3];

    assert_eq!(source.position(), 0);
    source.stream(&mut buf);
    assert_eq!(source.position(), 3);
    source.stream(&mut buf);
    assert_eq!(source.position(), 6);

    // A drained source sits at its length.
    source.stream(&mut buf);
    source.stream(&mut buf);
    assert_eq!(source.position(), source.len());
}
