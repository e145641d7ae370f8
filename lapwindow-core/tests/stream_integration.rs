//! Integration tests for the pull-based windowing adapter
//!
//! The adapter must produce exactly what driving the accumulator by hand
//! produces, in the same order, and then stay at end of stream.

mod common;

use lapwindow_core::stream::{FrameStream, Stream, StreamError, WindowingStream};
use lapwindow_core::WindowError;

use common::{accumulator, collect_stream, numbered_frames};

#[test]
fn adapter_matches_direct_driving() {
    for &(buffer_size, overlap, offset, count) in &[
        (100, 50, 25, 300u64),
        (100, 50, 25, 60),
        (40, 10, 5, 97),
        (10, 2, 3, 33),
    ] {
        let frames = numbered_frames(count, 7);

        let mut direct = accumulator(buffer_size, overlap, offset, true);
        let expected = collect_stream(&mut direct, &frames);

        let mut stream = WindowingStream::new(
            FrameStream::new(&frames),
            accumulator(buffer_size, overlap, offset, true),
        );
        let mut windows = Vec::new();
        let end = loop {
            match stream.poll_next() {
                Ok(window) => windows.push(window),
                Err(e) => break e,
            }
        };

        assert!(matches!(end, nb::Error::Other(StreamError::EndOfStream)));
        assert_eq!(windows.len(), expected.len(), "B={buffer_size} frames={count}");
        for (window, (timestamps, stamp)) in windows.iter().zip(expected.timestamps()) {
            assert_eq!(&window.timestamps, timestamps);
            assert_eq!(window.stamp, *stamp);
        }
        for (window, (batch, _)) in windows.iter().zip(expected.batches()) {
            assert_eq!(window.batch.data(), batch.data());
        }
    }
}

#[test]
fn accumulator_is_drained_after_end() {
    let frames = numbered_frames(20, 1);
    let mut stream = WindowingStream::new(FrameStream::new(&frames), accumulator(100, 50, 25, true));

    while stream.poll_next().is_ok() {}

    let acc = stream.accumulator();
    assert_eq!(acc.frames_received(), 20);
    assert_eq!(acc.windows_emitted(), 1);
    assert!(matches!(
        stream.poll_next(),
        Err(nb::Error::Other(StreamError::EndOfStream))
    ));
}

#[test]
fn source_is_released_at_its_end() {
    let frames = numbered_frames(5, 1);
    let mut stream = WindowingStream::new(FrameStream::new(&frames), accumulator(8, 2, 0, true));

    while stream.poll_next().is_ok() {}

    let source = stream.into_inner();
    assert!(source.is_exhausted());
    assert_eq!(source.position(), 5);
}

#[test]
fn transport_errors_pass_through() {
    struct Broken;

    impl Stream for Broken {
        type Item = lapwindow_core::stream::Frame<lapwindow_core::DenseArray<f32>, u64>;
        type Error = StreamError<&'static str>;

        fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
            Err(nb::Error::Other(StreamError::Transport("link down")))
        }
    }

    let mut stream = WindowingStream::new(Broken, accumulator(100, 50, 25, true));
    match stream.poll_next() {
        Err(nb::Error::Other(StreamError::Transport(reason))) => assert_eq!(reason, "link down"),
        other => panic!("unexpected poll result: {:?}", other.map(|w| w.stamp)),
    }
    // A transport error is not the end: the accumulator is still live
    assert!(!matches!(
        stream.poll_next(),
        Err(nb::Error::Other(StreamError::Window(WindowError::Finalized)))
    ));
    assert_eq!(stream.accumulator().windows_emitted(), 0);
}
