//! Memory-based frame stream for testing and replay

use super::{Frame, Stream, StreamError};

/// Replays a slice of frames in order, then reports `EndOfStream`
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use lapwindow_core::DenseArray;
/// use lapwindow_core::stream::{FrameStream, Stream};
///
/// let frames: Vec<_> = (0..3u64)
///     .map(|t| (Arc::new(DenseArray::filled(&[2], t as f32).unwrap()), t))
///     .collect();
///
/// let mut stream = FrameStream::new(&frames);
/// while let Ok((frame, stamp)) = stream.poll_next() {
///     assert_eq!(frame.data()[0], stamp as f32);
/// }
/// ```
pub struct FrameStream<'a, A, S> {
    /// Frames to replay
    frames: &'a [Frame<A, S>],
    /// Current position
    position: usize,
}

impl<'a, A, S> FrameStream<'a, A, S> {
    /// Create new frame stream from slice
    pub fn new(frames: &'a [Frame<A, S>]) -> Self {
        Self {
            frames,
            position: 0,
        }
    }

    /// Reset to beginning
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if stream is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.frames.len()
    }
}

impl<'a, A, S: Clone> Stream for FrameStream<'a, A, S> {
    type Item = Frame<A, S>;
    type Error = StreamError<()>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        let (frame, stamp) = self
            .frames
            .get(self.position)
            .ok_or(nb::Error::Other(StreamError::EndOfStream))?;
        self.position += 1;
        Ok((frame.clone(), stamp.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frames.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    #[test]
    fn replays_in_order() {
        let frames: Vec<Frame<u8, u64>> = (0..2u8).map(|v| (Arc::new(v), v as u64 * 40)).collect();
        let mut stream = FrameStream::new(&frames);

        assert_eq!(stream.size_hint(), (2, Some(2)));

        let (frame, stamp) = stream.poll_next().unwrap();
        assert_eq!((*frame, stamp), (0, 0));
        assert_eq!(stream.size_hint(), (1, Some(1)));

        let (frame, stamp) = stream.poll_next().unwrap();
        assert_eq!((*frame, stamp), (1, 40));

        assert!(stream.is_exhausted());
        assert!(matches!(
            stream.poll_next(),
            Err(nb::Error::Other(StreamError::EndOfStream))
        ));
    }

    #[test]
    fn reset_rewinds() {
        let frames: Vec<Frame<u8, u64>> = alloc::vec![(Arc::new(9), 1)];
        let mut stream = FrameStream::new(&frames);

        stream.poll_next().unwrap();
        assert!(stream.is_exhausted());

        stream.reset();
        assert_eq!(stream.position(), 0);
        assert!(stream.poll_next().is_ok());
    }
}
