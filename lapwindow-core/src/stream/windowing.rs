//! Windowing adapter for frame streams
//!
//! Wraps a frame stream and a [`WindowAccumulator`] into a stream of complete
//! windows. When the source ends, the adapter finalizes the accumulator once,
//! hands out the trailing windows and then reports `EndOfStream` for good.

use heapless::Deque;

use crate::accumulator::WindowAccumulator;
use crate::tensor::Tensor;
use crate::window::{Timestamp, Window, WindowCollector};

use super::{Frame, Stream, StreamError};

/// Most windows a single accumulator call can produce
pub const MAX_PENDING_WINDOWS: usize = 2;

/// Stream adapter yielding complete windows
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use lapwindow_core::{DenseArray, WindowAccumulator, WindowConfig};
/// use lapwindow_core::stream::{FrameStream, Stream, WindowingStream};
///
/// let frames: Vec<_> = (0..60u64)
///     .map(|t| (Arc::new(DenseArray::filled(&[8], 0.0f32).unwrap()), t))
///     .collect();
///
/// let config = WindowConfig::new(100, 50, 25, true).unwrap();
/// let accumulator: WindowAccumulator<DenseArray> = WindowAccumulator::new(config).unwrap();
/// let mut windows = WindowingStream::new(FrameStream::new(&frames), accumulator);
///
/// let mut count = 0;
/// while let Ok(window) = windows.poll_next() {
///     assert_eq!(window.len(), 100);
///     count += 1;
/// }
/// assert_eq!(count, 2);
/// ```
pub struct WindowingStream<St, A, S = Timestamp> {
    /// Frame source
    inner: St,
    /// Window builder
    accumulator: WindowAccumulator<A, S>,
    /// Channel output of the last accumulator call
    collector: WindowCollector<A, S>,
    /// Windows ready to hand out
    ready: Deque<Window<A, S>, MAX_PENDING_WINDOWS>,
    /// Whether the source has ended and the accumulator was finalized
    end_of_stream: bool,
}

impl<St, A: Tensor, S: Clone> WindowingStream<St, A, S> {
    /// Create new windowing stream
    pub fn new(inner: St, accumulator: WindowAccumulator<A, S>) -> Self {
        Self {
            inner,
            accumulator,
            collector: WindowCollector::new(),
            ready: Deque::new(),
            end_of_stream: false,
        }
    }

    /// Accumulator driven by this stream
    pub fn accumulator(&self) -> &WindowAccumulator<A, S> {
        &self.accumulator
    }

    /// Release the frame source
    pub fn into_inner(self) -> St {
        self.inner
    }

    /// Move windows from the collector into the ready queue
    fn stage<E>(&mut self) -> Result<(), StreamError<E>> {
        for window in self.collector.drain_windows() {
            self.ready
                .push_back(window)
                .map_err(|_| StreamError::Overflow)?;
        }
        Ok(())
    }
}

impl<St, A, S, E> Stream for WindowingStream<St, A, S>
where
    St: Stream<Item = Frame<A, S>, Error = StreamError<E>>,
    A: Tensor,
    S: Clone,
{
    type Item = Window<A, S>;
    type Error = StreamError<E>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        loop {
            if let Some(window) = self.ready.pop_front() {
                return Ok(window);
            }

            if self.end_of_stream {
                return Err(nb::Error::Other(StreamError::EndOfStream));
            }

            match self.inner.poll_next() {
                Ok((frame, stamp)) => {
                    self.accumulator
                        .on_frame(frame, stamp, &mut self.collector)
                        .map_err(|e| nb::Error::Other(StreamError::<E>::Window(e)))?;
                    self.stage::<E>().map_err(nb::Error::Other)?;
                }
                Err(nb::Error::WouldBlock) => return Err(nb::Error::WouldBlock),
                Err(nb::Error::Other(StreamError::EndOfStream)) => {
                    self.end_of_stream = true;
                    self.accumulator
                        .on_finalize(&mut self.collector)
                        .map_err(|e| nb::Error::Other(StreamError::<E>::Window(e)))?;
                    self.stage::<E>().map_err(nb::Error::Other)?;
                }
                Err(nb::Error::Other(e)) => return Err(nb::Error::Other(e)),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ready.len(), None)
    }
}
