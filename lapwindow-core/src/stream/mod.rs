//! Pull-based frame streams
//!
//! The accumulator itself is push-driven. This module wraps it for hosts that
//! pull: a [`Stream`] yields frames, and [`WindowingStream`] turns a frame
//! stream into a stream of complete windows, finalizing automatically when the
//! source reports [`StreamError::EndOfStream`].
//!
//! ## Stream Trait
//!
//! The trait follows the `nb` pattern so it works without an async runtime:
//! - `Ok(item)`: next item ready
//! - `Err(nb::Error::WouldBlock)`: try again later
//! - `Err(nb::Error::Other(e))`: stream error, `EndOfStream` included
//!
//! ## Module Organization
//!
//! - Core trait and errors (this file)
//! - `memory` - replay of in-memory frames
//! - `windowing` - the windowing adapter

use alloc::sync::Arc;
use core::fmt;

use crate::errors::WindowError;

#[cfg(feature = "stream-memory")]
pub mod memory;

#[cfg(feature = "stream-window")]
pub mod windowing;

#[cfg(feature = "stream-memory")]
pub use memory::FrameStream;

#[cfg(feature = "stream-window")]
pub use windowing::WindowingStream;

/// One observation: shared frame handle plus its stream position
pub type Frame<A, S> = (Arc<A>, S);

/// Errors that can occur during stream processing
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError<E> {
    /// Transport-level error from the frame source
    Transport(E),
    /// The accumulator rejected a frame or failed a window
    Window(WindowError),
    /// More windows pending than the adapter can hold
    Overflow,
    /// End of stream reached
    EndOfStream,
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::Window(e) => write!(f, "Window error: {}", e),
            Self::Overflow => write!(f, "Window queue overflow"),
            Self::EndOfStream => write!(f, "End of stream"),
        }
    }
}

impl<E> From<WindowError> for StreamError<E> {
    fn from(err: WindowError) -> Self {
        Self::Window(err)
    }
}

/// Core stream trait for frame and window sources
///
/// ## Contract
///
/// - `poll_next` must not block indefinitely
/// - `WouldBlock` is normal and may repeat
/// - `EndOfStream` is sticky once reported
pub trait Stream {
    /// Item type produced by the stream
    type Item;

    /// Error type for stream operations
    type Error;

    /// Poll for next item (non-blocking)
    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error>;

    /// Hint about remaining items
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}
