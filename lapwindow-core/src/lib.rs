//! Padded, lapped windowing of frame streams
//!
//! Collects a stream of fixed-shape frames into fixed-size windows that may
//! overlap, and pads the stream edges with replicas of the first and last frame
//! so that models needing symmetric context get complete windows everywhere.
//!
//! Key constraints:
//! - Single caller, strictly sequential: `on_frame` per observation, one
//!   `on_finalize` at the end
//! - Frames are shared `Arc` handles; buffering never deep-copies
//! - Every window carries exactly `buffer_size` timestamps
//!
//! ```no_run
//! use lapwindow_core::{DenseArray, WindowAccumulator, WindowCollector, WindowConfig};
//!
//! let config = WindowConfig::new(100, 50, 25, true)?;
//! let mut accumulator: WindowAccumulator<DenseArray> = WindowAccumulator::new(config)?;
//! let mut sink = WindowCollector::new();
//!
//! for t in 0..500u64 {
//!     let frame = DenseArray::filled(&[27, 48, 3], 0.0f32)?;
//!     accumulator.on_frame(frame, t, &mut sink)?;
//! }
//! accumulator.on_finalize(&mut sink)?;
//!
//! for window in sink.drain_windows() {
//!     // window.batch has shape [100, 27, 48, 3]
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod accumulator;
pub mod buffer;
pub mod config;
pub mod errors;
pub mod stream;
pub mod tensor;
pub mod window;

// Public API
pub use accumulator::{AccumulatorState, WindowAccumulator};
pub use config::{OptionOverrides, WindowConfig, WindowOptions, LEADING_PAD_COUNT};
pub use errors::{RangeError, ShapeError, WindowError, WindowResult};
pub use tensor::{DenseArray, Shape, Tensor};
pub use window::{Timestamp, Window, WindowCollector, WindowSink};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
