//! Padded, lapped window accumulator
//!
//! ## Overview
//!
//! [`WindowAccumulator`] turns a stream of frames into fixed-size windows of
//! `buffer_size` frames. Consecutive windows share `overlap` frames, and the
//! stream edges are padded so that a model needing look-back and look-ahead
//! context gets a full window for the first and last real frames too:
//!
//! ```text
//! B = 8, V = 4, P = 2 (P shrunk for the drawing)
//!
//! input:       f0 f1 f2 f3 f4 f5 f6 f7 f8
//! window 1:  [f0 f0 f0 f1 f2 f3 f4 f5]          leading pad: f0 twice
//! window 2:              [f2 f3 f4 f5 f6 f7 f8 f8]   trailing pad: last frame
//! ```
//!
//! ## State Machine
//!
//! ```text
//!   Empty ──on_frame──▶ Filling ──on_frame──▶ Filling
//!     │                    │
//!     └────on_finalize─────┴──▶ Drained (terminal)
//! ```
//!
//! - The first frame is buffered `LEADING_PAD_COUNT + 1` times; the initial
//!   countdown of `B - P` accounts for the pre-filled slots.
//! - Every real frame decrements the countdown; reaching zero emits a window and
//!   resets it to `B - V`.
//! - Finalize repeats the newest buffered frame until the window is full and
//!   emits it. Short streams (`V < frames < B - P`) get one more window,
//!   shifted by `V` replicas, so that two overlapping windows exist.
//!
//! ## Emission
//!
//! A window is the concatenation of all `B` buffered frames plus the `B`
//! buffered timestamps. Both are stamped with the timestamp at slot
//! `timestamp_offset`. Any failure (shape mismatch, broken bookkeeping) aborts
//! the window before the sink sees either channel.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::buffer::RingBuffer;
use crate::config::{WindowConfig, LEADING_PAD_COUNT};
use crate::errors::{RangeError, WindowError, WindowResult};
use crate::tensor::Tensor;
use crate::window::{Timestamp, WindowSink};

/// Lifecycle of an accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccumulatorState {
    /// No frame received yet
    Empty,
    /// Buffering frames and emitting on cadence
    Filling,
    /// Finalized; every further call is rejected
    Drained,
}

/// Stateful window builder for a single frame stream
///
/// Driven by one caller: `on_frame` once per observation, then `on_finalize`
/// exactly once. Both take `&mut self`, so calls cannot interleave.
///
/// ## Example
///
/// ```rust
/// use lapwindow_core::{DenseArray, WindowAccumulator, WindowCollector, WindowConfig};
///
/// let config = WindowConfig::new(100, 50, 25, true).unwrap();
/// let mut accumulator: WindowAccumulator<DenseArray> = WindowAccumulator::new(config).unwrap();
/// let mut sink = WindowCollector::new();
///
/// for t in 0..75u64 {
///     let frame = DenseArray::filled(&[4], t as f32).unwrap();
///     accumulator.on_frame(frame, t, &mut sink).unwrap();
/// }
/// assert_eq!(sink.len(), 1);
///
/// accumulator.on_finalize(&mut sink).unwrap();
/// assert_eq!(sink.len(), 2);
/// ```
#[derive(Debug)]
pub struct WindowAccumulator<A, S = Timestamp> {
    config: WindowConfig,
    frames: RingBuffer<Arc<A>>,
    timestamps: RingBuffer<S>,
    /// Real frames left before the next emission; negative only before the
    /// first frame when `B < P`
    countdown: isize,
    frames_received: usize,
    windows_emitted: usize,
    state: AccumulatorState,
}

impl<A: Tensor, S: Clone> WindowAccumulator<A, S> {
    /// Create an accumulator for a validated configuration
    pub fn new(config: WindowConfig) -> WindowResult<Self> {
        let frames = RingBuffer::new(config.buffer_size())?;
        let timestamps = RingBuffer::new(config.buffer_size())?;

        log_debug!(
            "window accumulator: buffer_size={} overlap={} timestamp_offset={} add_batch_dim={}",
            config.buffer_size(),
            config.overlap(),
            config.timestamp_offset(),
            config.add_batch_dim()
        );

        Ok(Self {
            config,
            frames,
            timestamps,
            countdown: config.buffer_size() as isize - LEADING_PAD_COUNT as isize,
            frames_received: 0,
            windows_emitted: 0,
            state: AccumulatorState::Empty,
        })
    }

    /// Buffer one frame, emitting a window when the cadence expires
    ///
    /// Returns the number of windows emitted by this call (0 or 1).
    pub fn on_frame<K>(
        &mut self,
        frame: impl Into<Arc<A>>,
        timestamp: S,
        sink: &mut K,
    ) -> WindowResult<usize>
    where
        K: WindowSink<A, S> + ?Sized,
    {
        if self.state == AccumulatorState::Drained {
            return Err(WindowError::Finalized);
        }

        let mut frame = frame.into();
        if self.config.add_batch_dim() {
            frame = Arc::new(frame.insert_leading_axis()?);
        }

        if self.frames_received == 0 {
            self.pad(&frame, &timestamp, LEADING_PAD_COUNT);
            self.state = AccumulatorState::Filling;
        }

        self.push(frame, timestamp);
        self.frames_received += 1;
        self.countdown -= 1;

        if self.countdown <= 0 {
            self.emit(sink)?;
            return Ok(1);
        }
        Ok(0)
    }

    /// Flush the trailing partial window
    ///
    /// Pads with the newest buffered frame and its timestamp. Returns the number
    /// of windows emitted (0 for an empty stream, otherwise 1 or 2).
    pub fn on_finalize<K>(&mut self, sink: &mut K) -> WindowResult<usize>
    where
        K: WindowSink<A, S> + ?Sized,
    {
        self.finalize(None, sink)
    }

    /// Like [`on_finalize`](Self::on_finalize), but trailing pad slots carry
    /// `closing` as their timestamp
    pub fn on_finalize_at<K>(&mut self, closing: S, sink: &mut K) -> WindowResult<usize>
    where
        K: WindowSink<A, S> + ?Sized,
    {
        self.finalize(Some(closing), sink)
    }

    /// Current configuration
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> AccumulatorState {
        self.state
    }

    /// Real frames received so far
    pub fn frames_received(&self) -> usize {
        self.frames_received
    }

    /// Windows emitted so far
    pub fn windows_emitted(&self) -> usize {
        self.windows_emitted
    }

    /// Real frames left before the next cadence emission
    pub fn countdown(&self) -> isize {
        self.countdown
    }

    /// Occupied slots, padding included
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn finalize<K>(&mut self, closing: Option<S>, sink: &mut K) -> WindowResult<usize>
    where
        K: WindowSink<A, S> + ?Sized,
    {
        if self.state == AccumulatorState::Drained {
            return Err(WindowError::Finalized);
        }
        self.state = AccumulatorState::Drained;

        if self.frames_received == 0 {
            log_debug!("finalize on empty stream, nothing to emit");
            return Ok(0);
        }

        let empty = RangeError { index: 0, len: 0 };
        let pad_frame = self.frames.last().cloned().ok_or(empty)?;
        let pad_stamp = match closing {
            Some(stamp) => stamp,
            None => self.timestamps.last().cloned().ok_or(empty)?,
        };

        let remaining = self.countdown.max(0) as usize;
        self.pad(&pad_frame, &pad_stamp, remaining);
        self.emit(sink)?;
        let mut emitted = 1;

        // Short streams get a second window so that two overlapping windows exist.
        let overlap = self.config.overlap();
        let received = self.frames_received;
        let short_limit = self.config.buffer_size() as isize - LEADING_PAD_COUNT as isize;
        if overlap < received && (received as isize) < short_limit {
            self.pad(&pad_frame, &pad_stamp, overlap);
            self.emit(sink)?;
            emitted += 1;
        }

        log_debug!(
            "finalized after {} frames, {} windows emitted",
            self.frames_received,
            self.windows_emitted
        );
        Ok(emitted)
    }

    fn push(&mut self, frame: Arc<A>, timestamp: S) {
        self.frames.push_back(frame);
        self.timestamps.push_back(timestamp);
    }

    fn pad(&mut self, frame: &Arc<A>, timestamp: &S, count: usize) {
        for _ in 0..count {
            self.push(Arc::clone(frame), timestamp.clone());
        }
    }

    fn emit<K>(&mut self, sink: &mut K) -> WindowResult<()>
    where
        K: WindowSink<A, S> + ?Sized,
    {
        let buffer_size = self.config.buffer_size();
        self.countdown = self.config.cadence() as isize;

        let parts: Vec<Arc<A>> = self.frames.iter().cloned().collect();
        let batch = A::concat(&parts).map_err(|err| {
            log_warn!("dropping window {}: {}", self.windows_emitted + 1, err);
            WindowError::Shape(err)
        })?;

        let stamp = self.timestamps.get(self.config.timestamp_offset())?.clone();
        let timestamps: Vec<S> = self.timestamps.iter().cloned().collect();
        if timestamps.len() != buffer_size {
            return Err(WindowError::TimestampCount {
                expected: buffer_size,
                actual: timestamps.len(),
            });
        }

        sink.emit_batch(Arc::new(batch), stamp.clone());
        sink.emit_timestamps(timestamps, stamp);
        self.windows_emitted += 1;

        log_trace!(
            "window {} emitted after {} frames",
            self.windows_emitted,
            self.frames_received
        );
        Ok(())
    }
}
