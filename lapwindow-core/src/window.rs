//! Emitted windows and the two-channel output sink
//!
//! Every window leaves the accumulator on two channels in a fixed order: the
//! batched array first, then the list of buffered timestamps. Both carry the
//! same emission timestamp. A [`WindowSink`] receives them; what happens next
//! (queueing, transport, inference) belongs to the host.

use alloc::sync::Arc;
use alloc::vec::Vec;

/// Default stream position type
pub type Timestamp = u64;

/// One complete window, both channels paired
#[derive(Debug, Clone, PartialEq)]
pub struct Window<A, S = Timestamp> {
    /// Buffered frames concatenated along axis 0
    pub batch: Arc<A>,
    /// Timestamps of the buffered frames, oldest first
    pub timestamps: Vec<S>,
    /// Emission timestamp shared by both channels
    pub stamp: S,
}

impl<A, S> Window<A, S> {
    /// Number of slots in the window
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True for a window without slots (never produced by the accumulator)
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Receiver for emitted windows
///
/// The accumulator calls `emit_batch` and then `emit_timestamps` for each
/// window, with nothing in between.
pub trait WindowSink<A, S> {
    /// Primary channel: the batched array
    fn emit_batch(&mut self, batch: Arc<A>, stamp: S);

    /// Secondary channel: the buffered timestamps
    fn emit_timestamps(&mut self, timestamps: Vec<S>, stamp: S);
}

/// Sink that records both channels in memory
#[derive(Debug, Clone)]
pub struct WindowCollector<A, S = Timestamp> {
    batches: Vec<(Arc<A>, S)>,
    timestamps: Vec<(Vec<S>, S)>,
}

impl<A, S> WindowCollector<A, S> {
    /// Empty collector
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
            timestamps: Vec::new(),
        }
    }

    /// Primary channel contents in emission order
    pub fn batches(&self) -> &[(Arc<A>, S)] {
        &self.batches
    }

    /// Secondary channel contents in emission order
    pub fn timestamps(&self) -> &[(Vec<S>, S)] {
        &self.timestamps
    }

    /// Number of complete windows received
    pub fn len(&self) -> usize {
        self.batches.len().min(self.timestamps.len())
    }

    /// Check if nothing was received on either channel
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty() && self.timestamps.is_empty()
    }

    /// Pair both channels into windows, leaving the collector empty
    pub fn drain_windows(&mut self) -> Vec<Window<A, S>> {
        let batches = core::mem::take(&mut self.batches);
        let timestamps = core::mem::take(&mut self.timestamps);

        batches
            .into_iter()
            .zip(timestamps)
            .map(|((batch, stamp), (timestamps, _))| Window {
                batch,
                timestamps,
                stamp,
            })
            .collect()
    }
}

impl<A, S> Default for WindowCollector<A, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, S> WindowSink<A, S> for WindowCollector<A, S> {
    fn emit_batch(&mut self, batch: Arc<A>, stamp: S) {
        self.batches.push((batch, stamp));
    }

    fn emit_timestamps(&mut self, timestamps: Vec<S>, stamp: S) {
        self.timestamps.push((timestamps, stamp));
    }
}
