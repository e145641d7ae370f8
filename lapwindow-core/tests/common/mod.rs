//! Shared helpers for the integration tests
//!
//! - Frame generators with distinguishable contents
//! - A sink that records the exact channel order
//! - Drivers that push a whole stream through an accumulator

#![allow(dead_code)]

use std::sync::Arc;

use lapwindow_core::{
    DenseArray, Tensor, WindowAccumulator, WindowCollector, WindowConfig, WindowSink,
};

/// Frame height used by the generators
pub const FRAME_ROWS: usize = 2;

/// Frame width used by the generators
pub const FRAME_COLS: usize = 3;

pub type TestAccumulator = WindowAccumulator<DenseArray<f32>, u64>;

/// Frame whose every element equals `value`
pub fn frame(value: f32) -> DenseArray<f32> {
    DenseArray::filled(&[FRAME_ROWS, FRAME_COLS], value).expect("valid frame dims")
}

/// `count` frames, frame `t` filled with `t` and stamped `t * step`
pub fn numbered_frames(count: u64, step: u64) -> Vec<(Arc<DenseArray<f32>>, u64)> {
    (0..count)
        .map(|t| (Arc::new(frame(t as f32)), t * step))
        .collect()
}

pub fn accumulator(
    buffer_size: usize,
    overlap: usize,
    timestamp_offset: usize,
    add_batch_dim: bool,
) -> TestAccumulator {
    let config = WindowConfig::new(buffer_size, overlap, timestamp_offset, add_batch_dim)
        .expect("valid test config");
    WindowAccumulator::new(config).expect("accumulator construction")
}

/// One event observed on a sink
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// Primary channel: leading axis length and emission stamp
    Batch { leading: usize, stamp: u64 },
    /// Secondary channel: timestamps and emission stamp
    Timestamps { timestamps: Vec<u64>, stamp: u64 },
}

/// Sink recording both channels into a single ordered log
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<ChannelEvent>,
}

impl RecordingSink {
    /// Timestamp lists in emission order
    pub fn timestamp_lists(&self) -> Vec<&Vec<u64>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ChannelEvent::Timestamps { timestamps, .. } => Some(timestamps),
                _ => None,
            })
            .collect()
    }

    /// Number of complete windows
    pub fn windows(&self) -> usize {
        self.timestamp_lists().len()
    }
}

impl WindowSink<DenseArray<f32>, u64> for RecordingSink {
    fn emit_batch(&mut self, batch: Arc<DenseArray<f32>>, stamp: u64) {
        self.events.push(ChannelEvent::Batch {
            leading: batch.shape()[0],
            stamp,
        });
    }

    fn emit_timestamps(&mut self, timestamps: Vec<u64>, stamp: u64) {
        self.events.push(ChannelEvent::Timestamps { timestamps, stamp });
    }
}

/// Feeds every frame and finalizes; returns the windows emitted by each call
pub fn run_stream<K>(
    acc: &mut TestAccumulator,
    frames: &[(Arc<DenseArray<f32>>, u64)],
    sink: &mut K,
) -> Vec<usize>
where
    K: WindowSink<DenseArray<f32>, u64>,
{
    let mut emitted: Vec<usize> = frames
        .iter()
        .map(|(frame, stamp)| {
            acc.on_frame(Arc::clone(frame), *stamp, sink)
                .expect("frame accepted")
        })
        .collect();
    emitted.push(acc.on_finalize(sink).expect("finalize succeeds"));
    emitted
}

/// Convenience: run a stream into a fresh collector
pub fn collect_stream(
    acc: &mut TestAccumulator,
    frames: &[(Arc<DenseArray<f32>>, u64)],
) -> WindowCollector<DenseArray<f32>, u64> {
    let mut collector = WindowCollector::new();
    run_stream(acc, frames, &mut collector);
    collector
}
