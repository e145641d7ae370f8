//! Window configuration
//!
//! Options arrive in two layers. [`WindowOptions`] holds the static values a
//! deployment ships with; [`OptionOverrides`] carries values supplied when the
//! stream is opened, which win whenever they are present. Resolution produces a
//! validated [`WindowConfig`], the only form the accumulator accepts.
//!
//! Raw values are signed so that a negative `timestamp_offset` coming from a
//! config file can be reported instead of wrapping around.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{WindowError, WindowResult};

/// Number of first-frame replicas placed ahead of the first real frame
pub const LEADING_PAD_COUNT: usize = 25;

/// Static window options as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct WindowOptions {
    /// Frames per emitted window
    pub buffer_size: i64,
    /// Frames shared by consecutive windows
    pub overlap: i64,
    /// Slot whose timestamp stamps the emitted window
    pub timestamp_offset: i64,
    /// Insert a leading axis of length 1 into every frame before buffering
    pub add_batch_dim: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            buffer_size: 0,
            overlap: 0,
            timestamp_offset: 0,
            add_batch_dim: false,
        }
    }
}

/// Values supplied at stream open time
///
/// `options` replaces the static options wholesale; the individual fields are
/// applied on top of whichever options are in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionOverrides {
    /// Replacement for the static options
    pub options: Option<WindowOptions>,
    /// Override for `buffer_size`
    pub buffer_size: Option<i64>,
    /// Override for `overlap`
    pub overlap: Option<i64>,
    /// Override for `timestamp_offset`
    pub timestamp_offset: Option<i64>,
}

impl OptionOverrides {
    /// Merge with static options, overrides taking precedence
    pub fn apply(&self, base: &WindowOptions) -> WindowOptions {
        let mut merged = self.options.unwrap_or(*base);
        if let Some(buffer_size) = self.buffer_size {
            merged.buffer_size = buffer_size;
        }
        if let Some(overlap) = self.overlap {
            merged.overlap = overlap;
        }
        if let Some(timestamp_offset) = self.timestamp_offset {
            merged.timestamp_offset = timestamp_offset;
        }
        merged
    }
}

/// Validated window configuration
///
/// Invariants, checked by [`WindowConfig::new`]:
/// - `buffer_size > 0`
/// - `overlap < buffer_size`
/// - `timestamp_offset < buffer_size`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WindowConfig {
    buffer_size: usize,
    overlap: usize,
    timestamp_offset: usize,
    add_batch_dim: bool,
}

impl WindowConfig {
    /// Validate and build a configuration
    pub fn new(
        buffer_size: usize,
        overlap: usize,
        timestamp_offset: usize,
        add_batch_dim: bool,
    ) -> WindowResult<Self> {
        if buffer_size == 0 {
            return Err(WindowError::InvalidConfig {
                reason: "buffer_size must be positive",
            });
        }
        if overlap >= buffer_size {
            return Err(WindowError::InvalidConfig {
                reason: "overlap must be smaller than buffer_size",
            });
        }
        if timestamp_offset >= buffer_size {
            return Err(WindowError::InvalidConfig {
                reason: "timestamp_offset must be smaller than buffer_size",
            });
        }

        Ok(Self {
            buffer_size,
            overlap,
            timestamp_offset,
            add_batch_dim,
        })
    }

    /// Validate raw options
    pub fn from_options(options: &WindowOptions) -> WindowResult<Self> {
        let buffer_size = usize::try_from(options.buffer_size).map_err(|_| {
            WindowError::InvalidConfig {
                reason: "buffer_size must be positive",
            }
        })?;
        let overlap = usize::try_from(options.overlap).map_err(|_| WindowError::InvalidConfig {
            reason: "overlap must not be negative",
        })?;
        let timestamp_offset =
            usize::try_from(options.timestamp_offset).map_err(|_| WindowError::InvalidConfig {
                reason: "timestamp_offset must not be negative",
            })?;

        Self::new(buffer_size, overlap, timestamp_offset, options.add_batch_dim)
    }

    /// Resolve static options against open-time overrides
    pub fn resolve(options: &WindowOptions, overrides: &OptionOverrides) -> WindowResult<Self> {
        Self::from_options(&overrides.apply(options))
    }

    /// Frames per emitted window
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Frames shared by consecutive windows
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Slot whose timestamp stamps the emitted window
    pub fn timestamp_offset(&self) -> usize {
        self.timestamp_offset
    }

    /// Whether frames get a leading axis before buffering
    pub fn add_batch_dim(&self) -> bool {
        self.add_batch_dim
    }

    /// Real frames between consecutive emissions in steady state
    pub fn cadence(&self) -> usize {
        self.buffer_size - self.overlap
    }
}
