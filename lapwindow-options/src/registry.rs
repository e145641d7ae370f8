//! Named accumulator constructors
//!
//! A host that picks its windowing from configuration names a constructor
//! instead of building a [`WindowConfig`] itself. The table is built once on
//! first access and never changes afterwards.

use std::collections::HashMap;

use lapwindow_core::{DenseArray, Timestamp, WindowAccumulator, WindowConfig, WindowOptions};

use crate::{OptionsError, OptionsResult, SideValues};

/// Accumulator produced by the registry
pub type FrameAccumulator = WindowAccumulator<DenseArray<f32>, Timestamp>;

/// Builds an accumulator from static options and side values
pub type Constructor = fn(&WindowOptions, &SideValues) -> OptionsResult<FrameAccumulator>;

/// Options of the `shot_boundary_window` preset
pub const SHOT_BOUNDARY_OPTIONS: WindowOptions = WindowOptions {
    buffer_size: 100,
    overlap: 50,
    timestamp_offset: 25,
    add_batch_dim: true,
};

lazy_static::lazy_static! {
    static ref CONSTRUCTORS: HashMap<&'static str, Constructor> = {
        let mut table: HashMap<&'static str, Constructor> = HashMap::new();
        table.insert("pad_lapped_window", pad_lapped_window);
        table.insert("shot_boundary_window", shot_boundary_window);
        table
    };
}

fn build(options: &WindowOptions, side: &SideValues) -> OptionsResult<FrameAccumulator> {
    let config = WindowConfig::resolve(options, &side.overrides())?;
    Ok(WindowAccumulator::new(config)?)
}

/// Static options as given, side values on top
fn pad_lapped_window(options: &WindowOptions, side: &SideValues) -> OptionsResult<FrameAccumulator> {
    build(options, side)
}

/// Fixed preset in place of the static options, side values on top
fn shot_boundary_window(_: &WindowOptions, side: &SideValues) -> OptionsResult<FrameAccumulator> {
    build(&SHOT_BOUNDARY_OPTIONS, side)
}

/// Build the accumulator registered under `name`
pub fn create(
    name: &str,
    options: &WindowOptions,
    side: &SideValues,
) -> OptionsResult<FrameAccumulator> {
    let constructor = CONSTRUCTORS
        .get(name)
        .ok_or_else(|| OptionsError::UnknownConstructor(name.to_string()))?;

    let accumulator = constructor(options, side)?;
    log::debug!(
        "Created {} (buffer_size={}, overlap={}, timestamp_offset={})",
        name,
        accumulator.config().buffer_size(),
        accumulator.config().overlap(),
        accumulator.config().timestamp_offset()
    );
    Ok(accumulator)
}

/// Registered constructor names, sorted
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = CONSTRUCTORS.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tags, SideValue};
    use lapwindow_core::AccumulatorState;

    fn options(buffer_size: i64, overlap: i64, timestamp_offset: i64) -> WindowOptions {
        WindowOptions {
            buffer_size,
            overlap,
            timestamp_offset,
            add_batch_dim: false,
        }
    }

    #[test]
    fn lists_both_constructors() {
        assert_eq!(names(), vec!["pad_lapped_window", "shot_boundary_window"]);
    }

    #[test]
    fn pad_lapped_uses_given_options() {
        let acc = create("pad_lapped_window", &options(40, 10, 5), &SideValues::new()).unwrap();
        let config = acc.config();
        assert_eq!(config.buffer_size(), 40);
        assert_eq!(config.overlap(), 10);
        assert_eq!(config.timestamp_offset(), 5);
        assert!(!config.add_batch_dim());
        assert_eq!(acc.state(), AccumulatorState::Empty);
    }

    #[test]
    fn shot_boundary_ignores_static_options() {
        let acc = create("shot_boundary_window", &options(7, 1, 0), &SideValues::new()).unwrap();
        let config = acc.config();
        assert_eq!(config.buffer_size(), 100);
        assert_eq!(config.overlap(), 50);
        assert_eq!(config.timestamp_offset(), 25);
        assert!(config.add_batch_dim());
    }

    #[test]
    fn shot_boundary_accepts_side_values() {
        let mut side = SideValues::new();
        side.insert(tags::OVERLAP, SideValue::Int(75)).unwrap();
        let acc = create("shot_boundary_window", &WindowOptions::default(), &side).unwrap();
        assert_eq!(acc.config().overlap(), 75);
        assert_eq!(acc.config().cadence(), 25);
    }

    #[test]
    fn unknown_name_rejected() {
        let err = create("sliding_window", &options(10, 0, 0), &SideValues::new()).unwrap_err();
        assert!(matches!(err, OptionsError::UnknownConstructor(name) if name == "sliding_window"));
    }

    #[test]
    fn invalid_resolution_rejected() {
        let mut side = SideValues::new();
        side.insert(tags::TIMESTAMP_OFFSET, SideValue::Int(40)).unwrap();
        let err = create("pad_lapped_window", &options(40, 10, 5), &side).unwrap_err();
        assert!(matches!(err, OptionsError::Window(_)));
    }
}
