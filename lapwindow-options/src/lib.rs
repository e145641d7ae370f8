//! Options, side values and named constructors for lapwindow
//!
//! ## Overview
//!
//! `lapwindow-core` only accepts a validated [`WindowConfig`]. This crate is
//! the layer that gets there from the outside world:
//!
//! 1. **Static options** come from JSON, either a string ([`parse_options`])
//!    or a file on disk ([`load_options`]).
//! 2. **Side values** ([`SideValues`]) are tagged values supplied when a stream
//!    is opened. They win over the static options whenever present.
//! 3. **Named constructors** ([`registry`]) turn a name plus both layers into
//!    a ready accumulator, so hosts can pick a window flavour from config.
//!
//! ## Example
//!
//! ```rust
//! use lapwindow_options::{create, parse_options, SideValue, SideValues, tags};
//!
//! let options = parse_options(r#"{ "buffer_size": 100, "overlap": 50, "timestamp_offset": 25 }"#)?;
//!
//! let mut side = SideValues::new();
//! side.insert(tags::OVERLAP, SideValue::Int(20))?;
//!
//! let accumulator = create("pad_lapped_window", &options, &side)?;
//! assert_eq!(accumulator.config().overlap(), 20);
//! # Ok::<(), lapwindow_options::OptionsError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::fs;
use std::path::Path;

use lapwindow_core::{WindowConfig, WindowError, WindowOptions};
use thiserror_no_std::Error;

pub mod registry;
pub mod side;

pub use registry::{create, names, Constructor, FrameAccumulator};
pub use side::{tags, SideValue, SideValues};

/// Result type for option handling
pub type OptionsResult<T> = Result<T, OptionsError>;

/// Errors raised while loading options or building accumulators
#[derive(Error, Debug)]
pub enum OptionsError {
    /// No constructor registered under the requested name
    #[error("Unknown constructor: {0}")]
    UnknownConstructor(String),

    /// Side value tag outside the recognised set
    #[error("Unknown side value tag: {0}")]
    UnknownTag(String),

    /// Side value of the wrong kind for its tag
    #[error("Side value {tag} expects {expected}")]
    TagType {
        /// Offending tag
        tag: String,
        /// Kind of value the tag takes
        expected: &'static str,
    },

    /// Malformed JSON or unknown option field
    #[error("Failed to parse options: {0}")]
    Parse(#[from] serde_json::Error),

    /// Options file could not be read
    #[error("Failed to read options: {0}")]
    Io(#[from] std::io::Error),

    /// Resolved options rejected by the accumulator
    #[error("{0}")]
    Window(#[from] WindowError),
}

/// Parse static options from JSON
///
/// Missing fields take their defaults; unknown fields are an error.
pub fn parse_options(json: &str) -> OptionsResult<WindowOptions> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse static options from a JSON file
pub fn load_options<P: AsRef<Path>>(path: P) -> OptionsResult<WindowOptions> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    log::debug!("Loaded window options from {}", path.display());
    parse_options(&json)
}

/// Resolve static options against side values and validate the result
pub fn resolve(options: &WindowOptions, side: &SideValues) -> OptionsResult<WindowConfig> {
    Ok(WindowConfig::resolve(options, &side.overrides())?)
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
