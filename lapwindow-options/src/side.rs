//! Side values supplied when a stream is opened
//!
//! A side value is a tagged override. Integer tags replace a single option
//! field; `CALCULATOR_OPTIONS` replaces the static options as a whole, and the
//! integer tags are then applied on top. Tags are checked on insertion, so a
//! populated [`SideValues`] always converts cleanly into
//! [`OptionOverrides`].

use std::collections::HashMap;

use lapwindow_core::{OptionOverrides, WindowOptions};
use serde::Deserialize;

use crate::{OptionsError, OptionsResult};

/// Recognised side value tags
pub mod tags {
    /// Integer override for `buffer_size`
    pub const BUFFER_SIZE: &str = "BUFFER_SIZE";
    /// Integer override for `overlap`
    pub const OVERLAP: &str = "OVERLAP";
    /// Integer override for `timestamp_offset`
    pub const TIMESTAMP_OFFSET: &str = "TIMESTAMP_OFFSET";
    /// Whole replacement for the static options
    pub const CALCULATOR_OPTIONS: &str = "CALCULATOR_OPTIONS";

    /// Every tag accepted by [`SideValues`](super::SideValues)
    pub const ALL: &[&str] = &[BUFFER_SIZE, OVERLAP, TIMESTAMP_OFFSET, CALCULATOR_OPTIONS];
}

/// One side value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SideValue {
    /// Integer field override
    Int(i64),
    /// Replacement options
    Options(WindowOptions),
}

/// Tag to value map of open-time overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideValues {
    values: HashMap<String, SideValue>,
}

impl SideValues {
    /// Empty set: static options apply unchanged
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of tag to value
    ///
    /// ```rust
    /// use lapwindow_options::SideValues;
    ///
    /// let side = SideValues::from_json(r#"{ "OVERLAP": 10, "CALCULATOR_OPTIONS": { "buffer_size": 40 } }"#)?;
    /// let overrides = side.overrides();
    /// assert_eq!(overrides.overlap, Some(10));
    /// assert_eq!(overrides.options.map(|o| o.buffer_size), Some(40));
    /// # Ok::<(), lapwindow_options::OptionsError>(())
    /// ```
    pub fn from_json(json: &str) -> OptionsResult<Self> {
        let raw: HashMap<String, SideValue> = serde_json::from_str(json)?;
        let mut side = Self::new();
        for (tag, value) in raw {
            side.insert(&tag, value)?;
        }
        Ok(side)
    }

    /// Set a side value, replacing any previous value for the tag
    pub fn insert(&mut self, tag: &str, value: SideValue) -> OptionsResult<()> {
        let expected = match tag {
            tags::BUFFER_SIZE | tags::OVERLAP | tags::TIMESTAMP_OFFSET => "an integer",
            tags::CALCULATOR_OPTIONS => "window options",
            _ => return Err(OptionsError::UnknownTag(tag.to_string())),
        };

        let matches = match value {
            SideValue::Int(_) => tag != tags::CALCULATOR_OPTIONS,
            SideValue::Options(_) => tag == tags::CALCULATOR_OPTIONS,
        };
        if !matches {
            return Err(OptionsError::TagType {
                tag: tag.to_string(),
                expected,
            });
        }

        self.values.insert(tag.to_string(), value);
        Ok(())
    }

    /// Value stored under `tag`
    pub fn get(&self, tag: &str) -> Option<&SideValue> {
        self.values.get(tag)
    }

    /// Number of tags set
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no tag is set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overrides to apply on top of the static options
    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            options: match self.get(tags::CALCULATOR_OPTIONS) {
                Some(SideValue::Options(options)) => Some(*options),
                _ => None,
            },
            buffer_size: self.int(tags::BUFFER_SIZE),
            overlap: self.int(tags::OVERLAP),
            timestamp_offset: self.int(tags::TIMESTAMP_OFFSET),
        }
    }

    fn int(&self, tag: &str) -> Option<i64> {
        match self.get(tag) {
            Some(SideValue::Int(value)) => Some(*value),
            _ => None,
        }
    }
}
