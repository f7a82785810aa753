// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint configuration: the input to [`BreakpointProvider::register`](crate::BreakpointProvider::register).
//!
//! A configuration is an ordered list of named width ranges.
//! Order matters only for widths that sit exactly on a shared boundary: detection scans
//! entries in the order they were added and the first match wins.

use alloc::string::String;
use alloc::vec::Vec;

/// Raw width bounds for one breakpoint, as supplied by the caller.
///
/// At least one bound must be a non-negative finite number.
/// A bound that is present but negative or non-finite is dropped during registration.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakpointRange {
    /// Inclusive lower bound. Absent means `0`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min: Option<f64>,
    /// Inclusive upper bound. Absent means unbounded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max: Option<f64>,
}

impl BreakpointRange {
    /// A range with both bounds.
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// A range from `min` upwards.
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// A range from `0` up to `max`.
    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

/// One named entry of a [`BreakpointConfig`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakpointEntry {
    /// Breakpoint code used in directive attributes (for example `md`).
    pub code: String,
    /// Width bounds.
    pub range: BreakpointRange,
}

/// Ordered breakpoint configuration.
///
/// ```
/// use understory_breakpoints::{BreakpointConfig, BreakpointRange};
///
/// let config = BreakpointConfig::new()
///     .with("phone", BreakpointRange::at_most(720.0))
///     .with("desk", BreakpointRange::at_least(720.0));
/// assert_eq!(config.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BreakpointConfig {
    entries: Vec<BreakpointEntry>,
}

impl BreakpointConfig {
    /// An empty configuration.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry, builder style.
    #[must_use]
    pub fn with(mut self, code: impl Into<String>, range: BreakpointRange) -> Self {
        self.push(code, range);
        self
    }

    /// Append an entry.
    pub fn push(&mut self, code: impl Into<String>, range: BreakpointRange) {
        self.entries.push(BreakpointEntry {
            code: code.into(),
            range,
        });
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[BreakpointEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The stock set: `xs` up to 600, `sm` 600–960, `md` 960–1280, `lg` 1280–1920, `xl` from 1920.
impl Default for BreakpointConfig {
    fn default() -> Self {
        Self::new()
            .with("xs", BreakpointRange::at_most(600.0))
            .with("sm", BreakpointRange::between(600.0, 960.0))
            .with("md", BreakpointRange::between(960.0, 1280.0))
            .with("lg", BreakpointRange::between(1280.0, 1920.0))
            .with("xl", BreakpointRange::at_least(1920.0))
    }
}

impl<S: Into<String>> FromIterator<(S, BreakpointRange)> for BreakpointConfig {
    fn from_iter<I: IntoIterator<Item = (S, BreakpointRange)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (code, range) in iter {
            config.push(code, range);
        }
        config
    }
}
