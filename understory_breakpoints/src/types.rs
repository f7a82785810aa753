// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated breakpoints, transitions, and subscription handles.

use alloc::string::String;

/// A validated, registered breakpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoint {
    /// Breakpoint code.
    pub code: String,
    /// Inclusive lower bound, if any. Absent is treated as `0`.
    pub min: Option<f64>,
    /// Inclusive upper bound, if any. Absent is treated as unbounded.
    pub max: Option<f64>,
}

impl Breakpoint {
    /// Effective lower bound.
    pub fn lower(&self) -> f64 {
        self.min.unwrap_or(0.0)
    }

    /// Effective upper bound.
    pub fn upper(&self) -> f64 {
        self.max.unwrap_or(f64::INFINITY)
    }

    /// True if `width` lies within the inclusive range.
    pub fn contains(&self, width: f64) -> bool {
        width >= self.lower() && width <= self.upper()
    }
}

/// A change of the current breakpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Code of the breakpoint now in effect.
    pub new: String,
    /// Code of the breakpoint previously in effect, if one had been detected.
    pub old: Option<String>,
}

/// Handle returned by the provider's `subscribe_*` methods.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);
