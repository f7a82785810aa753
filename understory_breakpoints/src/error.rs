// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by breakpoint registration and detection.

use alloc::string::String;

/// Fatal breakpoint configuration errors.
///
/// These are raised at the call site; the provider never recovers from them internally.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BreakpointError {
    /// A width matched no registered breakpoint, so the configured ranges leave a gap.
    #[error("incomplete breakpoint definition: no breakpoint covers width {width}")]
    IncompleteDefinition {
        /// The width that could not be placed.
        width: f64,
    },
    /// A breakpoint has neither a non-negative `min` nor a non-negative `max`.
    #[error("invalid breakpoint definition `{code}`: at least one of min or max must be a non-negative number")]
    InvalidDefinition {
        /// Code of the offending entry.
        code: String,
    },
    /// A breakpoint code is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid breakpoint code `{code}`")]
    InvalidCode {
        /// The rejected code.
        code: String,
    },
    /// The same code appears more than once in one configuration.
    #[error("duplicate breakpoint code `{code}`")]
    DuplicateCode {
        /// The repeated code.
        code: String,
    },
}
