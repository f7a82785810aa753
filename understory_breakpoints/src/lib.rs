// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_breakpoints --heading-base-level=0

//! Understory Breakpoints: named viewport-width ranges and current-breakpoint detection.
//!
//! A breakpoint is a named, inclusive width range such as `md = 960..=1280`.
//! The [`BreakpointProvider`] owns one ordered set of breakpoints, detects which one a viewport
//! width falls into, and tells subscribers when the set is replaced or the current breakpoint changes.
//!
//! - Register a set with [`BreakpointProvider::register`]; sets are replaced wholesale, never merged.
//! - Feed widths with [`BreakpointProvider::set_width`] or [`BreakpointProvider::set_viewport`].
//! - Subscribe with [`BreakpointProvider::subscribe_breakpoints`] and [`BreakpointProvider::subscribe_current`];
//!   both return the current value immediately.
//!
//! Errors are fatal and surface as [`BreakpointError`] at the call site.
//! Registration rejects entries without a non-negative bound, malformed codes, and duplicate codes.
//! Gaps are not checked when a set is registered: a width that falls in one fails at detection
//! ([`BreakpointProvider::determine`], [`BreakpointProvider::set_width`], or the re-detection
//! inside [`BreakpointProvider::register`]) with [`BreakpointError::IncompleteDefinition`].
//!
//! ## Minimal usage
//!
//! ```
//! use understory_breakpoints::{BreakpointConfig, BreakpointProvider, BreakpointRange};
//! use kurbo::Size;
//!
//! let config = BreakpointConfig::new()
//!     .with("compact", BreakpointRange::at_most(640.0))
//!     .with("regular", BreakpointRange::at_least(640.0));
//! let mut provider = BreakpointProvider::with_viewport(&config, Size::new(320.0, 480.0)).unwrap();
//! assert_eq!(provider.current(), Some("compact"));
//!
//! let transition = provider.set_width(1024.0).unwrap().unwrap();
//! assert_eq!(transition.new, "regular");
//! assert_eq!(transition.old.as_deref(), Some("compact"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use config::{BreakpointConfig, BreakpointEntry, BreakpointRange};
pub use error::BreakpointError;
pub use provider::BreakpointProvider;
pub use types::{Breakpoint, SubscriptionId, Transition};
