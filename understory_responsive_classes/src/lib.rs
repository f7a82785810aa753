// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_responsive_classes --heading-base-level=0

//! Understory Responsive Classes: breakpoint-driven class directives for element trees.
//!
//! ## Overview
//!
//! Authors declare, with attributes, which class an element should carry at each breakpoint:
//!
//! ```text
//! <div rc-cols="1" rc-gt-sm-cols="2" rc-lg-cols="4" rc-xs-hidden>
//! ```
//!
//! - `rc-<state>="v"` sets the state's default class (`state-v`, or `state` for an empty value).
//! - `rc-<bp>-<state>="v"` applies at breakpoint `bp` only.
//! - `rc-gt-<bp>-<state>="v"` applies at `bp` and every higher breakpoint, until another
//!   `gt-` directive for the same state takes over.
//!
//! A [`Monitor`] watches a tree through a [`TreeAdapter`], resolves each directive-bearing
//! element into a class list per breakpoint, and when the current breakpoint changes swaps the
//! departing breakpoint's classes for the arriving one's. Edits are queued and applied in one
//! batch per frame via [`Monitor::run_frame`], after the host's [`Scheduler`] was asked for a flush.
//!
//! ## Layers
//!
//! - [`directive`]: parse `rc-*` attributes against the ordered breakpoint codes.
//! - [`resolve`]: turn one state's directives into a class per breakpoint.
//! - [`store`]: resolved classes keyed by [`TrackingId`] and breakpoint code.
//! - [`queue`]: ordered add/remove edits, flushed through the adapter.
//! - [`Monitor`]: tracking, mutation handling, transitions, and lifecycle.
//!
//! Breakpoints come from an [`understory_breakpoints::BreakpointProvider`].
//! With the `element_tree_adapter` feature, `understory_element_tree::Document` implements
//! [`TreeAdapter`] and [`ChangeFeed`].
//!
//! ## Resolution example
//!
//! ```
//! use understory_responsive_classes::directive::parse_directives;
//! use understory_responsive_classes::resolve::resolve_element;
//!
//! let codes = ["xs", "sm", "md", "lg", "xl"];
//! let attrs = [("rc-cols", "1"), ("rc-gt-sm-cols", "2"), ("rc-lg-cols", "4"), ("rc-xs-hidden", "")];
//! let by_breakpoint = resolve_element(&parse_directives(attrs, &codes), codes.len());
//!
//! assert_eq!(by_breakpoint[0], ["cols-1", "hidden"]);
//! assert_eq!(by_breakpoint[2], ["cols-2"]);
//! assert_eq!(by_breakpoint[3], ["cols-4"]);
//! assert_eq!(by_breakpoint[4], ["cols-2"]);
//! ```
//!
//! ## Known gap
//!
//! When a directive's value changes on a tracked element, the classes for the new value are
//! added but the classes applied for the old value are not removed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapter;
pub mod adapters;
pub mod directive;
pub mod queue;
pub mod resolve;
pub mod store;

mod monitor;
mod transition;
mod watcher;

#[cfg(test)]
mod testing;

pub use adapter::{AttributeChange, ChangeFeed, MutationBatch, Scheduler, TreeAdapter};
pub use monitor::{BreakpointEvent, Monitor};
pub use store::{ElementStateStore, TrackingId};
