// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The breakpoint provider: registration, detection, and subscriptions.
//!
//! ## Ordering
//!
//! [`BreakpointProvider::codes`] lists codes ascending by lower bound (absent `min` counts as `0`).
//! Equal lower bounds keep registration order.
//!
//! ## Detection
//!
//! [`BreakpointProvider::determine`] scans breakpoints in registration order and returns the
//! first whose inclusive range contains the width. A width on a boundary shared by two
//! breakpoints therefore belongs to the one registered first.
//!
//! ## Notifications
//!
//! Handlers run synchronously, in subscription order, from inside the call that caused the change.
//! Set handlers run on every successful [`register`](BreakpointProvider::register).
//! Current handlers run only when the detected code actually changes.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;

use crate::config::BreakpointConfig;
use crate::error::BreakpointError;
use crate::types::{Breakpoint, SubscriptionId, Transition};

type SetHandler = Box<dyn FnMut(&[String])>;
type CurrentHandler = Box<dyn FnMut(&str, Option<&str>)>;

/// Owns the registered breakpoints and the current breakpoint.
pub struct BreakpointProvider {
    // Registration order; detection scans this.
    registered: Vec<Breakpoint>,
    // Indices into `registered`, ascending by lower bound.
    order: Vec<usize>,
    current: Option<usize>,
    width: Option<f64>,
    next_subscription: u64,
    set_handlers: Vec<(SubscriptionId, SetHandler)>,
    current_handlers: Vec<(SubscriptionId, CurrentHandler)>,
}

impl core::fmt::Debug for BreakpointProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BreakpointProvider")
            .field("codes", &self.codes())
            .field("current", &self.current())
            .field("width", &self.width)
            .field("set_handlers", &self.set_handlers.len())
            .field("current_handlers", &self.current_handlers.len())
            .finish_non_exhaustive()
    }
}

/// A provider with the stock breakpoints and no detected width.
impl Default for BreakpointProvider {
    fn default() -> Self {
        let mut provider = Self::empty();
        provider.install(validate(&BreakpointConfig::default()).unwrap_or_default());
        provider
    }
}

impl BreakpointProvider {
    fn empty() -> Self {
        Self {
            registered: Vec::new(),
            order: Vec::new(),
            current: None,
            width: None,
            next_subscription: 1,
            set_handlers: Vec::new(),
            current_handlers: Vec::new(),
        }
    }

    /// Create a provider from `config`. No width is known yet, so there is no current breakpoint.
    pub fn new(config: &BreakpointConfig) -> Result<Self, BreakpointError> {
        let mut provider = Self::empty();
        provider.install(validate(config)?);
        Ok(provider)
    }

    /// Create a provider from `config` and detect the current breakpoint from `viewport`.
    pub fn with_viewport(config: &BreakpointConfig, viewport: Size) -> Result<Self, BreakpointError> {
        let mut provider = Self::new(config)?;
        provider.set_viewport(viewport)?;
        Ok(provider)
    }

    /// Replace the breakpoint set wholesale.
    ///
    /// Every entry is validated before anything changes. On success, set subscribers are
    /// notified with the new ordered codes, then, if a width is known, the current breakpoint
    /// is detected again and current subscribers are notified if it changed.
    /// The re-detection can fail with [`BreakpointError::IncompleteDefinition`] after the new
    /// set is already in place; the current breakpoint is then unknown until the next
    /// successful [`set_width`](Self::set_width).
    pub fn register(&mut self, config: &BreakpointConfig) -> Result<(), BreakpointError> {
        let breakpoints = validate(config)?;
        let previous = self.current_code_owned();
        self.install(breakpoints);
        self.current = None;

        let codes = self.codes();
        tracing::debug!(?codes, "registered breakpoints");
        for (_, handler) in &mut self.set_handlers {
            handler(&codes);
        }

        if let Some(width) = self.width {
            let idx = self.position(width)?;
            self.enter(idx, previous);
        }
        Ok(())
    }

    /// Registered breakpoints in ascending order.
    pub fn breakpoints(&self) -> impl Iterator<Item = &Breakpoint> + '_ {
        self.order.iter().map(|&i| &self.registered[i])
    }

    /// Registered codes in ascending order.
    pub fn codes(&self) -> Vec<String> {
        self.breakpoints().map(|b| b.code.clone()).collect()
    }

    /// Code of the current breakpoint, if a width has been detected.
    pub fn current(&self) -> Option<&str> {
        self.current.map(|i| self.registered[i].code.as_str())
    }

    /// The last width passed to [`set_width`](Self::set_width), if any.
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    /// Find the breakpoint containing `width`.
    pub fn determine(&self, width: f64) -> Result<&Breakpoint, BreakpointError> {
        self.position(width).map(|i| &self.registered[i])
    }

    /// Detect the breakpoint for a viewport's width. See [`set_width`](Self::set_width).
    pub fn set_viewport(&mut self, viewport: Size) -> Result<Option<Transition>, BreakpointError> {
        self.set_width(viewport.width)
    }

    /// Detect the breakpoint for `width`, making it current.
    ///
    /// Returns the transition when the current code changed, after notifying current subscribers.
    /// On error nothing changes.
    pub fn set_width(&mut self, width: f64) -> Result<Option<Transition>, BreakpointError> {
        let idx = self.position(width)?;
        self.width = Some(width);
        if self.current == Some(idx) {
            return Ok(None);
        }
        let previous = self.current_code_owned();
        Ok(self.enter(idx, previous))
    }

    /// Subscribe to breakpoint set changes. Returns the handle and the current ordered codes.
    pub fn subscribe_breakpoints(
        &mut self,
        handler: impl FnMut(&[String]) + 'static,
    ) -> (SubscriptionId, Vec<String>) {
        let id = self.next_id();
        self.set_handlers.push((id, Box::new(handler)));
        (id, self.codes())
    }

    /// Remove a set subscription. Unknown handles are ignored.
    pub fn unsubscribe_breakpoints(&mut self, id: SubscriptionId) {
        self.set_handlers.retain(|(sid, _)| *sid != id);
    }

    /// Subscribe to current breakpoint transitions, called with `(new, old)`.
    /// Returns the handle and the current code.
    pub fn subscribe_current(
        &mut self,
        handler: impl FnMut(&str, Option<&str>) + 'static,
    ) -> (SubscriptionId, Option<String>) {
        let id = self.next_id();
        self.current_handlers.push((id, Box::new(handler)));
        (id, self.current_code_owned())
    }

    /// Remove a transition subscription. Unknown handles are ignored.
    pub fn unsubscribe_current(&mut self, id: SubscriptionId) {
        self.current_handlers.retain(|(sid, _)| *sid != id);
    }

    // --- internals ---

    fn install(&mut self, breakpoints: Vec<Breakpoint>) {
        let mut order: Vec<usize> = (0..breakpoints.len()).collect();
        order.sort_by(|&a, &b| breakpoints[a].lower().total_cmp(&breakpoints[b].lower()));
        self.registered = breakpoints;
        self.order = order;
    }

    fn position(&self, width: f64) -> Result<usize, BreakpointError> {
        self.registered
            .iter()
            .position(|b| b.contains(width))
            .ok_or(BreakpointError::IncompleteDefinition { width })
    }

    fn enter(&mut self, idx: usize, previous: Option<String>) -> Option<Transition> {
        self.current = Some(idx);
        let new = self.registered[idx].code.clone();
        if previous.as_deref() == Some(new.as_str()) {
            return None;
        }
        tracing::debug!(new = %new, old = ?previous, "breakpoint transition");
        for (_, handler) in &mut self.current_handlers {
            handler(&new, previous.as_deref());
        }
        Some(Transition { new, old: previous })
    }

    fn current_code_owned(&self) -> Option<String> {
        self.current().map(String::from)
    }

    fn next_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        id
    }
}

fn validate(config: &BreakpointConfig) -> Result<Vec<Breakpoint>, BreakpointError> {
    let mut out: Vec<Breakpoint> = Vec::with_capacity(config.len());
    for entry in config.entries() {
        if !is_valid_code(&entry.code) {
            return Err(BreakpointError::InvalidCode {
                code: entry.code.clone(),
            });
        }
        if out.iter().any(|b| b.code == entry.code) {
            return Err(BreakpointError::DuplicateCode {
                code: entry.code.clone(),
            });
        }
        let min = entry.range.min.filter(|v| is_valid_bound(*v));
        let max = entry.range.max.filter(|v| is_valid_bound(*v));
        if min.is_none() && max.is_none() {
            return Err(BreakpointError::InvalidDefinition {
                code: entry.code.clone(),
            });
        }
        out.push(Breakpoint {
            code: entry.code.clone(),
            min,
            max,
        });
    }
    Ok(out)
}

fn is_valid_bound(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
