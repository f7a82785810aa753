// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint transitions and breakpoint set replacement.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::adapter::{Scheduler, TreeAdapter};
use crate::monitor::Monitor;
use crate::queue::ClassOp;
use crate::store::TrackingId;

impl<E, S> Monitor<E, S>
where
    E: Copy + Eq + Debug,
    S: Scheduler,
{
    /// Swap classes on every tracked element for a move from `old` to `new`.
    ///
    /// For each element in id order, all classes stored for `old` are queued for removal, then
    /// all classes stored for `new` are queued for addition. Classes shared by both breakpoints
    /// are removed and added back in the same flush.
    ///
    /// Without `old`, the classes of the breakpoint this monitor last applied are removed. The
    /// provider reports no previous breakpoint after a set replacement whose re-detection failed,
    /// even though classes are still applied.
    ///
    /// Normally driven by provider notifications through
    /// [`sync_breakpoints`](Self::sync_breakpoints).
    pub fn breakpoint_changed(&mut self, new: &str, old: Option<&str>) {
        let departing = old.map(String::from).or_else(|| self.current.clone());
        for (&id, &element) in &self.tracked {
            if let Some(departing) = &departing {
                self.queue
                    .enqueue_all(element, ClassOp::Remove, self.store.get(id, departing));
            }
            self.queue
                .enqueue_all(element, ClassOp::Add, self.store.get(id, new));
        }
        tracing::debug!(
            new,
            old = departing.as_deref(),
            tracked = self.tracked.len(),
            "breakpoint changed"
        );
        self.current = Some(String::from(new));
        self.request_flush();
    }

    /// Adopt a new ordered breakpoint set and resolve every tracked element against it.
    ///
    /// Classes for the current breakpoint are queued again. Entries stored under codes that are
    /// no longer registered are kept until the element is removed.
    pub fn breakpoints_changed<A>(&mut self, adapter: &mut A, codes: Vec<String>)
    where
        A: TreeAdapter<Element = E> + ?Sized,
    {
        tracing::debug!(?codes, "breakpoint set changed");
        self.codes = codes;
        let before = self.queue.len();
        let tracked: Vec<(TrackingId, E)> = self.tracked().collect();
        for (_, element) in tracked {
            self.prepare_element(adapter, element);
        }
        if self.queue.len() > before {
            self.request_flush();
        }
    }
}
