// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The monitor: owns tracking state and ties the provider, tree, and scheduler together.
//!
//! ## Lifecycle
//!
//! 1) [`Monitor::new`] subscribes to a [`BreakpointProvider`] and takes its current codes.
//! 2) [`Monitor::resume`] starts the tree's change feed and scans the whole document.
//! 3) The host calls [`Monitor::poll`] after tree changes or viewport updates, and
//!    [`Monitor::run_frame`] once per frame after the scheduler fired.
//! 4) [`Monitor::dispose`] stops the feed and unsubscribes.
//!
//! Provider notifications land in an inbox shared with the subscription closures and are
//! applied in arrival order by [`Monitor::sync_breakpoints`], which `poll`, `resume`, and
//! [`handle_mutations`](Monitor::handle_mutations) run first.

use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt::Debug;

use understory_breakpoints::{BreakpointProvider, SubscriptionId};

use crate::adapter::{ChangeFeed, Scheduler, TreeAdapter};
use crate::directive::{is_directive_attribute, parse_directives};
use crate::queue::{ClassDiffQueue, ClassOp, PendingOp};
use crate::resolve::resolve_element;
use crate::store::{ElementStateStore, TrackingId};

/// A provider notification waiting to be applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BreakpointEvent {
    /// The breakpoint set was replaced. Codes in ascending order.
    Breakpoints(Vec<String>),
    /// The current breakpoint changed.
    Current {
        /// Code of the breakpoint now current.
        new: String,
        /// Code of the previous breakpoint, if there was one.
        old: Option<String>,
    },
}

type Inbox = Rc<RefCell<VecDeque<BreakpointEvent>>>;

/// Applies responsive class directives to a tree as breakpoints and attributes change.
///
/// End a monitor with [`dispose`](Self::dispose). The provider owns the subscription closures,
/// so dropping a monitor without `dispose` leaks the subscriptions, and their inbox keeps
/// growing with every provider event.
pub struct Monitor<E, S> {
    pub(crate) codes: Vec<String>,
    pub(crate) current: Option<String>,
    pub(crate) tracked: BTreeMap<TrackingId, E>,
    pub(crate) store: ElementStateStore,
    pub(crate) queue: ClassDiffQueue<E>,
    scheduler: S,
    flush_requested: bool,
    observing: bool,
    inbox: Inbox,
    subscriptions: Option<(SubscriptionId, SubscriptionId)>,
}

impl<E: Debug, S> Debug for Monitor<E, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Monitor")
            .field("codes", &self.codes)
            .field("current", &self.current)
            .field("tracked", &self.tracked.len())
            .field("pending", &self.queue.len())
            .field("flush_requested", &self.flush_requested)
            .field("observing", &self.observing)
            .finish_non_exhaustive()
    }
}

impl<E, S> Monitor<E, S>
where
    E: Copy + Eq + Debug,
    S: Scheduler,
{
    /// Create a monitor bound to `provider`.
    ///
    /// The monitor starts paused; call [`resume`](Self::resume) to scan and observe a tree.
    pub fn new(provider: &mut BreakpointProvider, scheduler: S) -> Self {
        let inbox: Inbox = Rc::default();

        let sink = Rc::clone(&inbox);
        let (set_sub, codes) = provider.subscribe_breakpoints(move |codes| {
            sink.borrow_mut()
                .push_back(BreakpointEvent::Breakpoints(codes.to_vec()));
        });
        let sink = Rc::clone(&inbox);
        let (current_sub, current) = provider.subscribe_current(move |new, old| {
            sink.borrow_mut().push_back(BreakpointEvent::Current {
                new: String::from(new),
                old: old.map(String::from),
            });
        });
        tracing::debug!(?codes, ?current, "monitor created");

        Self {
            codes,
            current,
            tracked: BTreeMap::new(),
            store: ElementStateStore::new(),
            queue: ClassDiffQueue::new(),
            scheduler,
            flush_requested: false,
            observing: false,
            inbox,
            subscriptions: Some((set_sub, current_sub)),
        }
    }

    /// Ordered breakpoint codes the monitor resolves against.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// The current breakpoint code as last applied.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// True between [`resume`](Self::resume) and [`pause`](Self::pause).
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Tracked elements in id order.
    pub fn tracked(&self) -> impl Iterator<Item = (TrackingId, E)> + '_ {
        self.tracked.iter().map(|(id, el)| (*id, *el))
    }

    /// The element tracked under `id`.
    pub fn tracked_element(&self, id: TrackingId) -> Option<E> {
        self.tracked.get(&id).copied()
    }

    /// Resolved classes of every element seen so far.
    pub fn store(&self) -> &ElementStateStore {
        &self.store
    }

    /// Class edits waiting for the next [`run_frame`](Self::run_frame).
    pub fn pending(&self) -> &[PendingOp<E>] {
        self.queue.pending()
    }

    /// True once the scheduler was asked for a flush that has not run yet.
    pub fn is_flush_requested(&self) -> bool {
        self.flush_requested
    }

    /// Start observing `adapter` and scan the whole document.
    ///
    /// Every directive-bearing element is resolved and gets its current classes queued.
    /// Tracked elements the scan no longer reaches (detached while paused) are untracked.
    pub fn resume<A>(&mut self, adapter: &mut A)
    where
        A: ChangeFeed<Element = E> + ?Sized,
    {
        self.sync_breakpoints(adapter);
        adapter.start();
        self.observing = true;

        let before = self.queue.len();
        let mut reached = BTreeSet::new();
        if let Some(root) = adapter.root() {
            for element in directive_elements(&*adapter, root) {
                if let Some(id) = self.prepare_element(adapter, element) {
                    reached.insert(id);
                }
            }
        }
        let stale: Vec<TrackingId> = self
            .tracked
            .keys()
            .filter(|id| !reached.contains(*id))
            .copied()
            .collect();
        for id in stale {
            self.untrack(id);
        }
        tracing::debug!(tracked = self.tracked.len(), "resumed");
        if self.queue.len() > before {
            self.request_flush();
        }
    }

    /// Stop observing. Mutations made while paused are picked up by the next
    /// [`resume`](Self::resume) scan.
    pub fn pause<A>(&mut self, adapter: &mut A)
    where
        A: ChangeFeed<Element = E> + ?Sized,
    {
        adapter.stop();
        self.observing = false;
        tracing::debug!("paused");
    }

    /// Apply queued breakpoint events, then any mutations the feed recorded.
    pub fn poll<A>(&mut self, adapter: &mut A)
    where
        A: ChangeFeed<Element = E> + ?Sized,
    {
        self.sync_breakpoints(adapter);
        if !self.observing {
            return;
        }
        let batch = adapter.take_mutations();
        if !batch.is_empty() {
            self.handle_mutations(adapter, batch);
        }
    }

    /// Apply provider notifications received since the last call, in order.
    pub fn sync_breakpoints<A>(&mut self, adapter: &mut A)
    where
        A: TreeAdapter<Element = E> + ?Sized,
    {
        loop {
            let event = self.inbox.borrow_mut().pop_front();
            match event {
                Some(BreakpointEvent::Breakpoints(codes)) => self.breakpoints_changed(adapter, codes),
                Some(BreakpointEvent::Current { new, old }) => {
                    self.breakpoint_changed(&new, old.as_deref());
                }
                None => break,
            }
        }
    }

    /// Apply every pending class edit. Call once per frame after the scheduler fired.
    ///
    /// Returns the number of edits applied.
    pub fn run_frame<A>(&mut self, adapter: &mut A) -> usize
    where
        A: TreeAdapter<Element = E> + ?Sized,
    {
        self.flush_requested = false;
        self.queue.flush(adapter)
    }

    /// Stop observing and unsubscribe from `provider`.
    ///
    /// Classes already applied stay on the elements; pending edits are dropped.
    pub fn dispose<A>(mut self, provider: &mut BreakpointProvider, adapter: &mut A)
    where
        A: ChangeFeed<Element = E> + ?Sized,
    {
        if self.observing {
            self.pause(adapter);
        }
        if let Some((set_sub, current_sub)) = self.subscriptions.take() {
            provider.unsubscribe_breakpoints(set_sub);
            provider.unsubscribe_current(current_sub);
        }
        tracing::debug!(dropped = self.queue.len(), "monitor disposed");
    }

    // --- internals shared by the watcher and transition handlers ---

    /// Resolve `element` against the current codes and queue its current classes.
    ///
    /// Elements without directives are left alone. Returns the element's id when it was resolved.
    pub(crate) fn prepare_element<A>(&mut self, adapter: &mut A, element: E) -> Option<TrackingId>
    where
        A: TreeAdapter<Element = E> + ?Sized,
    {
        let parsed = parse_directives(adapter.attributes(element), &self.codes);
        if parsed.is_empty() {
            return None;
        }
        let id = self.ensure_tracked(adapter, element);
        let by_breakpoint = resolve_element(&parsed, self.codes.len());
        for (code, classes) in self.codes.iter().zip(by_breakpoint) {
            self.store.put(id, code, classes);
        }
        if let Some(current) = &self.current {
            self.queue
                .enqueue_all(element, ClassOp::Add, self.store.get(id, current));
        }
        tracing::trace!(?element, %id, states = parsed.len(), "resolved element");
        Some(id)
    }

    /// The element's id, issuing and persisting one if it has none usable.
    ///
    /// An id is reused only if this monitor issued it and it is not tracked for another element.
    fn ensure_tracked<A>(&mut self, adapter: &mut A, element: E) -> TrackingId
    where
        A: TreeAdapter<Element = E> + ?Sized,
    {
        let reusable = adapter.tracking_id(element).filter(|id| {
            self.store.is_issued(*id) && self.tracked.get(id).is_none_or(|e| *e == element)
        });
        let id = match reusable {
            Some(id) => id,
            None => {
                let id = self.store.issue();
                adapter.set_tracking_id(element, id);
                id
            }
        };
        self.tracked.insert(id, element);
        id
    }

    pub(crate) fn untrack(&mut self, id: TrackingId) {
        self.tracked.remove(&id);
        self.store.remove(id);
    }

    pub(crate) fn request_flush(&mut self) {
        if !self.flush_requested {
            self.flush_requested = true;
            self.scheduler.request_flush();
        }
    }
}

/// Every element in the subtree at `root`, pre-order.
pub(crate) fn subtree<A>(adapter: &A, root: A::Element) -> Vec<A::Element>
where
    A: TreeAdapter + ?Sized,
{
    let mut out = Vec::new();
    let mut stack = alloc::vec![root];
    while let Some(element) = stack.pop() {
        out.push(element);
        let mark = stack.len();
        stack.extend(adapter.children(element));
        stack[mark..].reverse();
    }
    out
}

/// True if `element` is the adapter root or one of its descendants.
pub(crate) fn is_connected<A>(adapter: &A, element: A::Element) -> bool
where
    A: TreeAdapter + ?Sized,
{
    let Some(root) = adapter.root() else {
        return false;
    };
    let mut cursor = Some(element);
    while let Some(el) = cursor {
        if el == root {
            return true;
        }
        cursor = adapter.parent(el);
    }
    false
}

/// Directive-bearing elements in the subtree at `root`, pre-order.
pub(crate) fn directive_elements<A>(adapter: &A, root: A::Element) -> Vec<A::Element>
where
    A: TreeAdapter + ?Sized,
{
    subtree(adapter, root)
        .into_iter()
        .filter(|el| adapter.attributes(*el).any(|(name, _)| is_directive_attribute(name)))
        .collect()
}
