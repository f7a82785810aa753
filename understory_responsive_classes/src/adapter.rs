// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams between the monitor and the host tree.
//!
//! - [`TreeAdapter`]: read attributes, children and parents, persist tracking ids, edit classes.
//! - [`ChangeFeed`]: start/stop change recording and hand over batches of mutations.
//! - [`Scheduler`]: ask the host to run a flush before its next frame.
//!
//! Hosts with their own scheduling can ignore [`ChangeFeed`] and push batches to
//! [`Monitor::handle_mutations`](crate::Monitor::handle_mutations) directly.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::store::TrackingId;

/// Read and edit access to an element tree.
pub trait TreeAdapter {
    /// Element handle.
    type Element: Copy + Eq + core::fmt::Debug;

    /// The document root, if the tree has one.
    fn root(&self) -> Option<Self::Element>;

    /// Attributes of `element` as `(name, value)` pairs, in document order.
    fn attributes<'a>(
        &'a self,
        element: Self::Element,
    ) -> Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    /// Children of `element`, in document order.
    fn children<'a>(&'a self, element: Self::Element) -> Box<dyn Iterator<Item = Self::Element> + 'a>;

    /// Parent of `element`, or `None` for the root and detached subtree roots.
    fn parent(&self, element: Self::Element) -> Option<Self::Element>;

    /// Tracking id persisted on `element`, if any.
    fn tracking_id(&self, element: Self::Element) -> Option<TrackingId>;

    /// Persist a tracking id on `element`. It must survive detaching and re-attaching.
    fn set_tracking_id(&mut self, element: Self::Element, id: TrackingId);

    /// Add `class` to the element's class list. Adding a present class is a no-op.
    fn add_class(&mut self, element: Self::Element, class: &str);

    /// Remove `class` from the element's class list. Removing an absent class is a no-op.
    fn remove_class(&mut self, element: Self::Element, class: &str);
}

/// A tree that can record its own structural and attribute changes.
pub trait ChangeFeed: TreeAdapter {
    /// Begin recording. Idempotent.
    fn start(&mut self);

    /// Stop recording and drop anything not yet taken.
    fn stop(&mut self);

    /// Take everything recorded since the last call.
    fn take_mutations(&mut self) -> MutationBatch<Self::Element>;
}

/// Host hook for deferring the class flush.
///
/// The monitor calls [`request_flush`](Scheduler::request_flush) at most once per pending
/// flush; the host should then call [`Monitor::run_frame`](crate::Monitor::run_frame) before
/// presenting its next frame.
pub trait Scheduler {
    /// A flush is needed.
    fn request_flush(&mut self);
}

impl<F: FnMut()> Scheduler for F {
    fn request_flush(&mut self) {
        self();
    }
}

/// One attribute change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeChange<E> {
    /// Element whose attribute changed.
    pub target: E,
    /// Attribute name.
    pub name: String,
}

/// A batch of tree mutations, each list in recording order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationBatch<E> {
    /// Roots of attached subtrees.
    pub added: Vec<E>,
    /// Roots of detached subtrees.
    pub removed: Vec<E>,
    /// Attribute changes on attached elements.
    pub attributes: Vec<AttributeChange<E>>,
}

impl<E> Default for MutationBatch<E> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

impl<E> MutationBatch<E> {
    /// True if the batch has no records.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.attributes.is_empty()
    }
}
