// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation handling: keep tracked elements in step with the tree.
//!
//! A batch is processed in three passes, regardless of the order records arrived in:
//!
//! 1) Removed subtrees: every tracked element inside is untracked and its resolved classes dropped.
//!    The tracking id stays on the element, so re-attaching it reuses the id.
//! 2) Added subtrees: every directive-bearing element is resolved, pre-order.
//! 3) Attribute changes: each element whose `rc-*` attributes changed is resolved again.
//!
//! An element moved within one batch shows up as both removed and added, and ends up tracked.
//! Passes 2 and 3 skip elements that are no longer connected to the root when the batch is
//! handled: an element added or changed and then detached before the batch was taken stays
//! untracked.
//!
//! Re-resolving after an attribute change adds the classes for the new values but does not
//! remove classes applied for the previous values.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::adapter::{MutationBatch, Scheduler, TreeAdapter};
use crate::directive::is_directive_attribute;
use crate::monitor::{Monitor, directive_elements, is_connected, subtree};

impl<E, S> Monitor<E, S>
where
    E: Copy + Eq + Debug,
    S: Scheduler,
{
    /// Process one batch of tree mutations. Requests a flush if any class edit was queued.
    pub fn handle_mutations<A>(&mut self, adapter: &mut A, batch: MutationBatch<E>)
    where
        A: TreeAdapter<Element = E> + ?Sized,
    {
        self.sync_breakpoints(adapter);
        let before = self.queue.len();

        for root in &batch.removed {
            self.process_removed(&*adapter, *root);
        }
        for root in &batch.added {
            if !is_connected(&*adapter, *root) {
                continue;
            }
            for element in directive_elements(&*adapter, *root) {
                self.prepare_element(adapter, element);
            }
        }

        let mut changed: Vec<E> = Vec::new();
        for change in &batch.attributes {
            if is_directive_attribute(&change.name)
                && !changed.contains(&change.target)
                && is_connected(&*adapter, change.target)
            {
                changed.push(change.target);
            }
        }
        for element in changed {
            self.prepare_element(adapter, element);
        }

        let queued = self.queue.len() - before;
        tracing::trace!(
            added = batch.added.len(),
            removed = batch.removed.len(),
            attributes = batch.attributes.len(),
            queued,
            "handled mutations"
        );
        if queued > 0 {
            self.request_flush();
        }
    }

    fn process_removed<A>(&mut self, adapter: &A, root: E)
    where
        A: TreeAdapter<Element = E> + ?Sized,
    {
        for element in subtree(adapter, root) {
            if let Some(id) = adapter.tracking_id(element)
                && self.tracked.get(&id) == Some(&element)
            {
                self.untrack(id);
                tracing::trace!(?element, %id, "untracked removed element");
            }
        }
    }
}
