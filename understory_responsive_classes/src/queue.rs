// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pending class edits, applied in one batch per frame.
//!
//! Operations apply strictly in enqueue order. Nothing cancels: a remove followed by an add
//! of the same class leaves the class present, and the reverse leaves it absent.
//!
//! ```
//! use understory_responsive_classes::queue::{ClassDiffQueue, ClassOp};
//!
//! let mut q: ClassDiffQueue<u32> = ClassDiffQueue::new();
//! q.enqueue_remove(7, "cols-1");
//! q.enqueue_add(7, "cols-2");
//! assert_eq!(q.len(), 2);
//! assert_eq!(q.pending()[0].op, ClassOp::Remove);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::adapter::TreeAdapter;

/// Direction of a class edit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClassOp {
    /// Add the class.
    Add,
    /// Remove the class.
    Remove,
}

/// One pending class edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingOp<E> {
    /// Target element.
    pub element: E,
    /// Add or remove.
    pub op: ClassOp,
    /// Class name.
    pub class_name: String,
}

/// FIFO of class edits.
#[derive(Clone, Debug)]
pub struct ClassDiffQueue<E> {
    pending: Vec<PendingOp<E>>,
}

impl<E> Default for ClassDiffQueue<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E> ClassDiffQueue<E> {
    /// Operations not yet applied, oldest first.
    pub fn pending(&self) -> &[PendingOp<E>] {
        &self.pending
    }

    /// Number of pending operations.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E: Copy> ClassDiffQueue<E> {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue adding `class_name` to `element`.
    pub fn enqueue_add(&mut self, element: E, class_name: impl Into<String>) {
        self.push(element, ClassOp::Add, class_name.into());
    }

    /// Queue removing `class_name` from `element`.
    pub fn enqueue_remove(&mut self, element: E, class_name: impl Into<String>) {
        self.push(element, ClassOp::Remove, class_name.into());
    }

    /// Queue the same edit for several classes, in order.
    pub fn enqueue_all(&mut self, element: E, op: ClassOp, class_names: &[String]) {
        for class_name in class_names {
            self.push(element, op, class_name.clone());
        }
    }

    /// Apply every pending operation in order, leaving the queue empty.
    ///
    /// Returns the number of operations applied.
    pub fn flush<A>(&mut self, adapter: &mut A) -> usize
    where
        A: TreeAdapter<Element = E> + ?Sized,
    {
        let count = self.pending.len();
        for PendingOp {
            element,
            op,
            class_name,
        } in self.pending.drain(..)
        {
            match op {
                ClassOp::Add => adapter.add_class(element, &class_name),
                ClassOp::Remove => adapter.remove_class(element, &class_name),
            }
        }
        if count > 0 {
            tracing::trace!(count, "flushed class edits");
        }
        count
    }

    fn push(&mut self, element: E, op: ClassOp, class_name: String) {
        self.pending.push(PendingOp {
            element,
            op,
            class_name,
        });
    }
}
