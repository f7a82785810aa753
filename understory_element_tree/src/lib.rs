// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_element_tree --heading-base-level=0

//! Understory Element Tree: a small, observable element document.
//!
//! This is the structural half of a DOM: elements with a tag, ordered attributes, a class
//! list, private data, and children. It has no layout, style, or events.
//! It exists so that attribute-driven tooling (such as `understory_responsive_classes`) can
//! run and be tested against a real tree without a browser.
//!
//! - [`Document`]: arena of elements rooted at a document element.
//! - [`ElementId`]: generational handle of an element.
//! - [`ObserveFlags`]: what is recorded while observing.
//! - [`Mutations`]: batched records returned by [`Document::take_records`].
//!
//! ## Detaching versus disposing
//!
//! [`Document::remove`] only detaches: the element and its subtree stay alive and can be
//! re-attached, exactly like a DOM node removed from its parent.
//! [`Document::dispose`] frees the subtree and makes all its ids stale.
//!
//! ## Recording
//!
//! While observed, the document records changes to the *connected* tree only:
//! subtree roots that were attached or detached, and attribute changes on connected
//! elements. Class list edits are recorded as changes of the `class` attribute.
//! Changes to detached elements are silent; attaching the subtree later reports its root.
//!
//! ```
//! use understory_element_tree::{Document, ObserveFlags};
//!
//! let mut doc = Document::new();
//! doc.observe(ObserveFlags::default());
//!
//! let card = doc.create_element("div");
//! doc.set_attribute(card, "rc-md-wide", "");
//! doc.append_child(doc.root(), card);
//! doc.add_class(card, "card");
//!
//! let records = doc.take_records();
//! assert_eq!(records.added, vec![card]);
//! assert_eq!(records.attributes.len(), 1);
//! assert_eq!(records.attributes[0].name, "class");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod mutation;
mod tree;
mod types;

pub use mutation::{AttributeRecord, Mutations};
pub use tree::Document;
pub use types::{Attribute, ElementId, ObserveFlags};
