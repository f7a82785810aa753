// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`TreeAdapter`] and [`ChangeFeed`] for Understory Element Tree.
//!
//! ## Feature
//!
//! Enable with `element_tree_adapter`.
//!
//! ## Notes
//!
//! The tracking id is kept in the element's private data under [`TRACKING_ID_KEY`], so it
//! survives detaching and re-attaching but is not visible as an attribute.
//! The change feed observes both child list and attribute changes; class edits made by the
//! monitor come back as `class` attribute records and are ignored by it.
//!
//! [`Document::dispose`] makes ids stale, and a stale element has no data left to read its
//! tracking id from. Poll the monitor after detaching and before disposing, so the removal is
//! seen while the subtree is still readable.

use alloc::boxed::Box;
use alloc::string::ToString;

use understory_element_tree::{Document, ElementId, ObserveFlags};

use crate::adapter::{AttributeChange, ChangeFeed, MutationBatch, TreeAdapter};
use crate::store::TrackingId;

/// Data key holding an element's tracking id.
pub const TRACKING_ID_KEY: &str = "rc-tracking-id";

impl TreeAdapter for Document {
    type Element = ElementId;

    fn root(&self) -> Option<ElementId> {
        Some(Self::root(self))
    }

    fn attributes<'a>(
        &'a self,
        element: ElementId,
    ) -> Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a> {
        Box::new(
            Self::attributes(self, element)
                .iter()
                .map(|a| (a.name.as_str(), a.value.as_str())),
        )
    }

    fn children<'a>(&'a self, element: ElementId) -> Box<dyn Iterator<Item = ElementId> + 'a> {
        Box::new(Self::children(self, element).iter().copied())
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        Self::parent(self, element)
    }

    fn tracking_id(&self, element: ElementId) -> Option<TrackingId> {
        self.data(element, TRACKING_ID_KEY).and_then(TrackingId::parse)
    }

    fn set_tracking_id(&mut self, element: ElementId, id: TrackingId) {
        self.set_data(element, TRACKING_ID_KEY, id.to_string());
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        Self::add_class(self, element, class);
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        Self::remove_class(self, element, class);
    }
}

impl ChangeFeed for Document {
    fn start(&mut self) {
        self.observe(ObserveFlags::CHILD_LIST | ObserveFlags::ATTRIBUTES);
    }

    fn stop(&mut self) {
        self.disconnect();
    }

    fn take_mutations(&mut self) -> MutationBatch<ElementId> {
        let records = self.take_records();
        MutationBatch {
            added: records.added,
            removed: records.removed,
            attributes: records
                .attributes
                .into_iter()
                .map(|r| AttributeChange {
                    target: r.target,
                    name: r.name,
                })
                .collect(),
        }
    }
}
