// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal in-memory tree for unit tests.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::adapter::{AttributeChange, ChangeFeed, MutationBatch, TreeAdapter};
use crate::store::TrackingId;

#[derive(Default)]
struct FakeNode {
    attrs: Vec<(String, String)>,
    children: Vec<usize>,
    parent: Option<usize>,
    id: Option<TrackingId>,
    classes: Vec<String>,
}

/// Elements are indices; the root is `0`. Records every change while recording.
#[derive(Default)]
pub(crate) struct FakeTree {
    nodes: Vec<FakeNode>,
    log: Vec<String>,
    recording: bool,
    batch: MutationBatch<usize>,
}

impl FakeTree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: alloc::vec![FakeNode::default()],
            ..Self::default()
        }
    }

    pub(crate) fn root_index(&self) -> usize {
        0
    }

    /// Create an element with `attrs` and append it under `parent`.
    pub(crate) fn push_child(&mut self, parent: usize, attrs: &[(&str, &str)]) -> usize {
        let el = self.create(attrs);
        self.attach(parent, el);
        el
    }

    /// Create a detached element.
    pub(crate) fn create(&mut self, attrs: &[(&str, &str)]) -> usize {
        self.nodes.push(FakeNode {
            attrs: attrs
                .iter()
                .map(|(n, v)| (String::from(*n), String::from(*v)))
                .collect(),
            ..FakeNode::default()
        });
        self.nodes.len() - 1
    }

    pub(crate) fn attach(&mut self, parent: usize, el: usize) {
        self.nodes[el].parent = Some(parent);
        self.nodes[parent].children.push(el);
        if self.recording {
            self.batch.added.push(el);
        }
    }

    pub(crate) fn detach(&mut self, el: usize) {
        if let Some(parent) = self.nodes[el].parent.take() {
            self.nodes[parent].children.retain(|c| *c != el);
            if self.recording {
                self.batch.removed.push(el);
            }
        }
    }

    pub(crate) fn set_attr(&mut self, el: usize, name: &str, value: &str) {
        let attrs = &mut self.nodes[el].attrs;
        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = String::from(value),
            None => attrs.push((String::from(name), String::from(value))),
        }
        self.record_attr(el, name);
    }

    pub(crate) fn remove_attr(&mut self, el: usize, name: &str) {
        self.nodes[el].attrs.retain(|(n, _)| n != name);
        self.record_attr(el, name);
    }

    pub(crate) fn classes(&self, el: usize) -> Vec<String> {
        self.nodes[el].classes.clone()
    }

    /// `+el:class` and `-el:class` entries, in application order.
    pub(crate) fn class_log(&self) -> Vec<String> {
        self.log.clone()
    }

    pub(crate) fn clear_log(&mut self) {
        self.log.clear();
    }

    pub(crate) fn stored_id(&self, el: usize) -> Option<TrackingId> {
        self.nodes[el].id
    }

    pub(crate) fn force_id(&mut self, el: usize, id: Option<TrackingId>) {
        self.nodes[el].id = id;
    }

    fn record_attr(&mut self, el: usize, name: &str) {
        if self.recording {
            self.batch.attributes.push(AttributeChange {
                target: el,
                name: String::from(name),
            });
        }
    }
}

impl TreeAdapter for FakeTree {
    type Element = usize;

    fn root(&self) -> Option<usize> {
        Some(0)
    }

    fn attributes<'a>(&'a self, element: usize) -> Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a> {
        Box::new(
            self.nodes[element]
                .attrs
                .iter()
                .map(|(n, v)| (n.as_str(), v.as_str())),
        )
    }

    fn children<'a>(&'a self, element: usize) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(self.nodes[element].children.iter().copied())
    }

    fn parent(&self, element: usize) -> Option<usize> {
        self.nodes[element].parent
    }

    fn tracking_id(&self, element: usize) -> Option<TrackingId> {
        self.nodes[element].id
    }

    fn set_tracking_id(&mut self, element: usize, id: TrackingId) {
        self.nodes[element].id = Some(id);
    }

    fn add_class(&mut self, element: usize, class: &str) {
        self.log.push(format!("+{element}:{class}"));
        let classes = &mut self.nodes[element].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(String::from(class));
        }
    }

    fn remove_class(&mut self, element: usize, class: &str) {
        self.log.push(format!("-{element}:{class}"));
        self.nodes[element].classes.retain(|c| c != class);
    }
}

impl ChangeFeed for FakeTree {
    fn start(&mut self) {
        self.recording = true;
    }

    fn stop(&mut self) {
        self.recording = false;
        self.batch = MutationBatch::default();
    }

    fn take_mutations(&mut self) -> MutationBatch<usize> {
        core::mem::take(&mut self.batch)
    }
}
