// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, attributes, classes, and recording.

use alloc::string::String;
use alloc::vec::Vec;

use crate::mutation::{AttributeRecord, Mutations};
use crate::types::{Attribute, ElementId, ObserveFlags};

const CLASS_ATTRIBUTE: &str = "class";

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// An element document rooted at a single document element.
///
/// Elements are created detached, attached with [`append_child`](Self::append_child), and
/// detached again with [`remove`](Self::remove). A detached element keeps its subtree,
/// attributes, classes, and data, so it can be re-attached later.
pub struct Document {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: ElementId,
    observing: Option<ObserveFlags>,
    records: Mutations,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("observing", &self.observing)
            .field("pending_records", &self.records.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: Vec<Attribute>,
    classes: Vec<String>,
    data: Vec<(String, String)>,
}

impl Node {
    fn new(generation: u32, tag: String) -> Self {
        Self {
            generation,
            tag,
            parent: None,
            children: Vec::new(),
            attributes: Vec::new(),
            classes: Vec::new(),
            data: Vec::new(),
        }
    }
}

impl Document {
    /// Create a document holding only an `html` root element.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: ElementId::new(0, 1),
            observing: None,
            records: Mutations::default(),
        };
        doc.root = doc.create_element("html");
        doc
    }

    /// The document element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> ElementId {
        let tag = tag.into();
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, tag));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, tag)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        ElementId::new(idx, generation)
    }

    /// Append `child` as the last child of `parent`, detaching it from any previous parent first.
    ///
    /// Ignored if either id is stale, if `child` is the root, or if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.is_alive(parent) || !self.is_alive(child) || child == self.root {
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            return;
        }
        self.remove(child);
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.node_opt_mut(child) {
            c.parent = Some(parent);
        }
        if self.records_child_list() && self.is_connected(child) {
            self.records.added.push(child);
        }
    }

    /// Detach `id` (and its subtree) from its parent. The element stays alive.
    pub fn remove(&mut self, id: ElementId) {
        let Some(parent) = self.node_opt(id).and_then(|n| n.parent) else {
            return;
        };
        let was_connected = self.is_connected(id);
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
        if was_connected && self.records_child_list() {
            self.records.removed.push(id);
        }
    }

    /// Detach `id` if needed, then free it and its whole subtree. All their ids become stale.
    ///
    /// The root cannot be disposed.
    /// Take pending records before disposing elements they mention, or those records will
    /// refer to stale ids.
    pub fn dispose(&mut self, id: ElementId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        self.remove(id);
        self.free_subtree(id);
    }

    /// Set an attribute, replacing any existing value. Names compare ASCII case-insensitively.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        let value = value.into();
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let old_value = match n
            .attributes
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(existing) => Some(core::mem::replace(&mut existing.value, value)),
            None => {
                n.attributes.push(Attribute {
                    name: String::from(name),
                    value,
                });
                None
            }
        };
        self.record_attribute(id, name, old_value);
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let Some(pos) = n
            .attributes
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
        else {
            return;
        };
        let old = n.attributes.remove(pos);
        self.record_attribute(id, name, Some(old.value));
    }

    /// Value of an attribute, if present.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.node_opt(id)?
            .attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Attributes in insertion order. Empty for stale ids.
    pub fn attributes(&self, id: ElementId) -> &[Attribute] {
        self.node_opt(id)
            .map(|n| n.attributes.as_slice())
            .unwrap_or_default()
    }

    /// Store a private key/value pair on the element. Not observed.
    pub fn set_data(&mut self, id: ElementId, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(n) = self.node_opt_mut(id) {
            match n.data.iter_mut().find(|(k, _)| k == key) {
                Some((_, v)) => *v = value,
                None => n.data.push((String::from(key), value)),
            }
        }
    }

    /// Read a value stored with [`set_data`](Self::set_data).
    pub fn data(&self, id: ElementId, key: &str) -> Option<&str> {
        self.node_opt(id)?
            .data
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        if n.classes.iter().any(|c| c == class) {
            return;
        }
        let old = n.classes.join(" ");
        n.classes.push(String::from(class));
        self.record_attribute(id, CLASS_ATTRIBUTE, Some(old));
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let Some(pos) = n.classes.iter().position(|c| c == class) else {
            return;
        };
        let old = n.classes.join(" ");
        n.classes.remove(pos);
        self.record_attribute(id, CLASS_ATTRIBUTE, Some(old));
    }

    /// True if the element carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.node_opt(id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Classes in insertion order. Empty for stale ids.
    pub fn classes(&self, id: ElementId) -> &[String] {
        self.node_opt(id)
            .map(|n| n.classes.as_slice())
            .unwrap_or_default()
    }

    /// Tag name, if the id is live.
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.node_opt(id).map(|n| n.tag.as_str())
    }

    /// Children in order. Empty for stale ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node_opt(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Parent of a live element, if attached.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node_opt(id)?.parent
    }

    /// `id` followed by all its descendants, pre-order.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        if self.is_alive(id) {
            stack.push(id);
        }
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.node_opt(id).is_some()
    }

    /// True if `id` is live and the root is among its inclusive ancestors.
    pub fn is_connected(&self, id: ElementId) -> bool {
        self.is_alive(id) && self.is_inclusive_ancestor(self.root, id)
    }

    // --- observation ---

    /// Start recording mutations of the connected tree. Replaces any previous flags.
    pub fn observe(&mut self, flags: ObserveFlags) {
        tracing::trace!(?flags, "observing document");
        self.observing = Some(flags);
    }

    /// Stop recording and drop any records not yet taken.
    pub fn disconnect(&mut self) {
        self.observing = None;
        self.records = Mutations::default();
    }

    /// True while [`observe`](Self::observe) is in effect.
    pub fn is_observing(&self) -> bool {
        self.observing.is_some()
    }

    /// Take all records collected since the previous call.
    pub fn take_records(&mut self) -> Mutations {
        core::mem::take(&mut self.records)
    }

    // --- internals ---

    fn node_opt(&self, id: ElementId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn is_inclusive_ancestor(&self, ancestor: ElementId, mut id: ElementId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    fn records_child_list(&self) -> bool {
        self.observing
            .is_some_and(|f| f.contains(ObserveFlags::CHILD_LIST))
    }

    fn record_attribute(&mut self, id: ElementId, name: &str, old_value: Option<String>) {
        let observed = self
            .observing
            .is_some_and(|f| f.contains(ObserveFlags::ATTRIBUTES));
        if observed && self.is_connected(id) {
            self.records.attributes.push(AttributeRecord {
                target: id,
                name: String::from(name),
                old_value,
            });
        }
    }

    fn free_subtree(&mut self, id: ElementId) {
        for el in self.descendants(id) {
            self.nodes[el.idx()] = None;
            self.free_list.push(el.idx());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn child(doc: &mut Document, parent: ElementId, tag: &str) -> ElementId {
        let el = doc.create_element(tag);
        doc.append_child(parent, el);
        el
    }

    #[test]
    fn build_and_traverse() {
        let mut doc = Document::new();
        let root = doc.root();
        let body = child(&mut doc, root, "body");
        let a = child(&mut doc, body, "div");
        let b = child(&mut doc, body, "div");
        let a1 = child(&mut doc, a, "span");
        assert_eq!(doc.descendants(root), vec![root, body, a, a1, b]);
        assert_eq!(doc.parent(a1), Some(a));
        assert!(doc.is_connected(a1));
        assert_eq!(doc.tag(body), Some("body"));
    }

    #[test]
    fn detached_subtree_survives_and_reattaches() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = child(&mut doc, root, "div");
        let a1 = child(&mut doc, a, "span");
        doc.set_attribute(a1, "title", "x");
        doc.remove(a);
        assert!(doc.is_alive(a1));
        assert!(!doc.is_connected(a1));
        assert_eq!(doc.attribute(a1, "TITLE"), Some("x"));
        doc.append_child(root, a);
        assert!(doc.is_connected(a1));
    }

    #[test]
    fn dispose_frees_subtree_and_reuses_slots() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = child(&mut doc, root, "div");
        let a1 = child(&mut doc, a, "span");
        doc.dispose(a);
        assert!(!doc.is_alive(a));
        assert!(!doc.is_alive(a1));
        assert!(doc.children(root).is_empty());

        let b = doc.create_element("p");
        assert!(doc.is_alive(b));
        assert!(!doc.is_alive(a) && !doc.is_alive(a1));
        if b.0 == a.0 || b.0 == a1.0 {
            assert!(b.1 > 1, "generation must increase on reuse");
        }
        doc.dispose(root);
        assert!(doc.is_alive(root), "root cannot be disposed");
    }

    #[test]
    fn cycles_are_refused() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = child(&mut doc, root, "div");
        let a1 = child(&mut doc, a, "div");
        doc.append_child(a1, a);
        assert_eq!(doc.parent(a), Some(root));
        doc.append_child(a, root);
        assert_eq!(doc.parent(root), None);
    }

    #[test]
    fn attributes_replace_and_remove() {
        let mut doc = Document::new();
        let el = doc.create_element("div");
        doc.set_attribute(el, "rc-hidden", "");
        doc.set_attribute(el, "RC-Hidden", "yes");
        assert_eq!(doc.attributes(el).len(), 1);
        assert_eq!(doc.attribute(el, "rc-hidden"), Some("yes"));
        doc.remove_attribute(el, "rc-hidden");
        assert!(doc.attributes(el).is_empty());
    }

    #[test]
    fn classes_are_a_set_in_insertion_order() {
        let mut doc = Document::new();
        let el = doc.create_element("div");
        doc.add_class(el, "a");
        doc.add_class(el, "b");
        doc.add_class(el, "a");
        assert_eq!(doc.classes(el), ["a", "b"]);
        doc.remove_class(el, "a");
        doc.remove_class(el, "zzz");
        assert_eq!(doc.classes(el), ["b"]);
        assert!(doc.has_class(el, "b"));
    }

    #[test]
    fn data_is_private_storage() {
        let mut doc = Document::new();
        doc.observe(ObserveFlags::default());
        let root = doc.root();
        doc.set_data(root, "id", "1");
        doc.set_data(root, "id", "2");
        assert_eq!(doc.data(root, "id"), Some("2"));
        assert_eq!(doc.data(root, "other"), None);
        assert!(doc.take_records().is_empty());
    }

    #[test]
    fn records_only_while_observing_and_connected() {
        let mut doc = Document::new();
        let root = doc.root();
        let early = child(&mut doc, root, "div");
        assert!(doc.take_records().is_empty());

        doc.observe(ObserveFlags::default());
        let detached = doc.create_element("div");
        let inner = child(&mut doc, detached, "span");
        doc.set_attribute(inner, "rc-x", "");
        assert!(doc.take_records().is_empty(), "detached edits are silent");

        doc.append_child(root, detached);
        doc.set_attribute(early, "rc-x", "1");
        doc.set_attribute(early, "rc-x", "2");
        doc.remove(early);
        let rec = doc.take_records();
        assert_eq!(rec.added, vec![detached]);
        assert_eq!(rec.removed, vec![early]);
        assert_eq!(rec.attributes.len(), 2);
        assert_eq!(rec.attributes[0].old_value, None);
        assert_eq!(rec.attributes[1].old_value.as_deref(), Some("1"));
        assert!(doc.take_records().is_empty());
    }

    #[test]
    fn moving_an_attached_element_records_both() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = child(&mut doc, root, "div");
        let b = child(&mut doc, root, "div");
        doc.observe(ObserveFlags::CHILD_LIST);
        doc.append_child(b, a);
        doc.add_class(a, "ignored");
        let rec = doc.take_records();
        assert_eq!(rec.removed, vec![a]);
        assert_eq!(rec.added, vec![a]);
        assert!(rec.attributes.is_empty(), "attributes not requested");
    }

    #[test]
    fn class_edits_record_class_attribute() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.observe(ObserveFlags::ATTRIBUTES);
        doc.add_class(root, "a");
        doc.add_class(root, "a");
        doc.add_class(root, "b");
        doc.remove_class(root, "a");
        let rec = doc.take_records();
        let olds: Vec<_> = rec
            .attributes
            .iter()
            .map(|r| (r.name.as_str(), r.old_value.as_deref()))
            .collect();
        assert_eq!(
            olds,
            vec![("class", Some("")), ("class", Some("a")), ("class", Some("a b"))]
        );
    }

    #[test]
    fn disconnect_drops_pending_records() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.observe(ObserveFlags::default());
        let _ = child(&mut doc, root, "div");
        doc.disconnect();
        assert!(!doc.is_observing());
        assert!(doc.take_records().is_empty());
    }
}
