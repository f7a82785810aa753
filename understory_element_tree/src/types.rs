// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element document: identifiers, attributes, and observation flags.

use alloc::string::String;

/// Identifier for an element in a [`Document`](crate::Document).
///
/// This is a small, copyable handle that stays stable while the element lives, including
/// while it is detached, but becomes invalid once the element is disposed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On [`dispose`](crate::Document::dispose), the slot is freed; any existing `ElementId` that pointed to it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check liveness.
/// Stale identifiers never alias a different live element because the generation must match.
///
/// Ordering follows slot index then generation; it is only meant for deterministic containers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// What a [`Document`](crate::Document) records while observed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ObserveFlags: u8 {
        /// Elements attached to or detached from the connected tree.
        const CHILD_LIST = 0b0000_0001;
        /// Attribute and class changes on connected elements.
        const ATTRIBUTES = 0b0000_0010;
    }
}

impl Default for ObserveFlags {
    fn default() -> Self {
        Self::CHILD_LIST | Self::ATTRIBUTES
    }
}

/// A single `name="value"` attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, as written.
    pub name: String,
    /// Attribute value. Empty for boolean-style attributes.
    pub value: String,
}
