// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched mutation records returned by [`Document::take_records`](crate::Document::take_records).

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::ElementId;

/// One attribute change on a connected element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeRecord {
    /// Element whose attribute changed.
    pub target: ElementId,
    /// Attribute name. Class list edits are reported as `class`.
    pub name: String,
    /// Value before the change, if the attribute existed.
    pub old_value: Option<String>,
}

/// Mutations recorded since the last [`take_records`](crate::Document::take_records).
///
/// Each list keeps recording order. An element detached and re-attached between two
/// takes appears in both `removed` and `added`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mutations {
    /// Roots of subtrees attached to the connected tree.
    pub added: Vec<ElementId>,
    /// Roots of subtrees detached from the connected tree.
    pub removed: Vec<ElementId>,
    /// Attribute changes.
    pub attributes: Vec<AttributeRecord>,
}

impl Mutations {
    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.attributes.is_empty()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.attributes.len()
    }
}
