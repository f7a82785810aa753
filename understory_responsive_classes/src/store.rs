// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side table of resolved classes, keyed by tracking id and breakpoint code.
//!
//! Elements are never keyed directly: each tracked element carries a [`TrackingId`] issued here,
//! and adapters persist it on the element (for example as private data).

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::num::NonZeroU64;

/// Stable identifier of a tracked element.
///
/// Ids are issued from a counter starting at `1`. Ordering follows issue order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackingId(NonZeroU64);

impl TrackingId {
    /// Rebuild an id from its raw value. Returns `None` for `0`.
    pub const fn from_raw(raw: u64) -> Option<Self> {
        match NonZeroU64::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Parse an id previously written with its [`Display`](fmt::Display) impl.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<u64>().ok().and_then(Self::from_raw)
    }

    /// The raw value.
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved classes per tracked element and breakpoint code.
#[derive(Clone, Debug, Default)]
pub struct ElementStateStore {
    last_issued: u64,
    states: BTreeMap<TrackingId, BTreeMap<String, Vec<String>>>,
}

impl ElementStateStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh tracking id.
    pub fn issue(&mut self) -> TrackingId {
        self.last_issued += 1;
        let id = TrackingId::from_raw(self.last_issued);
        debug_assert!(id.is_some(), "tracking id counter wrapped");
        id.unwrap_or(TrackingId(NonZeroU64::MIN))
    }

    /// True if `id` was issued by this store.
    pub fn is_issued(&self, id: TrackingId) -> bool {
        id.get() <= self.last_issued
    }

    /// Replace the classes of `id` at breakpoint `code`.
    pub fn put(&mut self, id: TrackingId, code: &str, classes: Vec<String>) {
        debug_assert!(self.is_issued(id), "tracking id {id} was not issued by this store");
        self.states
            .entry(id)
            .or_default()
            .insert(String::from(code), classes);
    }

    /// Classes of `id` at breakpoint `code`; empty when nothing was stored.
    pub fn get(&self, id: TrackingId, code: &str) -> &[String] {
        self.states
            .get(&id)
            .and_then(|by_code| by_code.get(code))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Breakpoint codes stored for `id`.
    pub fn codes(&self, id: TrackingId) -> impl Iterator<Item = &str> + '_ {
        self.states
            .get(&id)
            .into_iter()
            .flat_map(|by_code| by_code.keys().map(String::as_str))
    }

    /// Drop every entry for `id`. Returns whether anything was stored.
    pub fn remove(&mut self, id: TrackingId) -> bool {
        self.states.remove(&id).is_some()
    }

    /// True if anything is stored for `id`.
    pub fn contains(&self, id: TrackingId) -> bool {
        self.states.contains_key(&id)
    }

    /// Number of elements with stored classes.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn classes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| String::from(*s)).collect()
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut store = ElementStateStore::new();
        let a = store.issue();
        let b = store.issue();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert!(a < b);
        assert!(store.is_issued(b));
        assert!(!store.is_issued(TrackingId::from_raw(3).unwrap()));
    }

    #[test]
    fn ids_round_trip_through_text() {
        let id = TrackingId::from_raw(42).unwrap();
        assert_eq!(id.to_string(), "42");
        assert_eq!(TrackingId::parse("42"), Some(id));
        assert_eq!(TrackingId::parse("0"), None);
        assert_eq!(TrackingId::parse("-1"), None);
        assert_eq!(TrackingId::parse("nope"), None);
    }

    #[test]
    fn put_get_replace() {
        let mut store = ElementStateStore::new();
        let id = store.issue();
        assert!(store.get(id, "md").is_empty());
        store.put(id, "md", classes(&["a", "b"]));
        assert_eq!(store.get(id, "md"), ["a", "b"]);
        store.put(id, "md", classes(&["c"]));
        assert_eq!(store.get(id, "md"), ["c"]);
        assert!(store.get(id, "lg").is_empty());
        assert!(store.contains(id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_purges_every_code() {
        let mut store = ElementStateStore::new();
        let id = store.issue();
        store.put(id, "sm", classes(&["a"]));
        store.put(id, "md", classes(&["b"]));
        assert_eq!(store.codes(id).collect::<Vec<_>>(), vec!["md", "sm"]);
        assert!(store.remove(id));
        assert!(!store.contains(id));
        assert!(store.get(id, "sm").is_empty());
        assert!(!store.remove(id));
        assert!(store.is_empty());
    }

    #[test]
    #[should_panic(expected = "was not issued")]
    #[cfg(debug_assertions)]
    fn put_with_foreign_id_panics_in_debug() {
        let mut store = ElementStateStore::new();
        store.put(TrackingId::from_raw(9).unwrap(), "md", Vec::new());
    }
}
