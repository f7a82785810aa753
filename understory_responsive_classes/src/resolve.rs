// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-breakpoint class resolution.
//!
//! ## Rules for one state
//!
//! Walk the breakpoints in ascending order, carrying a `current` class that starts as the
//! state's default (the last default directive wins).
//!
//! - A breakpoint with a plain directive gets that directive's class; `current` is unchanged.
//! - A breakpoint with a `gt-` directive gets its class, and it becomes `current`.
//! - Any other breakpoint gets `current`, which may be nothing.
//!
//! When several directives target the same breakpoint, a `gt-` directive takes precedence over
//! a plain one; among directives of the same kind the first in attribute order wins.
//!
//! ```
//! use understory_responsive_classes::directive::parse_directives;
//! use understory_responsive_classes::resolve::resolve_state;
//!
//! let codes = ["xs", "sm", "md", "lg", "xl"];
//! let attrs = [("rc-pad", "1"), ("rc-gt-sm-pad", "2"), ("rc-lg-pad", "3")];
//! let parsed = parse_directives(attrs, &codes);
//! let pad = resolve_state(parsed.get("pad").unwrap(), codes.len());
//! let got: Vec<_> = pad.iter().collect();
//! assert_eq!(
//!     got,
//!     [Some("pad-1"), Some("pad-2"), Some("pad-2"), Some("pad-3"), Some("pad-2")]
//! );
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::directive::{Directive, ParsedDirectives};

/// Resolved class of one state at every breakpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateAssignment {
    classes: Vec<Option<String>>,
}

impl StateAssignment {
    /// Class at the breakpoint with position `breakpoint`, if any.
    pub fn get(&self, breakpoint: usize) -> Option<&str> {
        self.classes.get(breakpoint)?.as_deref()
    }

    /// Number of breakpoints covered.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True if there are no breakpoints.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Classes in breakpoint order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.classes.iter().map(Option::as_deref)
    }
}

/// Resolve one state's directives over `breakpoint_count` ordered breakpoints.
///
/// Directives targeting a position at or past `breakpoint_count` are ignored.
pub fn resolve_state(directives: &[Directive], breakpoint_count: usize) -> StateAssignment {
    let baseline = directives
        .iter()
        .rev()
        .find(|d| d.breakpoint.is_none())
        .map(|d| d.class_name.as_str());

    let mut scoped: Vec<&Directive> = directives
        .iter()
        .filter(|d| d.breakpoint.is_some_and(|b| b < breakpoint_count))
        .collect();
    // Stable: ties keep attribute order.
    scoped.sort_by_key(|d| (d.breakpoint, !d.greater_than));
    scoped.dedup_by_key(|d| d.breakpoint);

    let mut current = baseline;
    let mut next = scoped.into_iter().peekable();
    let mut classes = Vec::with_capacity(breakpoint_count);
    for position in 0..breakpoint_count {
        match next.next_if(|d| d.breakpoint == Some(position)) {
            Some(directive) => {
                if directive.greater_than {
                    current = Some(directive.class_name.as_str());
                }
                classes.push(Some(directive.class_name.clone()));
            }
            None => classes.push(current.map(String::from)),
        }
    }
    StateAssignment { classes }
}

/// Classes of a whole element at every breakpoint.
///
/// Entry `i` is the union of every state's class at breakpoint `i`, without duplicates, in the
/// order the states first appeared.
pub fn resolve_element(parsed: &ParsedDirectives, breakpoint_count: usize) -> Vec<Vec<String>> {
    let assignments: Vec<StateAssignment> = parsed
        .states()
        .iter()
        .map(|s| resolve_state(&s.directives, breakpoint_count))
        .collect();

    (0..breakpoint_count)
        .map(|position| {
            let mut union: Vec<String> = Vec::new();
            for class in assignments.iter().filter_map(|a| a.get(position)) {
                if !union.iter().any(|c| c == class) {
                    union.push(String::from(class));
                }
            }
            union
        })
        .collect()
}
