// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directive attribute parsing.
//!
//! ## Grammar
//!
//! ```text
//! rc-[gt-][<breakpoint>-]<state>="<value>"
//! ```
//!
//! Matching is ASCII case-insensitive for the `rc-` and `gt-` prefixes and for breakpoint codes.
//! The state name keeps the attribute's spelling.
//!
//! The optional `gt-<breakpoint>-` group is tried first with `gt-`, then without, trying
//! breakpoint codes in ascending order; it only applies when a non-empty state name follows.
//! Otherwise everything after `rc-` is the state name, so `rc-gt-wide` with no breakpoint
//! declares the default class of a state called `gt-wide`.
//!
//! ## Class names
//!
//! An empty value yields the state name itself. A non-empty value yields `state-value`,
//! with every space in the value replaced by `-`.
//!
//! ```
//! use understory_responsive_classes::directive::{parse_attribute, Directive};
//!
//! let codes = ["sm", "md"];
//! let d = parse_attribute("rc-gt-sm-layout", "two col", &codes).unwrap();
//! assert_eq!(
//!     d,
//!     Directive {
//!         state_name: "layout".into(),
//!         breakpoint: Some(0),
//!         greater_than: true,
//!         class_name: "layout-two-col".into(),
//!     }
//! );
//! assert!(parse_attribute("data-sm-layout", "", &codes).is_none());
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Prefix shared by every directive attribute.
pub const DIRECTIVE_PREFIX: &str = "rc-";

const GREATER_THAN_PREFIX: &str = "gt-";

/// One parsed directive attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    /// Logical state this directive configures.
    pub state_name: String,
    /// Position of the targeted breakpoint in the ordered code list; `None` for the state default.
    pub breakpoint: Option<usize>,
    /// True for `gt-` directives, which carry forward to higher breakpoints.
    pub greater_than: bool,
    /// Class to apply.
    pub class_name: String,
}

/// All directives for one state name, in attribute order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateDirectives {
    /// State name shared by every directive in the list.
    pub state_name: String,
    /// Directives in attribute order.
    pub directives: Vec<Directive>,
}

/// Directives of one element grouped by state name.
///
/// States keep the order in which their first directive appeared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedDirectives {
    states: Vec<StateDirectives>,
}

impl ParsedDirectives {
    /// True if the element had no directive attributes.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of distinct state names.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// States in first-appearance order.
    pub fn states(&self) -> &[StateDirectives] {
        &self.states
    }

    /// Directives for `state_name`, if any.
    pub fn get(&self, state_name: &str) -> Option<&[Directive]> {
        self.states
            .iter()
            .find(|s| s.state_name == state_name)
            .map(|s| s.directives.as_slice())
    }

    fn push(&mut self, directive: Directive) {
        match self
            .states
            .iter_mut()
            .find(|s| s.state_name == directive.state_name)
        {
            Some(state) => state.directives.push(directive),
            None => self.states.push(StateDirectives {
                state_name: directive.state_name.clone(),
                directives: alloc::vec![directive],
            }),
        }
    }
}

/// True if `name` starts with `rc-` (any case).
///
/// This is the test for "directive-bearing" elements and for relevant attribute changes.
/// It is broader than [`parse_attribute`]: `rc-` alone passes here but parses to nothing.
pub fn is_directive_attribute(name: &str) -> bool {
    strip_prefix_ignore_case(name, DIRECTIVE_PREFIX).is_some()
}

/// Parse one attribute against the ordered breakpoint codes.
pub fn parse_attribute<C: AsRef<str>>(name: &str, value: &str, codes: &[C]) -> Option<Directive> {
    let rest = strip_prefix_ignore_case(name, DIRECTIVE_PREFIX)?;
    if rest.is_empty() {
        return None;
    }
    let (greater_than, breakpoint, state) = split_scope(rest, codes);
    Some(Directive {
        state_name: String::from(state),
        breakpoint,
        greater_than,
        class_name: class_name(state, value),
    })
}

/// Parse every attribute of an element, ignoring the ones that are not directives.
pub fn parse_directives<'a, C: AsRef<str>>(
    attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
    codes: &[C],
) -> ParsedDirectives {
    let mut parsed = ParsedDirectives::default();
    for (name, value) in attributes {
        if let Some(directive) = parse_attribute(name, value, codes) {
            parsed.push(directive);
        }
    }
    parsed
}

/// Class name for a state and attribute value.
pub fn class_name(state_name: &str, value: &str) -> String {
    if value.is_empty() {
        String::from(state_name)
    } else {
        format!("{state_name}-{}", value.replace(' ', "-"))
    }
}

fn split_scope<'a, C: AsRef<str>>(rest: &'a str, codes: &[C]) -> (bool, Option<usize>, &'a str) {
    let candidates = [
        (true, strip_prefix_ignore_case(rest, GREATER_THAN_PREFIX)),
        (false, Some(rest)),
    ];
    for (greater_than, scoped) in candidates {
        let Some(scoped) = scoped else {
            continue;
        };
        for (i, code) in codes.iter().enumerate() {
            if let Some(after) = strip_prefix_ignore_case(scoped, code.as_ref())
                && let Some(state) = after.strip_prefix('-')
                && !state.is_empty()
            {
                return (greater_than, Some(i), state);
            }
        }
    }
    (false, None, rest)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const CODES: [&str; 5] = ["xs", "sm", "md", "lg", "xl"];

    fn parse(name: &str, value: &str) -> Option<Directive> {
        parse_attribute(name, value, &CODES)
    }

    #[test]
    fn default_directive() {
        let d = parse("rc-hidden", "").unwrap();
        assert_eq!(d.state_name, "hidden");
        assert_eq!(d.breakpoint, None);
        assert!(!d.greater_than);
        assert_eq!(d.class_name, "hidden");
    }

    #[test]
    fn scoped_and_greater_than() {
        let d = parse("rc-md-cols", "3").unwrap();
        assert_eq!((d.breakpoint, d.greater_than), (Some(2), false));
        assert_eq!(d.class_name, "cols-3");

        let d = parse("rc-gt-sm-cols", "2").unwrap();
        assert_eq!((d.breakpoint, d.greater_than), (Some(1), true));
        assert_eq!(d.state_name, "cols");
    }

    #[test]
    fn case_insensitive_prefixes_and_codes() {
        let d = parse("RC-GT-MD-Cols", "").unwrap();
        assert_eq!(d.breakpoint, Some(2));
        assert!(d.greater_than);
        assert_eq!(d.state_name, "Cols", "state keeps its spelling");
        assert!(is_directive_attribute("Rc-anything"));
    }

    #[test]
    fn gt_without_breakpoint_is_part_of_the_state() {
        let d = parse("rc-gt-wide", "").unwrap();
        assert_eq!(d.state_name, "gt-wide");
        assert_eq!(d.breakpoint, None);
        assert!(!d.greater_than);
    }

    #[test]
    fn breakpoint_needs_a_following_state() {
        // `md-` with nothing after it cannot be a scope; the whole tail is the state.
        let d = parse("rc-md-", "").unwrap();
        assert_eq!(d.state_name, "md-");
        assert_eq!(d.breakpoint, None);
        assert!(parse("rc-", "x").is_none());
        assert!(parse("r", "").is_none());
        assert!(parse("class", "").is_none());
    }

    #[test]
    fn unknown_code_is_part_of_the_state() {
        let d = parse("rc-xxl-pad", "").unwrap();
        assert_eq!(d.state_name, "xxl-pad");
        assert_eq!(d.breakpoint, None);
    }

    #[test]
    fn codes_sharing_a_prefix_backtrack() {
        let codes = ["s", "sm"];
        let d = parse_attribute("rc-sm-pad", "", &codes).unwrap();
        assert_eq!((d.breakpoint, d.state_name.as_str()), (Some(1), "pad"));
        let d = parse_attribute("rc-s-pad", "", &codes).unwrap();
        assert_eq!((d.breakpoint, d.state_name.as_str()), (Some(0), "pad"));
    }

    #[test]
    fn gt_code_falls_back_to_plain_match() {
        // `gt-` is taken first; when nothing follows as a code, the plain reading is tried.
        let codes = ["gt", "md"];
        let d = parse_attribute("rc-gt-pad", "", &codes).unwrap();
        assert_eq!((d.greater_than, d.breakpoint), (false, Some(0)));
        assert_eq!(d.state_name, "pad");
    }

    #[test]
    fn class_names_replace_spaces() {
        assert_eq!(class_name("state", ""), "state");
        assert_eq!(class_name("state", "a b  c"), "state-a-b--c");
        assert_eq!(class_name("state", "0"), "state-0");
    }

    #[test]
    fn grouping_keeps_first_appearance_order() {
        let attrs = [
            ("id", "main"),
            ("rc-b", "1"),
            ("rc-md-a", ""),
            ("rc-b", "2"),
            ("rc-a", "x"),
        ];
        let parsed = parse_directives(attrs, &CODES);
        let names: Vec<&str> = parsed.states().iter().map(|s| s.state_name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        let b: Vec<&str> = parsed
            .get("b")
            .unwrap()
            .iter()
            .map(|d| d.class_name.as_str())
            .collect();
        assert_eq!(b, vec!["b-1", "b-2"]);
        assert_eq!(parsed.get("a").unwrap()[0].breakpoint, Some(2));
        assert!(parsed.get("id").is_none());
    }

    #[test]
    fn no_directives_is_empty() {
        let parsed = parse_directives([("class", "x"), ("rc-", "")], &CODES);
        assert!(parsed.is_empty());
        assert_eq!(parsed.len(), 0);
    }
}
