// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directive parsing and per-breakpoint resolution, without a tree.
//!
//! Prints which classes one element would carry at each of the stock breakpoints.
//!
//! Run:
//! - `cargo run -p understory_demos --example responsive_basics`

use understory_breakpoints::BreakpointProvider;
use understory_responsive_classes::directive::parse_directives;
use understory_responsive_classes::resolve::{resolve_element, resolve_state};

fn main() {
    let provider = BreakpointProvider::default();
    let codes = provider.codes();

    let attrs = [
        ("id", "gallery"),
        ("rc-cols", "1"),
        ("rc-gt-sm-cols", "2"),
        ("rc-lg-cols", "4"),
        ("rc-xs-compact", ""),
        ("rc-gt-md-gap", "wide"),
    ];
    let parsed = parse_directives(attrs, &codes);

    println!("States (first-appearance order):");
    for state in parsed.states() {
        let per_breakpoint = resolve_state(&state.directives, codes.len());
        let cells: Vec<String> = codes
            .iter()
            .zip(per_breakpoint.iter())
            .map(|(code, class)| format!("{code}={}", class.unwrap_or("-")))
            .collect();
        println!("  {:<8} {}", state.state_name, cells.join("  "));
    }

    println!("\nElement classes per breakpoint:");
    for (code, classes) in codes.iter().zip(resolve_element(&parsed, codes.len())) {
        println!("  {code:<3} {classes:?}");
    }
}
