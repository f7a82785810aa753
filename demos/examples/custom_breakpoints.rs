// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading a breakpoint set from JSON, replacing it at runtime, and the errors registration reports.
//!
//! Run:
//! - `cargo run -p understory_demos --example custom_breakpoints`

use understory_breakpoints::{BreakpointConfig, BreakpointProvider, BreakpointRange};

const DEVICE_CLASSES: &str = r#"[
    { "code": "phone", "range": { "max": 600 } },
    { "code": "tablet", "range": { "min": 600, "max": 1024 } },
    { "code": "desktop", "range": { "min": 1024 } }
]"#;

fn main() {
    let config: BreakpointConfig =
        serde_json::from_str(DEVICE_CLASSES).expect("the bundled configuration is valid JSON");
    let mut provider = BreakpointProvider::new(&config).expect("the bundled configuration is valid");

    let (_, codes) = provider.subscribe_breakpoints(|codes| println!("set changed: {codes:?}"));
    println!("initial set: {codes:?}");
    let (_, current) =
        provider.subscribe_current(|new, old| println!("transition: {old:?} -> {new}"));
    println!("initial current: {current:?}");

    for width in [320.0, 800.0, 1024.0, 1920.0] {
        match provider.set_width(width) {
            Ok(Some(t)) => println!("width {width}: now {}", t.new),
            Ok(None) => println!("width {width}: unchanged ({:?})", provider.current()),
            Err(err) => println!("width {width}: {err}"),
        }
    }

    // Replacing the set re-detects the current breakpoint from the last width.
    let narrow_first = BreakpointConfig::new()
        .with("narrow", BreakpointRange::at_most(1280.0))
        .with("roomy", BreakpointRange::at_least(1280.0));
    if let Err(err) = provider.register(&narrow_first) {
        println!("register failed: {err}");
    }

    // A set with a gap registers, but widths inside the gap cannot be detected.
    let gappy = BreakpointConfig::new()
        .with("small", BreakpointRange::at_most(500.0))
        .with("large", BreakpointRange::at_least(900.0));
    let gappy_provider = BreakpointProvider::new(&gappy).expect("both entries have a bound");
    if let Err(err) = gappy_provider.determine(700.0) {
        println!("determine(700): {err}");
    }

    // Entries without any usable bound are rejected before anything changes.
    let broken = BreakpointConfig::new().with("nowhere", BreakpointRange::default());
    if let Err(err) = provider.register(&broken) {
        println!("register(broken): {err}");
    }
    let duplicate = BreakpointConfig::new()
        .with("all", BreakpointRange::at_least(0.0))
        .with("all", BreakpointRange::at_least(10.0));
    if let Err(err) = provider.register(&duplicate) {
        println!("register(duplicate): {err}");
    }
    println!("still registered: {:?}", provider.codes());

    println!(
        "as JSON: {}",
        serde_json::to_string(&narrow_first).expect("configurations serialize")
    );
}
