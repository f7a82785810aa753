// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A monitor keeping classes applied on an element document while the viewport resizes.
//!
//! The scheduler here only records that a flush was requested; the "frame loop" below runs
//! the flush right after each step, as a host would before presenting.
//!
//! Run:
//! - `RUST_LOG=understory_responsive_classes=trace cargo run -p understory_demos --example monitor_document`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Size;
use tracing_subscriber::EnvFilter;
use understory_breakpoints::{BreakpointConfig, BreakpointProvider};
use understory_element_tree::{Document, ElementId};
use understory_responsive_classes::Monitor;

fn describe(doc: &Document, label: &str, el: ElementId) {
    println!("    {label:<7} {:?}", doc.classes(el));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut provider =
        BreakpointProvider::with_viewport(&BreakpointConfig::default(), Size::new(480.0, 800.0))
            .expect("stock breakpoints cover every width");

    let mut doc = Document::new();
    let root = doc.root();
    let nav = doc.create_element("nav");
    doc.set_attribute(nav, "rc-nav", "drawer");
    doc.set_attribute(nav, "rc-gt-md-nav", "bar");
    doc.append_child(root, nav);
    let grid = doc.create_element("main");
    doc.set_attribute(grid, "rc-cols", "1");
    doc.set_attribute(grid, "rc-gt-sm-cols", "2");
    doc.set_attribute(grid, "rc-xl-cols", "4");
    doc.append_child(root, grid);

    let requested = Rc::new(Cell::new(false));
    let flag = Rc::clone(&requested);
    let mut monitor = Monitor::new(&mut provider, move || flag.set(true));
    monitor.resume(&mut doc);

    let frame = |monitor: &mut Monitor<ElementId, _>, doc: &mut Document, step: &str| {
        monitor.poll(doc);
        if requested.replace(false) {
            let applied = monitor.run_frame(doc);
            println!("{step}: applied {applied} class edits at {:?}", monitor.current());
        } else {
            println!("{step}: nothing to do");
        }
        describe(doc, "nav", nav);
        describe(doc, "grid", grid);
    };

    frame(&mut monitor, &mut doc, "initial scan");

    for width in [720.0, 1100.0, 1400.0, 2400.0, 1400.0] {
        provider
            .set_viewport(Size::new(width, 800.0))
            .expect("stock breakpoints cover every width");
        frame(&mut monitor, &mut doc, &format!("resize to {width}"));
    }

    // A card added later is picked up from the mutation feed.
    let card = doc.create_element("article");
    doc.set_attribute(card, "rc-lg-featured", "");
    doc.append_child(grid, card);
    frame(&mut monitor, &mut doc, "card added");
    describe(&doc, "card", card);

    monitor.dispose(&mut provider, &mut doc);
}
