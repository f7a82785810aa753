// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_breakpoints::BreakpointProvider;
use understory_element_tree::Document;
use understory_responsive_classes::Monitor;

/// A document with `sections` sections of `per_section` cards; every card carries directives.
fn gen_document(sections: usize, per_section: usize) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    for s in 0..sections {
        let section = doc.create_element("section");
        doc.set_attribute(section, "id", format!("s{s}"));
        for c in 0..per_section {
            let card = doc.create_element("div");
            doc.set_attribute(card, "rc-cols", "1");
            doc.set_attribute(card, "rc-gt-sm-cols", "2");
            doc.set_attribute(card, "rc-lg-cols", "4");
            if c % 3 == 0 {
                doc.set_attribute(card, "rc-xs-hidden", "");
            }
            doc.append_child(section, card);
        }
        doc.append_child(root, section);
    }
    doc
}

fn provider_at(width: f64) -> BreakpointProvider {
    let mut provider = BreakpointProvider::default();
    let _ = provider.set_width(width);
    provider
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    for &(sections, per_section) in &[(8_usize, 16_usize), (32, 32)] {
        group.throughput(Throughput::Elements((sections * per_section) as u64));
        group.bench_function(format!("resume_cards{}", sections * per_section), |b| {
            b.iter_batched(
                || (provider_at(1000.0), gen_document(sections, per_section)),
                |(mut provider, mut doc)| {
                    let mut monitor = Monitor::new(&mut provider, || {});
                    monitor.resume(&mut doc);
                    black_box(monitor.run_frame(&mut doc));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_transition(c: &mut Criterion) {
    let mut group = c.benchmark_group("transition");
    let (sections, per_section) = (32_usize, 32_usize);
    group.throughput(Throughput::Elements((sections * per_section) as u64));
    group.bench_function("sm_to_lg_and_back", |b| {
        let mut provider = provider_at(700.0);
        let mut doc = gen_document(sections, per_section);
        let mut monitor = Monitor::new(&mut provider, || {});
        monitor.resume(&mut doc);
        monitor.run_frame(&mut doc);
        b.iter(|| {
            for width in [1500.0, 700.0] {
                let _ = provider.set_width(width);
                monitor.poll(&mut doc);
                black_box(monitor.run_frame(&mut doc));
                // Drop the class records the flush produced.
                monitor.poll(&mut doc);
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_scan, bench_transition);
criterion_main!(benches);
