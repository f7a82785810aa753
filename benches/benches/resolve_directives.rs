// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_responsive_classes::directive::parse_directives;
use understory_responsive_classes::resolve::resolve_element;

const CODES: [&str; 5] = ["xs", "sm", "md", "lg", "xl"];

/// `states` states, each with a default, a `gt-` directive, and a plain override,
/// plus a few unrelated attributes.
fn gen_attributes(states: usize) -> Vec<(String, String)> {
    let mut out = vec![
        (String::from("id"), String::from("main")),
        (String::from("class"), String::from("card")),
    ];
    for s in 0..states {
        let gt = CODES[s % CODES.len()];
        let plain = CODES[(s + 2) % CODES.len()];
        out.push((format!("rc-state{s}"), String::from("base")));
        out.push((format!("rc-gt-{gt}-state{s}"), String::from("wide layout")));
        out.push((format!("rc-{plain}-state{s}"), String::new()));
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for &states in &[1_usize, 4, 16] {
        let attrs = gen_attributes(states);
        group.throughput(Throughput::Elements(attrs.len() as u64));
        group.bench_function(format!("parse_states{}", states), |b| {
            b.iter(|| {
                let parsed = parse_directives(
                    attrs.iter().map(|(n, v)| (n.as_str(), v.as_str())),
                    &CODES,
                );
                black_box(parsed.len());
            });
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for &states in &[1_usize, 4, 16] {
        let attrs = gen_attributes(states);
        let parsed = parse_directives(attrs.iter().map(|(n, v)| (n.as_str(), v.as_str())), &CODES);
        group.throughput(Throughput::Elements(states as u64));
        group.bench_function(format!("resolve_element_states{}", states), |b| {
            b.iter(|| {
                let classes = resolve_element(black_box(&parsed), CODES.len());
                black_box(classes);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_resolve);
criterion_main!(benches);
