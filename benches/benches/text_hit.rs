// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index construction and point resolution over a synthetic paragraph.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_span_tree::{SpanEntry, SpanFlags, SpanId, SpanTree};
use understory_text_hit::{GlyphRun, HitResolver, IndexOptions, LayoutIndex, Line};

const LINE_HEIGHT: f64 = 18.0;
const WORD_WIDTH: f64 = 40.0;
const GAP: f64 = 6.0;
const WORDS_PER_LINE: u32 = 12;

/// One root paragraph, a link span every fourth word, one leaf span per word.
fn paragraph(lines: u32) -> (SpanTree, Vec<Line>) {
    let root = SpanId(0);
    let mut entries = vec![SpanEntry::root(root)];
    let mut out = Vec::with_capacity(lines as usize);
    let mut next = 1_u64;
    for l in 0..lines {
        let y0 = f64::from(l) * LINE_HEIGHT;
        let mut line = Line::new(
            l,
            Rect::new(0.0, y0, f64::from(WORDS_PER_LINE) * (WORD_WIDTH + GAP), y0 + LINE_HEIGHT),
        );
        for w in 0..WORDS_PER_LINE {
            let parent = if w % 4 == 0 {
                let link = SpanId(next);
                next += 1;
                entries.push(SpanEntry::child(link, root).with_flags(SpanFlags::TAPPABLE));
                link
            } else {
                root
            };
            let word = SpanId(next);
            next += 1;
            entries.push(SpanEntry::child(word, parent));
            let x0 = f64::from(w) * (WORD_WIDTH + GAP);
            line.push_run(GlyphRun::new(
                word,
                Rect::new(x0, y0, x0 + WORD_WIDTH, y0 + LINE_HEIGHT),
                l,
                w,
            ));
        }
        out.push(line);
    }
    (SpanTree::build(entries).unwrap(), out)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_index_build");
    for lines in [10_u32, 100, 1_000] {
        let (tree, layout) = paragraph(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &layout, |b, layout| {
            b.iter(|| {
                let index =
                    LayoutIndex::build(layout.clone(), &tree, &IndexOptions::default()).unwrap();
                black_box(index.run_count());
            });
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for lines in [10_u32, 1_000] {
        let (tree, layout) = paragraph(lines);
        let index = LayoutIndex::build(layout, &tree, &IndexOptions::default()).unwrap();
        let resolver = HitResolver::new(&index, &tree);
        let height = f64::from(lines) * LINE_HEIGHT;
        let points: Vec<Point> = (0..256)
            .map(|i| {
                let t = f64::from(i) / 256.0;
                Point::new(t * 560.0, (t * 7.31).fract() * height)
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("leaf", lines), &points, |b, points| {
            b.iter(|| {
                for p in points {
                    black_box(resolver.resolve(*p));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("tappable", lines), &points, |b, points| {
            b.iter(|| {
                for p in points {
                    black_box(resolver.resolve_tappable(*p));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(text_hit_benches, bench_build, bench_resolve);
criterion_main!(text_hit_benches);
