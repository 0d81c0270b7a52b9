// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich-text hit testing across relayouts.
//!
//! This example shows how to combine:
//! - `understory_span_tree` for the paragraph → link → word ownership forest,
//! - `understory_text_hit` for resolving taps to spans and walking to the
//!   enclosing link,
//! - `HitSurface` for publishing a relayout while holding on to earlier hits.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_examples --example rich_text_hit`

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_span_tree::{SpanEntry, SpanFlags, SpanId};
use understory_text_hit::{
    Direction, GlyphRun, HitSurface, IndexOptions, LayoutFrame, Line, QueryError,
};

const PARAGRAPH: SpanId = SpanId(1);
const LINK: SpanId = SpanId(2);
const READ: SpanId = SpanId(3);
const MORE: SpanId = SpanId(4);
const TAIL: SpanId = SpanId(5);
const QUOTE: SpanId = SpanId(6);

fn spans() -> Vec<SpanEntry> {
    vec![
        SpanEntry::root(PARAGRAPH),
        SpanEntry::child(LINK, PARAGRAPH).with_flags(SpanFlags::TAPPABLE | SpanFlags::ACCESSIBLE),
        SpanEntry::child(READ, LINK),
        SpanEntry::child(MORE, LINK),
        SpanEntry::child(TAIL, PARAGRAPH),
        SpanEntry::child(QUOTE, PARAGRAPH),
    ]
}

/// "read more" on one line, followed by plain text and a right-to-left quote.
fn wide_layout() -> Vec<Line> {
    vec![
        Line::new(0, Rect::new(0.0, 0.0, 200.0, 20.0)).with_runs([
            GlyphRun::new(READ, Rect::new(0.0, 0.0, 36.0, 20.0), 0, 0),
            GlyphRun::new(MORE, Rect::new(36.0, 0.0, 80.0, 20.0), 0, 1),
            GlyphRun::new(TAIL, Rect::new(84.0, 0.0, 140.0, 20.0), 0, 2),
            GlyphRun::new(QUOTE, Rect::new(140.0, 0.0, 200.0, 20.0), 0, 3)
                .with_direction(Direction::Rtl),
        ]),
    ]
}

/// The same text wrapped to a narrower width: the link now spans two lines.
fn narrow_layout() -> Vec<Line> {
    vec![
        Line::new(0, Rect::new(0.0, 0.0, 100.0, 20.0)).with_runs([
            GlyphRun::new(TAIL, Rect::new(0.0, 0.0, 56.0, 20.0), 0, 0),
            GlyphRun::new(READ, Rect::new(60.0, 0.0, 96.0, 20.0), 0, 1),
        ]),
        // Shaper rounding leaves the second line a quarter pixel high.
        Line::new(1, Rect::new(0.0, 19.75, 100.0, 39.75)).with_runs([
            GlyphRun::new(MORE, Rect::new(0.0, 19.75, 44.0, 39.75), 1, 0),
            GlyphRun::new(QUOTE, Rect::new(40.0, 19.75, 100.0, 39.75), 1, 1)
                .with_direction(Direction::Rtl),
        ]),
    ]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = IndexOptions::default();
    let surface = HitSurface::new();

    let first = LayoutFrame::from_parts(spans(), wide_layout(), &options)
        .expect("wide layout is well formed");
    let g1 = surface.publish(first);
    println!("published {g1}");

    let frame = surface.load().expect("frame was just published");
    let resolver = frame.resolver();
    for p in [
        Point::new(10.0, 10.0),
        Point::new(36.0, 10.0),
        Point::new(82.0, 10.0),
        Point::new(150.0, 10.0),
        Point::new(10.0, 25.0),
    ] {
        let leaf = resolver.resolve(p);
        let tappable = resolver.resolve_tappable(p);
        let path = resolver.resolve_path(p).unwrap_or_default();
        println!("  {p:?}: leaf={leaf:?} tappable={tappable:?} path={path:?}");
    }

    // Remember a tap on "more", then relayout.
    let tapped = surface
        .resolve(Point::new(50.0, 10.0))
        .expect("point is over the link");
    println!("tapped {} in {}", tapped.span, tapped.generation);

    let second = LayoutFrame::from_parts(spans(), narrow_layout(), &options)
        .expect("narrow layout is well formed");
    let g2 = surface.publish(second);
    println!("published {g2}");

    match surface.resolve_at(tapped.generation, Point::new(50.0, 10.0)) {
        Err(QueryError::StaleGeneration { requested, active }) => {
            println!("  old tap is stale: {requested} vs {active:?}");
        }
        other => println!("  unexpected: {other:?}"),
    }
    // The held frame still answers against its own geometry.
    match surface.resolve_with(&frame, Point::new(50.0, 10.0)) {
        Ok(span) => println!("  held frame resolved {span:?}"),
        Err(err) => println!("  held frame rejected: {err}"),
    }
    match surface.refresh(tapped) {
        Ok(hit) => {
            let bounds = surface
                .load()
                .and_then(|frame| frame.index().span_bounds(hit.span));
            println!("  refreshed {} into {}, now at {bounds:?}", hit.span, hit.generation);
        }
        Err(err) => println!("  refresh failed: {err}"),
    }

    // The quarter-pixel overlap between the two lines belongs to the second.
    let frame = surface.load().expect("frame was just published");
    println!(
        "  (10, 19.8) -> {:?}",
        frame.resolve(Point::new(10.0, 19.8))
    );

    // A layout whose runs name a span the tree lacks is rejected before publish.
    let mut broken = narrow_layout();
    broken[0].push_run(GlyphRun::new(SpanId(99), Rect::new(96.0, 0.0, 100.0, 20.0), 0, 2));
    if let Err(err) = LayoutFrame::from_parts(spans(), broken, &options) {
        println!("rejected relayout: {err}");
    }
    println!("still serving {:?}", surface.generation());
}
