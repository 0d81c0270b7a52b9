// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable line/run index with closed-open point lookup.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;
use understory_span_tree::{SpanId, SpanTree};

use crate::error::MalformedLayout;
use crate::geometry::{GlyphRun, Line};
use crate::options::IndexOptions;

/// Location of a run inside the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RunRef {
    line: u32,
    run: u32,
}

/// The line and run found under a point.
#[derive(Clone, Copy, Debug)]
pub struct RunHit<'a> {
    /// The line whose band contains the point.
    pub line: &'a Line,
    /// The run whose horizontal extent contains the point.
    pub run: &'a GlyphRun,
}

impl RunHit<'_> {
    /// The span owning the hit run.
    pub fn span(&self) -> SpanId {
        self.run.span
    }
}

/// Spatial index over the lines and glyph runs of one layout pass.
///
/// Lines are kept sorted top to bottom and each line's runs sorted by
/// `order_in_line`, so a point query is two binary searches:
///
/// - a line owns the closed-open band `[top, bottom)`; where neighbors overlap
///   by a sub-pixel amount, the later line owns the overlap;
/// - a run owns `[x0, x1)` within its line's band.
///
/// The index also keeps running maxima of line bottoms and, per line, of run
/// right edges. These bound the backward scans needed when a line reaches
/// into a short neighbor, or when runs overlap at a writing-direction change.
///
/// The index is immutable and is rebuilt wholesale whenever layout changes.
#[derive(Clone, Default)]
pub struct LayoutIndex {
    lines: Vec<Line>,
    /// Running maximum of line `y1`.
    line_reach: Vec<f64>,
    /// Offset of each line's first run in `reach`.
    run_starts: Vec<u32>,
    /// Per-line running maximum of run `x1`, flattened.
    reach: Vec<f64>,
    spans: HashMap<SpanId, SmallVec<[RunRef; 2]>>,
    bounds: Option<Rect>,
}

impl fmt::Debug for LayoutIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutIndex")
            .field("lines", &self.lines.len())
            .field("runs", &self.reach.len())
            .field("spans", &self.spans.len())
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl LayoutIndex {
    /// Validate `lines` against `tree` and build the index.
    ///
    /// Runs may be supplied in any order within a line; they are sorted by
    /// `order_in_line`. Inverted rectangles are normalized. See
    /// [`MalformedLayout`] for the rejected cases.
    pub fn build<I>(
        lines: I,
        tree: &SpanTree,
        options: &IndexOptions,
    ) -> Result<Self, MalformedLayout>
    where
        I: IntoIterator<Item = Line>,
    {
        Self::build_inner(lines.into_iter().collect(), tree, options.effective_tolerance())
            .inspect(|index| {
                tracing::debug!(
                    lines = index.line_count(),
                    runs = index.run_count(),
                    spans = index.spans.len(),
                    "built layout index"
                );
            })
            .inspect_err(|err| tracing::warn!(error = %err, "rejected layout"))
    }

    fn build_inner(
        mut lines: Vec<Line>,
        tree: &SpanTree,
        tolerance: f64,
    ) -> Result<Self, MalformedLayout> {
        let mut line_reach: Vec<f64> = Vec::with_capacity(lines.len());
        let mut run_starts = Vec::with_capacity(lines.len());
        let mut reach = Vec::new();
        let mut spans: HashMap<SpanId, SmallVec<[RunRef; 2]>> = HashMap::new();
        let mut bounds: Option<Rect> = None;

        for slot in 0..lines.len() {
            let (done, rest) = lines.split_at_mut(slot);
            let line = &mut rest[0];
            normalize_line(line, tree)?;
            if let Some(previous) = done.last() {
                check_line_order(previous, line, tolerance)?;
            }

            let start = reach.len();
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Run offsets are 32-bit by design."
            )]
            let start_u32 = start as u32;
            run_starts.push(start_u32);
            check_runs(line, tolerance, &mut reach)?;
            debug_assert_eq!(
                reach.len() - start,
                line.runs.len(),
                "one reach entry per run"
            );

            for (k, run) in line.runs.iter().enumerate() {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Line and run slots are 32-bit by design."
                )]
                let at = RunRef {
                    line: slot as u32,
                    run: k as u32,
                };
                spans.entry(run.span).or_default().push(at);
            }
            let below = line_reach.last().map_or(line.bounds.y1, |r| r.max(line.bounds.y1));
            line_reach.push(below);
            bounds = Some(bounds.map_or(line.bounds, |b| b.union(line.bounds)));
        }

        Ok(Self {
            lines,
            line_reach,
            run_starts,
            reach,
            spans,
            bounds,
        })
    }

    /// Find the line whose vertical band contains `point`.
    ///
    /// Returns `None` above the first line, at or below the last line's
    /// bottom, and in gaps between lines.
    pub fn line_at(&self, point: Point) -> Option<&Line> {
        self.line_slot_at(point.y).map(|slot| &self.lines[slot])
    }

    /// Find the run of `line` whose horizontal extent contains `x`.
    ///
    /// When several runs contain `x` (they overlap at a writing-direction
    /// change), the run matching the line's paragraph direction wins, then the
    /// one with the smaller `order_in_line`. Returns `None` in gaps between
    /// runs, in margins, and for lines that do not belong to this index.
    pub fn run_at(&self, line: &Line, x: f64) -> Option<&GlyphRun> {
        let slot = self
            .lines
            .binary_search_by_key(&line.index, |l| l.index)
            .ok()?;
        self.run_slot_at(slot, x).map(|k| &self.lines[slot].runs[k])
    }

    /// Find the line and run under `point`.
    pub fn hit_test(&self, point: Point) -> Option<RunHit<'_>> {
        let slot = self.line_slot_at(point.y)?;
        let k = self.run_slot_at(slot, point.x)?;
        let line = &self.lines[slot];
        Some(RunHit {
            line,
            run: &line.runs[k],
        })
    }

    /// All lines, top to bottom.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Look up a line by its `index`.
    pub fn line(&self, index: u32) -> Option<&Line> {
        let slot = self.lines.binary_search_by_key(&index, |l| l.index).ok()?;
        Some(&self.lines[slot])
    }

    /// All runs produced by `span`, in layout order (top to bottom, then
    /// visual order). A span wrapped across lines yields one run per line
    /// fragment; a fully clipped span yields nothing.
    pub fn runs_for_span(&self, span: SpanId) -> impl Iterator<Item = &GlyphRun> + '_ {
        self.spans
            .get(&span)
            .map(|refs| refs.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|r| &self.lines[r.line as usize].runs[r.run as usize])
    }

    /// Union of the bounds of every run produced by `span`.
    pub fn span_bounds(&self, span: SpanId) -> Option<Rect> {
        self.runs_for_span(span)
            .map(|r| r.bounds)
            .reduce(|a, b| a.union(b))
    }

    /// Union of all line bounds, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of runs across all lines.
    pub fn run_count(&self) -> usize {
        self.reach.len()
    }

    /// Returns true if the layout has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // --- internals ---

    fn line_slot_at(&self, y: f64) -> Option<usize> {
        let after = self.lines.partition_point(|l| l.bounds.y0 <= y);
        // The latest line containing `y` wins; walk back only while some
        // earlier line still reaches below `y`.
        (0..after)
            .rev()
            .take_while(|&slot| self.line_reach[slot] > y)
            .find(|&slot| y < self.lines[slot].bounds.y1)
    }

    fn run_slot_at(&self, slot: usize, x: f64) -> Option<usize> {
        let line = &self.lines[slot];
        let runs = &line.runs;
        let start = self.run_starts[slot] as usize;
        let reach = &self.reach[start..start + runs.len()];

        let end = runs.partition_point(|r| r.bounds.x0 <= x);
        let mut best: Option<usize> = None;
        for k in (0..end).rev() {
            // Nothing at or left of `k` extends past `x`.
            if reach[k] <= x {
                break;
            }
            if !runs[k].contains_x(x) {
                continue;
            }
            // Walking right to left, an equally ranked run always has the
            // smaller order and replaces the current best.
            best = match best {
                Some(b) if off_direction(line, &runs[k]) > off_direction(line, &runs[b]) => Some(b),
                _ => Some(k),
            };
        }
        best
    }
}

#[inline]
fn off_direction(line: &Line, run: &GlyphRun) -> bool {
    run.direction != line.direction
}

fn normalize_line(line: &mut Line, tree: &SpanTree) -> Result<(), MalformedLayout> {
    if !line.bounds.is_finite() {
        return Err(MalformedLayout::NonFiniteBounds { line: line.index });
    }
    line.bounds = line.bounds.abs();
    for run in &mut line.runs {
        if !run.bounds.is_finite() {
            return Err(MalformedLayout::NonFiniteBounds { line: line.index });
        }
        run.bounds = run.bounds.abs();
        if run.line_index != line.index {
            return Err(MalformedLayout::RunLineMismatch {
                line: line.index,
                run_line: run.line_index,
            });
        }
        if !tree.contains(run.span) {
            return Err(MalformedLayout::DanglingSpan {
                span: run.span,
                line: line.index,
            });
        }
    }
    line.runs.sort_unstable_by_key(|r| r.order_in_line);
    Ok(())
}

fn check_line_order(previous: &Line, line: &Line, tolerance: f64) -> Result<(), MalformedLayout> {
    if line.index <= previous.index || line.bounds.y0 < previous.bounds.y0 {
        return Err(MalformedLayout::UnsortedLines {
            line: line.index,
            previous: previous.index,
        });
    }
    let overlap = previous.bounds.y1 - line.bounds.y0;
    if overlap > tolerance {
        return Err(MalformedLayout::OverlappingLines {
            line: line.index,
            previous: previous.index,
            overlap,
        });
    }
    Ok(())
}

/// Validate the sorted runs of `line` and append their running right-edge maxima to `reach`.
fn check_runs(line: &Line, tolerance: f64, reach: &mut Vec<f64>) -> Result<(), MalformedLayout> {
    let start = reach.len();
    for (k, run) in line.runs.iter().enumerate() {
        let Some(prev) = k.checked_sub(1).map(|p| &line.runs[p]) else {
            reach.push(run.bounds.x1);
            continue;
        };
        if run.order_in_line == prev.order_in_line {
            return Err(MalformedLayout::DuplicateRunOrder {
                line: line.index,
                order: run.order_in_line,
            });
        }
        if run.bounds.x0 < prev.bounds.x0 {
            return Err(MalformedLayout::RunOrderMismatch {
                line: line.index,
                order: run.order_in_line,
            });
        }

        // Earlier runs all start at or before `x0`, so their overlap with this
        // run is `min(x1, x1') - x0`. Direction changes may overlap freely.
        let x0 = run.bounds.x0;
        for j in (0..k).rev() {
            if reach[start + j] - x0 <= tolerance {
                break;
            }
            let other = &line.runs[j];
            let overlap = other.bounds.x1.min(run.bounds.x1) - x0;
            if overlap > tolerance && other.direction == run.direction {
                return Err(MalformedLayout::OverlappingRuns {
                    line: line.index,
                    first: other.order_in_line,
                    second: run.order_in_line,
                });
            }
        }

        let previous_reach = reach[start + k - 1];
        reach.push(previous_reach.max(run.bounds.x1));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;
    use alloc::vec;
    use understory_span_tree::SpanEntry;

    const WORD1: SpanId = SpanId(1);
    const WORD2: SpanId = SpanId(2);
    const WORD3: SpanId = SpanId(3);

    fn tree() -> SpanTree {
        SpanTree::build([
            SpanEntry::root(WORD1),
            SpanEntry::root(WORD2),
            SpanEntry::root(WORD3),
        ])
        .unwrap()
    }

    fn run(span: SpanId, x0: f64, x1: f64, line: u32, order: u32) -> GlyphRun {
        GlyphRun::new(span, Rect::new(x0, 0.0, x1, 20.0), line, order)
    }

    fn single_line(runs: impl IntoIterator<Item = GlyphRun>) -> Line {
        Line::new(0, Rect::new(0.0, 0.0, 100.0, 20.0)).with_runs(runs)
    }

    fn build(lines: impl IntoIterator<Item = Line>) -> Result<LayoutIndex, MalformedLayout> {
        LayoutIndex::build(lines, &tree(), &IndexOptions::default())
    }

    #[test]
    fn line_bands_are_closed_open() {
        let index = build([
            Line::new(0, Rect::new(0.0, 0.0, 100.0, 20.0)),
            Line::new(1, Rect::new(0.0, 20.0, 100.0, 40.0)),
            Line::new(2, Rect::new(0.0, 50.0, 100.0, 70.0)),
        ])
        .unwrap();

        let at = |y: f64| index.line_at(Point::new(5.0, y)).map(|l| l.index);
        assert_eq!(at(-0.1), None);
        assert_eq!(at(0.0), Some(0));
        assert_eq!(at(19.99), Some(0));
        assert_eq!(at(20.0), Some(1));
        assert_eq!(at(45.0), None, "gap between lines");
        assert_eq!(at(50.0), Some(2));
        assert_eq!(at(70.0), None);
        assert_eq!(at(f64::NAN), None);
    }

    #[test]
    fn later_line_owns_subpixel_overlap() {
        let index = build([
            Line::new(0, Rect::new(0.0, 0.0, 100.0, 20.25)),
            Line::new(1, Rect::new(0.0, 20.0, 100.0, 40.0)),
        ])
        .unwrap();
        assert_eq!(index.line_at(Point::new(0.0, 20.1)).map(|l| l.index), Some(1));
        assert_eq!(index.line_at(Point::new(0.0, 19.9)).map(|l| l.index), Some(0));
    }

    #[test]
    fn shared_run_boundary_goes_to_the_right_run() {
        let index = build([single_line([
            run(WORD1, 0.0, 10.0, 0, 0),
            run(WORD2, 10.0, 25.0, 0, 1),
        ])])
        .unwrap();
        let line = index.line(0).unwrap();
        assert_eq!(index.run_at(line, 9.999).map(|r| r.span), Some(WORD1));
        assert_eq!(index.run_at(line, 10.0).map(|r| r.span), Some(WORD2));
        assert_eq!(index.run_at(line, 25.0).map(|r| r.span), None);
        assert_eq!(index.run_at(line, -1.0).map(|r| r.span), None);
    }

    #[test]
    fn gap_between_runs_misses() {
        let index = build([single_line([
            run(WORD1, 0.0, 10.0, 0, 0),
            run(WORD2, 14.0, 25.0, 0, 1),
        ])])
        .unwrap();
        assert!(index.hit_test(Point::new(12.0, 5.0)).is_none());
        assert_eq!(
            index.hit_test(Point::new(14.0, 5.0)).map(|h| h.span()),
            Some(WORD2)
        );
    }

    #[test]
    fn runs_are_sorted_by_order() {
        let index = build([single_line([
            run(WORD2, 10.0, 25.0, 0, 1),
            run(WORD1, 0.0, 10.0, 0, 0),
        ])])
        .unwrap();
        let orders: Vec<_> = index.lines()[0].runs.iter().map(|r| r.order_in_line).collect();
        assert_eq!(orders, vec![0, 1]);
        assert_eq!(index.hit_test(Point::new(1.0, 1.0)).map(|h| h.span()), Some(WORD1));
    }

    #[test]
    fn direction_overlap_prefers_paragraph_direction_then_leftmost() {
        // An RTL run overlapping an LTR run at a direction change.
        let ltr = run(WORD1, 0.0, 12.0, 0, 0);
        let rtl = run(WORD2, 8.0, 30.0, 0, 1).with_direction(Direction::Rtl);

        let index = build([single_line([ltr, rtl])]).unwrap();
        let line = index.line(0).unwrap();
        assert_eq!(index.run_at(line, 10.0).map(|r| r.span), Some(WORD1));

        let rtl_para = single_line([ltr, rtl]).with_direction(Direction::Rtl);
        let index = build([rtl_para]).unwrap();
        let line = index.line(0).unwrap();
        assert_eq!(index.run_at(line, 10.0).map(|r| r.span), Some(WORD2));
        assert_eq!(index.run_at(line, 5.0).map(|r| r.span), Some(WORD1));
    }

    #[test]
    fn same_direction_subpixel_overlap_prefers_leftmost() {
        let index = build([single_line([
            run(WORD1, 0.0, 10.25, 0, 0),
            run(WORD2, 10.0, 25.0, 0, 1),
        ])])
        .unwrap();
        assert_eq!(
            index.hit_test(Point::new(10.1, 5.0)).map(|h| h.span()),
            Some(WORD1)
        );
    }

    #[test]
    fn long_run_is_found_past_short_neighbors() {
        // A wide RTL run spans two short LTR runs; the backward scan must
        // reach it through the running maximum.
        let index = build([single_line([
            run(WORD1, 0.0, 40.0, 0, 0).with_direction(Direction::Rtl),
            run(WORD2, 5.0, 10.0, 0, 1),
            run(WORD3, 20.0, 25.0, 0, 2),
        ])])
        .unwrap();
        let line = index.line(0).unwrap();
        assert_eq!(index.run_at(line, 15.0).map(|r| r.span), Some(WORD1));
        assert_eq!(index.run_at(line, 7.0).map(|r| r.span), Some(WORD2));
        assert_eq!(index.run_at(line, 30.0).map(|r| r.span), Some(WORD1));
    }

    #[test]
    fn zero_width_runs_are_unreachable() {
        let index = build([single_line([
            run(WORD1, 0.0, 10.0, 0, 0),
            run(WORD3, 10.0, 10.0, 0, 1),
            run(WORD2, 10.0, 20.0, 0, 2),
        ])])
        .unwrap();
        assert_eq!(index.hit_test(Point::new(10.0, 5.0)).map(|h| h.span()), Some(WORD2));
        assert_eq!(index.runs_for_span(WORD3).count(), 1);
    }

    #[test]
    fn same_direction_overlap_is_rejected() {
        let err = build([single_line([
            run(WORD1, 0.0, 15.0, 0, 0),
            run(WORD2, 10.0, 25.0, 0, 1),
        ])])
        .unwrap_err();
        assert_eq!(
            err,
            MalformedLayout::OverlappingRuns {
                line: 0,
                first: 0,
                second: 1
            }
        );
    }

    #[test]
    fn overlap_with_non_adjacent_run_is_rejected() {
        let err = build([single_line([
            run(WORD1, 0.0, 40.0, 0, 0),
            run(WORD2, 5.0, 10.0, 0, 1).with_direction(Direction::Rtl),
            run(WORD3, 20.0, 25.0, 0, 2),
        ])])
        .unwrap_err();
        assert_eq!(
            err,
            MalformedLayout::OverlappingRuns {
                line: 0,
                first: 0,
                second: 2
            }
        );
    }

    #[test]
    fn unsorted_and_overlapping_lines_are_rejected() {
        let err = build([
            Line::new(0, Rect::new(0.0, 20.0, 100.0, 40.0)),
            Line::new(1, Rect::new(0.0, 0.0, 100.0, 20.0)),
        ])
        .unwrap_err();
        assert_eq!(err, MalformedLayout::UnsortedLines { line: 1, previous: 0 });

        let err = build([
            Line::new(1, Rect::new(0.0, 0.0, 100.0, 20.0)),
            Line::new(0, Rect::new(0.0, 20.0, 100.0, 40.0)),
        ])
        .unwrap_err();
        assert_eq!(err, MalformedLayout::UnsortedLines { line: 0, previous: 1 });

        let err = build([
            Line::new(0, Rect::new(0.0, 0.0, 100.0, 20.0)),
            Line::new(1, Rect::new(0.0, 15.0, 100.0, 35.0)),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            MalformedLayout::OverlappingLines { line: 1, previous: 0, .. }
        ));
    }

    #[test]
    fn structural_run_errors() {
        let err = build([single_line([run(SpanId(99), 0.0, 10.0, 0, 0)])]).unwrap_err();
        assert_eq!(
            err,
            MalformedLayout::DanglingSpan {
                span: SpanId(99),
                line: 0
            }
        );

        let err = build([single_line([run(WORD1, 0.0, 10.0, 4, 0)])]).unwrap_err();
        assert_eq!(err, MalformedLayout::RunLineMismatch { line: 0, run_line: 4 });

        let err = build([single_line([
            run(WORD1, 0.0, 10.0, 0, 0),
            run(WORD2, 10.0, 20.0, 0, 0),
        ])])
        .unwrap_err();
        assert_eq!(err, MalformedLayout::DuplicateRunOrder { line: 0, order: 0 });

        let err = build([single_line([
            run(WORD1, 10.0, 20.0, 0, 0),
            run(WORD2, 0.0, 10.0, 0, 1),
        ])])
        .unwrap_err();
        assert_eq!(err, MalformedLayout::RunOrderMismatch { line: 0, order: 1 });

        let err = build([single_line([run(WORD1, 0.0, f64::INFINITY, 0, 0)])]).unwrap_err();
        assert_eq!(err, MalformedLayout::NonFiniteBounds { line: 0 });
    }

    #[test]
    fn strict_tolerance_rejects_subpixel_overlap() {
        let err = LayoutIndex::build(
            [single_line([
                run(WORD1, 0.0, 10.25, 0, 0),
                run(WORD2, 10.0, 25.0, 0, 1),
            ])],
            &tree(),
            &IndexOptions::new().with_overlap_tolerance(0.0),
        )
        .unwrap_err();
        assert!(matches!(err, MalformedLayout::OverlappingRuns { .. }));
    }

    #[test]
    fn inverted_rects_are_normalized() {
        let index = build([Line::new(0, Rect::new(100.0, 20.0, 0.0, 0.0))
            .with_runs([GlyphRun::new(WORD1, Rect::new(10.0, 20.0, 0.0, 0.0), 0, 0)])])
        .unwrap();
        assert_eq!(index.hit_test(Point::new(5.0, 5.0)).map(|h| h.span()), Some(WORD1));
    }

    #[test]
    fn wrapped_span_reports_all_fragments() {
        let index = build([
            Line::new(0, Rect::new(0.0, 0.0, 100.0, 20.0)).with_runs([
                run(WORD1, 0.0, 50.0, 0, 0),
                run(WORD2, 50.0, 100.0, 0, 1),
            ]),
            Line::new(1, Rect::new(0.0, 20.0, 100.0, 40.0)).with_runs([GlyphRun::new(
                WORD2,
                Rect::new(0.0, 20.0, 30.0, 40.0),
                1,
                0,
            )]),
        ])
        .unwrap();
        assert_eq!(index.runs_for_span(WORD2).count(), 2);
        assert_eq!(
            index.span_bounds(WORD2),
            Some(Rect::new(0.0, 0.0, 100.0, 40.0))
        );
        assert_eq!(index.span_bounds(WORD3), None);
        assert_eq!(index.bounds(), Some(Rect::new(0.0, 0.0, 100.0, 40.0)));
        assert_eq!(index.run_count(), 3);
        assert_eq!(index.line_count(), 2);
    }

    #[test]
    fn empty_layout_always_misses() {
        let index = build(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.hit_test(Point::new(0.0, 0.0)).is_none());
        assert!(index.line_at(Point::new(0.0, 0.0)).is_none());
        assert_eq!(index.bounds(), None);
    }

    #[test]
    fn line_reaching_past_a_short_neighbor_keeps_its_band() {
        let index = build([
            Line::new(0, Rect::new(0.0, 0.0, 100.0, 20.25))
                .with_runs([GlyphRun::new(WORD1, Rect::new(0.0, 0.0, 10.0, 20.25), 0, 0)]),
            Line::new(1, Rect::new(0.0, 20.0, 100.0, 20.0)),
            Line::new(2, Rect::new(0.0, 20.25, 100.0, 40.0))
                .with_runs([GlyphRun::new(WORD2, Rect::new(0.0, 20.25, 10.0, 40.0), 2, 0)]),
        ])
        .unwrap();
        assert_eq!(index.line_at(Point::new(5.0, 20.1)).map(|l| l.index), Some(0));
        assert_eq!(index.hit_test(Point::new(5.0, 20.1)).map(|h| h.span()), Some(WORD1));
        // The later line still owns the shared edge.
        assert_eq!(index.line_at(Point::new(5.0, 20.25)).map(|l| l.index), Some(2));
        assert!(index.line_at(Point::new(5.0, 40.0)).is_none());
    }

    #[test]
    fn run_at_ignores_foreign_lines() {
        let index = build([single_line([run(WORD1, 0.0, 10.0, 0, 0)])]).unwrap();
        let foreign = Line::new(7, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(index.run_at(&foreign, 5.0).is_none());
    }
}
