// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph run geometry: the laid-out input consumed by the index.

use kurbo::Rect;
use smallvec::SmallVec;
use understory_span_tree::SpanId;

/// Writing direction of a run or paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl Direction {
    /// Returns true for [`Direction::Rtl`].
    #[inline]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// One contiguous run of shaped glyphs owned by a single span on a single line.
///
/// `bounds` are in the same coordinate space as query points. Runs on a line
/// are numbered by `order_in_line` in visual order, left to right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphRun {
    /// The leaf-most span that produced these glyphs.
    pub span: SpanId,
    /// Bounding box of the run.
    pub bounds: Rect,
    /// Index of the [`Line`] holding this run.
    pub line_index: u32,
    /// Visual position of the run within its line.
    pub order_in_line: u32,
    /// Writing direction of the glyphs.
    pub direction: Direction,
}

impl GlyphRun {
    /// A left-to-right run.
    pub const fn new(span: SpanId, bounds: Rect, line_index: u32, order_in_line: u32) -> Self {
        Self {
            span,
            bounds,
            line_index,
            order_in_line,
            direction: Direction::Ltr,
        }
    }

    /// Replace the writing direction of this run.
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Closed-open horizontal containment: `x0 <= x < x1`.
    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        self.bounds.x0 <= x && x < self.bounds.x1
    }

    /// Returns true if the run has no horizontal extent and can never be hit.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.x1 <= self.bounds.x0
    }
}

/// One visual line of laid-out text.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// Line number within the layout.
    pub index: u32,
    /// Bounding box of the line; its vertical extent is the band the line owns.
    pub bounds: Rect,
    /// Dominant paragraph direction, used to break ties at direction changes.
    pub direction: Direction,
    /// Runs on this line.
    pub runs: SmallVec<[GlyphRun; 4]>,
}

impl Line {
    /// An empty left-to-right line.
    pub fn new(index: u32, bounds: Rect) -> Self {
        Self {
            index,
            bounds,
            direction: Direction::Ltr,
            runs: SmallVec::new(),
        }
    }

    /// Replace the paragraph direction of this line.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Append runs to this line.
    pub fn with_runs<I: IntoIterator<Item = GlyphRun>>(mut self, runs: I) -> Self {
        self.runs.extend(runs);
        self
    }

    /// Append one run to this line.
    pub fn push_run(&mut self, run: GlyphRun) {
        self.runs.push(run);
    }

    /// Top edge (inclusive).
    #[inline]
    pub fn top(&self) -> f64 {
        self.bounds.y0
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.bounds.y1
    }

    /// Closed-open vertical containment: `top <= y < bottom`.
    #[inline]
    pub fn contains_y(&self, y: f64) -> bool {
        self.bounds.y0 <= y && y < self.bounds.y1
    }
}
