// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-to-span resolution over a layout index and its span tree.

use alloc::vec::Vec;

use kurbo::Point;
use understory_span_tree::{SpanFlags, SpanId, SpanRef, SpanTree};

use crate::index::{LayoutIndex, RunHit};

/// Resolve `point` to the deepest span whose glyphs contain it.
///
/// Shorthand for [`HitResolver::resolve`].
pub fn resolve(point: Point, index: &LayoutIndex, tree: &SpanTree) -> Option<SpanId> {
    HitResolver::new(index, tree).resolve(point)
}

/// Resolves points against one layout's index and span tree.
///
/// A resolver only borrows its inputs, so it is free to create per query.
/// Every query is pure: the same point against the same layout always yields
/// the same answer.
///
/// A [`GlyphRun`][crate::GlyphRun] is produced by exactly one leaf-most span,
/// so the span of the run under the point is already the most specific owner.
/// The tree is consulted only when a caller wants an ancestor instead, for
/// example the tappable link around a word.
#[derive(Clone, Copy, Debug)]
pub struct HitResolver<'a> {
    index: &'a LayoutIndex,
    tree: &'a SpanTree,
}

impl<'a> HitResolver<'a> {
    /// Create a resolver over an index and the tree it was built against.
    pub fn new(index: &'a LayoutIndex, tree: &'a SpanTree) -> Self {
        Self { index, tree }
    }

    /// The index being queried.
    pub fn index(&self) -> &'a LayoutIndex {
        self.index
    }

    /// The span tree being queried.
    pub fn tree(&self) -> &'a SpanTree {
        self.tree
    }

    /// Resolve `point` to the owning span.
    ///
    /// Returns `None` outside the rendered text, in gaps between lines or
    /// runs, and for an empty layout.
    pub fn resolve(&self, point: Point) -> Option<SpanId> {
        self.hit_run(point).map(|hit| hit.span())
    }

    /// Resolve `point` to the line and run under it.
    pub fn hit_run(&self, point: Point) -> Option<RunHit<'a>> {
        let line = self.index.line_at(point)?;
        let run = self.index.run_at(line, point.x)?;
        Some(RunHit { line, run })
    }

    /// Resolve `point` and return the path from the root span down to the
    /// owning span (inclusive).
    ///
    /// This is the order a capture → target → bubble router expects.
    pub fn resolve_path(&self, point: Point) -> Option<Vec<SpanId>> {
        let span = self.resolve(point)?;
        Some(self.tree.path_to_root(span))
    }

    /// Walk up from `span` (inclusive) to the closest span for which
    /// `predicate` holds.
    ///
    /// Returns `None` if `span` is unknown or the root is reached without a
    /// match.
    pub fn nearest_tappable_ancestor<F>(&self, span: SpanId, predicate: F) -> Option<SpanId>
    where
        F: FnMut(SpanRef<'_>) -> bool,
    {
        self.tree.nearest_ancestor(span, predicate)
    }

    /// Resolve `point` and walk to the nearest span flagged
    /// [`SpanFlags::TAPPABLE`].
    pub fn resolve_tappable(&self, point: Point) -> Option<SpanId> {
        let leaf = self.resolve(point)?;
        self.nearest_tappable_ancestor(leaf, |s| s.flags().contains(SpanFlags::TAPPABLE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GlyphRun, IndexOptions, Line};
    use alloc::vec;
    use kurbo::Rect;
    use understory_span_tree::SpanEntry;

    const PARA: SpanId = SpanId(1);
    const LINK: SpanId = SpanId(2);
    const WORD1: SpanId = SpanId(3);
    const WORD2: SpanId = SpanId(4);
    const PLAIN: SpanId = SpanId(5);

    fn fixture() -> (SpanTree, LayoutIndex) {
        let tree = SpanTree::build([
            SpanEntry::root(PARA),
            SpanEntry::child(LINK, PARA).with_flags(SpanFlags::TAPPABLE),
            SpanEntry::child(WORD1, LINK),
            SpanEntry::child(WORD2, LINK),
            SpanEntry::child(PLAIN, PARA),
        ])
        .unwrap();
        let line = Line::new(0, Rect::new(0.0, 0.0, 100.0, 20.0)).with_runs([
            GlyphRun::new(WORD1, Rect::new(0.0, 0.0, 10.0, 20.0), 0, 0),
            GlyphRun::new(WORD2, Rect::new(10.0, 0.0, 25.0, 20.0), 0, 1),
            GlyphRun::new(PLAIN, Rect::new(30.0, 0.0, 60.0, 20.0), 0, 2),
        ]);
        let index = LayoutIndex::build([line], &tree, &IndexOptions::default()).unwrap();
        (tree, index)
    }

    #[test]
    fn end_to_end_points() {
        let (tree, index) = fixture();
        assert_eq!(resolve(Point::new(5.0, 10.0), &index, &tree), Some(WORD1));
        assert_eq!(resolve(Point::new(10.0, 10.0), &index, &tree), Some(WORD2));
        assert_eq!(resolve(Point::new(27.0, 10.0), &index, &tree), None);
        assert_eq!(resolve(Point::new(70.0, 10.0), &index, &tree), None);
        assert_eq!(resolve(Point::new(5.0, 25.0), &index, &tree), None);
    }

    #[test]
    fn resolution_is_repeatable() {
        let (tree, index) = fixture();
        let resolver = HitResolver::new(&index, &tree);
        for x in [0.0, 9.5, 10.0, 24.99, 25.0, 30.0, 59.99, 60.0] {
            let p = Point::new(x, 19.99);
            assert_eq!(resolver.resolve(p), resolver.resolve(p), "x = {x}");
        }
    }

    #[test]
    fn hit_run_reports_geometry() {
        let (tree, index) = fixture();
        let hit = HitResolver::new(&index, &tree)
            .hit_run(Point::new(40.0, 1.0))
            .unwrap();
        assert_eq!(hit.span(), PLAIN);
        assert_eq!(hit.line.index, 0);
        assert_eq!(hit.run.order_in_line, 2);
        assert_eq!(hit.run.bounds, Rect::new(30.0, 0.0, 60.0, 20.0));
    }

    #[test]
    fn path_runs_root_to_leaf() {
        let (tree, index) = fixture();
        let resolver = HitResolver::new(&index, &tree);
        assert_eq!(
            resolver.resolve_path(Point::new(12.0, 5.0)),
            Some(vec![PARA, LINK, WORD2])
        );
        assert_eq!(resolver.resolve_path(Point::new(27.0, 5.0)), None);
    }

    #[test]
    fn tappable_ancestor() {
        let (tree, index) = fixture();
        let resolver = HitResolver::new(&index, &tree);
        assert_eq!(resolver.resolve_tappable(Point::new(3.0, 3.0)), Some(LINK));
        assert_eq!(resolver.resolve_tappable(Point::new(12.0, 3.0)), Some(LINK));
        assert_eq!(resolver.resolve_tappable(Point::new(40.0, 3.0)), None);

        // Predicates see the leaf first.
        assert_eq!(
            resolver.nearest_tappable_ancestor(WORD1, |s| s.id() == WORD1),
            Some(WORD1)
        );
        assert_eq!(
            resolver.nearest_tappable_ancestor(WORD1, |s| s.depth() == 0),
            Some(PARA)
        );
        assert_eq!(resolver.nearest_tappable_ancestor(SpanId(42), |_| true), None);
    }

    #[test]
    fn empty_layout_resolves_nothing() {
        let tree = SpanTree::new();
        let index = LayoutIndex::build(Vec::new(), &tree, &IndexOptions::default()).unwrap();
        assert_eq!(resolve(Point::new(0.0, 0.0), &index, &tree), None);
    }
}
