// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One layout pass: span tree plus index, validated together.

use kurbo::Point;
use understory_span_tree::{SpanEntry, SpanId, SpanTree};

use crate::error::{FrameError, MalformedLayout};
use crate::generation::Generation;
use crate::geometry::Line;
use crate::index::LayoutIndex;
use crate::options::IndexOptions;
use crate::resolver::HitResolver;

/// The span tree and layout index of one layout pass.
///
/// A frame is immutable once built. Publishing it to a
/// [`HitSurface`][crate::HitSurface] stamps it with a [`Generation`]; an
/// unpublished frame can still be queried directly.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use understory_span_tree::{SpanEntry, SpanId};
/// use understory_text_hit::{GlyphRun, IndexOptions, LayoutFrame, Line};
///
/// let word1 = SpanId(1);
/// let word2 = SpanId(2);
///
/// let frame = LayoutFrame::from_parts(
///     [SpanEntry::root(word1), SpanEntry::root(word2)],
///     [Line::new(0, Rect::new(0.0, 0.0, 25.0, 20.0)).with_runs([
///         GlyphRun::new(word1, Rect::new(0.0, 0.0, 10.0, 20.0), 0, 0),
///         GlyphRun::new(word2, Rect::new(10.0, 0.0, 25.0, 20.0), 0, 1),
///     ])],
///     &IndexOptions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(frame.resolve(Point::new(5.0, 10.0)), Some(word1));
/// assert_eq!(frame.resolve(Point::new(10.0, 10.0)), Some(word2));
/// assert_eq!(frame.resolve(Point::new(30.0, 10.0)), None);
/// assert_eq!(frame.resolve(Point::new(5.0, 25.0)), None);
/// ```
#[derive(Clone, Debug)]
pub struct LayoutFrame {
    pub(crate) generation: Option<Generation>,
    tree: SpanTree,
    index: LayoutIndex,
}

impl LayoutFrame {
    /// Pair a tree with the lines laid out for it.
    pub fn new<I>(tree: SpanTree, lines: I, options: &IndexOptions) -> Result<Self, MalformedLayout>
    where
        I: IntoIterator<Item = Line>,
    {
        let index = LayoutIndex::build(lines, &tree, options)?;
        Ok(Self {
            generation: None,
            tree,
            index,
        })
    }

    /// Build the tree and the index in one step.
    pub fn from_parts<E, I>(entries: E, lines: I, options: &IndexOptions) -> Result<Self, FrameError>
    where
        E: IntoIterator,
        E::Item: Into<SpanEntry>,
        I: IntoIterator<Item = Line>,
    {
        let tree = SpanTree::build(entries)?;
        Ok(Self::new(tree, lines, options)?)
    }

    /// The generation this frame was published as, or `None` if unpublished.
    pub fn generation(&self) -> Option<Generation> {
        self.generation
    }

    /// The span ownership tree.
    pub fn tree(&self) -> &SpanTree {
        &self.tree
    }

    /// The layout index.
    pub fn index(&self) -> &LayoutIndex {
        &self.index
    }

    /// A resolver over this frame.
    pub fn resolver(&self) -> HitResolver<'_> {
        HitResolver::new(&self.index, &self.tree)
    }

    /// Resolve `point` to its owning span.
    pub fn resolve(&self, point: Point) -> Option<SpanId> {
        self.resolver().resolve(point)
    }
}
