// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generation-safe publication of layout frames.

use alloc::sync::Arc;
use core::fmt;
use std::sync::{Mutex, PoisonError};

use arc_swap::ArcSwapOption;
use kurbo::Point;
use tracing::{debug, trace};
use understory_span_tree::SpanId;

use crate::error::QueryError;
use crate::frame::LayoutFrame;
use crate::generation::{Generation, SpanHit};

/// Holds the currently published [`LayoutFrame`].
///
/// Publishing replaces the whole frame with one atomic pointer store, so a
/// query observes either the old frame or the new one, never a mix of the
/// two. Queries never lock; publishers are serialized so generations are
/// handed out in order.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use understory_span_tree::{SpanEntry, SpanId};
/// use understory_text_hit::{
///     GlyphRun, HitSurface, IndexOptions, LayoutFrame, Line, QueryError,
/// };
///
/// let frame = |span: SpanId| {
///     LayoutFrame::from_parts(
///         [SpanEntry::root(span)],
///         [Line::new(0, Rect::new(0.0, 0.0, 40.0, 20.0))
///             .with_runs([GlyphRun::new(span, Rect::new(0.0, 0.0, 40.0, 20.0), 0, 0)])],
///         &IndexOptions::default(),
///     )
///     .unwrap()
/// };
///
/// let surface = HitSurface::new();
/// let first = surface.publish(frame(SpanId(1)));
/// let hit = surface.resolve(Point::new(5.0, 5.0)).unwrap();
/// assert_eq!(hit.span, SpanId(1));
/// assert_eq!(hit.generation, first);
///
/// // Relayout.
/// let second = surface.publish(frame(SpanId(2)));
/// assert!(matches!(
///     surface.resolve_at(first, Point::new(5.0, 5.0)),
///     Err(QueryError::StaleGeneration { .. })
/// ));
/// assert_eq!(surface.resolve_at(second, Point::new(5.0, 5.0)), Ok(Some(SpanId(2))));
/// ```
#[derive(Default)]
pub struct HitSurface {
    active: ArcSwapOption<LayoutFrame>,
    /// Last generation handed out.
    writer: Mutex<u64>,
}

impl fmt::Debug for HitSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitSurface")
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

impl HitSurface {
    /// Create a surface with no active frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp `frame` with the next generation and make it the active frame.
    pub fn publish(&self, mut frame: LayoutFrame) -> Generation {
        let mut last = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        *last += 1;
        let generation = Generation(*last);
        frame.generation = Some(generation);
        debug!(
            generation = generation.get(),
            lines = frame.index().line_count(),
            runs = frame.index().run_count(),
            spans = frame.tree().len(),
            "published layout frame"
        );
        self.active.store(Some(Arc::new(frame)));
        generation
    }

    /// Withdraw the active frame. Later queries miss until the next publish.
    pub fn clear(&self) {
        let _last = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.active.store(None);
    }

    /// The active generation, if a frame is published.
    pub fn generation(&self) -> Option<Generation> {
        self.active.load().as_deref().and_then(LayoutFrame::generation)
    }

    /// Returns true if `generation` is the active one.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation() == Some(generation)
    }

    /// A handle to the active frame.
    ///
    /// The handle stays valid after later publishes; use
    /// [`resolve_with`](Self::resolve_with) to query it safely.
    pub fn load(&self) -> Option<Arc<LayoutFrame>> {
        self.active.load_full()
    }

    /// Resolve `point` against the active frame.
    ///
    /// Returns `None` when no frame is published or nothing is hit.
    pub fn resolve(&self, point: Point) -> Option<SpanHit> {
        let guard = self.active.load();
        let frame = guard.as_deref()?;
        let span = frame.resolve(point)?;
        let generation = frame.generation()?;
        Some(SpanHit { span, generation })
    }

    /// Resolve `point` only if `generation` is still active.
    pub fn resolve_at(
        &self,
        generation: Generation,
        point: Point,
    ) -> Result<Option<SpanId>, QueryError> {
        let guard = self.active.load();
        let frame = guard.as_deref();
        let active = frame.and_then(LayoutFrame::generation);
        match frame {
            Some(frame) if active == Some(generation) => Ok(frame.resolve(point)),
            _ => Err(stale(generation, active)),
        }
    }

    /// Resolve `point` against a held frame, only if it is this surface's
    /// active frame.
    ///
    /// Currency is decided by identity, not by generation number, so a frame
    /// published on another surface is always stale here. All geometry comes
    /// from `frame`, so the answer never mixes two generations. A frame that
    /// was never published is not current and resolves to `None`.
    pub fn resolve_with(
        &self,
        frame: &LayoutFrame,
        point: Point,
    ) -> Result<Option<SpanId>, QueryError> {
        let Some(requested) = frame.generation() else {
            trace!("query against an unpublished frame");
            return Ok(None);
        };
        let guard = self.active.load();
        match guard.as_deref() {
            Some(active) if core::ptr::eq(frame, active) => Ok(frame.resolve(point)),
            active => Err(stale(requested, active.and_then(LayoutFrame::generation))),
        }
    }

    /// Carry a previous hit forward into the active generation.
    ///
    /// Succeeds when the hit's span still exists in the active frame's tree.
    /// Geometry may have moved; only identity is carried over.
    pub fn refresh(&self, hit: SpanHit) -> Result<SpanHit, QueryError> {
        let guard = self.active.load();
        let Some(frame) = guard.as_deref() else {
            return Err(stale(hit.generation, None));
        };
        let Some(generation) = frame.generation() else {
            return Err(stale(hit.generation, None));
        };
        if frame.tree().contains(hit.span) {
            Ok(SpanHit {
                span: hit.span,
                generation,
            })
        } else {
            Err(QueryError::SpanGone { span: hit.span })
        }
    }
}

fn stale(requested: Generation, active: Option<Generation>) -> QueryError {
    trace!(
        requested = requested.get(),
        active = active.map(Generation::get),
        "stale generation query"
    );
    QueryError::StaleGeneration { requested, active }
}
