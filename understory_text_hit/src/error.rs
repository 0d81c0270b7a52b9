// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction and query errors.

use understory_span_tree::{SpanId, TreeError};

use crate::generation::Generation;

/// The layout handed to [`LayoutIndex::build`][crate::LayoutIndex::build]
/// violates a structural invariant.
///
/// The layout pipeline owner must not publish an index that failed to build.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum MalformedLayout {
    /// Lines are not sorted by vertical position, or line indices do not increase.
    #[error("line {line} is out of order after line {previous}")]
    UnsortedLines {
        /// The offending line.
        line: u32,
        /// The line preceding it in input order.
        previous: u32,
    },
    /// Two consecutive lines overlap by more than the configured tolerance.
    #[error("line {line} overlaps line {previous} by {overlap}")]
    OverlappingLines {
        /// The lower line.
        line: u32,
        /// The upper line.
        previous: u32,
        /// Vertical overlap in layout units.
        overlap: f64,
    },
    /// A line or run has non-finite coordinates.
    #[error("line {line} has non-finite geometry")]
    NonFiniteBounds {
        /// The line holding the bad geometry.
        line: u32,
    },
    /// A run claims to sit on a different line than the one holding it.
    #[error("run on line {line} claims line {run_line}")]
    RunLineMismatch {
        /// The line holding the run.
        line: u32,
        /// The run's `line_index`.
        run_line: u32,
    },
    /// Two runs on one line share an `order_in_line`.
    #[error("line {line} has two runs at order {order}")]
    DuplicateRunOrder {
        /// The line.
        line: u32,
        /// The duplicated order.
        order: u32,
    },
    /// Visual order disagrees with the runs' left edges.
    #[error("run {order} on line {line} starts left of its predecessor")]
    RunOrderMismatch {
        /// The line.
        line: u32,
        /// Order of the misplaced run.
        order: u32,
    },
    /// Two same-direction runs overlap horizontally.
    #[error("runs {first} and {second} on line {line} overlap")]
    OverlappingRuns {
        /// The line.
        line: u32,
        /// Order of the earlier run.
        first: u32,
        /// Order of the later run.
        second: u32,
    },
    /// A run references a span absent from the ownership tree.
    #[error("run on line {line} references unknown {span}")]
    DanglingSpan {
        /// The unknown span.
        span: SpanId,
        /// The line holding the run.
        line: u32,
    },
}

/// Failure to build a [`LayoutFrame`][crate::LayoutFrame] in one step.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// The span ownership tree is not a forest.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The geometry is malformed.
    #[error("malformed layout: {0}")]
    Layout(#[from] MalformedLayout),
}

/// A generation-addressed query could not be answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The requested generation is no longer (or not yet) the active one.
    #[error("{requested} is stale (active: {active:?})")]
    StaleGeneration {
        /// The generation the caller asked about.
        requested: Generation,
        /// The generation currently published, if any.
        active: Option<Generation>,
    },
    /// The span of a previous hit no longer exists in the active generation.
    #[error("{span} is gone from the active layout")]
    SpanGone {
        /// The vanished span.
        span: SpanId,
    },
}
