// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index construction parameters.

/// Default tolerance for sub-pixel overlaps between neighboring lines or runs.
pub const DEFAULT_OVERLAP_TOLERANCE: f64 = 0.5;

/// Parameters controlling [`LayoutIndex::build`][crate::LayoutIndex::build].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexOptions {
    /// Largest overlap, in layout units, tolerated between consecutive lines
    /// or between same-direction runs before the layout is rejected.
    ///
    /// Shapers routinely round line boxes and glyph advances, which leaves
    /// neighbors overlapping by a fraction of a pixel. Such overlaps are still
    /// resolved deterministically: the later line owns the overlapped band,
    /// and the run with the smaller `order_in_line` wins between runs.
    ///
    /// Negative and non-finite values are treated as zero.
    pub overlap_tolerance: f64,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            overlap_tolerance: DEFAULT_OVERLAP_TOLERANCE,
        }
    }
}

impl IndexOptions {
    /// Options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the overlap tolerance.
    pub fn with_overlap_tolerance(mut self, tolerance: f64) -> Self {
        self.overlap_tolerance = tolerance;
        self
    }

    /// The tolerance actually applied: negative and non-finite values clamp to zero.
    pub(crate) fn effective_tolerance(&self) -> f64 {
        if self.overlap_tolerance.is_finite() && self.overlap_tolerance > 0.0 {
            self.overlap_tolerance
        } else {
            0.0
        }
    }
}
