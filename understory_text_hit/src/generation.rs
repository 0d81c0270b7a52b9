// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout generations and generation-scoped hits.

use core::fmt;

use understory_span_tree::SpanId;

/// Stamp identifying one published layout pass.
///
/// Generations are assigned in increasing order when a frame is published;
/// `0` is never assigned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub(crate) u64);

impl Generation {
    /// Returns the raw counter value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true if `self` was published after `other`.
    #[inline]
    pub const fn is_newer_than(self, other: Self) -> bool {
        self.0 > other.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "generation {}", self.0)
    }
}

/// A span resolved against a specific layout generation.
///
/// Hold on to this instead of a bare [`SpanId`] when the hit outlives the
/// current frame, so a later relayout can be detected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpanHit {
    /// The resolved span.
    pub span: SpanId,
    /// The generation whose geometry produced the hit.
    pub generation: Generation,
}
