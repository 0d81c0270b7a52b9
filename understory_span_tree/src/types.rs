// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the span tree: span identifiers, flags, and construction entries.

use core::fmt;

/// Identifier for a logical span (an element of attributed text).
///
/// Span ids are opaque to this crate. They are expected to be stable for the
/// lifetime of one layout and unique within it; a host framework usually uses
/// its own element tag here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpanId(pub u64);

impl SpanId {
    /// Returns the raw integer handle.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SpanId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "span#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Per-span flags describing how a span participates in interaction.
    ///
    /// Flags never change which leaf span a point resolves to. They exist so
    /// that callers can walk from a resolved leaf to an interesting ancestor.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SpanFlags: u8 {
        /// Span handles taps or clicks (for example a link).
        const TAPPABLE   = 0b0000_0001;
        /// Span is exposed as its own accessibility element.
        const ACCESSIBLE = 0b0000_0010;
    }
}

/// One span as handed over by the attributed-string owner.
///
/// A [`SpanTree`][crate::SpanTree] is built from a sequence of entries. Order
/// matters only for [`SpanTree::children_of`][crate::SpanTree::children_of]
/// and depth-first traversal, which follow entry order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpanEntry {
    /// The span being described.
    pub id: SpanId,
    /// The enclosing span, or `None` for a root.
    pub parent: Option<SpanId>,
    /// Interaction flags.
    pub flags: SpanFlags,
}

impl SpanEntry {
    /// A root span with no flags.
    pub const fn root(id: SpanId) -> Self {
        Self {
            id,
            parent: None,
            flags: SpanFlags::empty(),
        }
    }

    /// A span nested directly inside `parent`, with no flags.
    pub const fn child(id: SpanId, parent: SpanId) -> Self {
        Self {
            id,
            parent: Some(parent),
            flags: SpanFlags::empty(),
        }
    }

    /// Replace the flags of this entry.
    pub const fn with_flags(mut self, flags: SpanFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl From<(SpanId, Option<SpanId>)> for SpanEntry {
    fn from((id, parent): (SpanId, Option<SpanId>)) -> Self {
        Self {
            id,
            parent,
            flags: SpanFlags::empty(),
        }
    }
}
