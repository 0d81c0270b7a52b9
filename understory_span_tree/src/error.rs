// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use crate::types::SpanId;

/// Structural problems detected while building a [`SpanTree`][crate::SpanTree].
///
/// These are never recoverable locally: the entries describe something that
/// is not a forest, and the tree must not be handed to a resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Following parent links from `span` never reaches a root.
    #[error("parent links starting at {span} form a cycle")]
    CycleDetected {
        /// A span that lies on the cycle.
        span: SpanId,
    },
    /// The same span id was supplied more than once.
    #[error("{span} appears more than once")]
    DuplicateSpan {
        /// The repeated span id.
        span: SpanId,
    },
    /// A span names a parent that is not itself part of the tree.
    #[error("{span} names unknown parent {parent}")]
    UnknownParent {
        /// The span with the dangling parent link.
        span: SpanId,
        /// The missing parent.
        parent: SpanId,
    },
}
