// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_span_tree --heading-base-level=0

//! Understory Span Tree: the logical ownership forest behind rich text.
//!
//! Attributed text is a tree of nested spans (a paragraph contains a link,
//! the link contains a bold word, and so on), while its laid-out geometry is a
//! flat sequence of glyph runs. A single span can produce many runs, or none
//! at all. This crate models the logical side only, independent of how many
//! visual runs each span produced.
//!
//! - Build once per layout from `(span, parent)` pairs or [`SpanEntry`] values.
//! - Construction rejects cycles, duplicate ids, and dangling parents with a [`TreeError`].
//! - Query ancestry ([`SpanTree::root`], [`SpanTree::is_descendant_or_self`],
//!   [`SpanTree::nearest_ancestor`], [`SpanTree::path_to_root`]) and traversal
//!   ([`SpanTree::next_depth_first`], [`SpanTree::prev_depth_first`]).
//!
//! A [`SpanTree`] is immutable after construction, so it can be shared across
//! threads behind an `Arc` without locking. It is paired with a layout index by
//! `understory_text_hit`, which resolves points to the spans in this tree.
//!
//! ## API overview
//!
//! - [`SpanId`]: opaque identifier for a span.
//! - [`SpanFlags`]: interaction flags (for example [`SpanFlags::TAPPABLE`]).
//! - [`SpanEntry`]: one span as supplied by the attributed-string owner.
//! - [`SpanTree`]: the validated forest.
//! - [`SpanRef`]: a borrowed view of one span, handed to ancestor predicates.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod tree;
mod types;

pub use error::TreeError;
pub use tree::{Ancestors, SpanRef, SpanTree};
pub use types::{SpanEntry, SpanFlags, SpanId};
