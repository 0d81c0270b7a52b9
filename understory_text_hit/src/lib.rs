// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_text_hit --heading-base-level=0

//! Understory Text Hit: resolve points in laid-out rich text to spans.
//!
//! A rich-text layout pass produces lines, each holding glyph runs, and each
//! run was produced by one span of the attributed string. This crate answers
//! "which span is under this point?" deterministically, and lets callers walk
//! from that span to an enclosing one (for example the link around a word).
//!
//! - [`LayoutIndex`]: sorted, validated lines and runs. Lines own the band
//!   `[top, bottom)` and runs own `[x0, x1)`, so a point on a shared edge
//!   belongs to the later neighbor. Lookup is two binary searches.
//! - [`HitResolver`]: pairs an index with its [`SpanTree`] to resolve points,
//!   return root-to-leaf paths, and find the nearest tappable ancestor.
//! - [`LayoutFrame`]: the tree and index of one layout pass, built together.
//! - [`HitSurface`] (feature `std`): publishes frames under increasing
//!   [`Generation`]s with an atomic swap, so concurrent queries never mix two
//!   layouts and hits from an old layout are detected as stale.
//!
//! Malformed input (unsorted or overlapping lines, overlapping runs, runs
//! naming spans the tree does not know) is rejected at build time with a
//! [`MalformedLayout`]; ownership cycles are rejected by the tree with a
//! [`TreeError`]. Misses are plain `None`.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_text_hit::{
//!     GlyphRun, HitResolver, IndexOptions, LayoutIndex, Line, SpanEntry, SpanFlags, SpanId,
//!     SpanTree,
//! };
//!
//! let paragraph = SpanId(1);
//! let link = SpanId(2);
//! let word1 = SpanId(3);
//! let word2 = SpanId(4);
//!
//! let tree = SpanTree::build([
//!     SpanEntry::root(paragraph),
//!     SpanEntry::child(link, paragraph).with_flags(SpanFlags::TAPPABLE),
//!     SpanEntry::child(word1, link),
//!     SpanEntry::child(word2, paragraph),
//! ])
//! .unwrap();
//!
//! let line = Line::new(0, Rect::new(0.0, 0.0, 25.0, 20.0)).with_runs([
//!     GlyphRun::new(word1, Rect::new(0.0, 0.0, 10.0, 20.0), 0, 0),
//!     GlyphRun::new(word2, Rect::new(10.0, 0.0, 25.0, 20.0), 0, 1),
//! ]);
//! let index = LayoutIndex::build([line], &tree, &IndexOptions::default()).unwrap();
//!
//! let resolver = HitResolver::new(&index, &tree);
//! assert_eq!(resolver.resolve(Point::new(5.0, 10.0)), Some(word1));
//! assert_eq!(resolver.resolve(Point::new(10.0, 10.0)), Some(word2));
//! assert_eq!(resolver.resolve(Point::new(30.0, 10.0)), None);
//! assert_eq!(resolver.resolve(Point::new(5.0, 25.0)), None);
//!
//! assert_eq!(resolver.resolve_tappable(Point::new(5.0, 10.0)), Some(link));
//! assert_eq!(resolver.resolve_tappable(Point::new(12.0, 10.0)), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`; [`HitSurface`] needs the `std`
//! feature (on by default).

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;
mod frame;
mod generation;
mod geometry;
mod index;
mod options;
mod resolver;
#[cfg(feature = "std")]
mod surface;

pub use error::{FrameError, MalformedLayout, QueryError};
pub use frame::LayoutFrame;
pub use generation::{Generation, SpanHit};
pub use geometry::{Direction, GlyphRun, Line};
pub use index::{LayoutIndex, RunHit};
pub use options::{DEFAULT_OVERLAP_TOLERANCE, IndexOptions};
pub use resolver::{HitResolver, resolve};
#[cfg(feature = "std")]
pub use surface::HitSurface;

pub use understory_span_tree::{SpanEntry, SpanFlags, SpanId, SpanRef, SpanTree, TreeError};
