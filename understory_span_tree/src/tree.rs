// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: validated construction and read-only queries.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::TreeError;
use crate::types::{SpanEntry, SpanFlags, SpanId};

/// Immutable forest of spans.
///
/// Nodes live in a flat arena in entry order and refer to each other by slot,
/// so ancestry walks never chase pointers. A `SpanTree` is built once per
/// layout and never mutated; rebuild it when the attributed text changes.
///
/// ## Example
///
/// ```rust
/// use understory_span_tree::{SpanEntry, SpanFlags, SpanId, SpanTree};
///
/// let paragraph = SpanId(1);
/// let link = SpanId(2);
/// let word = SpanId(3);
///
/// let tree = SpanTree::build([
///     SpanEntry::root(paragraph),
///     SpanEntry::child(link, paragraph).with_flags(SpanFlags::TAPPABLE),
///     SpanEntry::child(word, link),
/// ])
/// .unwrap();
///
/// assert_eq!(tree.root(word), Some(paragraph));
/// assert!(tree.is_descendant_or_self(word, link));
/// assert_eq!(
///     tree.nearest_ancestor(word, |s| s.flags().contains(SpanFlags::TAPPABLE)),
///     Some(link)
/// );
/// ```
#[derive(Clone, Default)]
pub struct SpanTree {
    nodes: Vec<Node>,
    slots: HashMap<SpanId, u32>,
    roots: Vec<u32>,
}

#[derive(Clone, Debug)]
struct Node {
    id: SpanId,
    parent: Option<u32>,
    children: SmallVec<[u32; 4]>,
    flags: SpanFlags,
    depth: u32,
}

impl fmt::Debug for SpanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_depth = self.nodes.iter().map(|n| n.depth).max();
        f.debug_struct("SpanTree")
            .field("spans", &self.nodes.len())
            .field("roots", &self.roots.len())
            .field("max_depth", &max_depth)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    Active,
    Done,
}

impl SpanTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from span entries.
    ///
    /// Every parent must itself appear as an entry, each id may appear only
    /// once, and following parent links from any span must reach a root.
    pub fn build<I>(entries: I) -> Result<Self, TreeError>
    where
        I: IntoIterator,
        I::Item: Into<SpanEntry>,
    {
        Self::build_inner(entries.into_iter().map(Into::into))
            .inspect(|tree| {
                tracing::debug!(
                    spans = tree.len(),
                    roots = tree.roots.len(),
                    "built span tree"
                );
            })
            .inspect_err(|err| tracing::warn!(error = %err, "rejected span tree"))
    }

    /// Build a tree from `(span, parent)` pairs, with no flags.
    ///
    /// This is the shape most attributed-string owners naturally produce.
    pub fn from_parent_map<I>(pairs: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (SpanId, Option<SpanId>)>,
    {
        Self::build(pairs)
    }

    fn build_inner(entries: impl Iterator<Item = SpanEntry>) -> Result<Self, TreeError> {
        let mut nodes = Vec::new();
        let mut slots = HashMap::new();
        let mut parent_ids = Vec::new();
        for entry in entries {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Span slots are 32-bit by design."
            )]
            let slot = nodes.len() as u32;
            if slots.insert(entry.id, slot).is_some() {
                return Err(TreeError::DuplicateSpan { span: entry.id });
            }
            nodes.push(Node {
                id: entry.id,
                parent: None,
                children: SmallVec::new(),
                flags: entry.flags,
                depth: 0,
            });
            parent_ids.push(entry.parent);
        }

        for (node, parent) in nodes.iter_mut().zip(&parent_ids) {
            if let Some(parent) = *parent {
                let Some(&parent_slot) = slots.get(&parent) else {
                    return Err(TreeError::UnknownParent {
                        span: node.id,
                        parent,
                    });
                };
                node.parent = Some(parent_slot);
            }
        }

        // Depths double as the acyclicity proof: a chain that revisits an
        // active slot never terminates.
        let mut state = alloc::vec![Visit::Pending; nodes.len()];
        let mut chain: Vec<usize> = Vec::new();
        for start in 0..nodes.len() {
            if state[start] == Visit::Done {
                continue;
            }
            chain.clear();
            let mut current = start;
            let base = loop {
                match state[current] {
                    Visit::Done => break Some(nodes[current].depth),
                    Visit::Active => {
                        return Err(TreeError::CycleDetected {
                            span: nodes[current].id,
                        });
                    }
                    Visit::Pending => {
                        state[current] = Visit::Active;
                        chain.push(current);
                        match nodes[current].parent {
                            Some(parent) => current = parent as usize,
                            None => break None,
                        }
                    }
                }
            };
            let mut depth = base.map_or(0, |d| d + 1);
            for &slot in chain.iter().rev() {
                nodes[slot].depth = depth;
                state[slot] = Visit::Done;
                depth += 1;
            }
        }

        let mut roots = Vec::new();
        for slot in 0..nodes.len() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Span slots are 32-bit by design."
            )]
            let slot_u32 = slot as u32;
            match nodes[slot].parent {
                Some(parent) => nodes[parent as usize].children.push(slot_u32),
                None => roots.push(slot_u32),
            }
        }

        Ok(Self {
            nodes,
            slots,
            roots,
        })
    }

    /// Number of spans in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no spans.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` is part of this tree.
    pub fn contains(&self, id: SpanId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Look up a span.
    pub fn get(&self, id: SpanId) -> Option<SpanRef<'_>> {
        self.slot(id).map(|slot| SpanRef { tree: self, slot })
    }

    /// Iterate all spans in entry order.
    pub fn iter(&self) -> impl Iterator<Item = SpanRef<'_>> + '_ {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Span slots are 32-bit by design."
        )]
        let len = self.nodes.len() as u32;
        (0..len).map(move |slot| SpanRef { tree: self, slot })
    }

    /// Iterate the root spans in entry order.
    pub fn roots(&self) -> impl Iterator<Item = SpanId> + '_ {
        self.roots.iter().map(|&slot| self.nodes[slot as usize].id)
    }

    /// Returns the parent of a span, or `None` for roots and unknown ids.
    pub fn parent_of(&self, id: SpanId) -> Option<SpanId> {
        let parent = self.node(id)?.parent?;
        Some(self.nodes[parent as usize].id)
    }

    /// Iterate the direct children of a span in entry order.
    ///
    /// Unknown ids have no children.
    pub fn children_of(&self, id: SpanId) -> impl Iterator<Item = SpanId> + '_ {
        self.node(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&slot| self.nodes[slot as usize].id)
    }

    /// Returns the flags of a span if it is known.
    pub fn flags(&self, id: SpanId) -> Option<SpanFlags> {
        self.node(id).map(|n| n.flags)
    }

    /// Returns the depth of a span (roots are at depth 0).
    pub fn depth(&self, id: SpanId) -> Option<u32> {
        self.node(id).map(|n| n.depth)
    }

    /// Walk to the terminal ancestor of `of`.
    ///
    /// Returns `of` itself for roots and `None` for unknown ids. Runs in
    /// O(depth).
    pub fn root(&self, of: SpanId) -> Option<SpanId> {
        self.ancestors(of).last().map(|s| s.id())
    }

    /// Returns true if `candidate` is `ancestor` or nested anywhere inside it.
    ///
    /// Unknown ids are never descendants of anything.
    pub fn is_descendant_or_self(&self, candidate: SpanId, ancestor: SpanId) -> bool {
        let (Some(mut slot), Some(target)) = (self.slot(candidate), self.slot(ancestor)) else {
            return false;
        };
        let target_depth = self.nodes[target as usize].depth;
        while self.nodes[slot as usize].depth > target_depth {
            match self.nodes[slot as usize].parent {
                Some(parent) => slot = parent,
                None => return false,
            }
        }
        slot == target
    }

    /// Iterate `of` and then each of its ancestors up to the root.
    pub fn ancestors(&self, of: SpanId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.slot(of),
        }
    }

    /// Find the closest span, starting at `of` itself and walking upward, for
    /// which `predicate` holds.
    ///
    /// Returns `None` if `of` is unknown or no span on the way to the root
    /// matches.
    pub fn nearest_ancestor<F>(&self, of: SpanId, mut predicate: F) -> Option<SpanId>
    where
        F: FnMut(SpanRef<'_>) -> bool,
    {
        self.ancestors(of).find(|s| predicate(*s)).map(|s| s.id())
    }

    /// Path from the root to `of` (inclusive), or empty for unknown ids.
    pub fn path_to_root(&self, of: SpanId) -> Vec<SpanId> {
        let mut path: Vec<SpanId> = self.ancestors(of).map(|s| s.id()).collect();
        path.reverse();
        path
    }

    /// Get the next span in depth-first (pre-order) traversal.
    ///
    /// Roots are visited in entry order, so traversal continues from the end
    /// of one root's subtree into the next root. Returns `None` at the end or
    /// for unknown ids.
    pub fn next_depth_first(&self, current: SpanId) -> Option<SpanId> {
        let slot = self.slot(current)?;
        if let Some(&first_child) = self.nodes[slot as usize].children.first() {
            return Some(self.nodes[first_child as usize].id);
        }
        let mut node = slot;
        loop {
            if let Some(next) = self.next_sibling(node) {
                return Some(self.nodes[next as usize].id);
            }
            node = self.nodes[node as usize].parent?;
        }
    }

    /// Get the previous span in depth-first (pre-order) traversal.
    ///
    /// Returns `None` at the start or for unknown ids.
    pub fn prev_depth_first(&self, current: SpanId) -> Option<SpanId> {
        let slot = self.slot(current)?;
        if let Some(prev) = self.prev_sibling(slot) {
            let mut last = prev;
            while let Some(&child) = self.nodes[last as usize].children.last() {
                last = child;
            }
            return Some(self.nodes[last as usize].id);
        }
        self.nodes[slot as usize]
            .parent
            .map(|parent| self.nodes[parent as usize].id)
    }

    // --- internals ---

    fn slot(&self, id: SpanId) -> Option<u32> {
        self.slots.get(&id).copied()
    }

    fn node(&self, id: SpanId) -> Option<&Node> {
        self.slot(id).map(|slot| &self.nodes[slot as usize])
    }

    fn siblings(&self, slot: u32) -> &[u32] {
        match self.nodes[slot as usize].parent {
            Some(parent) => &self.nodes[parent as usize].children,
            None => &self.roots,
        }
    }

    fn next_sibling(&self, slot: u32) -> Option<u32> {
        let siblings = self.siblings(slot);
        let pos = siblings.iter().position(|&s| s == slot)?;
        siblings.get(pos + 1).copied()
    }

    fn prev_sibling(&self, slot: u32) -> Option<u32> {
        let siblings = self.siblings(slot);
        let pos = siblings.iter().position(|&s| s == slot)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }
}

/// Borrowed view of one span in a [`SpanTree`].
#[derive(Clone, Copy)]
pub struct SpanRef<'a> {
    tree: &'a SpanTree,
    slot: u32,
}

impl fmt::Debug for SpanRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanRef")
            .field("id", &self.id())
            .field("parent", &self.parent())
            .field("flags", &self.flags())
            .field("depth", &self.depth())
            .finish()
    }
}

impl<'a> SpanRef<'a> {
    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.slot as usize]
    }

    /// The span id.
    pub fn id(&self) -> SpanId {
        self.node().id
    }

    /// The enclosing span, if any.
    pub fn parent(&self) -> Option<SpanId> {
        self.node()
            .parent
            .map(|parent| self.tree.nodes[parent as usize].id)
    }

    /// Interaction flags supplied at construction.
    pub fn flags(&self) -> SpanFlags {
        self.node().flags
    }

    /// Distance from the root (roots are at depth 0).
    pub fn depth(&self) -> u32 {
        self.node().depth
    }

    /// Returns true if this span has no parent.
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Iterate the direct children of this span.
    pub fn children(self) -> impl Iterator<Item = SpanId> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&slot| tree.nodes[slot as usize].id)
    }
}

/// Iterator over a span and its ancestors, innermost first.
///
/// Created by [`SpanTree::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    tree: &'a SpanTree,
    next: Option<u32>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = SpanRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        self.next = self.tree.nodes[slot as usize].parent;
        Some(SpanRef {
            tree: self.tree,
            slot,
        })
    }
}
