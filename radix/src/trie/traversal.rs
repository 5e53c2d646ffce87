// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use super::{Entry, NodeId, RadixNode, RadixTree};

/// Pre-order iterator over a [`RadixTree`].
///
/// A node is yielded before anything below it. Below a node, the subtree
/// reached through its `son` link comes first, then `left`, then `right`.
/// The walk uses an explicit stack, so tree depth is not bounded by the call
/// stack.
pub struct Traversal<'a> {
    tree: &'a RadixTree,
    stack: Vec<NodeId>,
}

impl<'a> Traversal<'a> {
    pub(super) fn new(tree: &'a RadixTree) -> Self {
        Self {
            tree,
            stack: tree.root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a RadixNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.get(id)?;
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        self.stack.extend(node.son);
        Some(node)
    }
}

/// Concrete entries of a tree in traversal order, glue nodes skipped.
pub struct Entries<'a> {
    inner: Traversal<'a>,
}

impl<'a> Entries<'a> {
    pub(super) fn new(inner: Traversal<'a>) -> Self {
        Self { inner }
    }
}

impl Iterator for Entries<'_> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        self.inner.by_ref().find_map(RadixNode::entry)
    }
}
