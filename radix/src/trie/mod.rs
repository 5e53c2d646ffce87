// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Annotated prefix radix tree, as handed over by the aggregation step.
//!
//! The tree is stored as an arena of [`RadixNode`]s addressed by [`NodeId`].
//! Every node is either a concrete prefix, optionally annotated with an
//! aggregated mask length range, or a glue node that only connects branches.
//! Nodes may hold a `left` and a `right` child plus a single forward `son`
//! link. Renderers never look at the links directly: they consume the nodes
//! through [`Traversal`], which guarantees the pre-order the builder relies on
//! to produce ascending prefixes.

mod traversal;

pub use traversal::{Entries, Traversal};

use crate::prefix::{IpVer, Prefix};
use std::fmt::Display;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, PartialEq)]
pub enum RadixError {
    #[error("Aggregate range {low}-{high} is invalid for {prefix}")]
    InvalidRange { prefix: Prefix, low: u8, high: u8 },
    #[error("Prefix {0} does not belong to the {1} tree")]
    FamilyMismatch(Prefix, IpVer),
    #[error("No node with id {0}")]
    NoSuchNode(usize),
    #[error("Node {0} is already linked")]
    AlreadyLinked(usize),
    #[error("Link {link} of node {node} is already taken")]
    LinkTaken { node: usize, link: Link },
}

/// How the mask length of an announcement is matched against a node.
///
/// Aggregated nodes are classified once, here, so that every renderer applies
/// the same rule: a lower bound above the prefix's own length is a true
/// two-sided [`LenMatch::Range`]; otherwise the lower bound is implied by the
/// prefix and only the upper bound remains ([`LenMatch::UpTo`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LenMatch {
    Exact,
    UpTo { high: u8 },
    Range { low: u8, high: u8 },
}

impl LenMatch {
    /// Classify the aggregate range `low..=high` of a prefix of length `len`
    #[must_use]
    pub fn classify(len: u8, low: u8, high: u8) -> Self {
        if low > len {
            LenMatch::Range { low, high }
        } else {
            LenMatch::UpTo { high }
        }
    }
    /// Shortest matched length, given the prefix length
    #[must_use]
    pub fn low(&self, len: u8) -> u8 {
        match *self {
            LenMatch::Exact | LenMatch::UpTo { .. } => len,
            LenMatch::Range { low, .. } => low,
        }
    }
    /// Longest matched length, given the prefix length
    #[must_use]
    pub fn high(&self, len: u8) -> u8 {
        match *self {
            LenMatch::Exact => len,
            LenMatch::UpTo { high } | LenMatch::Range { high, .. } => high,
        }
    }
}

/// A concrete prefix with its mask length match, as seen by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub prefix: Prefix,
    pub len_match: LenMatch,
}

impl Entry {
    #[must_use]
    pub fn new(prefix: Prefix, len_match: LenMatch) -> Self {
        Self { prefix, len_match }
    }
    #[must_use]
    pub fn exact(prefix: Prefix) -> Self {
        Self::new(prefix, LenMatch::Exact)
    }
    #[must_use]
    pub fn len(&self) -> u8 {
        self.prefix.length()
    }
    #[must_use]
    pub fn low(&self) -> u8 {
        self.len_match.low(self.len())
    }
    #[must_use]
    pub fn high(&self) -> u8 {
        self.len_match.high(self.len())
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.len_match {
            LenMatch::Exact => write!(f, "{}", self.prefix),
            LenMatch::UpTo { high } => write!(f, "{} upto /{high}", self.prefix),
            LenMatch::Range { low, high } => write!(f, "{} /{low}-/{high}", self.prefix),
        }
    }
}

/// Index of a node in its tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Link {
    Left,
    Right,
    Son,
}

/// A node of the tree. Glue nodes have no prefix and are skipped by
/// [`RadixTree::entries`], but their links are still followed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadixNode {
    prefix: Option<Prefix>,
    aggregate: Option<(u8, u8)>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    son: Option<NodeId>,
    linked: bool,
}

impl RadixNode {
    fn with(prefix: Option<Prefix>, aggregate: Option<(u8, u8)>) -> Self {
        Self {
            prefix,
            aggregate,
            left: None,
            right: None,
            son: None,
            linked: false,
        }
    }

    #[must_use]
    pub fn glue() -> Self {
        Self::with(None, None)
    }

    /// A node matching `prefix` exactly
    #[must_use]
    pub fn exact(prefix: Prefix) -> Self {
        Self::with(Some(prefix), None)
    }

    /// A node matching `prefix` announced with any mask length in
    /// `low..=high`.
    ///
    /// # Errors
    /// Fails unless `low <= high`, `high >= prefix.length()` and `high` fits
    /// the family.
    pub fn aggregate(prefix: Prefix, low: u8, high: u8) -> Result<Self, RadixError> {
        if low > high || high < prefix.length() || high > prefix.max_len() {
            return Err(RadixError::InvalidRange { prefix, low, high });
        }
        Ok(Self::with(Some(prefix), Some((low, high))))
    }

    /// Build a node from an already classified match.
    ///
    /// # Errors
    /// Fails if the bounds of `len_match` are not valid for `prefix`.
    pub fn from_match(prefix: Prefix, len_match: LenMatch) -> Result<Self, RadixError> {
        match len_match {
            LenMatch::Exact => Ok(Self::exact(prefix)),
            LenMatch::UpTo { high } => Self::aggregate(prefix, prefix.length(), high),
            LenMatch::Range { low, high } if low > prefix.length() => {
                Self::aggregate(prefix, low, high)
            }
            LenMatch::Range { low, high } => Err(RadixError::InvalidRange { prefix, low, high }),
        }
    }

    #[must_use]
    pub fn is_glue(&self) -> bool {
        self.prefix.is_none()
    }
    #[must_use]
    pub fn prefix(&self) -> Option<&Prefix> {
        self.prefix.as_ref()
    }
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        self.aggregate.is_some()
    }
    /// Raw `(aggregateLow, aggregateHi)` annotation
    #[must_use]
    pub fn aggregate_range(&self) -> Option<(u8, u8)> {
        self.aggregate
    }
    /// Classified mask length match, `None` for glue nodes
    #[must_use]
    pub fn len_match(&self) -> Option<LenMatch> {
        let prefix = self.prefix?;
        Some(match self.aggregate {
            None => LenMatch::Exact,
            Some((low, high)) => LenMatch::classify(prefix.length(), low, high),
        })
    }
    #[must_use]
    pub fn entry(&self) -> Option<Entry> {
        Some(Entry::new(self.prefix?, self.len_match()?))
    }
    #[must_use]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }
    #[must_use]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }
    #[must_use]
    pub fn son(&self) -> Option<NodeId> {
        self.son
    }
}

/// Single family prefix tree. Nodes are added first and linked afterwards;
/// a node can be linked (or be the root) only once, which keeps whatever is
/// reachable from the root free of cycles.
#[derive(Clone, Debug)]
pub struct RadixTree {
    family: IpVer,
    nodes: Vec<RadixNode>,
    root: Option<NodeId>,
}

impl RadixTree {
    #[must_use]
    pub fn new(family: IpVer) -> Self {
        Self {
            family,
            nodes: Vec::new(),
            root: None,
        }
    }

    #[must_use]
    pub fn family(&self) -> IpVer {
        self.family
    }

    /// Add an unlinked node to the arena.
    ///
    /// # Errors
    /// Fails if the node prefix is not of the tree family.
    pub fn add(&mut self, node: RadixNode) -> Result<NodeId, RadixError> {
        if let Some(prefix) = node.prefix
            && prefix.ipver() != self.family
        {
            return Err(RadixError::FamilyMismatch(prefix, self.family));
        }
        self.nodes.push(node);
        Ok(NodeId(self.nodes.len() - 1))
    }

    /// Get a node by id
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&RadixNode> {
        self.nodes.get(id.0)
    }

    fn claim(&mut self, id: NodeId) -> Result<(), RadixError> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(RadixError::NoSuchNode(id.0))?;
        if node.linked {
            return Err(RadixError::AlreadyLinked(id.0));
        }
        node.linked = true;
        Ok(())
    }

    /// Make `id` the root of the tree.
    ///
    /// # Errors
    /// Fails if the node does not exist or is already linked.
    pub fn set_root(&mut self, id: NodeId) -> Result<(), RadixError> {
        if let Some(old) = self.root {
            return Err(RadixError::AlreadyLinked(old.0));
        }
        self.claim(id)?;
        self.root = Some(id);
        Ok(())
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Attach `child` under `parent` through `link`.
    ///
    /// # Errors
    /// Fails if either node does not exist, the link is taken or `child`
    /// already has a parent.
    pub fn link(&mut self, parent: NodeId, link: Link, child: NodeId) -> Result<(), RadixError> {
        let slot = {
            let node = self
                .nodes
                .get(parent.0)
                .ok_or(RadixError::NoSuchNode(parent.0))?;
            match link {
                Link::Left => node.left,
                Link::Right => node.right,
                Link::Son => node.son,
            }
        };
        if slot.is_some() {
            return Err(RadixError::LinkTaken {
                node: parent.0,
                link,
            });
        }
        self.claim(child)?;
        let node = &mut self.nodes[parent.0];
        match link {
            Link::Left => node.left = Some(child),
            Link::Right => node.right = Some(child),
            Link::Son => node.son = Some(child),
        }
        Ok(())
    }

    /// Build a tree out of entries already in ascending order: the first
    /// entry is the root and each following one is the son of the previous.
    ///
    /// # Errors
    /// Fails on any entry of the wrong family or with invalid bounds.
    pub fn from_entries<I>(family: IpVer, entries: I) -> Result<Self, RadixError>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut tree = RadixTree::new(family);
        let mut last: Option<NodeId> = None;
        for entry in entries {
            let id = tree.add(RadixNode::from_match(entry.prefix, entry.len_match)?)?;
            match last {
                None => tree.set_root(id)?,
                Some(prev) => tree.link(prev, Link::Son, id)?,
            }
            last = Some(id);
        }
        trace!("Built {family} tree with {} nodes", tree.nodes.len());
        Ok(tree)
    }

    /// Pre-order walk over all reachable nodes, glue included
    #[must_use]
    pub fn traverse(&self) -> Traversal<'_> {
        Traversal::new(self)
    }

    /// Concrete entries in traversal order
    #[must_use]
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(self.traverse())
    }

    /// Tell if the tree has no concrete node
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}
