//! Direction-agnostic access to row and column lists.
//!
//! A row list is ordered by column index and linked through `left`/`right`;
//! a column list is ordered by row index and linked through `up`/`down`.
//! Everything that walks a list goes through [`Axis`] so that row and column
//! code share one implementation.

use super::node::{Links, Node, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Row,
    Column,
}

impl Axis {
    /// Successor in increasing key order.
    #[inline]
    pub(crate) const fn next(self, links: &Links) -> NodeId {
        match self {
            Self::Row => links.right,
            Self::Column => links.down,
        }
    }

    /// Predecessor in increasing key order.
    #[inline]
    pub(crate) const fn prev(self, links: &Links) -> NodeId {
        match self {
            Self::Row => links.left,
            Self::Column => links.up,
        }
    }

    #[inline]
    pub(crate) fn set_next(self, links: &mut Links, id: NodeId) {
        match self {
            Self::Row => links.right = id,
            Self::Column => links.down = id,
        }
    }

    #[inline]
    pub(crate) fn set_prev(self, links: &mut Links, id: NodeId) {
        match self {
            Self::Row => links.left = id,
            Self::Column => links.up = id,
        }
    }

    /// The index a list on this axis is sorted by.
    #[inline]
    pub(crate) const fn key(self, node: &Node) -> usize {
        match self {
            Self::Row => node.col,
            Self::Column => node.row,
        }
    }
}

/// Where a key sits in one axis list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bracket {
    /// A node with exactly this key exists.
    Found(NodeId),
    /// No such node; a new one belongs between `before` and `after`.
    /// Either side may be the sentinel.
    Between { before: NodeId, after: NodeId },
}
