//! Arena-backed toroidal linked structure.
//!
//! Slots `0..size` are the row sentinels and slots `size..2*size` the column
//! sentinels. Every entry slot after that is linked into exactly one row list
//! and one column list; both lists are circular and return to their sentinel.
//! Removed slots go on a free list and are reused by later insertions.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use super::axis::{Axis, Bracket};
use super::node::{Links, Node, NodeId};
use crate::config::ScanPolicy;
use crate::error::{try_reserve, Result};
use crate::types::Scalar;

/// Largest dimension whose sentinels the arena can address.
pub(crate) const MAX_DIMENSION: usize =
    (isize::MAX as usize) / (2 * std::mem::size_of::<Node>());

#[derive(Debug, Clone)]
pub(crate) struct Toroid {
    size: usize,
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    len: usize,
}

impl Toroid {
    /// Create an empty structure with `size` row and `size` column sentinels.
    ///
    /// `size` must not exceed [`MAX_DIMENSION`]. Fails with `InvalidSize` when
    /// the sentinels cannot be allocated.
    pub(crate) fn new(size: usize) -> Result<Self> {
        debug_assert!(size <= MAX_DIMENSION);
        let mut nodes = try_reserve(2 * size, size)?;
        nodes.extend((0..2 * size).map(|slot| Node::sentinel(NodeId(slot), slot % size)));
        Ok(Self {
            size,
            nodes,
            free: Vec::new(),
            len: 0,
        })
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    /// Number of stored entries.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) const fn sentinel(&self, axis: Axis, index: usize) -> NodeId {
        match axis {
            Axis::Row => NodeId(index),
            Axis::Column => NodeId(self.size + index),
        }
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    fn links_mut(&mut self, id: NodeId) -> &mut Links {
        &mut self.nodes[id.0].links
    }

    pub(crate) fn is_axis_empty(&self, axis: Axis, index: usize) -> bool {
        let sentinel = self.sentinel(axis, index);
        axis.next(&self.node(sentinel).links) == sentinel
    }

    /// Walk one list forward from its sentinel to the first node whose key is
    /// not below `key`.
    ///
    /// Cost is bounded by the length of that list.
    pub(crate) fn bracket(&self, axis: Axis, index: usize, key: usize) -> Bracket {
        let sentinel = self.sentinel(axis, index);
        let mut cursor = axis.next(&self.node(sentinel).links);

        while cursor != sentinel {
            let node = self.node(cursor);
            match axis.key(node).cmp(&key) {
                Ordering::Less => cursor = axis.next(&node.links),
                Ordering::Equal => return Bracket::Found(cursor),
                Ordering::Greater => {
                    return Bracket::Between {
                        before: axis.prev(&node.links),
                        after: cursor,
                    }
                }
            }
        }

        Bracket::Between {
            before: axis.prev(&self.node(sentinel).links),
            after: sentinel,
        }
    }

    /// Locate the entry at `(row, col)` through its row list.
    pub(crate) fn find(&self, row: usize, col: usize, scan: ScanPolicy) -> Option<NodeId> {
        let entries = self.iter(Axis::Row, row);
        if scan.scans_backward(col, self.size) {
            entries
                .rev()
                .take_while(|(_, node)| node.col >= col)
                .find(|(_, node)| node.col == col)
                .map(|(id, _)| id)
        } else {
            entries
                .take_while(|(_, node)| node.col <= col)
                .find(|(_, node)| node.col == col)
                .map(|(id, _)| id)
        }
    }

    /// Store `value` at `(row, col)`. Zero removes any existing entry.
    pub(crate) fn set(&mut self, row: usize, col: usize, value: Scalar) {
        match self.bracket(Axis::Row, row, col) {
            Bracket::Found(id) if value == 0.0 => {
                self.unlink(id);
            }
            Bracket::Found(id) => self.nodes[id.0].value = value,
            Bracket::Between { .. } if value == 0.0 => {}
            Bracket::Between {
                before: left,
                after: right,
            } => {
                let Bracket::Between {
                    before: up,
                    after: down,
                } = self.bracket(Axis::Column, col, row)
                else {
                    unreachable!("({row}, {col}) is linked into its column but not its row");
                };
                self.insert_between(row, col, value, (left, right), (up, down));
            }
        }
    }

    /// Append an entry after the current tails of its row and column.
    ///
    /// Callers filling a matrix in row-major order get O(1) insertion. Zero
    /// values are skipped.
    pub(crate) fn append(&mut self, row: usize, col: usize, value: Scalar) {
        if value == 0.0 {
            return;
        }
        let row_sentinel = self.sentinel(Axis::Row, row);
        let col_sentinel = self.sentinel(Axis::Column, col);
        let left = Axis::Row.prev(&self.node(row_sentinel).links);
        let up = Axis::Column.prev(&self.node(col_sentinel).links);
        debug_assert!(left == row_sentinel || self.node(left).col < col);
        debug_assert!(up == col_sentinel || self.node(up).row < row);
        self.insert_between(row, col, value, (left, row_sentinel), (up, col_sentinel));
    }

    /// Splice a new entry between the given row and column neighbors.
    fn insert_between(
        &mut self,
        row: usize,
        col: usize,
        value: Scalar,
        (left, right): (NodeId, NodeId),
        (up, down): (NodeId, NodeId),
    ) -> NodeId {
        let node = Node {
            row,
            col,
            value,
            links: Links {
                left,
                right,
                up,
                down,
            },
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        };

        self.links_mut(left).right = id;
        self.links_mut(right).left = id;
        self.links_mut(up).down = id;
        self.links_mut(down).up = id;
        self.len += 1;
        id
    }

    /// Detach an entry from its row and column lists and recycle its slot.
    pub(crate) fn unlink(&mut self, id: NodeId) {
        debug_assert!(id.0 >= 2 * self.size, "sentinels are never unlinked");
        let Links {
            left,
            right,
            up,
            down,
        } = self.node(id).links;

        for axis in [Axis::Row, Axis::Column] {
            let (before, after) = match axis {
                Axis::Row => (left, right),
                Axis::Column => (up, down),
            };
            axis.set_next(self.links_mut(before), after);
            axis.set_prev(self.links_mut(after), before);
        }

        let slot = &mut self.nodes[id.0];
        slot.value = 0.0;
        slot.links = Links::looped(id);
        self.free.push(id);
        self.len -= 1;
        tracing::trace!(row = slot.row, col = slot.col, "unlinked entry");
    }

    /// Drop every entry and relink each sentinel to itself, keeping the
    /// sentinel slots in place.
    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(2 * self.size);
        for (slot, node) in self.nodes.iter_mut().enumerate() {
            node.links = Links::looped(NodeId(slot));
        }
        self.free.clear();
        self.len = 0;
    }

    /// Iterate one row (by column) or one column (by row) in increasing order.
    pub(crate) fn iter(&self, axis: Axis, index: usize) -> AxisIter<'_> {
        AxisIter::new(self, axis, index)
    }
}

/// Double-ended walk over one axis list, excluding the sentinel.
#[derive(Debug, Clone)]
pub(crate) struct AxisIter<'a> {
    toroid: &'a Toroid,
    axis: Axis,
    front: NodeId,
    back: NodeId,
    done: bool,
}

impl<'a> AxisIter<'a> {
    fn new(toroid: &'a Toroid, axis: Axis, index: usize) -> Self {
        let sentinel = toroid.sentinel(axis, index);
        let links = &toroid.node(sentinel).links;
        let front = axis.next(links);
        Self {
            toroid,
            axis,
            front,
            back: axis.prev(links),
            done: front == sentinel,
        }
    }

    /// Axis this iterator walks along.
    pub(crate) const fn axis(&self) -> Axis {
        self.axis
    }
}

impl<'a> Iterator for AxisIter<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let id = self.front;
        let node = self.toroid.node(id);
        if id == self.back {
            self.done = true;
        } else {
            self.front = self.axis.next(&node.links);
        }
        Some((id, node))
    }
}

impl DoubleEndedIterator for AxisIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let id = self.back;
        let node = self.toroid.node(id);
        if id == self.front {
            self.done = true;
        } else {
            self.back = self.axis.prev(&node.links);
        }
        Some((id, node))
    }
}

impl FusedIterator for AxisIter<'_> {}

#[cfg(test)]
impl Toroid {
    /// Panic unless every structural invariant holds.
    pub(crate) fn check_invariants(&self) {
        let mut row_total = 0;
        let mut col_total = 0;

        for (axis, total) in [(Axis::Row, &mut row_total), (Axis::Column, &mut col_total)] {
            for index in 0..self.size {
                let sentinel = self.sentinel(axis, index);
                let mut previous = sentinel;
                let mut last_key = None;
                for (id, node) in self.iter(axis, index) {
                    assert!(id.0 >= 2 * self.size, "sentinel reached mid-list");
                    assert_ne!(node.value, 0.0, "zero stored at ({}, {})", node.row, node.col);
                    let owner = match axis {
                        Axis::Row => node.row,
                        Axis::Column => node.col,
                    };
                    assert_eq!(owner, index, "entry linked into the wrong {axis:?}");
                    let key = axis.key(node);
                    if let Some(last) = last_key {
                        assert!(key > last, "{axis:?} {index} out of order: {last} then {key}");
                    }
                    assert_eq!(axis.prev(&node.links), previous, "broken back link");
                    last_key = Some(key);
                    previous = id;
                    *total += 1;
                }
                assert_eq!(axis.prev(&self.node(sentinel).links), previous);
            }
        }

        assert_eq!(row_total, self.len);
        assert_eq!(col_total, self.len);
        assert_eq!(self.nodes.len() - 2 * self.size - self.free.len(), self.len);

        for row in 0..self.size {
            for (id, node) in self.iter(Axis::Row, row) {
                match self.bracket(Axis::Column, node.col, node.row) {
                    Bracket::Found(other) => {
                        assert_eq!(other, id, "row and column paths disagree");
                    }
                    Bracket::Between { .. } => {
                        panic!("({}, {}) missing from its column", node.row, node.col);
                    }
                }
            }
        }
    }
}
