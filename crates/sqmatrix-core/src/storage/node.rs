use crate::types::Scalar;

/// Index of a slot in a [`Toroid`](super::Toroid) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) usize);

/// The four non-owning neighbor relations of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Links {
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) up: NodeId,
    pub(crate) down: NodeId,
}

impl Links {
    /// Links of an empty circular list anchored at `id`.
    pub(crate) const fn looped(id: NodeId) -> Self {
        Self {
            left: id,
            right: id,
            up: id,
            down: id,
        }
    }
}

/// An arena slot: a sentinel, a live entry or a recycled hole.
///
/// Sentinels keep `value == 0.0` and carry their own axis index in both
/// `row` and `col`.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) value: Scalar,
    pub(crate) links: Links,
}

impl Node {
    pub(crate) const fn sentinel(id: NodeId, index: usize) -> Self {
        Self {
            row: index,
            col: index,
            value: 0.0,
            links: Links::looped(id),
        }
    }
}
