//! Storage engine for the sparse representation.
//!
//! Nodes live in a per-matrix arena and refer to their four neighbors by
//! index. "Empty list" is a sentinel whose links point back at itself.

mod axis;
mod node;
mod toroid;

pub(crate) use axis::Axis;
pub(crate) use toroid::{AxisIter, Toroid, MAX_DIMENSION};
