//! A single node in the Fugue binary tree (§4.4.5).

use crate::id::Id;
use smallvec::SmallVec;

/// Which side of its parent a node attaches to. Meaningless for top-level
/// nodes, which attach directly under the virtual root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub id: Id,
    pub content: Option<T>,
    pub is_deleted: bool,
    pub origin_left: Id,
    pub origin_right: Id,
    pub parent: Option<usize>,
    pub side: Side,
    /// Children attaching to this node's left anchor, kept sorted by the
    /// left-child ordering rule (agent descending). Concurrent same-side
    /// siblings are rare in practice, so a small inline buffer avoids a
    /// heap allocation for the common case of zero or one.
    pub left_children: SmallVec<[usize; 2]>,
    /// Children attaching to this node's right anchor, kept sorted by the
    /// right-child ordering rule (rightOrigin position descending, then
    /// agent descending).
    pub right_children: SmallVec<[usize; 2]>,
    /// Count of visible (non-deleted, content-present) nodes in this
    /// node's subtree, including itself. Cached to support O(log n)
    /// position lookups in the balanced case (§4.4.5, §9).
    pub subtree_size: usize,
}

impl<T> Node<T> {
    pub fn is_visible(&self) -> bool {
        !self.is_deleted && self.content.is_some()
    }
}
