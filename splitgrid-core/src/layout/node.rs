//! Node model for split layouts
//!
//! A layout tree is made of two kinds of nodes: leaves, which are the
//! regions content is placed into, and splits, which divide a region into
//! two children.
//!
//! ```text
//! Split(Vertical, 0.5)
//! ├── Leaf(A)
//! └── Split(Horizontal, 0.3)
//!     ├── Leaf(B)
//!     └── Leaf(C)
//! ```
//!
//! Children and parents are referenced by [`NodeId`]. The node store owns
//! every node; the parent link is a navigation aid maintained by the tree's
//! own mutation code and can only be read from outside this crate.

use std::hash::{Hash, Hasher};

use super::error::{LayoutError, LayoutResult, check_ratio};
use super::types::{ContentTag, NodeId, Orientation};

/// Default minimum width and height of a leaf, in effective pixels.
pub const DEFAULT_MIN_SIZE: f64 = 24.0;

/// Default split ratio (50% of available space to the first child).
pub const DEFAULT_RATIO: f64 = 0.5;

/// A terminal region of the layout.
///
/// Equality and hashing use the node ID only.
#[derive(Debug, Clone)]
pub struct LeafNode {
    id: NodeId,
    parent: Option<NodeId>,
    /// Minimum width the region should be given, in effective pixels.
    pub min_width: f64,
    /// Minimum height the region should be given, in effective pixels.
    pub min_height: f64,
    /// Caller-owned content tag; never inspected by the tree.
    pub tag: Option<ContentTag>,
}

impl LeafNode {
    /// Creates a new untagged leaf with a unique ID and default minimum size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(NodeId::new())
    }

    /// Creates a new untagged leaf with the given ID.
    #[must_use]
    pub(crate) fn with_id(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            min_width: DEFAULT_MIN_SIZE,
            min_height: DEFAULT_MIN_SIZE,
            tag: None,
        }
    }

    /// Sets the content tag.
    #[must_use]
    pub fn with_tag(mut self, tag: ContentTag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Sets the minimum size.
    #[must_use]
    pub fn with_min_size(mut self, min_width: f64, min_height: f64) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Returns the ID of this leaf.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the split holding this leaf, or `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

impl Default for LeafNode {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for LeafNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LeafNode {}

impl Hash for LeafNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// An internal region divided between two children.
///
/// Equality and hashing use the node ID only.
#[derive(Debug, Clone)]
pub struct SplitNode {
    id: NodeId,
    parent: Option<NodeId>,
    orientation: Orientation,
    /// Left (vertical) or top (horizontal) child.
    first: NodeId,
    /// Right (vertical) or bottom (horizontal) child.
    second: NodeId,
    /// Share of space given to `first`, in [0, 1].
    ratio: f64,
}

impl SplitNode {
    /// Creates a split over two distinct children.
    ///
    /// Parent links are wired by the node store, not here.
    pub(crate) fn new(
        orientation: Orientation,
        first: NodeId,
        second: NodeId,
        ratio: f64,
    ) -> LayoutResult<Self> {
        let ratio = check_ratio(ratio)?;
        if first == second {
            return Err(LayoutError::DuplicateNode(second));
        }
        Ok(Self {
            id: NodeId::new(),
            parent: None,
            orientation,
            first,
            second,
            ratio,
        })
    }

    /// Returns the ID of this split.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the split holding this one, or `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the split orientation.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the first (left/top) child.
    #[must_use]
    pub const fn first(&self) -> NodeId {
        self.first
    }

    /// Returns the second (right/bottom) child.
    #[must_use]
    pub const fn second(&self) -> NodeId {
        self.second
    }

    /// Returns the share of space given to the first child.
    #[must_use]
    pub const fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Returns both children, first then second.
    #[must_use]
    pub const fn children(&self) -> [NodeId; 2] {
        [self.first, self.second]
    }

    /// Returns the other child of this split, or `None` if `child` is not
    /// a child of it.
    #[must_use]
    pub fn sibling_of(&self, child: NodeId) -> Option<NodeId> {
        if child == self.first {
            Some(self.second)
        } else if child == self.second {
            Some(self.first)
        } else {
            None
        }
    }

    pub(crate) fn set_ratio(&mut self, ratio: f64) -> LayoutResult<()> {
        self.ratio = check_ratio(ratio)?;
        Ok(())
    }

    /// Swaps `old_child` for `new_child`.
    ///
    /// The caller is responsible for pointing `new_child`'s parent link at
    /// this split.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::ChildNotFound` if `old_child` is neither child.
    pub(crate) fn replace_child(&mut self, old_child: NodeId, new_child: NodeId) -> LayoutResult<()> {
        if self.first == old_child {
            self.first = new_child;
        } else if self.second == old_child {
            self.second = new_child;
        } else {
            return Err(LayoutError::ChildNotFound {
                split: self.id,
                child: old_child,
            });
        }
        Ok(())
    }
}

impl PartialEq for SplitNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SplitNode {}

impl Hash for SplitNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A node in the layout tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// A terminal region.
    Leaf(LeafNode),
    /// A region divided between two children.
    Split(SplitNode),
}

impl Node {
    /// Returns the ID of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        match self {
            Self::Leaf(leaf) => leaf.id,
            Self::Split(split) => split.id,
        }
    }

    /// Returns the parent split, or `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        match self {
            Self::Leaf(leaf) => leaf.parent,
            Self::Split(split) => split.parent,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            Self::Leaf(leaf) => leaf.parent = parent,
            Self::Split(split) => split.parent = parent,
        }
    }

    /// Returns true if this is a leaf node.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns true if this is a split node.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        matches!(self, Self::Split(_))
    }

    /// Returns the leaf if this is a leaf node.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Split(_) => None,
        }
    }

    /// Returns the split if this is a split node.
    #[must_use]
    pub const fn as_split(&self) -> Option<&SplitNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(split) => Some(split),
        }
    }

    pub(crate) fn as_leaf_mut(&mut self) -> Option<&mut LeafNode> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Split(_) => None,
        }
    }

    pub(crate) fn as_split_mut(&mut self) -> Option<&mut SplitNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(split) => Some(split),
        }
    }

    /// Returns the children of a split, or nothing for a leaf.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Leaf(_) => Vec::new(),
            Self::Split(split) => split.children().to_vec(),
        }
    }
}

impl From<LeafNode> for Node {
    fn from(leaf: LeafNode) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<SplitNode> for Node {
    fn from(split: SplitNode) -> Self {
        Self::Split(split)
    }
}
