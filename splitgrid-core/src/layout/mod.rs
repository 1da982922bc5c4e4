//! Recursive split layouts
//!
//! A layout tree is a binary tree of regions. Leaves are content regions;
//! every split divides its region between two children, side by side
//! (vertical) or stacked (horizontal), with a thin splitter between them.
//! Computing the layout flattens the tree into a grid of rows and columns
//! that a renderer can bind to directly.
//!
//! # Module Structure
//!
//! - `types` - Identifiers and enums (`NodeId`, `ContentTag`, `Orientation`)
//! - `node` - Node model (`Node`, `LeafNode`, `SplitNode`)
//! - `store` - Arena holding the nodes of one tree
//! - `compute` - Span, position and expansion passes
//! - `grid` - Computed layout (`Layout`, placements, track definitions)
//! - `tree` - Thread-safe tree with mutations and notifications (`LayoutTree`)
//! - `events` - Change notifications (`TreeChange`, `TreeListener`)
//! - `container` - Layout holder for UI hosts (`SplitContainer`)
//! - `error` - Error types (`LayoutError`, `ErrorKind`)
//!
//! # Example
//!
//! ```
//! use splitgrid_core::layout::{GridArea, LayoutTree, LeafNode, Orientation};
//!
//! let root = LeafNode::new();
//! let left = root.id();
//! let tree = LayoutTree::new(root);
//!
//! // Split the only region into left | right
//! let split = tree.split_leaf(left, Orientation::Vertical, 0.5, None).unwrap();
//! let right = split.second();
//!
//! let layout = tree.compute_layout().unwrap();
//! assert_eq!(layout.column_count(), 3);
//! assert!(layout.columns()[1].is_splitter);
//! assert_eq!(layout.page(left).unwrap().area, GridArea::unit(0, 0));
//! assert_eq!(layout.page(right).unwrap().area, GridArea::unit(0, 2));
//!
//! // Removing the right region restores the single-region layout
//! tree.remove_leaf(right).unwrap();
//! assert_eq!(tree.compute_layout().unwrap().column_count(), 1);
//! ```

mod compute;
mod container;
mod error;
mod events;
mod grid;
mod node;
mod store;
mod tree;
mod types;

pub use container::{SplitCommand, SplitContainer};
pub use error::{ErrorKind, LayoutError, LayoutResult};
pub use events::{ListenerId, TreeChange, TreeChangeAction, TreeListener};
pub use grid::{
    CellOccupant, GridArea, Layout, PagePlacement, SplitterPlacement, TrackDefinition,
};
pub use node::{DEFAULT_MIN_SIZE, DEFAULT_RATIO, LeafNode, Node, SplitNode};
pub use tree::LayoutTree;
pub use types::{ContentTag, NodeId, Orientation};
