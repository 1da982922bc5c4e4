//! Split container
//!
//! [`SplitContainer`] is the binding point for a grid-based UI: it owns a
//! [`LayoutTree`], listens to its changes and keeps the most recently
//! computed [`Layout`] ready for the host to render.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

use super::error::{LayoutError, LayoutResult, check_ratio};
use super::events::TreeChange;
use super::grid::Layout;
use super::node::{Node, SplitNode};
use super::tree::LayoutTree;
use super::types::{NodeId, Orientation};
use crate::config::LayoutSettings;

/// A validated request to split one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCommand {
    page: NodeId,
    ratio: f64,
    orientation: Orientation,
}

impl SplitCommand {
    /// Creates a command splitting `page`.
    ///
    /// # Errors
    ///
    /// - `MissingArgument` if `page` is `None`
    /// - `RatioOutOfRange` if `ratio` is outside [0, 1]
    pub fn new(page: Option<NodeId>, ratio: f64, orientation: Orientation) -> LayoutResult<Self> {
        let page = page.ok_or(LayoutError::MissingArgument("page"))?;
        let ratio = check_ratio(ratio)?;
        Ok(Self {
            page,
            ratio,
            orientation,
        })
    }

    /// Page to split.
    #[must_use]
    pub const fn page(&self) -> NodeId {
        self.page
    }

    /// Fraction of the space kept by the existing page.
    #[must_use]
    pub const fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Split orientation.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }
}

/// Keeps the latest layout of a tree.
#[derive(Debug)]
pub struct SplitContainer {
    tree: Arc<LayoutTree>,
    changes: Receiver<TreeChange>,
    layout: Layout,
    stale: bool,
}

impl SplitContainer {
    /// Creates a container holding a single fresh page.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial layout cannot be computed.
    pub fn new(settings: LayoutSettings) -> LayoutResult<Self> {
        Self::from_tree(Arc::new(LayoutTree::from_settings(settings)))
    }

    /// Creates a container for an existing tree. Changes made through the
    /// shared tree are picked up by [`refresh`](Self::refresh).
    ///
    /// # Errors
    ///
    /// Returns an error if the initial layout cannot be computed.
    pub fn from_tree(tree: Arc<LayoutTree>) -> LayoutResult<Self> {
        let changes = tree.subscribe();
        let layout = tree.compute_layout()?;
        Ok(Self {
            tree,
            changes,
            layout,
            stale: false,
        })
    }

    /// The tree behind this container.
    #[must_use]
    pub const fn tree(&self) -> &Arc<LayoutTree> {
        &self.tree
    }

    /// The most recently computed layout.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Splits a page with a fresh page and refreshes the layout.
    ///
    /// # Errors
    ///
    /// Returns `LeafNotFound` if the page is not in the tree, or any error
    /// from splitting or recomputing.
    pub fn split(&mut self, command: SplitCommand) -> LayoutResult<SplitNode> {
        let page = command.page();
        let leaf = self
            .tree
            .find_node(|node| node.is_leaf() && node.id() == page)
            .map(|node| node.id())
            .ok_or(LayoutError::LeafNotFound(page))?;

        let split = self
            .tree
            .split_leaf(leaf, command.orientation(), command.ratio(), None)?;
        self.refresh()?;
        Ok(split)
    }

    /// Removes a page and refreshes the layout.
    ///
    /// # Errors
    ///
    /// Returns any error from removing or recomputing.
    pub fn remove_page(&mut self, page: NodeId) -> LayoutResult<()> {
        self.tree.remove_leaf(page)?;
        self.refresh()?;
        Ok(())
    }

    /// Changes a splitter's ratio and refreshes the layout.
    ///
    /// # Errors
    ///
    /// Returns any error from resizing or recomputing.
    pub fn resize(&mut self, split: NodeId, ratio: f64) -> LayoutResult<()> {
        self.tree.update_splitter(split, ratio)?;
        self.refresh()?;
        Ok(())
    }

    /// Drains pending change notifications and recomputes the layout if any
    /// arrived, or if the last recomputation failed. Returns whether the
    /// layout was recomputed.
    ///
    /// # Errors
    ///
    /// Returns an error if the recomputation fails; the previous layout is
    /// kept and the next call tries again.
    pub fn refresh(&mut self) -> LayoutResult<bool> {
        let pending = self.changes.try_iter().count();
        self.stale |= pending > 0;
        if !self.stale {
            return Ok(false);
        }
        tracing::trace!(pending, "Recomputing layout");
        self.layout = self.tree.compute_layout()?;
        self.stale = false;
        Ok(true)
    }

    /// Returns the page IDs in the current layout, in pre-order.
    #[must_use]
    pub fn page_ids(&self) -> Vec<NodeId> {
        self.layout.pages().iter().map(|page| page.id).collect()
    }

    /// Returns a snapshot of a node in the tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.tree.node(id)
    }
}
