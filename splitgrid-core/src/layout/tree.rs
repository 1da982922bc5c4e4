//! Thread-safe layout tree
//!
//! [`LayoutTree`] owns a node store behind a `parking_lot` reader/writer
//! lock. Reads (`find_node`, `compute_layout`, the helpers) share the lock.
//! Mutations validate under an upgradable read, upgrade to the write lock
//! for the rewrite only, and announce the change once every guard has been
//! dropped.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use super::compute;
use super::error::{LayoutError, LayoutResult, check_ratio};
use super::events::{ChangeNotifier, ListenerId, TreeChange, TreeChangeAction, TreeListener};
use super::grid::Layout;
use super::node::{LeafNode, Node, SplitNode};
use super::store::NodeStore;
use super::types::{ContentTag, NodeId, Orientation};
use crate::config::LayoutSettings;
use crate::tracing::span_names;

/// A binary tree of split regions that can be flattened into a grid.
#[derive(Debug)]
pub struct LayoutTree {
    store: RwLock<NodeStore>,
    settings: LayoutSettings,
    notifier: ChangeNotifier,
}

impl LayoutTree {
    /// Creates a tree whose only region is `root`.
    #[must_use]
    pub fn new(root: LeafNode) -> Self {
        Self::with_settings(root, LayoutSettings::default())
    }

    /// Creates a tree with `root` as its only region. Leaves created by the
    /// tree itself use the minimum sizes from `settings`.
    #[must_use]
    pub fn with_settings(root: LeafNode, settings: LayoutSettings) -> Self {
        Self {
            store: RwLock::new(NodeStore::new(root)),
            settings,
            notifier: ChangeNotifier::default(),
        }
    }

    /// Creates a tree with a fresh root leaf built from `settings`.
    #[must_use]
    pub fn from_settings(settings: LayoutSettings) -> Self {
        let root = settings.new_leaf();
        Self::with_settings(root, settings)
    }

    /// Settings used for leaves the tree creates.
    #[must_use]
    pub const fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Returns a snapshot of the first node, in pre-order, matching
    /// `predicate`.
    pub fn find_node<F>(&self, predicate: F) -> Option<Node>
    where
        F: Fn(&Node) -> bool,
    {
        self.store.read().find(predicate).cloned()
    }

    /// ID of the current root.
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        self.store.read().root()
    }

    /// Returns a snapshot of a node in the tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.store.read().get(id).cloned()
    }

    /// Returns true if a node with this ID is part of the tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.store.read().contains(id)
    }

    /// Leaf IDs in pre-order.
    #[must_use]
    pub fn leaf_ids(&self) -> Vec<NodeId> {
        self.store.read().leaf_ids()
    }

    /// Number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.store.read().preorder().filter(|node| node.is_leaf()).count()
    }

    /// Number of split levels; a lone leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.store.read().depth()
    }

    /// Flattens the tree into a grid layout.
    ///
    /// The read lock is held for the whole computation.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidOperation`-class error if a consistency check
    /// fails. This indicates a bug and is logged at error level.
    pub fn compute_layout(&self) -> LayoutResult<Layout> {
        let _span = crate::trace_operation_debug!(span_names::LAYOUT_COMPUTE).entered();

        let layout = {
            let store = self.store.read();
            compute::compute_layout(&store)
        }
        .inspect_err(|err| log_failure("compute", err))?;

        tracing::trace!(
            rows = layout.row_count(),
            columns = layout.column_count(),
            pages = layout.pages().len(),
            "Computed layout"
        );
        Ok(layout)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Replaces `leaf` with a split holding `leaf` first and `new_leaf`
    /// second. Without `new_leaf` a fresh leaf is created from the tree's
    /// settings. Returns a snapshot of the new split.
    ///
    /// Emits [`TreeChangeAction::Add`] carrying the new leaf.
    ///
    /// # Errors
    ///
    /// - `RatioOutOfRange` if `ratio` is outside [0, 1]
    /// - `LeafNotFound` if `leaf` is not a leaf of this tree
    /// - `DuplicateNode` if the ID of `new_leaf` belongs to a current or
    ///   removed node of this tree
    pub fn split_leaf(
        &self,
        leaf: NodeId,
        orientation: Orientation,
        ratio: f64,
        new_leaf: Option<LeafNode>,
    ) -> LayoutResult<SplitNode> {
        let _span = crate::trace_operation_debug!(
            span_names::LAYOUT_SPLIT,
            leaf = %leaf,
            orientation = %orientation,
            ratio
        )
        .entered();

        let new_leaf = new_leaf.unwrap_or_else(|| self.settings.new_leaf());
        let (split, added) = self
            .split_locked(leaf, orientation, ratio, new_leaf)
            .inspect_err(|err| log_failure("split", err))?;

        tracing::debug!(split = %split.id(), new_leaf = %added.id(), "Split leaf");
        self.notifier
            .notify(&TreeChange::new(TreeChangeAction::Add, added));
        Ok(split)
    }

    fn split_locked(
        &self,
        leaf: NodeId,
        orientation: Orientation,
        ratio: f64,
        new_leaf: LeafNode,
    ) -> LayoutResult<(SplitNode, LeafNode)> {
        check_ratio(ratio)?;

        let store = self.store.upgradable_read();
        store.leaf(leaf)?;
        let new_id = new_leaf.id();
        if store.is_used(new_id) {
            return Err(LayoutError::DuplicateNode(new_id));
        }

        let mut store = RwLockUpgradableReadGuard::upgrade(store);
        let split = store.split_leaf(leaf, orientation, ratio, new_leaf)?;
        let added = store.leaf(new_id)?.clone();
        Ok((split, added))
    }

    /// Sets the ratio of a split.
    ///
    /// Emits [`TreeChangeAction::RatioChanged`] carrying the updated split.
    ///
    /// # Errors
    ///
    /// - `RatioOutOfRange` if `ratio` is outside [0, 1]; the ratio is kept
    /// - `SplitNotFound` if `split` is not a split of this tree
    pub fn update_splitter(&self, split: NodeId, ratio: f64) -> LayoutResult<()> {
        let _span =
            crate::trace_operation_debug!(span_names::LAYOUT_RESIZE, split = %split, ratio)
                .entered();

        let updated = self
            .resize_locked(split, ratio)
            .inspect_err(|err| log_failure("resize", err))?;

        tracing::debug!(ratio = updated.ratio(), "Updated split ratio");
        self.notifier
            .notify(&TreeChange::new(TreeChangeAction::RatioChanged, updated));
        Ok(())
    }

    fn resize_locked(&self, split: NodeId, ratio: f64) -> LayoutResult<SplitNode> {
        check_ratio(ratio)?;

        let store = self.store.upgradable_read();
        store.split(split)?;

        let mut store = RwLockUpgradableReadGuard::upgrade(store);
        store.set_ratio(split, ratio)
    }

    /// Removes a leaf. Its sibling takes the place of their parent split,
    /// which is discarded. Returns the detached leaf.
    ///
    /// Emits [`TreeChangeAction::Remove`] carrying the removed leaf.
    ///
    /// # Errors
    ///
    /// - `LeafNotFound` if `leaf` is not a leaf of this tree
    /// - `CannotRemoveRoot` if `leaf` is the root
    pub fn remove_leaf(&self, leaf: NodeId) -> LayoutResult<LeafNode> {
        let _span = crate::trace_operation_debug!(span_names::LAYOUT_REMOVE, leaf = %leaf).entered();

        let removed = self
            .remove_locked(leaf)
            .inspect_err(|err| log_failure("remove", err))?;

        tracing::debug!("Removed leaf");
        self.notifier
            .notify(&TreeChange::new(TreeChangeAction::Remove, removed.clone()));
        Ok(removed)
    }

    fn remove_locked(&self, leaf: NodeId) -> LayoutResult<LeafNode> {
        let store = self.store.upgradable_read();
        if store.leaf(leaf)?.parent().is_none() {
            return Err(LayoutError::CannotRemoveRoot(leaf));
        }

        let mut store = RwLockUpgradableReadGuard::upgrade(store);
        store.remove_leaf(leaf)
    }

    /// Replaces the content tag of a leaf. Not a structural change, so no
    /// notification is emitted.
    ///
    /// # Errors
    ///
    /// Returns `LeafNotFound` if `leaf` is not a leaf of this tree.
    pub fn set_leaf_tag(&self, leaf: NodeId, tag: Option<ContentTag>) -> LayoutResult<()> {
        self.store.write().set_tag(leaf, tag)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Emits [`TreeChangeAction::Add`] for the current root so that a
    /// consumer registered after construction can bind the first region.
    pub fn announce_root(&self) {
        let root = {
            let store = self.store.read();
            store.get(store.root()).cloned()
        };
        if let Some(root) = root {
            self.notifier.notify(&TreeChange {
                action: TreeChangeAction::Add,
                node: Some(root),
            });
        }
    }

    /// Registers a listener called once per successful mutation.
    pub fn add_listener(&self, listener: impl TreeListener + 'static) -> ListenerId {
        self.notifier.add_listener(Arc::new(listener))
    }

    /// Unregisters a listener. Returns false if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.notifier.remove_listener(id)
    }

    /// Returns a channel receiving every change from now on. Dropping the
    /// receiver unsubscribes.
    pub fn subscribe(&self) -> Receiver<TreeChange> {
        self.notifier.subscribe()
    }

    /// Rewrites a parent link without validation or notification.
    #[cfg(test)]
    pub(crate) fn force_parent_link(&self, id: NodeId, parent: Option<NodeId>) {
        self.store.write().set_parent(id, parent);
    }
}

fn log_failure(operation: &'static str, err: &LayoutError) {
    if err.is_consistency_failure() {
        tracing::error!(operation, error = %err, "Layout tree is inconsistent");
    } else {
        tracing::debug!(operation, error = %err, "Rejected layout operation");
    }
}
