//! Node storage for a layout tree
//!
//! The store is an arena of nodes keyed by [`NodeId`]. It owns every node
//! that is currently part of the tree and nothing else: a removed leaf and
//! its collapsed parent split are dropped from the store, so membership in
//! the tree is a single map lookup. Their IDs are retired and never accepted
//! again.
//!
//! Every mutation validates its preconditions before touching the store and
//! performs the only fallible rewrite first, so a failing call leaves the
//! store unchanged.

use std::collections::{HashMap, HashSet};

use super::error::{LayoutError, LayoutResult};
use super::node::{LeafNode, Node, SplitNode};
use super::types::{ContentTag, NodeId, Orientation};

/// Arena holding the nodes of one layout tree.
#[derive(Debug, Clone)]
pub(crate) struct NodeStore {
    nodes: HashMap<NodeId, Node>,
    retired: HashSet<NodeId>,
    root: NodeId,
}

impl NodeStore {
    /// Creates a store whose root is `root`.
    pub(crate) fn new(root: LeafNode) -> Self {
        let mut root = Node::Leaf(root);
        root.set_parent(None);
        let root_id = root.id();
        let mut nodes = HashMap::new();
        nodes.insert(root_id, root);
        Self {
            nodes,
            retired: HashSet::new(),
            root: root_id,
        }
    }

    pub(crate) const fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns true if `id` belongs to a node of this tree, current or
    /// removed.
    pub(crate) fn is_used(&self, id: NodeId) -> bool {
        self.contains(id) || self.retired.contains(&id)
    }

    /// Looks up a leaf that is part of the tree.
    pub(crate) fn leaf(&self, id: NodeId) -> LayoutResult<&LeafNode> {
        self.nodes
            .get(&id)
            .and_then(Node::as_leaf)
            .ok_or(LayoutError::LeafNotFound(id))
    }

    /// Looks up a split that is part of the tree.
    pub(crate) fn split(&self, id: NodeId) -> LayoutResult<&SplitNode> {
        self.nodes
            .get(&id)
            .and_then(Node::as_split)
            .ok_or(LayoutError::SplitNotFound(id))
    }

    /// Follows an internal child or parent link.
    pub(crate) fn linked(&self, id: NodeId) -> LayoutResult<&Node> {
        self.nodes.get(&id).ok_or(LayoutError::DanglingNode(id))
    }

    fn linked_split_mut(&mut self, id: NodeId) -> LayoutResult<&mut SplitNode> {
        self.nodes
            .get_mut(&id)
            .and_then(Node::as_split_mut)
            .ok_or(LayoutError::DanglingNode(id))
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_parent(parent);
        }
    }

    /// Iterates the tree in pre-order: a node, then its first subtree, then
    /// its second subtree.
    pub(crate) fn preorder(&self) -> Preorder<'_> {
        Preorder {
            store: self,
            stack: vec![self.root],
        }
    }

    /// Returns the first node in pre-order matching `predicate`.
    pub(crate) fn find<F>(&self, predicate: F) -> Option<&Node>
    where
        F: Fn(&Node) -> bool,
    {
        self.preorder().find(|node| predicate(node))
    }

    /// Returns all leaf IDs in pre-order.
    pub(crate) fn leaf_ids(&self) -> Vec<NodeId> {
        self.preorder()
            .filter(|node| node.is_leaf())
            .map(Node::id)
            .collect()
    }

    /// Returns the number of split levels; a lone leaf has depth 0.
    pub(crate) fn depth(&self) -> usize {
        self.depth_of(self.root)
    }

    fn depth_of(&self, id: NodeId) -> usize {
        match self.nodes.get(&id) {
            Some(Node::Split(split)) => {
                1 + self.depth_of(split.first()).max(self.depth_of(split.second()))
            }
            _ => 0,
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Replaces `leaf_id` with a split holding the leaf first and `new_leaf`
    /// second. Returns a snapshot of the new split.
    pub(crate) fn split_leaf(
        &mut self,
        leaf_id: NodeId,
        orientation: Orientation,
        ratio: f64,
        new_leaf: LeafNode,
    ) -> LayoutResult<SplitNode> {
        let parent = self.leaf(leaf_id)?.parent();
        let new_leaf_id = new_leaf.id();
        if self.is_used(new_leaf_id) {
            return Err(LayoutError::DuplicateNode(new_leaf_id));
        }

        let mut split = Node::Split(SplitNode::new(orientation, leaf_id, new_leaf_id, ratio)?);
        let split_id = split.id();

        match parent {
            Some(parent_id) => self
                .linked_split_mut(parent_id)?
                .replace_child(leaf_id, split_id)?,
            None => self.root = split_id,
        }

        split.set_parent(parent);
        let mut new_leaf = Node::Leaf(new_leaf);
        new_leaf.set_parent(Some(split_id));
        self.set_parent(leaf_id, Some(split_id));

        let snapshot = split.as_split().cloned();
        self.nodes.insert(new_leaf_id, new_leaf);
        self.nodes.insert(split_id, split);

        snapshot.ok_or(LayoutError::DanglingNode(split_id))
    }

    /// Removes a non-root leaf and promotes its sibling into the place of
    /// their parent split. Returns the detached leaf.
    pub(crate) fn remove_leaf(&mut self, leaf_id: NodeId) -> LayoutResult<LeafNode> {
        let parent_id = self
            .leaf(leaf_id)?
            .parent()
            .ok_or(LayoutError::CannotRemoveRoot(leaf_id))?;

        let parent = match self.linked(parent_id)? {
            Node::Split(split) => split,
            Node::Leaf(_) => return Err(LayoutError::ParentMismatch(leaf_id)),
        };
        let sibling = parent
            .sibling_of(leaf_id)
            .ok_or(LayoutError::ParentMismatch(leaf_id))?;
        let grandparent = parent.parent();
        self.linked(sibling)?;

        match grandparent {
            Some(grandparent_id) => self
                .linked_split_mut(grandparent_id)?
                .replace_child(parent_id, sibling)?,
            None => self.root = sibling,
        }
        self.set_parent(sibling, grandparent);

        self.nodes.remove(&parent_id);
        self.retired.insert(parent_id);
        self.retired.insert(leaf_id);
        let mut detached = self
            .nodes
            .remove(&leaf_id)
            .ok_or(LayoutError::LeafNotFound(leaf_id))?;
        detached.set_parent(None);
        match detached {
            Node::Leaf(leaf) => Ok(leaf),
            Node::Split(_) => Err(LayoutError::LeafNotFound(leaf_id)),
        }
    }

    /// Sets the ratio of a split. Returns a snapshot of the updated split.
    pub(crate) fn set_ratio(&mut self, split_id: NodeId, ratio: f64) -> LayoutResult<SplitNode> {
        let split = self
            .nodes
            .get_mut(&split_id)
            .and_then(Node::as_split_mut)
            .ok_or(LayoutError::SplitNotFound(split_id))?;
        split.set_ratio(ratio)?;
        Ok(split.clone())
    }

    /// Replaces the content tag of a leaf.
    pub(crate) fn set_tag(&mut self, leaf_id: NodeId, tag: Option<ContentTag>) -> LayoutResult<()> {
        let leaf = self
            .nodes
            .get_mut(&leaf_id)
            .and_then(Node::as_leaf_mut)
            .ok_or(LayoutError::LeafNotFound(leaf_id))?;
        leaf.tag = tag;
        Ok(())
    }

    // ========================================================================
    // Consistency
    // ========================================================================

    /// Walks the tree from the root with a visited set and checks that it
    /// is a proper binary tree with correct parent links.
    ///
    /// # Errors
    ///
    /// - `SharedNode` if a node is reachable twice
    /// - `DanglingNode` if a child is missing from the store
    /// - `ParentMismatch` if a parent link is wrong
    pub(crate) fn verify(&self) -> LayoutResult<()> {
        let root = self.linked(self.root)?;
        if root.parent().is_some() {
            return Err(LayoutError::ParentMismatch(self.root));
        }

        let mut seen = HashSet::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(LayoutError::SharedNode(id));
            }
            if let Node::Split(split) = self.linked(id)? {
                for child in split.children() {
                    if self.linked(child)?.parent() != Some(id) {
                        return Err(LayoutError::ParentMismatch(child));
                    }
                    stack.push(child);
                }
            }
        }
        Ok(())
    }
}

/// Pre-order iterator over the nodes of a store.
pub(crate) struct Preorder<'a> {
    store: &'a NodeStore,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.store.nodes.get(&id) {
                if let Node::Split(split) = node {
                    self.stack.push(split.second());
                    self.stack.push(split.first());
                }
                return Some(node);
            }
        }
        None
    }
}
