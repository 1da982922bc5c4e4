//! Property-based tests for layout trees
//!
//! Random sequences of splits, resizes and removals are applied to a tree;
//! after every sequence the computed layout must be a complete, exact tiling
//! of the grid that matches the tree's shape.

use proptest::prelude::*;
use splitgrid_core::layout::{
    CellOccupant, ErrorKind, Layout, LayoutTree, LeafNode, Node, NodeId, Orientation,
};

// ============================================================================
// Test Strategies
// ============================================================================

fn orientation_strategy() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

/// Ratios inside [0, 1], including both bounds
fn valid_ratio_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), 0.0..=1.0f64]
}

/// Ratios outside [0, 1]
fn invalid_ratio_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        -1.0e6..-1.0e-9f64,
        (1.0 + 1.0e-9)..1.0e6f64,
    ]
}

/// An edit applied to a tree
#[derive(Debug, Clone)]
enum TreeOperation {
    /// Split a leaf (by index into the leaf list)
    Split {
        leaf_index: usize,
        orientation: Orientation,
        ratio: f64,
    },
    /// Resize a split (by index into the splitter list)
    Resize { split_index: usize, ratio: f64 },
    /// Remove a leaf (by index into the leaf list)
    Remove { leaf_index: usize },
}

fn tree_operation_strategy() -> impl Strategy<Value = TreeOperation> {
    prop_oneof![
        3 => (0usize..16, orientation_strategy(), valid_ratio_strategy()).prop_map(
            |(leaf_index, orientation, ratio)| TreeOperation::Split {
                leaf_index,
                orientation,
                ratio,
            }
        ),
        1 => (0usize..16, valid_ratio_strategy())
            .prop_map(|(split_index, ratio)| TreeOperation::Resize { split_index, ratio }),
        1 => (0usize..16).prop_map(|leaf_index| TreeOperation::Remove { leaf_index }),
    ]
}

fn tree_operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<TreeOperation>> {
    proptest::collection::vec(tree_operation_strategy(), 0..=max_ops)
}

fn split_ids(tree: &LayoutTree) -> Vec<NodeId> {
    let mut ids = Vec::new();
    collect_splits(tree, tree.root_id(), &mut ids);
    ids
}

fn collect_splits(tree: &LayoutTree, id: NodeId, ids: &mut Vec<NodeId>) {
    if let Some(Node::Split(split)) = tree.node(id) {
        ids.push(split.id());
        collect_splits(tree, split.first(), ids);
        collect_splits(tree, split.second(), ids);
    }
}

/// Apply an operation to a tree. Every generated operation is valid, so
/// failures are bugs.
fn apply_operation(tree: &LayoutTree, op: &TreeOperation) {
    match op {
        TreeOperation::Split {
            leaf_index,
            orientation,
            ratio,
        } => {
            let leaves = tree.leaf_ids();
            let leaf = leaves[leaf_index % leaves.len()];
            tree.split_leaf(leaf, *orientation, *ratio, None).unwrap();
        }
        TreeOperation::Resize { split_index, ratio } => {
            let splits = split_ids(tree);
            if !splits.is_empty() {
                let split = splits[split_index % splits.len()];
                tree.update_splitter(split, *ratio).unwrap();
            }
        }
        TreeOperation::Remove { leaf_index } => {
            let leaves = tree.leaf_ids();
            if leaves.len() > 1 {
                let leaf = leaves[leaf_index % leaves.len()];
                tree.remove_leaf(leaf).unwrap();
            }
        }
    }
}

fn build_tree(ops: &[TreeOperation]) -> LayoutTree {
    let tree = LayoutTree::new(LeafNode::new());
    for op in ops {
        apply_operation(&tree, op);
    }
    tree
}

/// Reference span of a subtree: (rows, columns)
fn reference_span(tree: &LayoutTree, id: NodeId) -> (usize, usize) {
    match tree.node(id) {
        Some(Node::Split(split)) => {
            let (first_rows, first_columns) = reference_span(tree, split.first());
            let (second_rows, second_columns) = reference_span(tree, split.second());
            match split.orientation() {
                Orientation::Vertical => (
                    first_rows.max(second_rows),
                    first_columns + 1 + second_columns,
                ),
                Orientation::Horizontal => (
                    first_rows + 1 + second_rows,
                    first_columns.max(second_columns),
                ),
            }
        }
        _ => (1, 1),
    }
}

fn assert_exact_tiling(layout: &Layout) -> Result<(), TestCaseError> {
    prop_assert!(layout.is_fully_covered());
    for row in 0..layout.row_count() {
        for column in 0..layout.column_count() {
            prop_assert!(layout.occupant(row, column).is_some());
        }
    }
    Ok(())
}

// ============================================================================
// Ratio validation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any ratio in [0, 1] is accepted by split and resize
    #[test]
    fn prop_valid_ratio_is_accepted(
        ratio in valid_ratio_strategy(),
        orientation in orientation_strategy(),
    ) {
        let tree = LayoutTree::new(LeafNode::new());
        let split = tree.split_leaf(tree.root_id(), orientation, ratio, None).unwrap();
        prop_assert!((split.ratio() - ratio).abs() < f64::EPSILON);
        prop_assert!(tree.update_splitter(split.id(), ratio).is_ok());
    }

    /// Any ratio outside [0, 1] is a range error and changes nothing
    #[test]
    fn prop_invalid_ratio_is_rejected(
        ratio in invalid_ratio_strategy(),
        orientation in orientation_strategy(),
    ) {
        let tree = LayoutTree::new(LeafNode::new());
        let root = tree.root_id();

        let err = tree.split_leaf(root, orientation, ratio, None).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Range);
        prop_assert_eq!(tree.leaf_count(), 1);

        let split = tree.split_leaf(root, orientation, 0.5, None).unwrap();
        let err = tree.update_splitter(split.id(), ratio).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Range);
        let kept = tree.node(split.id()).and_then(|n| n.as_split().map(|s| s.ratio()));
        prop_assert_eq!(kept, Some(0.5));
    }
}

// ============================================================================
// Layout shape
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Track counts equal the root span and every cell has one occupant
    #[test]
    fn prop_layout_tiles_root_span(ops in tree_operations_strategy(20)) {
        let tree = build_tree(&ops);
        let layout = tree.compute_layout().unwrap();

        let (rows, columns) = reference_span(&tree, tree.root_id());
        prop_assert_eq!(layout.row_count(), rows);
        prop_assert_eq!(layout.column_count(), columns);
        assert_exact_tiling(&layout)?;
    }

    /// One page per leaf and one splitter per split, both in pre-order
    #[test]
    fn prop_placements_follow_tree(ops in tree_operations_strategy(20)) {
        let tree = build_tree(&ops);
        let layout = tree.compute_layout().unwrap();

        let pages: Vec<NodeId> = layout.pages().iter().map(|p| p.id).collect();
        let splitters: Vec<NodeId> = layout.splitters().iter().map(|s| s.id).collect();
        prop_assert_eq!(pages, tree.leaf_ids());
        prop_assert_eq!(splitters, split_ids(&tree));
    }

    /// Splitter tracks are exactly the tracks holding splitters
    #[test]
    fn prop_splitter_tracks_hold_splitters(ops in tree_operations_strategy(20)) {
        let tree = build_tree(&ops);
        let layout = tree.compute_layout().unwrap();

        for splitter in layout.splitters() {
            match splitter.orientation {
                Orientation::Vertical => {
                    prop_assert!(layout.columns()[splitter.area.column].is_splitter);
                    prop_assert_eq!(splitter.area.column_span, 1);
                }
                Orientation::Horizontal => {
                    prop_assert!(layout.rows()[splitter.area.row].is_splitter);
                    prop_assert_eq!(splitter.area.row_span, 1);
                }
            }
        }
        for page in layout.pages() {
            prop_assert_eq!(
                layout.occupant(page.area.row, page.area.column),
                Some(CellOccupant::Page(page.id))
            );
        }
    }

    /// Computing twice without a mutation gives equal layouts
    #[test]
    fn prop_compute_is_idempotent(ops in tree_operations_strategy(20)) {
        let tree = build_tree(&ops);
        prop_assert_eq!(tree.compute_layout().unwrap(), tree.compute_layout().unwrap());
    }
}

// ============================================================================
// Structural edits
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Splitting a leaf and removing the new leaf restores the layout
    #[test]
    fn prop_split_then_remove_round_trip(
        ops in tree_operations_strategy(15),
        leaf_index in 0usize..16,
        orientation in orientation_strategy(),
        ratio in valid_ratio_strategy(),
    ) {
        let tree = build_tree(&ops);
        let before = tree.compute_layout().unwrap();
        let leaves = tree.leaf_ids();
        let leaf = leaves[leaf_index % leaves.len()];

        let split = tree.split_leaf(leaf, orientation, ratio, None).unwrap();
        prop_assert_eq!(tree.leaf_count(), leaves.len() + 1);
        tree.remove_leaf(split.second()).unwrap();

        prop_assert_eq!(tree.compute_layout().unwrap(), before);
        prop_assert_eq!(tree.leaf_ids(), leaves);
    }

    /// Resizing never changes the grid
    #[test]
    fn prop_resize_keeps_grid(
        ops in tree_operations_strategy(15),
        split_index in 0usize..16,
        ratio in valid_ratio_strategy(),
    ) {
        let tree = build_tree(&ops);
        let splits = split_ids(&tree);
        prop_assume!(!splits.is_empty());

        let before = tree.compute_layout().unwrap();
        tree.update_splitter(splits[split_index % splits.len()], ratio).unwrap();
        prop_assert_eq!(tree.compute_layout().unwrap(), before);
    }

    /// The root leaf of any tree can never be removed, and removing a
    /// non-root leaf keeps every other leaf
    #[test]
    fn prop_remove_keeps_other_leaves(
        ops in tree_operations_strategy(15),
        leaf_index in 0usize..16,
    ) {
        let tree = build_tree(&ops);
        let leaves = tree.leaf_ids();

        if leaves.len() == 1 {
            let err = tree.remove_leaf(leaves[0]).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::InvalidOperation);
            prop_assert_eq!(tree.leaf_ids(), leaves);
        } else {
            let removed = leaves[leaf_index % leaves.len()];
            tree.remove_leaf(removed).unwrap();
            let expected: Vec<NodeId> =
                leaves.iter().copied().filter(|id| *id != removed).collect();
            prop_assert_eq!(tree.leaf_ids(), expected);
            prop_assert!(!tree.contains(removed));
        }
    }
}
