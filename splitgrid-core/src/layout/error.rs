//! Error types for layout tree operations

use super::types::NodeId;

/// Broad classification of a [`LayoutError`].
///
/// `Range`, `NullArgument` and `NotFound` describe caller misuse.
/// `InvalidOperation` covers structurally disallowed requests and failed
/// internal consistency checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An argument is outside its allowed range.
    Range,
    /// A required argument is absent.
    NullArgument,
    /// A referenced node is not part of the tree.
    NotFound,
    /// The request is structurally disallowed or the tree is inconsistent.
    InvalidOperation,
}

/// Errors that can occur during layout tree operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Ratio outside the closed interval [0, 1].
    #[error("invalid split ratio: {0} (must be between 0.0 and 1.0)")]
    RatioOutOfRange(f64),

    /// A required argument was not supplied.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// No leaf with this ID is part of the tree.
    #[error("leaf not found: {0}")]
    LeafNotFound(NodeId),

    /// No split with this ID is part of the tree.
    #[error("split not found: {0}")]
    SplitNotFound(NodeId),

    /// The root leaf is the only region and cannot be removed.
    #[error("cannot remove the root leaf {0}")]
    CannotRemoveRoot(NodeId),

    /// `replace_child` was given a node that is not a child of the split.
    #[error("{child} is not a child of split {split}")]
    ChildNotFound {
        /// The split whose children were searched.
        split: NodeId,
        /// The node that was expected to be a child.
        child: NodeId,
    },

    /// The ID belongs to a node of the tree, current or removed.
    #[error("node ID already used in this tree: {0}")]
    DuplicateNode(NodeId),

    /// A node is reachable through more than one path.
    #[error("shared node detected: {0}")]
    SharedNode(NodeId),

    /// A split refers to a child that is not in the store.
    #[error("dangling child reference: {0}")]
    DanglingNode(NodeId),

    /// A node's parent link does not name the split holding it.
    #[error("parent link of {0} does not match its holder")]
    ParentMismatch(NodeId),

    /// Two leaves were mapped to the same grid cell.
    #[error("two leaves mapped to grid cell ({row}, {column})")]
    DuplicateCell {
        /// Grid row.
        row: usize,
        /// Grid column.
        column: usize,
    },

    /// A provisional page has no leaf at its grid cell.
    #[error("no leaf mapped at grid cell ({row}, {column})")]
    UnmappedCell {
        /// Grid row.
        row: usize,
        /// Grid column.
        column: usize,
    },
}

impl LayoutError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RatioOutOfRange(_) => ErrorKind::Range,
            Self::MissingArgument(_) => ErrorKind::NullArgument,
            Self::LeafNotFound(_) | Self::SplitNotFound(_) => ErrorKind::NotFound,
            Self::CannotRemoveRoot(_)
            | Self::ChildNotFound { .. }
            | Self::DuplicateNode(_)
            | Self::SharedNode(_)
            | Self::DanglingNode(_)
            | Self::ParentMismatch(_)
            | Self::DuplicateCell { .. }
            | Self::UnmappedCell { .. } => ErrorKind::InvalidOperation,
        }
    }

    /// Returns true if this error reports a broken tree invariant rather
    /// than a rejected request.
    #[must_use]
    pub const fn is_consistency_failure(&self) -> bool {
        matches!(
            self,
            Self::SharedNode(_)
                | Self::DanglingNode(_)
                | Self::ParentMismatch(_)
                | Self::DuplicateCell { .. }
                | Self::UnmappedCell { .. }
        )
    }
}

/// Result type for layout tree operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Checks that a ratio lies in the closed interval [0, 1].
///
/// NaN is rejected.
pub(crate) fn check_ratio(ratio: f64) -> LayoutResult<f64> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(LayoutError::RatioOutOfRange(ratio))
    }
}
