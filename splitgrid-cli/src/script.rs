//! Layout edit scripts.
//!
//! A script is plain text with one edit per line:
//!
//! ```text
//! # comment
//! split L0 v 0.5      # L0 | L1, splitter S0
//! split L1 horizontal # L1 over L2, splitter S1
//! resize S0 0.3
//! remove L2
//! ```
//!
//! The initial root leaf is `L0`. Every split names its new leaf `L<n>` and
//! itself `S<n>`, numbered in creation order. Labels are case-insensitive.

use std::collections::HashMap;

use splitgrid_core::tracing::span_names;
use splitgrid_core::{Layout, LayoutSettings, LayoutTree, NodeId, Orientation};

use crate::error::CliError;

/// One edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Split a leaf; without a ratio the settings default is used
    Split {
        /// Leaf label
        leaf: String,
        /// Split orientation
        orientation: Orientation,
        /// Fraction kept by the existing leaf
        ratio: Option<f64>,
    },
    /// Change a split's ratio
    Resize {
        /// Split label
        split: String,
        /// New ratio
        ratio: f64,
    },
    /// Remove a leaf
    Remove {
        /// Leaf label
        leaf: String,
    },
}

/// An edit with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    /// Line number in the script
    pub number: usize,
    /// The edit
    pub edit: Edit,
}

/// Parses a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, CliError> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let edit = parse_edit(content).map_err(|message| CliError::script(number, message))?;
        lines.push(ScriptLine { number, edit });
    }
    Ok(lines)
}

fn parse_edit(line: &str) -> Result<Edit, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["split", leaf, orientation] => Ok(Edit::Split {
            leaf: normalize_label(leaf),
            orientation: parse_orientation(orientation)?,
            ratio: None,
        }),
        ["split", leaf, orientation, ratio] => Ok(Edit::Split {
            leaf: normalize_label(leaf),
            orientation: parse_orientation(orientation)?,
            ratio: Some(parse_ratio(ratio)?),
        }),
        ["resize", split, ratio] => Ok(Edit::Resize {
            split: normalize_label(split),
            ratio: parse_ratio(ratio)?,
        }),
        ["remove", leaf] => Ok(Edit::Remove {
            leaf: normalize_label(leaf),
        }),
        ["split" | "resize" | "remove", ..] => Err(format!("wrong number of arguments in '{line}'")),
        [command, ..] => Err(format!("unknown command '{command}'")),
        [] => Err("empty line".to_string()),
    }
}

fn parse_orientation(word: &str) -> Result<Orientation, String> {
    word.parse()
        .map_err(|()| format!("invalid orientation '{word}' (expected h, v, horizontal or vertical)"))
}

/// Parses a number. Range checks are left to the layout tree.
fn parse_ratio(word: &str) -> Result<f64, String> {
    word.parse()
        .map_err(|_| format!("invalid ratio '{word}'"))
}

fn normalize_label(label: &str) -> String {
    label.to_ascii_uppercase()
}

/// Label assignments for the nodes a replay created.
#[derive(Debug, Default)]
pub struct Labels {
    by_label: HashMap<String, NodeId>,
    by_id: HashMap<NodeId, String>,
    next_leaf: usize,
    next_split: usize,
}

impl Labels {
    fn add_leaf(&mut self, id: NodeId) {
        let label = format!("L{}", self.next_leaf);
        self.next_leaf += 1;
        self.insert(label, id);
    }

    fn add_split(&mut self, id: NodeId) {
        let label = format!("S{}", self.next_split);
        self.next_split += 1;
        self.insert(label, id);
    }

    fn insert(&mut self, label: String, id: NodeId) {
        self.by_id.insert(id, label.clone());
        self.by_label.insert(label, id);
    }

    fn resolve(&self, label: &str, line: usize) -> Result<NodeId, CliError> {
        self.by_label
            .get(label)
            .copied()
            .ok_or_else(|| CliError::script(line, format!("unknown label '{label}'")))
    }

    /// Label of a node, or its ID if it was not created by the replay.
    pub fn name(&self, id: NodeId) -> String {
        self.by_id
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }
}

/// A tree being edited by a script.
#[derive(Debug)]
pub struct Replay {
    tree: LayoutTree,
    labels: Labels,
}

impl Replay {
    /// Creates a tree with a single leaf labelled `L0`.
    pub fn new(settings: LayoutSettings) -> Self {
        let tree = LayoutTree::from_settings(settings);
        let mut labels = Labels::default();
        labels.add_leaf(tree.root_id());
        Self { tree, labels }
    }

    /// The tree being edited.
    #[cfg(test)]
    pub const fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    /// Labels of the nodes created so far.
    pub const fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Applies every line, stopping at the first failure.
    pub fn run(&mut self, lines: &[ScriptLine]) -> Result<(), CliError> {
        let _span = splitgrid_core::trace_operation!(span_names::SCRIPT_REPLAY, edits = lines.len())
            .entered();
        for line in lines {
            self.apply(line)?;
        }
        Ok(())
    }

    /// Applies one line.
    pub fn apply(&mut self, line: &ScriptLine) -> Result<(), CliError> {
        let number = line.number;
        let layout_error = |source| CliError::Layout {
            line: number,
            source,
        };

        match &line.edit {
            Edit::Split {
                leaf,
                orientation,
                ratio,
            } => {
                let leaf = self.labels.resolve(leaf, number)?;
                let ratio = ratio.unwrap_or(self.tree.settings().default_ratio);
                let split = self
                    .tree
                    .split_leaf(leaf, *orientation, ratio, None)
                    .map_err(layout_error)?;
                self.labels.add_leaf(split.second());
                self.labels.add_split(split.id());
            }
            Edit::Resize { split, ratio } => {
                let split = self.labels.resolve(split, number)?;
                self.tree
                    .update_splitter(split, *ratio)
                    .map_err(layout_error)?;
            }
            Edit::Remove { leaf } => {
                let leaf = self.labels.resolve(leaf, number)?;
                self.tree.remove_leaf(leaf).map_err(layout_error)?;
            }
        }

        tracing::debug!(line = number, "Applied edit");
        Ok(())
    }

    /// Computes the current layout.
    pub fn layout(&self) -> Result<Layout, CliError> {
        self.tree
            .compute_layout()
            .map_err(CliError::Compute)
    }

    /// Current ratio of a split, if it is still in the tree.
    pub fn ratio(&self, split: NodeId) -> Option<f64> {
        self.tree
            .node(split)
            .and_then(|node| node.as_split().map(splitgrid_core::SplitNode::ratio))
    }
}
