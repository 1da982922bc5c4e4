//! splitgrid Core Library
//!
//! This crate turns a binary tree of horizontal and vertical splits into a
//! flat grid description (row and column definitions plus per-region cell
//! placements) and supports structural edits under concurrent reads.
//!
//! # Crate Structure
//!
//! - [`layout`] - Layout tree, layout computation, change notifications
//! - [`config`] - Settings for fresh leaves and logging, stored as TOML
//! - [`tracing`] - Subscriber setup and span names

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod layout;
pub mod tracing;

pub use config::{ConfigError, ConfigResult, LayoutSettings, LoggingSettings};
pub use layout::{
    CellOccupant, ContentTag, ErrorKind, GridArea, Layout, LayoutError, LayoutResult, LayoutTree,
    LeafNode, Node, NodeId, Orientation, PagePlacement, SplitCommand, SplitContainer, SplitNode,
    SplitterPlacement, TrackDefinition, TreeChange, TreeChangeAction, TreeListener,
};
pub use tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult, get_tracing_config,
    init_tracing, is_tracing_initialized, span_names,
};
