//! Property-based tests for splitgrid-core

mod layout_tree;
mod settings_tests;
