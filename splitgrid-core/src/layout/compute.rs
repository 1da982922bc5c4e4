//! Layout computation
//!
//! Flattens a node store into a [`Layout`] in three passes:
//!
//! 1. **Span pass** (bottom-up): every subtree describes a block of
//!    `rows × columns` cells. A leaf is 1×1. A vertical split puts its
//!    children side by side with one splitter column between them; a
//!    horizontal split stacks them with one splitter row between them.
//! 2. **Position pass** (top-down): every node gets an origin and the region
//!    it has to fill. Splitter tracks are marked and each split records a
//!    splitter spanning its whole region. Leaves get a provisional 1×1 cell.
//! 3. **Expansion pass**: sibling subtrees can differ in size, so a leaf grows
//!    from its provisional cell into the space its deeper siblings do not
//!    claim. The growth is found by walking the leaf's parent chain.
//!
//! ```text
//!  Split(V)                  col: 0    1    2
//!  ├── Split(H)             row 0: A  | S1 | C
//!  │   ├── A                row 1: S2 | S1 | C
//!  │   └── B                row 2: B  | S1 | C
//!  └── C
//! ```

use std::collections::HashMap;

use super::error::{LayoutError, LayoutResult};
use super::grid::{GridArea, Layout, PagePlacement, SplitterPlacement};
use super::node::Node;
use super::store::NodeStore;
use super::types::{NodeId, Orientation};

/// Size of a block of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub rows: usize,
    pub columns: usize,
}

impl Span {
    const UNIT: Self = Self {
        rows: 1,
        columns: 1,
    };
}

/// Spans of every node, measured once per computation.
struct SpanTable(HashMap<NodeId, Span>);

impl SpanTable {
    fn build(store: &NodeStore) -> LayoutResult<Self> {
        let mut table = HashMap::new();
        measure(store, store.root(), &mut table)?;
        Ok(Self(table))
    }

    fn get(&self, id: NodeId) -> LayoutResult<Span> {
        self.0.get(&id).copied().ok_or(LayoutError::DanglingNode(id))
    }
}

fn measure(store: &NodeStore, id: NodeId, table: &mut HashMap<NodeId, Span>) -> LayoutResult<Span> {
    let span = match store.linked(id)? {
        Node::Leaf(_) => Span::UNIT,
        Node::Split(split) => {
            let first = measure(store, split.first(), table)?;
            let second = measure(store, split.second(), table)?;
            match split.orientation() {
                // left | splitter | right
                Orientation::Vertical => Span {
                    rows: first.rows.max(second.rows),
                    columns: first.columns + 1 + second.columns,
                },
                // top / splitter / bottom
                Orientation::Horizontal => Span {
                    rows: first.rows + 1 + second.rows,
                    columns: first.columns.max(second.columns),
                },
            }
        }
    };
    table.insert(id, span);
    Ok(span)
}

/// Computes the grid layout of a store.
///
/// # Errors
///
/// Returns an `InvalidOperation`-class error if the tree is not a proper
/// binary tree or two leaves end up at the same grid cell.
pub(crate) fn compute_layout(store: &NodeStore) -> LayoutResult<Layout> {
    store.verify()?;

    let spans = SpanTable::build(store)?;
    let root = store.root();
    let root_span = spans.get(root)?;

    let mut layout = Layout::with_tracks(root_span.rows, root_span.columns);
    assign_positions(store, &spans, root, 0, 0, root_span, &mut layout)?;
    expand_leaf_spans(store, &spans, &mut layout)?;

    Ok(layout)
}

/// Records splitters and provisional 1×1 pages. `region` is the block the
/// node has to fill, which can be larger than its own span.
fn assign_positions(
    store: &NodeStore,
    spans: &SpanTable,
    id: NodeId,
    row: usize,
    column: usize,
    region: Span,
    layout: &mut Layout,
) -> LayoutResult<()> {
    let split = match store.linked(id)? {
        Node::Leaf(_) => {
            layout.push_page(PagePlacement {
                id,
                area: GridArea::unit(row, column),
            });
            return Ok(());
        }
        Node::Split(split) => split,
    };

    let first = spans.get(split.first())?;
    match split.orientation() {
        Orientation::Vertical => {
            let splitter_column = column + first.columns;
            layout.mark_splitter_column(splitter_column);
            layout.push_splitter(SplitterPlacement {
                id,
                area: GridArea::new(row, splitter_column, region.rows, 1),
                orientation: Orientation::Vertical,
            });

            let first_region = Span {
                rows: region.rows,
                columns: first.columns,
            };
            let second_region = Span {
                rows: region.rows,
                columns: region.columns.saturating_sub(first.columns + 1),
            };
            assign_positions(store, spans, split.first(), row, column, first_region, layout)?;
            assign_positions(
                store,
                spans,
                split.second(),
                row,
                splitter_column + 1,
                second_region,
                layout,
            )
        }
        Orientation::Horizontal => {
            let splitter_row = row + first.rows;
            layout.mark_splitter_row(splitter_row);
            layout.push_splitter(SplitterPlacement {
                id,
                area: GridArea::new(splitter_row, column, 1, region.columns),
                orientation: Orientation::Horizontal,
            });

            let first_region = Span {
                rows: first.rows,
                columns: region.columns,
            };
            let second_region = Span {
                rows: region.rows.saturating_sub(first.rows + 1),
                columns: region.columns,
            };
            assign_positions(store, spans, split.first(), row, column, first_region, layout)?;
            assign_positions(
                store,
                spans,
                split.second(),
                splitter_row + 1,
                column,
                second_region,
                layout,
            )
        }
    }
}

/// Maps the origin cell of every leaf to the leaf, walking the tree
/// independently of the position pass.
fn build_leaf_position_map(
    store: &NodeStore,
    spans: &SpanTable,
    id: NodeId,
    row: usize,
    column: usize,
    map: &mut HashMap<(usize, usize), NodeId>,
) -> LayoutResult<()> {
    match store.linked(id)? {
        Node::Leaf(_) => {
            if map.insert((row, column), id).is_some() {
                return Err(LayoutError::DuplicateCell { row, column });
            }
            Ok(())
        }
        Node::Split(split) => {
            let first = spans.get(split.first())?;
            build_leaf_position_map(store, spans, split.first(), row, column, map)?;
            match split.orientation() {
                Orientation::Vertical => build_leaf_position_map(
                    store,
                    spans,
                    split.second(),
                    row,
                    column + first.columns + 1,
                    map,
                ),
                Orientation::Horizontal => build_leaf_position_map(
                    store,
                    spans,
                    split.second(),
                    row + first.rows + 1,
                    column,
                    map,
                ),
            }
        }
    }
}

/// Grows every provisional page into its final span.
fn expand_leaf_spans(store: &NodeStore, spans: &SpanTable, layout: &mut Layout) -> LayoutResult<()> {
    let mut leaf_map = HashMap::with_capacity(layout.pages().len());
    build_leaf_position_map(store, spans, store.root(), 0, 0, &mut leaf_map)?;

    let mut expanded = Vec::with_capacity(layout.pages().len());
    for page in layout.pages() {
        let (row, column) = (page.area.row, page.area.column);
        let leaf = *leaf_map
            .get(&(row, column))
            .ok_or(LayoutError::UnmappedCell { row, column })?;

        let growth = leaf_growth(store, spans, leaf)?;
        expanded.push(PagePlacement {
            id: leaf,
            area: GridArea::new(row, column, 1 + growth.rows, 1 + growth.columns),
        });
    }
    layout.replace_pages(expanded);
    Ok(())
}

/// Walks from a leaf to the root and sums the extra rows and columns the
/// leaf may occupy.
///
/// Where the leaf's subtree sits beside a taller sibling (vertical split) it
/// grows by the sibling's surplus rows; beside a wider sibling (horizontal
/// split) by the surplus columns. Along the split axis only a second child
/// keeps growing: a first child is bounded by the splitter after it.
fn leaf_growth(store: &NodeStore, spans: &SpanTable, leaf: NodeId) -> LayoutResult<Span> {
    let mut growth = Span {
        rows: 0,
        columns: 0,
    };
    let (mut rows_open, mut columns_open) = (true, true);

    let mut child = leaf;
    let mut parent = store.linked(leaf)?.parent();
    while let Some(parent_id) = parent {
        let split = match store.linked(parent_id)? {
            Node::Split(split) => split,
            Node::Leaf(_) => return Err(LayoutError::ParentMismatch(child)),
        };
        let sibling = split
            .sibling_of(child)
            .ok_or(LayoutError::ParentMismatch(child))?;
        let own = spans.get(child)?;
        let other = spans.get(sibling)?;
        let is_first = split.first() == child;

        match split.orientation() {
            Orientation::Vertical => {
                if rows_open {
                    growth.rows += other.rows.saturating_sub(own.rows);
                }
                if is_first {
                    columns_open = false;
                }
            }
            Orientation::Horizontal => {
                if columns_open {
                    growth.columns += other.columns.saturating_sub(own.columns);
                }
                if is_first {
                    rows_open = false;
                }
            }
        }

        if !rows_open && !columns_open {
            break;
        }
        child = parent_id;
        parent = split.parent();
    }

    Ok(growth)
}
