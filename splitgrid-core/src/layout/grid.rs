//! Flat grid description produced by layout computation
//!
//! A [`Layout`] is what a grid-based UI host binds to: one definition per
//! row and column (flagging the thin splitter tracks), one placement per
//! leaf and one placement per split's splitter. A layout is built fresh on
//! every computation and is never modified afterwards.

use serde::Serialize;

use super::types::{NodeId, Orientation};

/// Definition of one grid row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TrackDefinition {
    /// True if this track holds splitters rather than content.
    pub is_splitter: bool,
}

impl TrackDefinition {
    /// A content track.
    pub const CONTENT: Self = Self { is_splitter: false };
    /// A splitter track.
    pub const SPLITTER: Self = Self { is_splitter: true };
}

/// Rectangular block of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridArea {
    /// First row.
    pub row: usize,
    /// First column.
    pub column: usize,
    /// Number of rows covered (at least 1).
    pub row_span: usize,
    /// Number of columns covered (at least 1).
    pub column_span: usize,
}

impl GridArea {
    /// Creates an area.
    #[must_use]
    pub const fn new(row: usize, column: usize, row_span: usize, column_span: usize) -> Self {
        Self {
            row,
            column,
            row_span,
            column_span,
        }
    }

    /// Creates a 1×1 area.
    #[must_use]
    pub const fn unit(row: usize, column: usize) -> Self {
        Self::new(row, column, 1, 1)
    }

    /// Returns true if the cell lies inside this area.
    #[must_use]
    pub const fn contains(&self, row: usize, column: usize) -> bool {
        row >= self.row
            && row < self.row + self.row_span
            && column >= self.column
            && column < self.column + self.column_span
    }

    /// Iterates over every (row, column) cell of the area.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.row..self.row + self.row_span)
            .flat_map(move |r| (self.column..self.column + self.column_span).map(move |c| (r, c)))
    }
}

/// Placement of a leaf's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagePlacement {
    /// The leaf placed here.
    pub id: NodeId,
    /// Cells covered by the leaf.
    pub area: GridArea,
}

/// Placement of a split's splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitterPlacement {
    /// The split this splitter resizes.
    pub id: NodeId,
    /// Cells covered by the splitter.
    pub area: GridArea,
    /// Orientation of the split.
    pub orientation: Orientation,
}

/// What covers a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOccupant {
    /// Content of a leaf.
    Page(NodeId),
    /// Splitter of a split.
    Splitter(NodeId),
}

/// Grid layout computed from a layout tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Layout {
    rows: Vec<TrackDefinition>,
    columns: Vec<TrackDefinition>,
    pages: Vec<PagePlacement>,
    splitters: Vec<SplitterPlacement>,
}

impl Layout {
    /// Creates a layout with `rows` × `columns` content tracks and no
    /// placements.
    pub(crate) fn with_tracks(rows: usize, columns: usize) -> Self {
        Self {
            rows: vec![TrackDefinition::CONTENT; rows],
            columns: vec![TrackDefinition::CONTENT; columns],
            pages: Vec::new(),
            splitters: Vec::new(),
        }
    }

    pub(crate) fn mark_splitter_row(&mut self, row: usize) {
        if let Some(track) = self.rows.get_mut(row) {
            *track = TrackDefinition::SPLITTER;
        }
    }

    pub(crate) fn mark_splitter_column(&mut self, column: usize) {
        if let Some(track) = self.columns.get_mut(column) {
            *track = TrackDefinition::SPLITTER;
        }
    }

    pub(crate) fn push_page(&mut self, page: PagePlacement) {
        self.pages.push(page);
    }

    pub(crate) fn push_splitter(&mut self, splitter: SplitterPlacement) {
        self.splitters.push(splitter);
    }

    pub(crate) fn replace_pages(&mut self, pages: Vec<PagePlacement>) {
        self.pages = pages;
    }

    /// Row definitions, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[TrackDefinition] {
        &self.rows
    }

    /// Column definitions, left to right.
    #[must_use]
    pub fn columns(&self) -> &[TrackDefinition] {
        &self.columns
    }

    /// Leaf placements in tree pre-order.
    #[must_use]
    pub fn pages(&self) -> &[PagePlacement] {
        &self.pages
    }

    /// Splitter placements in tree pre-order.
    #[must_use]
    pub fn splitters(&self) -> &[SplitterPlacement] {
        &self.splitters
    }

    /// Number of grid rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of grid columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the placement of a leaf.
    #[must_use]
    pub fn page(&self, id: NodeId) -> Option<&PagePlacement> {
        self.pages.iter().find(|page| page.id == id)
    }

    /// Returns the placement of a split's splitter.
    #[must_use]
    pub fn splitter(&self, id: NodeId) -> Option<&SplitterPlacement> {
        self.splitters.iter().find(|splitter| splitter.id == id)
    }

    /// Returns everything covering a cell. A well-formed layout yields
    /// exactly one occupant for every cell inside the grid.
    #[must_use]
    pub fn occupants(&self, row: usize, column: usize) -> Vec<CellOccupant> {
        let pages = self
            .pages
            .iter()
            .filter(|page| page.area.contains(row, column))
            .map(|page| CellOccupant::Page(page.id));
        let splitters = self
            .splitters
            .iter()
            .filter(|splitter| splitter.area.contains(row, column))
            .map(|splitter| CellOccupant::Splitter(splitter.id));
        pages.chain(splitters).collect()
    }

    /// Returns the single occupant of a cell, or `None` if the cell is empty,
    /// outside the grid, or covered more than once.
    #[must_use]
    pub fn occupant(&self, row: usize, column: usize) -> Option<CellOccupant> {
        match self.occupants(row, column).as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Returns true if every cell of the grid is covered by exactly one page
    /// or splitter and nothing reaches outside the grid.
    #[must_use]
    pub fn is_fully_covered(&self) -> bool {
        let (rows, columns) = (self.row_count(), self.column_count());
        let mut counts = vec![0_usize; rows * columns];
        let areas = self
            .pages
            .iter()
            .map(|page| page.area)
            .chain(self.splitters.iter().map(|splitter| splitter.area));
        for area in areas {
            for (r, c) in area.cells() {
                if r >= rows || c >= columns {
                    return false;
                }
                counts[r * columns + c] += 1;
            }
        }
        counts.iter().all(|&count| count == 1)
    }
}
