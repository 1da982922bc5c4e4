//! Layout output formatting.

use std::fmt::Write as _;

use serde::Serialize;
use splitgrid_core::{CellOccupant, GridArea, Layout, NodeId, Orientation, TrackDefinition};

use crate::error::CliError;
use crate::script::Replay;

/// Formats a layout as a track summary, a cell map and placement tables.
#[must_use]
pub fn format_table(replay: &Replay, layout: &Layout) -> String {
    let labels = replay.labels();
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Grid: {} rows x {} columns",
        layout.row_count(),
        layout.column_count()
    );
    let _ = writeln!(output, "Rows:    {}", track_summary(layout.rows()));
    let _ = writeln!(output, "Columns: {}", track_summary(layout.columns()));
    output.push('\n');

    // Cell map
    let cell_names: Vec<Vec<String>> = (0..layout.row_count())
        .map(|row| {
            (0..layout.column_count())
                .map(|column| match layout.occupant(row, column) {
                    Some(CellOccupant::Page(id) | CellOccupant::Splitter(id)) => labels.name(id),
                    None => "?".to_string(),
                })
                .collect()
        })
        .collect();
    let cell_width = cell_names
        .iter()
        .flatten()
        .map(String::len)
        .max()
        .unwrap_or(1);
    for row in &cell_names {
        let line: Vec<String> = row
            .iter()
            .map(|name| format!("{name:<cell_width$}"))
            .collect();
        let _ = writeln!(output, "{}", line.join(" ").trim_end());
    }
    output.push('\n');

    // Pages
    let name_width = layout
        .pages()
        .iter()
        .map(|page| labels.name(page.id).len())
        .chain(layout.splitters().iter().map(|s| labels.name(s.id).len()))
        .max()
        .unwrap_or(4)
        .max(8);
    let _ = writeln!(
        output,
        "{:<name_width$}  {:<3}  {:<3}  {:<7}  {:<7}",
        "PAGE", "ROW", "COL", "ROWSPAN", "COLSPAN"
    );
    for page in layout.pages() {
        let _ = writeln!(
            output,
            "{:<name_width$}  {}",
            labels.name(page.id),
            area_columns(&page.area)
        );
    }

    if !layout.splitters().is_empty() {
        output.push('\n');
        let _ = writeln!(
            output,
            "{:<name_width$}  {:<3}  {:<3}  {:<7}  {:<7}  {:<11}  RATIO",
            "SPLITTER", "ROW", "COL", "ROWSPAN", "COLSPAN", "ORIENTATION"
        );
        for splitter in layout.splitters() {
            let ratio = replay
                .ratio(splitter.id)
                .map_or_else(|| "-".to_string(), |r| format!("{r:.2}"));
            let _ = writeln!(
                output,
                "{:<name_width$}  {}  {:<11}  {ratio}",
                labels.name(splitter.id),
                area_columns(&splitter.area),
                splitter.orientation.to_string().to_lowercase(),
            );
        }
    }

    output.trim_end().to_string()
}

fn track_summary(tracks: &[TrackDefinition]) -> String {
    tracks
        .iter()
        .map(|track| if track.is_splitter { "splitter" } else { "content" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn area_columns(area: &GridArea) -> String {
    format!(
        "{:<3}  {:<3}  {:<7}  {:<7}",
        area.row, area.column, area.row_span, area.column_span
    )
}

/// Page placement in JSON output
#[derive(Serialize)]
struct PageOutput {
    label: String,
    id: NodeId,
    #[serde(flatten)]
    area: GridArea,
}

/// Splitter placement in JSON output
#[derive(Serialize)]
struct SplitterOutput {
    label: String,
    id: NodeId,
    orientation: Orientation,
    ratio: Option<f64>,
    #[serde(flatten)]
    area: GridArea,
}

/// Layout in JSON output
#[derive(Serialize)]
struct LayoutOutput {
    rows: Vec<bool>,
    columns: Vec<bool>,
    pages: Vec<PageOutput>,
    splitters: Vec<SplitterOutput>,
}

/// Formats a layout as JSON. Track entries are `true` for splitter tracks.
///
/// # Errors
///
/// Returns `CliError::Output` if JSON serialization fails.
pub fn format_json(replay: &Replay, layout: &Layout) -> Result<String, CliError> {
    let labels = replay.labels();
    let output = LayoutOutput {
        rows: layout.rows().iter().map(|t| t.is_splitter).collect(),
        columns: layout.columns().iter().map(|t| t.is_splitter).collect(),
        pages: layout
            .pages()
            .iter()
            .map(|page| PageOutput {
                label: labels.name(page.id),
                id: page.id,
                area: page.area,
            })
            .collect(),
        splitters: layout
            .splitters()
            .iter()
            .map(|splitter| SplitterOutput {
                label: labels.name(splitter.id),
                id: splitter.id,
                orientation: splitter.orientation,
                ratio: replay.ratio(splitter.id),
                area: splitter.area,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::Output(format!("Failed to serialize to JSON: {e}")))
}
