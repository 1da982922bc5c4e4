//! Built-in demo script.

use splitgrid_core::LayoutSettings;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::script::{Replay, parse_script};

/// Editor on the left, a terminal below it, a sidebar on the right that is
/// split twice and then loses its middle pane.
pub const DEMO_SCRIPT: &str = "\
# editor | sidebar
split L0 vertical 0.7
# editor over terminal
split L0 horizontal 0.75
# sidebar split into three
split L1 horizontal
split L3 horizontal
resize S0 0.65
remove L3
";

/// Demo command handler
pub fn cmd_demo(
    settings: LayoutSettings,
    format: OutputFormat,
    show_script: bool,
) -> Result<(), CliError> {
    let lines = parse_script(DEMO_SCRIPT)?;
    let mut replay = Replay::new(settings);
    replay.run(&lines)?;

    if show_script {
        println!("{}", DEMO_SCRIPT.trim_end());
        println!();
    }
    super::print_layout(&replay, format)
}
