//! Per-resource status report
//!
//! Renders the resource list of a status response as a column-aligned report:
//!
//! ```text
//! ✔ db                COMPLETE
//! • api               FAILED
//! • longnamedfunction UPDATING
//! ```

use crate::provider::Resource;
use crate::terminal::Terminal;

// Fixed escapes so the report is byte-stable whether or not stdout is a tty.
const GREEN: &str = "\x1b[32m";
const BLUE: &str = "\x1b[34m";
const RED: &str = "\x1b[31m";
const WHITE: &str = "\x1b[37m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Visual class of a single resource status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    Complete,
    Error,
    InProgress,
}

impl ResourceState {
    /// Classify a raw status. `COMPLETE` wins over `FAILED`/`ROLLBACK`,
    /// anything unrecognized counts as in progress.
    pub fn classify(status: &str) -> Self {
        if status.contains("COMPLETE") {
            ResourceState::Complete
        } else if status.contains("FAILED") || status.contains("ROLLBACK") {
            ResourceState::Error
        } else {
            ResourceState::InProgress
        }
    }

    fn icon(&self) -> String {
        match self {
            ResourceState::Complete => format!("{GREEN}✔{WHITE}"),
            ResourceState::Error => format!("{RED}•{WHITE}"),
            ResourceState::InProgress => format!("{BLUE}•{WHITE}"),
        }
    }
}

/// Width of the id column: the longest id, or 0 for no resources
pub fn id_width(resources: &[Resource]) -> usize {
    resources
        .iter()
        .map(|r| r.id.chars().count())
        .max()
        .unwrap_or(0)
}

/// Render one resource line without a trailing newline
pub fn format_resource_line(width: usize, resource: &Resource) -> String {
    let state = ResourceState::classify(&resource.status);
    format!(
        "{} {:<width$} {DIM}{}{RESET}",
        state.icon(),
        resource.id,
        resource.status,
        width = width
    )
}

/// Render the whole report, one newline-terminated line per resource
pub fn format_report(resources: &[Resource]) -> String {
    let width = id_width(resources);
    resources
        .iter()
        .map(|r| format_resource_line(width, r) + "\n")
        .collect()
}

/// Clear the terminal and write the report line by line
pub fn print_report(terminal: &dyn Terminal, resources: &[Resource]) {
    terminal.clear();
    let width = id_width(resources);
    for resource in resources {
        terminal.write_line(&format_resource_line(width, resource));
    }
    terminal.write_line("");
}
