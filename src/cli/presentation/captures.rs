//! Capture listing presentation.

use super::shared::to_json;
use crate::capture::View;
use comfy_table::Table;
use serde_json::json;
use std::path::PathBuf;

/// Queue contents oldest first; previews are left out of both renderings.
pub fn format_captures(view: View, paths: &[PathBuf], format: &str) -> String {
    if format == "json" {
        return to_json(&json!({ "view": view, "captures": paths }));
    }
    if paths.is_empty() {
        return format!("No captures in the {} view.", view);
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Path"]);
    for (i, path) in paths.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), path.display().to_string()]);
    }
    format!("View: {}\n{}", view, table)
}
