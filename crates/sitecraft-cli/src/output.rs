//! Table rendering helpers.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use serde_json::Value;
use sitecraft_theme::ApplyReport;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// A two-column table with a styled header.
pub fn key_value_table(headers: [&str; 2]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(headers[0]).add_attribute(Attribute::Bold),
        Cell::new(headers[1]).add_attribute(Attribute::Bold),
    ]);
    apply_table_style(&mut table);
    table
}

pub fn check_cell(included: bool) -> Cell {
    if included {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value)
        .fg(Color::DarkGrey)
        .add_attribute(Attribute::Dim)
}

/// Flatten a JSON object into `(dotted.path, rendered value)` rows.
pub fn flatten_json(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into(value, String::new(), &mut rows);
    rows
}

fn flatten_into(value: &Value, prefix: String, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, path, rows);
            }
        }
        Value::String(text) => rows.push((prefix, text.clone())),
        other => rows.push((prefix, other.to_string())),
    }
}

/// One line describing a style pass.
pub fn describe_pass(report: &ApplyReport) -> String {
    let mut line = format!("style pass {}: {} variable(s) written", report.pass, report.writes);
    if report.style_cache_hit {
        line.push_str(", style cache hit");
    }
    if !report.failed.is_empty() {
        let failed: Vec<&str> = report.failed.iter().map(|family| family.as_str()).collect();
        line.push_str(&format!(", failed: {}", failed.join(", ")));
    }
    line
}
