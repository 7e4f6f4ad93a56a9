//! CLI presentation: value map and candidate formatters.

use crate::error::{ConfigurationError, StoreError};
use crate::types::ValueMap;
use serde::Serialize;

/// One row of the candidate listing
#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
    pub path: String,
    pub origin: String,
    /// `None` when the existence probe failed
    pub exists: Option<bool>,
}

fn to_pretty_json(value: &serde_json::Value) -> Result<String, ConfigurationError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ConfigurationError::Store(StoreError::Codec(e.to_string())))
}

fn value_map_lines(map: &ValueMap, indent: &str) -> Vec<String> {
    map.iter()
        .map(|(key, value)| format!("{}{} = {}", indent, key, value))
        .collect()
}

/// Format a resolved value map as `key = value` lines or pretty JSON
pub fn format_value_map(map: &ValueMap, format: &str) -> Result<String, ConfigurationError> {
    if format == "json" {
        return to_pretty_json(&map.to_json());
    }
    if map.is_empty() {
        return Ok("No configuration values.".to_string());
    }
    Ok(value_map_lines(map, "").join("\n"))
}

/// Format collection members, one block per member in collection order
pub fn format_value_maps(maps: &[ValueMap], format: &str) -> Result<String, ConfigurationError> {
    if format == "json" {
        let items: Vec<serde_json::Value> = maps.iter().map(|m| m.to_json()).collect();
        return to_pretty_json(&serde_json::Value::Array(items));
    }
    if maps.is_empty() {
        return Ok("Collection is empty.".to_string());
    }
    let mut lines = Vec::new();
    for (i, map) in maps.iter().enumerate() {
        lines.push(format!("[{}]", i + 1));
        if map.is_empty() {
            lines.push("  (no values)".to_string());
        }
        lines.extend(value_map_lines(map, "  "));
    }
    Ok(lines.join("\n"))
}

pub fn format_candidates_text(rows: &[CandidateRow]) -> String {
    use comfy_table::Table;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Path", "Origin", "Exists"]);
    for (i, row) in rows.iter().enumerate() {
        let exists = match row.exists {
            Some(true) => "yes",
            Some(false) => "no",
            None => "error",
        };
        table.add_row(vec![
            (i + 1).to_string(),
            row.path.clone(),
            row.origin.clone(),
            exists.to_string(),
        ]);
    }
    table.to_string()
}

pub fn format_candidates_json(rows: &[CandidateRow]) -> Result<String, ConfigurationError> {
    let value = serde_json::json!({ "candidates": rows });
    to_pretty_json(&value)
}
