//! Output formatting utilities for the CLI.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use console::style;
use serde::Serialize;
use serde_json::Value;

use crate::domain::models::{value_text, RankedEntry};

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Create a borderless list table with the given headers.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Render the table under a count line.
pub fn render_list(singular: &str, plural: &str, table: &Table, total: usize) -> String {
    if total == 0 {
        return format!("No {plural} found.");
    }
    let noun = if total == 1 { singular } else { plural };
    format!("{} {noun}:\n{table}", style(total).bold())
}

/// Display text of an entry field, `-` when absent.
pub fn field(entry: &RankedEntry, key: &str) -> String {
    entry
        .get(key)
        .and_then(value_text)
        .unwrap_or_else(|| "-".to_string())
}

/// Table of ranking entries with the common columns.
pub fn entries_table(entries: &[RankedEntry]) -> Table {
    let mut table = list_table(&["rank", "company", "industry", "year", "month"]);
    for entry in entries {
        table.add_row(vec![
            field(entry, "ranking"),
            field(entry, "company"),
            field(entry, "industry"),
            field(entry, "year"),
            field(entry, "month"),
        ]);
    }
    table
}
