//
//  gerrit-client
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Table output built on `comfy-table`.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde_json::Value;

/// Creates an empty table with the default style.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header(table: &mut Table, names: &[&str], color: bool) {
    if color {
        table.set_header(names.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    } else {
        table.set_header(names.iter().copied());
    }
}

/// Text for one cell. Strings are shown raw, accounts by name, other
/// structures as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(map) => ["name", "username", "email", "_account_id"]
            .iter()
            .find_map(|k| map.get(*k))
            .map(cell_text)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

/// Builds a table from a JSON value.
///
/// - arrays: one row per element with the given columns
/// - objects of objects (`{"name": {...}}`): a `name` column, then the columns
/// - other objects: field/value rows
pub fn value_table(value: &Value, columns: &[&str], color: bool) -> Table {
    let mut table = create_table();
    match value {
        Value::Array(items) => {
            header(&mut table, columns, color);
            for item in items {
                table.add_row(row(item, columns, color));
            }
        }
        Value::Object(map) if !columns.is_empty() && map.values().all(Value::is_object) => {
            let mut names = vec!["name"];
            names.extend(columns.iter().copied().filter(|c| *c != "name"));
            header(&mut table, &names, color);
            for (key, item) in map {
                let mut cells = vec![key.clone()];
                cells.extend(row(item, &names[1..], color));
                table.add_row(cells);
            }
        }
        Value::Object(map) => {
            header(&mut table, &["field", "value"], color);
            for (key, item) in map {
                table.add_row(vec![key.clone(), cell_text(item)]);
            }
        }
        other => {
            table.add_row(vec![cell_text(other)]);
        }
    }
    table
}

fn row(item: &Value, columns: &[&str], color: bool) -> Vec<String> {
    columns
        .iter()
        .map(|column| {
            let text = item.get(*column).map(cell_text).unwrap_or_default();
            if *column == "status" || *column == "state" {
                format_status(&text, color)
            } else {
                text
            }
        })
        .collect()
}

/// Colors change and project states.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_uppercase().as_str() {
        "NEW" | "ACTIVE" => style(status).green().to_string(),
        "MERGED" => style(status).blue().to_string(),
        "ABANDONED" | "HIDDEN" => style(status).red().to_string(),
        "READ_ONLY" => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}
