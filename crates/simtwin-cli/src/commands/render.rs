//! Terminal rendering of snapshots and history series.

use colored::Colorize;
use serde_json::Value;
use simtwin_core::StateSnapshot;
use simtwin_core::history::HistorySeries;

/// Renders a snapshot: flat maps become an aligned key/value table,
/// anything nested falls back to pretty JSON.
pub fn print_snapshot(snapshot: &StateSnapshot) {
    if snapshot.is_empty() {
        println!("{}", "State is empty or unavailable.".dimmed());
        return;
    }

    if snapshot.is_flat() {
        let width = snapshot.keys().map(String::len).max().unwrap_or(0);
        for (key, value) in snapshot.iter() {
            println!("{:width$}  {}", key.bold(), display_value(value));
        }
    } else {
        match serde_json::to_string_pretty(snapshot) {
            Ok(text) => println!("{text}"),
            Err(_) => println!("{snapshot:?}"),
        }
    }
}

/// Renders a history series as a table: axis column first, then the value
/// columns detected from the first record.
pub fn print_history(series: &HistorySeries) {
    if series.is_empty() {
        println!("{}", "No history data available.".dimmed());
        return;
    }

    let mut header = vec![series.axis_key.clone()];
    header.extend(series.value_keys.iter().cloned());
    println!("{}", header.join("\t").bold());

    for row in &series.rows {
        let mut cells = vec![cell(row, &series.axis_key)];
        for key in &series.value_keys {
            cells.push(cell(row, key));
        }
        println!("{}", cells.join("\t"));
    }

    println!("{}", format!("{} record(s)", series.len()).dimmed());
}

fn cell(row: &StateSnapshot, key: &str) -> String {
    row.get(key).map(display_value).unwrap_or_else(|| "-".to_string())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_value_unquotes_strings() {
        assert_eq!(display_value(&json!("tank")), "tank");
        assert_eq!(display_value(&json!(4.5)), "4.5");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(null)), "null");
    }

    #[test]
    fn missing_cell_renders_a_dash() {
        let row: StateSnapshot = serde_json::from_value(json!({"time": 0})).unwrap();
        assert_eq!(cell(&row, "level"), "-");
        assert_eq!(cell(&row, "time"), "0");
    }
}
