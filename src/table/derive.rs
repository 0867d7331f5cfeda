// src/table/derive.rs

use tracing::debug;

use super::catalog::{declared_kind, ColumnKind};

/// Pick a kind for every header:
///  - declared columns keep their catalog kind
///  - otherwise scan every non-empty cell of the column
///  - all integers ⇒ Integer, all numbers ⇒ Decimal, anything else ⇒ Text
///  - no samples at all ⇒ Text
pub fn derive_kinds(headers: &[String], rows: &[Vec<String>]) -> Vec<ColumnKind> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if let Some(kind) = declared_kind(name) {
                return kind;
            }
            let kind = infer_column(rows.iter().filter_map(|r| r.get(idx)).map(String::as_str));
            debug!(column = %name, ?kind, "inferred column kind");
            kind
        })
        .collect()
}

fn infer_column<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut seen: Option<ColumnKind> = None;

    for cell in cells {
        if cell.is_empty() {
            continue;
        }
        let kind = infer_cell(cell);
        seen = match (seen, kind) {
            (_, ColumnKind::Text) => return ColumnKind::Text,
            (None, k) => Some(k),
            // an integer column widens once a decimal shows up
            (Some(ColumnKind::Integer), ColumnKind::Decimal) => Some(ColumnKind::Decimal),
            (Some(prev), _) => Some(prev),
        };
    }

    seen.unwrap_or(ColumnKind::Text)
}

fn infer_cell(v: &str) -> ColumnKind {
    if v.parse::<i64>().is_ok() {
        ColumnKind::Integer
    } else if v.bytes().any(|b| b.is_ascii_digit()) && v.parse::<f64>().is_ok() {
        ColumnKind::Decimal
    } else {
        ColumnKind::Text
    }
}
