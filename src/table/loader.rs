// src/table/loader.rs

use arrow::{
    array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder, TimestampSecondBuilder},
    datatypes::{Field, Schema},
    record_batch::RecordBatch,
};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use std::sync::Arc;
use tracing::{debug, info};

use super::catalog::{ColumnKind, TIMESTAMP_FORMAT};
use super::derive::derive_kinds;
use super::Table;
use crate::error::{CovidError, Result};

/// The CSV as read, before typing.
#[derive(Debug)]
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Parse CSV text (header line first) into a typed [`Table`].
///
/// The returned table owns its columns; `text` is not referenced afterwards.
#[tracing::instrument(level = "info", skip(text), fields(bytes = text.len()))]
pub fn load_table(text: &str) -> Result<Table> {
    if text.trim().is_empty() {
        return Err(CovidError::EmptyDataset);
    }
    let raw = read_raw(text)?;
    let kinds = derive_kinds(&raw.headers, &raw.rows);

    let mut fields = Vec::with_capacity(raw.headers.len());
    let mut columns = Vec::with_capacity(raw.headers.len());
    for (idx, (name, kind)) in raw.headers.iter().zip(&kinds).enumerate() {
        fields.push(Field::new(name, kind.data_type(), true));
        columns.push(build_column(name, *kind, raw.rows.iter().map(|r| r[idx].as_str()))?);
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    let table = Table::from_batch(batch);
    info!(rows = table.num_rows(), columns = kinds.len(), "table loaded");
    table.log_tail(10);

    Ok(table)
}

fn read_raw(text: &str) -> Result<RawTable> {
    let text = text.trim_matches(|c| c == '\n' || c == '\r');
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    debug!(headers = headers.len(), rows = rows.len(), "read raw csv");

    Ok(RawTable { headers, rows })
}

/// Build one Arrow column. Empty cells become nulls for every kind except
/// timestamps, where they are a parse error like any other malformed date.
fn build_column<'a>(
    name: &str,
    kind: ColumnKind,
    cells: impl Iterator<Item = &'a str>,
) -> Result<ArrayRef> {
    let col: ArrayRef = match kind {
        ColumnKind::Timestamp => {
            let mut b = TimestampSecondBuilder::new();
            for (row, cell) in cells.enumerate() {
                let ts = parse_timestamp(cell).ok_or_else(|| CovidError::InvalidTimestamp {
                    row,
                    value: cell.to_string(),
                })?;
                b.append_value(ts.and_utc().timestamp());
            }
            Arc::new(b.finish())
        }
        ColumnKind::Integer => {
            let mut b = Int64Builder::new();
            for (row, cell) in cells.enumerate() {
                if cell.is_empty() {
                    b.append_null();
                    continue;
                }
                let v = cell.parse::<i64>().map_err(|_| CovidError::InvalidInteger {
                    column: name.to_string(),
                    row,
                    value: cell.to_string(),
                })?;
                b.append_value(v);
            }
            Arc::new(b.finish())
        }
        ColumnKind::Decimal => {
            let mut b = Float64Builder::new();
            for (row, cell) in cells.enumerate() {
                if cell.is_empty() {
                    b.append_null();
                    continue;
                }
                let v = cell.parse::<f64>().map_err(|_| CovidError::InvalidDecimal {
                    column: name.to_string(),
                    row,
                    value: cell.to_string(),
                })?;
                b.append_value(v);
            }
            Arc::new(b.finish())
        }
        ColumnKind::Text => {
            let mut b = StringBuilder::new();
            for cell in cells {
                if cell.is_empty() {
                    b.append_null();
                } else {
                    b.append_value(cell);
                }
            }
            Arc::new(b.finish())
        }
    };
    Ok(col)
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).ok()
}
