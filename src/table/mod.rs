// src/table/mod.rs

pub mod catalog;
pub mod derive;
pub mod loader;
pub mod record;

use arrow::{
    array::{Array, BooleanArray, Int64Array, StringArray, TimestampSecondArray},
    compute::filter_record_batch,
    record_batch::RecordBatch,
    util::pretty::pretty_format_batches,
};
use chrono::{DateTime, NaiveDateTime};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::error::{CovidError, Result};
use catalog::{ColumnKind, DATE, REGION_NAME};

pub use loader::load_table;
pub use record::DailyRecord;

/// Typed, column-oriented view of one CSV feed.
///
/// Rows keep file order. Operations that drop rows return a new `Table`,
/// the receiver is never modified.
#[derive(Debug, Clone)]
pub struct Table {
    batch: RecordBatch,
}

impl Table {
    pub(crate) fn from_batch(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn column_kind(&self, column: &str) -> Result<ColumnKind> {
        let schema = self.batch.schema();
        let field = schema
            .field_with_name(column)
            .map_err(|_| missing(column))?;
        ColumnKind::from_data_type(field.data_type()).ok_or_else(|| unexpected(column))
    }

    pub fn timestamp_column(&self, column: &str) -> Result<&TimestampSecondArray> {
        self.batch
            .column_by_name(column)
            .ok_or_else(|| missing(column))?
            .as_any()
            .downcast_ref::<TimestampSecondArray>()
            .ok_or_else(|| unexpected(column))
    }

    pub fn int_column(&self, column: &str) -> Result<&Int64Array> {
        self.batch
            .column_by_name(column)
            .ok_or_else(|| missing(column))?
            .as_any()
            .downcast_ref::<Int64Array>()
            .ok_or_else(|| unexpected(column))
    }

    pub fn text_column(&self, column: &str) -> Result<&StringArray> {
        self.batch
            .column_by_name(column)
            .ok_or_else(|| missing(column))?
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| unexpected(column))
    }

    /// Timestamp of the `data` column at `row`.
    pub fn date_at(&self, row: usize) -> Result<NaiveDateTime> {
        let dates = self.timestamp_column(DATE)?;
        if row >= dates.len() || dates.is_null(row) {
            return Err(CovidError::MissingValue {
                column: DATE.to_string(),
                row,
            });
        }
        seconds_to_datetime(dates.value(row)).ok_or_else(|| CovidError::MissingValue {
            column: DATE.to_string(),
            row,
        })
    }

    /// Keep only the rows whose region name equals `region` exactly.
    ///
    /// No match gives an empty table, not an error.
    #[tracing::instrument(level = "debug", skip(self), fields(rows = self.num_rows()))]
    pub fn filter_by_region(&self, region: &str) -> Result<Table> {
        let names = self.text_column(REGION_NAME)?;
        let mask: BooleanArray = names.iter().map(|v| Some(v == Some(region))).collect();
        let filtered = filter_record_batch(&self.batch, &mask)?;
        info!(region, kept = filtered.num_rows(), "filtered by region");
        Ok(Table::from_batch(filtered))
    }

    /// Sorted, de-duplicated region names.
    pub fn regions(&self) -> Result<Vec<String>> {
        let names = self.text_column(REGION_NAME)?;
        let set: BTreeSet<&str> = names.iter().flatten().collect();
        Ok(set.into_iter().map(str::to_string).collect())
    }

    /// Dump the last `n` rows at debug level.
    pub fn log_tail(&self, n: usize) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        let len = self.num_rows().min(n);
        let tail = self.batch.slice(self.num_rows() - len, len);
        match pretty_format_batches(&[tail]) {
            Ok(text) => debug!("last {} rows:\n{}", len, text),
            Err(e) => warn!("cannot format table tail: {}", e),
        }
    }
}

pub(crate) fn seconds_to_datetime(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

fn missing(column: &str) -> CovidError {
    CovidError::MissingColumn {
        column: column.to_string(),
    }
}

fn unexpected(column: &str) -> CovidError {
    CovidError::UnexpectedType {
        column: column.to_string(),
    }
}
