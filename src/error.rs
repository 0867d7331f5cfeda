// src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

/// Everything that can stop a report run.
#[derive(Error, Debug)]
pub enum CovidError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no data retrieved from {url}")]
    EmptyResponse { url: String },

    #[error("dataset is empty, no header line")]
    EmptyDataset,

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("columnar error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("row {row}: cannot parse timestamp `{value}`")]
    InvalidTimestamp { row: usize, value: String },

    #[error("row {row}: column `{column}` is not an integer: `{value}`")]
    InvalidInteger {
        column: String,
        row: usize,
        value: String,
    },

    #[error("row {row}: column `{column}` is not a number: `{value}`")]
    InvalidDecimal {
        column: String,
        row: usize,
        value: String,
    },

    #[error("column `{column}` not found")]
    MissingColumn { column: String },

    #[error("column `{column}` has an unexpected type")]
    UnexpectedType { column: String },

    #[error("row {row}: column `{column}` has no value")]
    MissingValue { column: String, row: usize },

    #[error("nessun dato alla data specificata ({date})")]
    NoDataForDate { date: NaiveDate },

    #[error("need at least {needed} rows up to the selected day, found {available}")]
    NotEnoughRows { needed: usize, available: usize },

    #[error("unknown region `{region}`; available: {}", .available.join(", "))]
    UnknownRegion {
        region: String,
        available: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, CovidError>;
