// src/table/catalog.rs

use arrow::datatypes::{DataType, TimeUnit};

/// Date of the bulletin, `YYYY-MM-DDTHH:MM:SS`.
pub const DATE: &str = "data";
/// Region name, only present in the regional dataset.
pub const REGION_NAME: &str = "denominazione_regione";

pub const TOTAL_CASES: &str = "totale_casi";
pub const NEW_POSITIVES: &str = "nuovi_positivi";
pub const CURRENT_POSITIVES: &str = "totale_positivi";
pub const POSITIVES_CHANGE: &str = "variazione_totale_positivi";
pub const DEATHS: &str = "deceduti";
pub const ICU_OCCUPANCY: &str = "terapia_intensiva";
pub const ICU_ADMISSIONS: &str = "ingressi_terapia_intensiva";
pub const HOSPITALIZED: &str = "totale_ospedalizzati";
pub const RECOVERED: &str = "dimessi_guariti";
pub const SWABS: &str = "tamponi";
pub const TESTED: &str = "casi_testati";

/// Format of the `data` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Semantic type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Timestamp,
    Integer,
    Decimal,
    Text,
}

impl ColumnKind {
    /// Arrow storage type for this kind. Every column is nullable.
    pub fn data_type(self) -> DataType {
        match self {
            ColumnKind::Timestamp => DataType::Timestamp(TimeUnit::Second, None),
            ColumnKind::Integer => DataType::Int64,
            ColumnKind::Decimal => DataType::Float64,
            ColumnKind::Text => DataType::Utf8,
        }
    }

    /// Reverse of [`ColumnKind::data_type`]; `None` for types the loader never builds.
    pub fn from_data_type(dt: &DataType) -> Option<Self> {
        match dt {
            DataType::Timestamp(TimeUnit::Second, None) => Some(ColumnKind::Timestamp),
            DataType::Int64 => Some(ColumnKind::Integer),
            DataType::Float64 => Some(ColumnKind::Decimal),
            DataType::Utf8 => Some(ColumnKind::Text),
            _ => None,
        }
    }
}

/// Columns whose type is fixed up front instead of inferred from content.
///
/// The two daily counters were introduced late in the feed, so older rows
/// carry an empty cell. Those cells load as null, never as zero.
pub fn declared_kind(column: &str) -> Option<ColumnKind> {
    match column {
        DATE => Some(ColumnKind::Timestamp),
        ICU_ADMISSIONS | TESTED => Some(ColumnKind::Integer),
        _ => None,
    }
}
