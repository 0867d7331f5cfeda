// src/locate.rs

use arrow::array::Array;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::error::{CovidError, Result};
use crate::table::{catalog::DATE, DailyRecord, Table};

/// Rows the report compares: the selected day and the two before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayWindow {
    pub today: DailyRecord,
    pub yesterday: DailyRecord,
    pub day_before: DailyRecord,
}

impl DayWindow {
    /// Locate "today" (see [`locate_today`]) and project it together with
    /// the two preceding rows.
    pub fn locate(table: &Table, date: Option<NaiveDate>) -> Result<Self> {
        let today = locate_today(table, date)?;
        Ok(Self {
            today: table.record(today)?,
            yesterday: table.record(previous(today, 1)?)?,
            day_before: table.record(previous(today, 2)?)?,
        })
    }
}

/// Index of the row treated as "today".
///
/// Without a date this is the last row. With a date it is the first row
/// whose timestamp falls in `[date 00:00, date + 24h)`.
pub fn locate_today(table: &Table, date: Option<NaiveDate>) -> Result<usize> {
    if table.is_empty() {
        return Err(CovidError::NotEnoughRows {
            needed: 1,
            available: 0,
        });
    }

    let Some(date) = date else {
        return Ok(table.num_rows() - 1);
    };

    let start = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
    let end = start + Duration::hours(24).num_seconds();

    let dates = table.timestamp_column(DATE)?;
    let found = (0..dates.len())
        .filter(|&i| dates.is_valid(i))
        .find(|&i| (start..end).contains(&dates.value(i)));

    match found {
        Some(idx) => {
            debug!(%date, idx, "located reference date");
            Ok(idx)
        }
        None => Err(CovidError::NoDataForDate { date }),
    }
}

/// `today - back`, or an explicit error when the table does not reach that far.
pub fn previous(today: usize, back: usize) -> Result<usize> {
    today.checked_sub(back).ok_or(CovidError::NotEnoughRows {
        needed: back + 1,
        available: today + 1,
    })
}
