// src/table/record.rs

use arrow::array::Array;
use chrono::NaiveDateTime;
use serde::Serialize;

use super::catalog::{
    CURRENT_POSITIVES, DEATHS, HOSPITALIZED, ICU_ADMISSIONS, ICU_OCCUPANCY, NEW_POSITIVES,
    POSITIVES_CHANGE, RECOVERED, REGION_NAME, SWABS, TESTED, TOTAL_CASES,
};
use super::Table;
use crate::error::{CovidError, Result};

/// One day of the bulletin, projected out of a [`Table`] row.
///
/// Every field is resolved and type-checked when the row is projected, so
/// later stages never look columns up by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDateTime,
    /// `None` for the national feed.
    pub region: Option<String>,
    pub total_cases: i64,
    pub new_positives: i64,
    pub current_positives: i64,
    pub positives_change: i64,
    pub deaths: i64,
    pub icu_occupancy: i64,
    pub icu_admissions: Option<i64>,
    pub hospitalized: i64,
    pub recovered: i64,
    pub swabs: i64,
    pub tested: Option<i64>,
}

impl Table {
    /// Project row `row` into a [`DailyRecord`].
    pub fn record(&self, row: usize) -> Result<DailyRecord> {
        if row >= self.num_rows() {
            return Err(CovidError::NotEnoughRows {
                needed: row + 1,
                available: self.num_rows(),
            });
        }

        let region = match self.text_column(REGION_NAME) {
            Ok(names) if names.is_valid(row) => Some(names.value(row).to_string()),
            Ok(_) | Err(CovidError::MissingColumn { .. }) => None,
            Err(e) => return Err(e),
        };

        Ok(DailyRecord {
            date: self.date_at(row)?,
            region,
            total_cases: self.required_int(TOTAL_CASES, row)?,
            new_positives: self.required_int(NEW_POSITIVES, row)?,
            current_positives: self.required_int(CURRENT_POSITIVES, row)?,
            positives_change: self.required_int(POSITIVES_CHANGE, row)?,
            deaths: self.required_int(DEATHS, row)?,
            icu_occupancy: self.required_int(ICU_OCCUPANCY, row)?,
            icu_admissions: self.optional_int(ICU_ADMISSIONS, row)?,
            hospitalized: self.required_int(HOSPITALIZED, row)?,
            recovered: self.required_int(RECOVERED, row)?,
            swabs: self.required_int(SWABS, row)?,
            tested: self.optional_int(TESTED, row)?,
        })
    }

    fn optional_int(&self, column: &str, row: usize) -> Result<Option<i64>> {
        let col = self.int_column(column)?;
        Ok(col.is_valid(row).then(|| col.value(row)))
    }

    fn required_int(&self, column: &str, row: usize) -> Result<i64> {
        self.optional_int(column, row)?
            .ok_or_else(|| CovidError::MissingValue {
                column: column.to_string(),
                row,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{COUNTRY_DATA, REGIONAL_DATA};
    use crate::table::load_table;
    use anyhow::Result;

    #[test]
    fn test_record_from_country_row() -> Result<()> {
        let table = load_table(COUNTRY_DATA)?;
        let rec = table.record(3)?;

        assert_eq!(rec.region, None);
        assert_eq!(rec.total_cases, 2107166);
        assert_eq!(rec.new_positives, 23477);
        assert_eq!(rec.deaths, 74159);
        assert_eq!(rec.icu_admissions, Some(202));
        assert_eq!(rec.tested, Some(14871966));
        assert_eq!(rec.date.format("%Y-%m-%d").to_string(), "2020-12-31");
        Ok(())
    }

    #[test]
    fn test_record_carries_region() -> Result<()> {
        let table = load_table(REGIONAL_DATA)?;
        let rec = table.record(4)?;
        assert_eq!(rec.region.as_deref(), Some("Toscana"));
        assert_eq!(rec.total_cases, 120328);
        Ok(())
    }

    #[test]
    fn test_record_out_of_range() -> Result<()> {
        let table = load_table(COUNTRY_DATA)?;
        assert!(matches!(
            table.record(4),
            Err(CovidError::NotEnoughRows { needed: 5, available: 4 })
        ));
        Ok(())
    }

    #[test]
    fn test_null_in_required_column() -> Result<()> {
        let csv = "data,totale_casi,nuovi_positivi,totale_positivi,variazione_totale_positivi,deceduti,terapia_intensiva,totale_ospedalizzati,dimessi_guariti,tamponi\n\
                   2020-03-01T18:00:00,,1,1,1,1,1,1,1,1\n\
                   2020-03-02T18:00:00,5,1,1,1,1,1,1,1,1\n";
        let table = load_table(csv)?;
        let err = table.record(0).unwrap_err();
        assert!(matches!(err, CovidError::MissingValue { ref column, row: 0 } if column == TOTAL_CASES));
        Ok(())
    }
}
