// src/report/mod.rs

pub mod render;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::locate::DayWindow;
use crate::table::{catalog, DailyRecord};

pub use render::render;

/// Integer counters compared day over day, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    TotalCases,
    NewPositives,
    CurrentPositives,
    PositivesChange,
    Deaths,
    IcuOccupancy,
    IcuAdmissions,
    Hospitalized,
    Recovered,
    Swabs,
    Tested,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::TotalCases,
        Metric::NewPositives,
        Metric::CurrentPositives,
        Metric::PositivesChange,
        Metric::Deaths,
        Metric::IcuOccupancy,
        Metric::IcuAdmissions,
        Metric::Hospitalized,
        Metric::Recovered,
        Metric::Swabs,
        Metric::Tested,
    ];

    /// Source column in the feed.
    pub fn column(self) -> &'static str {
        match self {
            Metric::TotalCases => catalog::TOTAL_CASES,
            Metric::NewPositives => catalog::NEW_POSITIVES,
            Metric::CurrentPositives => catalog::CURRENT_POSITIVES,
            Metric::PositivesChange => catalog::POSITIVES_CHANGE,
            Metric::Deaths => catalog::DEATHS,
            Metric::IcuOccupancy => catalog::ICU_OCCUPANCY,
            Metric::IcuAdmissions => catalog::ICU_ADMISSIONS,
            Metric::Hospitalized => catalog::HOSPITALIZED,
            Metric::Recovered => catalog::RECOVERED,
            Metric::Swabs => catalog::SWABS,
            Metric::Tested => catalog::TESTED,
        }
    }

    pub fn value(self, rec: &DailyRecord) -> Option<i64> {
        match self {
            Metric::TotalCases => Some(rec.total_cases),
            Metric::NewPositives => Some(rec.new_positives),
            Metric::CurrentPositives => Some(rec.current_positives),
            Metric::PositivesChange => Some(rec.positives_change),
            Metric::Deaths => Some(rec.deaths),
            Metric::IcuOccupancy => Some(rec.icu_occupancy),
            Metric::IcuAdmissions => rec.icu_admissions,
            Metric::Hospitalized => Some(rec.hospitalized),
            Metric::Recovered => Some(rec.recovered),
            Metric::Swabs => Some(rec.swabs),
            Metric::Tested => rec.tested,
        }
    }
}

/// Shares of total cases, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Ratio {
    Mortality,
    IntensiveCare,
    Hospitalization,
    Recovery,
}

impl Ratio {
    pub const ALL: [Ratio; 4] = [
        Ratio::Mortality,
        Ratio::IntensiveCare,
        Ratio::Hospitalization,
        Ratio::Recovery,
    ];

    /// `100 * numerator / total_cases`, `None` when there are no cases.
    pub fn value(self, rec: &DailyRecord) -> Option<f64> {
        let numerator = match self {
            Ratio::Mortality => rec.deaths,
            Ratio::IntensiveCare => rec.icu_occupancy,
            Ratio::Hospitalization => rec.hospitalized,
            Ratio::Recovery => rec.recovered,
        };
        percent(numerator as f64, rec.total_cases as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDelta {
    pub metric: Metric,
    pub today: Option<i64>,
    pub yesterday: Option<i64>,
    pub delta: Option<i64>,
    /// Percent change relative to yesterday.
    pub pct_delta: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioDelta {
    pub ratio: Ratio,
    pub today: Option<f64>,
    pub yesterday: Option<f64>,
    pub delta: Option<f64>,
    /// Percent change of the ratio itself.
    pub pct_delta: Option<f64>,
}

/// Daily deaths for the selected day and the day before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeathsTrend {
    pub today: i64,
    pub yesterday: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub today: NaiveDateTime,
    pub yesterday: NaiveDateTime,
    pub metrics: Vec<MetricDelta>,
    pub deaths_trend: DeathsTrend,
    pub ratios: Vec<RatioDelta>,
}

/// Day-over-day comparison of the rows in `window`.
///
/// Pure: the same window always gives the same summary. Any value that
/// would need a division by zero, or reads an absent count, is `None`.
pub fn summarize(window: &DayWindow) -> Summary {
    let DayWindow {
        today,
        yesterday,
        day_before,
    } = window;

    let metrics = Metric::ALL
        .iter()
        .map(|&metric| {
            let t = metric.value(today);
            let y = metric.value(yesterday);
            let delta = t.zip(y).map(|(t, y)| t - y);
            let pct_delta = delta.zip(y).and_then(|(d, y)| percent(d as f64, y as f64));
            MetricDelta {
                metric,
                today: t,
                yesterday: y,
                delta,
                pct_delta,
            }
        })
        .collect();

    let ratios = Ratio::ALL
        .iter()
        .map(|&ratio| {
            let t = ratio.value(today);
            let y = ratio.value(yesterday);
            let delta = t.zip(y).map(|(t, y)| t - y);
            let pct_delta = delta.zip(y).and_then(|(d, y)| percent(d, y));
            RatioDelta {
                ratio,
                today: t,
                yesterday: y,
                delta,
                pct_delta,
            }
        })
        .collect();

    Summary {
        today: today.date,
        yesterday: yesterday.date,
        metrics,
        deaths_trend: DeathsTrend {
            today: today.deaths - yesterday.deaths,
            yesterday: yesterday.deaths - day_before.deaths,
        },
        ratios,
    }
}

/// `100 * part / whole`, `None` on a zero denominator.
pub fn percent(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 {
        None
    } else {
        Some(100.0 * part / whole)
    }
}

impl Summary {
    pub fn metric(&self, metric: Metric) -> Option<&MetricDelta> {
        self.metrics.iter().find(|m| m.metric == metric)
    }

    pub fn ratio(&self, ratio: Ratio) -> Option<&RatioDelta> {
        self.ratios.iter().find(|r| r.ratio == ratio)
    }
}
