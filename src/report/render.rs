// src/report/render.rs

use super::{Metric, MetricDelta, Ratio, RatioDelta, Summary};
use crate::Report;

const NOT_AVAILABLE: &str = "N/A";
const RULE_WIDTH: usize = 92;

fn metric_label(metric: Metric) -> &'static str {
    match metric {
        Metric::TotalCases => "Totale casi",
        Metric::NewPositives => "Nuovi casi",
        Metric::CurrentPositives => "Totale positivi",
        Metric::PositivesChange => "Variazione positivi",
        Metric::Deaths => "Totale decessi",
        Metric::IcuOccupancy => "Terapia intensiva",
        Metric::IcuAdmissions => "Ingressi in intensiva",
        Metric::Hospitalized => "Ospedalizzati",
        Metric::Recovered => "Dimessi",
        Metric::Swabs => "Totale tamponi",
        Metric::Tested => "Totale testati",
    }
}

fn ratio_label(ratio: Ratio) -> &'static str {
    match ratio {
        Ratio::Mortality => "Mortalità",
        Ratio::IntensiveCare => "Terapia intensiva",
        Ratio::Hospitalization => "Ricoverati",
        Ratio::Recovery => "Guariti",
    }
}

/// Console text for a report, Italian number formatting.
pub fn render(report: &Report) -> String {
    let mut out = String::from("Covid19 - dati sintetici\n\n");

    if let Some(region) = &report.region {
        out.push_str(&format!("regione selezionata: {}\n", region));
    }
    if let Some(regions) = &report.available_regions {
        out.push_str(&format!("\nregioni disponibili: {}\n", regions.join(", ")));
    }

    out.push_str(&render_summary(&report.summary));
    out
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = format!(
        "\n{:<24}{:>20}{:>20}{:>28}\n{}\n\n",
        format!("Aggiornamento: {}", summary.today.format("%d/%m/%Y")),
        "Ultimi",
        "Precedenti",
        "Differenza (%)",
        "-".repeat(RULE_WIDTH),
    );

    for m in &summary.metrics {
        out.push_str(&metric_line(m));
        if m.metric == Metric::Deaths {
            out.push_str(&format!(
                "{:<24}{:>20}{:>20}\n",
                "Variazione decessi:",
                group_thousands(summary.deaths_trend.today),
                group_thousands(summary.deaths_trend.yesterday),
            ));
        }
    }

    out.push('\n');
    for r in &summary.ratios {
        out.push_str(&ratio_line(r));
    }
    out
}

fn metric_line(m: &MetricDelta) -> String {
    format!(
        "{:<24}{:>20}{:>20}{:>16} ({:>9})\n",
        format!("{}:", metric_label(m.metric)),
        opt_int(m.today),
        opt_int(m.yesterday),
        opt_int(m.delta),
        opt_pct(m.pct_delta),
    )
}

fn ratio_line(r: &RatioDelta) -> String {
    format!(
        "{:<24}{:>20}{:>20}{:>16} ({:>9})\n",
        format!("{}:", ratio_label(r.ratio)),
        opt_pct(r.today),
        opt_pct(r.yesterday),
        opt_pct(r.delta),
        opt_pct(r.pct_delta),
    )
}

fn opt_int(v: Option<i64>) -> String {
    v.map(group_thousands)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn opt_pct(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{}%", decimal_comma(v)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `2107166` → `2.107.166`
pub fn group_thousands(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Two decimals with a comma separator: `3.5193` → `3,52`
pub fn decimal_comma(v: f64) -> String {
    format!("{:.2}", v).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::COUNTRY_DATA;
    use crate::locate::DayWindow;
    use crate::report::summarize;
    use crate::table::load_table;
    use anyhow::Result;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(2107166), "2.107.166");
        assert_eq!(group_thousands(-6539), "-6.539");
        assert_eq!(group_thousands(-100), "-100");
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(decimal_comma(3.519301), "3,52");
        assert_eq!(decimal_comma(-0.004), "-0,00");
    }

    #[test]
    fn test_render_report() -> Result<()> {
        let table = load_table(COUNTRY_DATA)?;
        let summary = summarize(&DayWindow::locate(&table, None)?);
        let report = Report {
            region: None,
            available_regions: None,
            summary,
        };

        let text = render(&report);
        assert!(text.starts_with("Covid19 - dati sintetici"));
        assert!(text.contains("Aggiornamento: 31/12/2020"));
        assert!(text.contains("2.107.166"));
        assert!(text.contains("23.477"));
        assert!(text.contains("Variazione decessi:"));
        assert!(text.contains("3,52%"));
        assert!(!text.contains("regione selezionata"));
        Ok(())
    }

    #[test]
    fn test_render_missing_values() -> Result<()> {
        let table = load_table(COUNTRY_DATA)?;
        let mut window = DayWindow::locate(&table, None)?;
        window.yesterday.tested = None;
        let report = Report {
            region: Some("Lazio".into()),
            available_regions: Some(vec!["Lazio".into(), "Molise".into()]),
            summary: summarize(&window),
        };

        let text = render(&report);
        let tested = text
            .lines()
            .find(|l| l.starts_with("Totale testati:"))
            .unwrap();
        assert!(tested.contains(NOT_AVAILABLE));
        assert!(text.contains("regione selezionata: Lazio"));
        assert!(text.contains("regioni disponibili: Lazio, Molise"));
        Ok(())
    }
}
