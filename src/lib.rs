// src/lib.rs

pub mod config;
pub mod error;
pub mod fetch;
pub mod locate;
pub mod report;
pub mod table;

use serde::Serialize;
use tracing::{info, warn};

pub use config::Config;
pub use error::{CovidError, Result};
pub use locate::DayWindow;
pub use report::{summarize, Summary};
pub use table::{load_table, DailyRecord, Table};

/// Everything the console needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub region: Option<String>,
    /// Filled only when the caller asked for the region list.
    pub available_regions: Option<Vec<String>>,
    pub summary: Summary,
}

/// Fetch the dataset selected by `cfg` and compute its report.
pub fn run(cfg: &Config) -> Result<Report> {
    let url = fetch::urls::for_region(cfg.region.as_deref());
    let client = fetch::client(cfg.timeout)?;
    let text = fetch::get_data(&client, url)?;
    if text.trim().is_empty() {
        return Err(CovidError::EmptyResponse {
            url: url.to_string(),
        });
    }
    report_from_csv(&text, cfg)
}

/// Everything after the fetch: load, filter, locate, summarize.
pub fn report_from_csv(text: &str, cfg: &Config) -> Result<Report> {
    let table = load_table(text)?;

    let (table, available_regions) = match cfg.region.as_deref() {
        Some(region) => {
            let filtered = table.filter_by_region(region)?;
            if filtered.is_empty() {
                warn!(region, "region matched no rows");
                return Err(CovidError::UnknownRegion {
                    region: region.to_string(),
                    available: table.regions()?,
                });
            }
            let listed = if cfg.list_regions {
                Some(table.regions()?)
            } else {
                None
            };
            (filtered, listed)
        }
        None => (table, None),
    };

    let window = DayWindow::locate(&table, cfg.date)?;
    info!(today = %window.today.date, "computing summary");

    Ok(Report {
        region: cfg.region.clone(),
        available_regions,
        summary: summarize(&window),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    pub const COUNTRY_DATA: &str = r#"
data,stato,ricoverati_con_sintomi,terapia_intensiva,totale_ospedalizzati,isolamento_domiciliare,totale_positivi,variazione_totale_positivi,nuovi_positivi,dimessi_guariti,deceduti,casi_da_sospetto_diagnostico,casi_da_screening,totale_casi,tamponi,casi_testati,note,ingressi_terapia_intensiva,note_test,note_casi
2020-12-28T17:00:00,ITA,23932,2565,26497,548724,575221,-6539,8585,1408686,72370,,,2056277,26114818,14685718,,167,,
2020-12-29T17:00:00,ITA,23662,2549,26211,542517,568728,-6493,11224,1425730,73029,,,2067487,26243558,14731420,,256,,
2020-12-30T17:00:00,ITA,23566,2528,26094,538301,564395,-4333,16202,1445690,73604,,,2083689,26412603,14795168,,175,,
2020-12-31T17:00:00,ITA,23151,2555,25706,544190,569896,5501,23477,1463111,74159,,,2107166,26598607,14871966,,202,,

"#;

    pub const REGIONAL_DATA: &str = r#"
data,stato,codice_regione,denominazione_regione,lat,long,ricoverati_con_sintomi,terapia_intensiva,totale_ospedalizzati,isolamento_domiciliare,totale_positivi,variazione_totale_positivi,nuovi_positivi,dimessi_guariti,deceduti,casi_da_sospetto_diagnostico,casi_da_screening,totale_casi,tamponi,casi_testati,note,ingressi_terapia_intensiva,note_test,note_casi
2020-12-31T17:00:00,ITA,01,Piemonte,45.0732745,7.680687483,2895,190,3085,25172,28257,-702,1367,161649,7922,,,197828,1682529,984809,,7,,
2020-12-31T17:00:00,ITA,16,Puglia,41.12559576,16.86736689,1490,129,1619,51383,53002,262,1661,35490,2472,,,90964,1044314,653907,,11,,
2020-12-31T17:00:00,ITA,20,Sardegna,39.21531192,9.110616306,486,46,532,15921,16453,128,368,13913,747,,,31113,482520,404939,"Si segnala il decesso dei seguenti pz: 1 uomo 79 aa residente nella Città Metropolitana di Cagliari, 1 donna 101 aa residente nella Città Metropolitana di Cagliari",3,,
2020-12-31T17:00:00,ITA,19,Sicilia,38.11569725,13.362356699999998,1069,171,1240,32628,33868,481,1299,57364,2412,,,93644,1219132,812545,,13,,
2020-12-31T17:00:00,ITA,09,Toscana,43.76923077,11.25588885,838,150,988,8690,9678,-59,632,106977,3673,,,120328,1883593,1061504,,3,"Positivi diagnosticati solo con test antigenico rapido: in questo momento non è procedura adottatata da Regione Toscana, pertanto il valore è pari a zero",
"#;

    /// Three days of Piemonte plus one day of Puglia, in feed order.
    pub const REGIONAL_HISTORY: &str = r#"data,stato,codice_regione,denominazione_regione,lat,long,totale_casi,nuovi_positivi,totale_positivi,variazione_totale_positivi,deceduti,terapia_intensiva,ingressi_terapia_intensiva,totale_ospedalizzati,dimessi_guariti,tamponi,casi_testati,note
2020-12-29T17:00:00,ITA,01,Piemonte,45.0732745,7.680687483,194855,1100,29500,-800,7800,200,,3200,157555,1660000,970000,
2020-12-29T17:00:00,ITA,16,Puglia,41.12559576,16.86736689,87000,1500,52000,200,2400,130,10,1600,32600,1020000,640000,
2020-12-30T17:00:00,ITA,01,Piemonte,45.0732745,7.680687483,196461,1606,28959,-541,7860,195,9,3150,159642,1671000,977000,
2020-12-31T17:00:00,ITA,01,Piemonte,45.0732745,7.680687483,197828,1367,28257,-702,7922,190,7,3085,161649,1682529,984809,"nota, con virgola"
"#;

    pub fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,covid19=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}
