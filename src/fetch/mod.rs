// src/fetch/mod.rs

use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::Result;

/// Dataset endpoints published by the Protezione Civile.
pub mod urls {
    /// One row per day, whole country.
    pub const NATIONAL_DATA_URL: &str = "https://raw.githubusercontent.com/pcm-dpc/COVID-19/master/dati-andamento-nazionale/dpc-covid19-ita-andamento-nazionale.csv";

    /// One row per region per day.
    pub const REGIONS_DATA_URL: &str =
        "https://github.com/pcm-dpc/COVID-19/raw/master/dati-regioni/dpc-covid19-ita-regioni.csv";

    /// Regional feed when a region is selected, national otherwise.
    pub fn for_region(region: Option<&str>) -> &'static str {
        match region {
            Some(_) => REGIONS_DATA_URL,
            None => NATIONAL_DATA_URL,
        }
    }
}

/// Build the blocking client used for every fetch.
pub fn client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// GET `url` and return the body as text.
///
/// Transport and body errors are returned. A non-success status is logged
/// and yields an empty string; callers treat that as "no data".
#[tracing::instrument(level = "info", skip(client))]
pub fn get_data(client: &Client, url: &str) -> Result<String> {
    let start = Instant::now();
    let resp = client.get(url).send()?;
    let status = resp.status();

    if !status.is_success() {
        warn!(%status, "non-success status, no data retrieved");
        return Ok(String::new());
    }

    let body = resp.text()?;
    info!(%status, bytes = body.len(), elapsed = ?start.elapsed(), "fetched");
    Ok(body)
}
