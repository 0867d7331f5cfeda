// src/config.rs

use chrono::NaiveDate;
use clap::Parser;
use std::time::Duration;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "covid19", version, about = "Daily stats for covid19 in Italy.")]
pub struct Args {
    /// Region name, exactly as it appears in `denominazione_regione`
    #[arg(short, long)]
    pub region: Option<String>,

    /// Print the regions available in the regional dataset
    #[arg(short = 'a', long = "availables", requires = "region")]
    pub list_regions: bool,

    /// Reference date in yyyy-mm-dd format (default: latest available)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| format!("`{}`: {}", s, e))
}

/// Resolved selection for one run. Built once, then only read.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` selects the national dataset.
    pub region: Option<String>,
    /// `None` selects the most recent day.
    pub date: Option<NaiveDate>,
    pub list_regions: bool,
    pub verbose: bool,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: None,
            date: None,
            list_regions: false,
            verbose: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            region: args.region.clone().filter(|r| !r.is_empty()),
            date: args.date,
            list_regions: args.list_regions,
            verbose: args.verbose,
            timeout: Duration::from_secs(args.timeout),
        }
    }
}
