use anyhow::{Context, Result};
use clap::Parser;
use covid19::{config::Args, report, Config};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = Config::from(&args);

    // ─── logging: stderr, quiet unless -v or RUST_LOG ────────────────
    let default_filter = if cfg.verbose { "debug" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    debug!(?cfg, "startup");

    let report = covid19::run(&cfg).with_context(|| match &cfg.region {
        Some(region) => format!("building report for region {}", region),
        None => "building national report".to_string(),
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render(&report));
    }

    info!("done");
    Ok(())
}
