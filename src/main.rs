use anyhow::Context;
use clap::Parser;
use stayboard::{cli::Cli, report};
use stayboard_core::{config::Config, load_path};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/stayboard-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("stayboard debug log started, tail -f /tmp/stayboard-debug.log");
    }

    let config = match &cli.config {
        Some(path) => Config::from_sources(Some(path.clone()))
            .with_context(|| format!("reading config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "config unavailable, using defaults");
            Config::defaults()
        }),
    };

    let path = cli.path.clone().unwrap_or_else(|| config.data.path.clone());
    let table = load_path(&path).with_context(|| format!("loading {}", path.display()))?;

    if cli.summary {
        let filters = cli.filters();
        let report = report::build(&table, &filters, &config.charts);
        println!("{}", report::to_json(&report)?);
        return Ok(());
    }

    stayboard_tui::run(table, config)
}
