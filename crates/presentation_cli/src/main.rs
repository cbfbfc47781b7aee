//! CrossingWatch CLI
//!
//! Runs the polling daemon or fetches a one-shot snapshot.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use infrastructure::{App, AppConfig, init_telemetry};

/// CrossingWatch CLI
#[derive(Parser)]
#[command(name = "crossingwatch")]
#[command(author, version, about = "Visual Crossing weather poller", long_about = None)]
struct Cli {
    /// Path to the configuration file (default: ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the polling daemon until interrupted
    Run,

    /// Fetch one snapshot and print it
    Fetch {
        /// Print the full snapshot as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("failed to load configuration")?,
    };

    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.telemetry.log_filter = filter.to_string();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run => run_daemon(&config).await,
        Commands::Fetch { json } => fetch_once(&config, json).await,
    }
}

async fn run_daemon(config: &AppConfig) -> anyhow::Result<()> {
    let app = App::start(config)?;
    info!("daemon started, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    info!("shutting down");
    app.shutdown();
    Ok(())
}

async fn fetch_once(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let app = App::build(config)?;
    app.refresh_once().await;

    let weather = app.weather();
    let precipitation = app.precipitation();

    if !weather.available() && !precipitation.available() {
        anyhow::bail!("both fetches failed; check the API key and network");
    }

    if json {
        let totals = precipitation.totals().map(|t| {
            serde_json::json!({
                "last_24h_mm": t.last_24h,
                "last_7d_mm": t.last_7d,
                "next_24h_mm": t.next_24h,
                "next_7d_mm": t.next_7d,
            })
        });
        let body = serde_json::json!({
            "weather": weather.snapshot().as_deref(),
            "rainfall": totals,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if let Some(snapshot) = weather.snapshot() {
        let current = &snapshot.current;
        println!("Conditions: {}", current.condition);
        if let Some(temperature) = current.temperature {
            println!("Temperature: {temperature:.1} °C");
        }
        if let Some(humidity) = current.humidity {
            println!("Humidity: {humidity:.0} %");
        }
        if let Some(wind_speed) = current.wind_speed {
            println!("Wind: {wind_speed:.1} km/h");
        }
        println!("Forecast days: {}", snapshot.daily.len());
    } else {
        eprintln!("weather fetch failed");
    }

    if let Some(totals) = precipitation.totals() {
        println!("Rain last 24h: {:.2} mm", totals.last_24h);
        println!("Rain last 7d:  {:.2} mm", totals.last_7d);
        println!("Rain next 24h: {:.2} mm", totals.next_24h);
        println!("Rain next 7d:  {:.2} mm", totals.next_7d);
    } else {
        eprintln!("precipitation fetch failed");
    }

    Ok(())
}
