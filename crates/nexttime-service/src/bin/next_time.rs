use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use nexttime_core::config::load_config;
use nexttime_rfc::rfc::ical::expand::TimeZoneResolver;
use nexttime_service::schedule::{Direction, ScheduleResolver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionArg {
    Next,
    Previous,
}

impl From<DirectionArg> for Direction {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Next => Direction::Next,
            DirectionArg::Previous => Direction::Previous,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "next-time",
    about = "Next or previous fire time of an iCalendar schedule",
    version
)]
struct Cli {
    /// iCalendar file holding the schedule; reads stdin when omitted or `-`
    calendar: Option<PathBuf>,

    /// Reference instant (RFC 3339); defaults to now
    #[arg(short, long)]
    reference: Option<String>,

    /// Default timezone for floating schedules (IANA, Windows or city name)
    #[arg(short, long)]
    zone: Option<String>,

    #[arg(short, long, value_enum, default_value = "next")]
    direction: DirectionArg,

    /// Print Unix seconds instead of RFC 3339, `0` when nothing fires
    #[arg(long)]
    epoch: bool,
}

fn read_calendar(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_path() != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read calendar from {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read calendar from stdin")?;
            Ok(text)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    if let Err(e) = tracing_log::LogTracer::init() {
        tracing::debug!(error = %e, "Log bridge already installed");
    }

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping warn");
    }

    let reference = cli
        .reference
        .as_deref()
        .map(|value| {
            DateTime::parse_from_rfc3339(value)
                .map(|instant| instant.with_timezone(&Utc))
                .with_context(|| format!("Invalid reference time {value}"))
        })
        .transpose()?;

    let resolver = ScheduleResolver::from_settings(Arc::new(TimeZoneResolver::builtin()), &config)?;
    let text = read_calendar(cli.calendar.as_ref())?;

    let found = resolver.resolve(&text, reference, cli.zone.as_deref(), cli.direction.into())?;

    match (found, cli.epoch) {
        (Some(instant), false) => println!("{}", instant.to_rfc3339()),
        (Some(instant), true) => println!("{}", instant.timestamp()),
        (None, false) => println!("none"),
        (None, true) => println!("0"),
    }

    Ok(())
}
