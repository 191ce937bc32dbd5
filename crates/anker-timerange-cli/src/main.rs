//! anker-range: resolve a time specification into a concrete date range.

mod config;

use std::fmt::Display;
use std::path::PathBuf;

use anker_timerange::{TimeRangeParser, WeekStart, DEFAULT_SPEC};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, TimeZone};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "anker-range")]
#[command(version, about = "Resolve a time specification into a concrete date range")]
#[command(after_help = "\
Time specifications:
  today            Current day (default)
  yesterday        Previous day
  thisweek         Current week
  lastweek         Previous week
  october 2025     Whole month (also \"2025 oct\", \"März 2025\")
  week 32          Calendar week of the current year
  week 32 2024     Calendar week of a given year
  2025-12-02       Specific date
  2025-12-01..2025-12-31
                   Date range
  last 7 days      Relative range, today included")]
struct Cli {
    /// Time specification
    #[arg(default_value = DEFAULT_SPEC)]
    spec: String,

    /// First day of the week; overrides the config file
    #[arg(short, long)]
    week_start: Option<WeekStart>,

    /// Config file (default: $ANKER_HOME/config.yaml or ~/.anker/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Resolve relative to this RFC 3339 instant instead of the current time
    #[arg(long, value_parser = parse_now)]
    now: Option<DateTime<FixedOffset>>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_now(s: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("'{s}': {e}"))
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the range.
    // Example: RUST_LOG=anker_timerange=debug anker-range lastweek
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("anker_timerange=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(week_start) = cli.week_start {
        config.week_start = week_start;
    }
    let registry = config
        .registry()
        .context("failed to build month registry")?;
    tracing::debug!(
        week_start = %config.week_start,
        locales = ?registry.packs(),
        "configuration loaded"
    );

    let output = match cli.now {
        Some(now) => render(
            &TimeRangeParser::with_now(now, config, &registry),
            &cli.spec,
            cli.format,
        )?,
        None => render(
            &TimeRangeParser::new(config, &registry),
            &cli.spec,
            cli.format,
        )?,
    };
    println!("{output}");
    Ok(())
}

fn render<Tz: TimeZone>(
    parser: &TimeRangeParser<'_, Tz>,
    spec: &str,
    format: OutputFormat,
) -> Result<String>
where
    Tz::Offset: Display,
{
    tracing::debug!(
        spec,
        now = %parser.now().to_rfc3339(),
        week_start = %parser.config().week_start,
        "resolving time specification"
    );
    let range = parser
        .parse(spec)
        .context("invalid time specification")?;
    let summary = range.summary(spec);

    match format {
        OutputFormat::Text => Ok(format!(
            "Period: {}\nFrom:   {}\nTo:     {}",
            summary.label, summary.from, summary.to
        )),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&summary).context("failed to serialize range")
        }
    }
}
