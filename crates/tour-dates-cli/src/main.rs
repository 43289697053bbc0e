mod config;
mod logging;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tour_dates::{
    country_counts, parse_timezone, CountryFilter, Dataset, PartialDate, SortOrder, TourView,
    ViewState,
};

use crate::config::FileConfig;

#[derive(Parser)]
#[command(name = "tour", version, about = "List upcoming and past concerts from a tour dataset")]
struct Cli {
    /// JSON dataset of concerts
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// IANA timezone in which concert days start (default: host timezone)
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// TOML file with default settings
    #[arg(long, global = true, env = "TOUR_DATES_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show upcoming concerts, and optionally past ones
    List(ListArgs),
    /// Show the countries available for filtering
    Countries,
    /// Report records whose dates cannot be parsed
    Check,
    /// Resolve a single DD-MM-YYYY date
    ParseDate {
        /// Date such as 15-06-2024 or ??-06-2024
        date: String,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Country code, or ALL
    #[arg(long)]
    country: Option<String>,

    /// asc (earliest first) or desc (latest first)
    #[arg(long)]
    order: Option<String>,

    /// Also list past concerts
    #[arg(long, overrides_with = "no_history")]
    history: bool,

    /// Hide past concerts, even if the config file shows them
    #[arg(long, overrides_with = "history")]
    no_history: bool,

    /// RFC 3339 instant to treat as "now" (default: current time)
    #[arg(long)]
    now: Option<String>,
}

impl ListArgs {
    /// `None` when neither `--history` nor `--no-history` was given.
    fn history(&self) -> Option<bool> {
        match (self.history, self.no_history) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct CountryCount<'a> {
    country: &'a str,
    concerts: usize,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    total: usize,
    invalid: &'a [tour_dates::InvalidRecord],
}

#[derive(Serialize)]
struct ParsedDate<'a> {
    input: &'a str,
    date: String,
    precision: tour_dates::DatePrecision,
    local: String,
    utc: String,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = FileConfig::load_optional(cli.config.as_deref())?;
    let timezone = cli.timezone.clone().or_else(|| config.defaults.timezone.clone());

    match timezone {
        Some(name) => {
            let tz = parse_timezone(&name)?;
            tracing::debug!(timezone = %name, "using configured timezone");
            run(&cli, &config, &tz)
        }
        None => run(&cli, &config, &Local),
    }
}

fn run<Z: TimeZone>(cli: &Cli, config: &FileConfig, tz: &Z) -> Result<ExitCode>
where
    Z::Offset: std::fmt::Display,
{
    match &cli.command {
        Command::List(args) => {
            let dataset = load_dataset(cli, config)?;
            let state = view_state(args, config)?;
            let now = match &args.now {
                Some(s) => parse_now(s)?,
                None => Utc::now(),
            };
            tracing::debug!(
                country = %state.country,
                order = %state.order,
                show_history = state.show_history,
                now = %now.to_rfc3339(),
                "building listing"
            );

            let invalid = dataset
                .validate(tz)
                .into_iter()
                .filter(|entry| state.country.matches(&entry.record));
            for entry in invalid {
                tracing::warn!(
                    index = entry.index,
                    date = %entry.record.date,
                    "unparseable date, listed as the oldest past concert"
                );
            }

            let view = TourView::build(dataset.records(), &state, now, tz);
            match cli.format {
                Format::Text => print!("{}", render::tour_view(&view)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&view)?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Countries => {
            let dataset = load_dataset(cli, config)?;
            let counts = country_counts(&dataset);
            match cli.format {
                Format::Text => print!("{}", render::countries(dataset.len(), &counts)),
                Format::Json => {
                    let rows: Vec<CountryCount> = counts
                        .iter()
                        .map(|&(country, concerts)| CountryCount { country, concerts })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => {
            let dataset = load_dataset(cli, config)?;
            let invalid = dataset.validate(tz);
            match cli.format {
                Format::Text => print!("{}", render::check_report(dataset.len(), &invalid)),
                Format::Json => {
                    let report = CheckReport {
                        total: dataset.len(),
                        invalid: &invalid,
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
            if invalid.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                tracing::error!(count = invalid.len(), "dataset contains invalid dates");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::ParseDate { date } => {
            let partial: PartialDate = date.parse()?;
            let utc = partial.local_midnight(tz)?;
            let local = utc.with_timezone(tz).to_rfc3339();
            let utc = utc.to_rfc3339();
            match cli.format {
                Format::Text => print!("{}", render::parsed_date(date, &partial, &local, &utc)),
                Format::Json => {
                    let parsed = ParsedDate {
                        input: date,
                        date: partial.resolve().to_string(),
                        precision: partial.precision(),
                        local,
                        utc,
                    };
                    println!("{}", serde_json::to_string_pretty(&parsed)?);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_dataset(cli: &Cli, config: &FileConfig) -> Result<Dataset> {
    let path: &Path = cli
        .dataset
        .as_deref()
        .or(config.defaults.dataset.as_deref())
        .ok_or_else(|| anyhow!("no dataset given: pass --dataset or set defaults.dataset"))?;
    let dataset = Dataset::from_path(path)?;
    tracing::debug!(path = %path.display(), records = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// Flags first, then the config file, then the built-in defaults.
fn view_state(args: &ListArgs, config: &FileConfig) -> Result<ViewState> {
    let defaults = &config.defaults;

    let country = match args.country.as_deref().or(defaults.country.as_deref()) {
        Some(s) => s.parse::<CountryFilter>()?,
        None => CountryFilter::All,
    };
    let order = match args.order.as_deref().or(defaults.order.as_deref()) {
        Some(s) => s.parse::<SortOrder>()?,
        None => SortOrder::default(),
    };
    let show_history = args.history().or(defaults.show_history).unwrap_or(false);

    Ok(ViewState {
        country,
        order,
        show_history,
    })
}

fn parse_now(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid --now '{}': expected RFC 3339", s))
}
