use chrono::{Duration, Local, NaiveDate};
use clap::Parser;
use thiserror::Error;

const DEFAULT_INPUT_PATH: &str = "My Clippings.txt";
const DEFAULT_OUTPUT_PATH: &str = "clippings.csv";

#[derive(Parser, Debug)]
#[command(name = "kindle-clippings")]
#[command(about = "Convert a Kindle My Clippings.txt export into CSV")]
pub struct CliArgs {
    /// Path to My Clippings.txt
    pub input: Option<String>,

    /// Path of the CSV file to write
    pub output: Option<String>,

    /// Also store clippings in this SQLite database, skipping duplicates
    #[arg(short, long)]
    pub database: Option<String>,

    /// Only keep clippings added on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Only keep clippings added on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Only keep clippings from the last N days (mutually exclusive with --from/--to)
    #[arg(short, long)]
    pub last: Option<u32>,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_path: String,
    pub output_path: String,
    pub database_path: Option<String>,
    pub date_range: Option<DateRange>,
    pub verbose: bool,
}

#[derive(Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid date format: '{0}'. Expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Invalid date range: --from must be before or equal to --to")]
    InvalidDateRange,

    #[error("Use --from/--to OR --last, not both")]
    MutuallyExclusiveFlags,

    #[error("Use --from together with --to")]
    MissingFromDate,

    #[error("Invalid --last value: {0} days reaches before the earliest supported date")]
    InvalidLast(u32),
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let cli = CliArgs::parse();
        Self::from_args(cli, Local::now().date_naive())
    }

    fn from_args(cli: CliArgs, today: NaiveDate) -> Result<Self, ConfigError> {
        let date_range = resolve_dates(&cli, today)?;

        let input_path = cli
            .input
            .or_else(|| std::env::var("CLIPPINGS_PATH").ok())
            .unwrap_or_else(|| DEFAULT_INPUT_PATH.to_string());

        let output_path = cli
            .output
            .or_else(|| std::env::var("OUTPUT_PATH").ok())
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

        let database_path = cli
            .database
            .or_else(|| std::env::var("DATABASE_PATH").ok());

        Ok(Config {
            input_path,
            output_path,
            database_path,
            date_range,
            verbose: cli.verbose,
        })
    }
}

fn resolve_dates(cli: &CliArgs, today: NaiveDate) -> Result<Option<DateRange>, ConfigError> {
    let has_from_to = cli.from.is_some() || cli.to.is_some();

    if has_from_to && cli.last.is_some() {
        return Err(ConfigError::MutuallyExclusiveFlags);
    }

    if let Some(days) = cli.last {
        let from = today
            .checked_sub_signed(Duration::days(days as i64))
            .ok_or(ConfigError::InvalidLast(days))?;
        return Ok(Some(DateRange { from, to: today }));
    }

    if cli.to.is_some() && cli.from.is_none() {
        return Err(ConfigError::MissingFromDate);
    }

    let Some(ref from_str) = cli.from else {
        return Ok(None);
    };

    let from = parse_date(from_str)?;
    let to = match &cli.to {
        Some(to_str) => parse_date(to_str)?,
        None => today,
    };

    if from > to {
        return Err(ConfigError::InvalidDateRange);
    }

    Ok(Some(DateRange { from, to }))
}

fn parse_date(s: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDateFormat(s.to_string()))
}
